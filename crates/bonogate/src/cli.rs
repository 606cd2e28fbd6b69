//! Clap derive structures for the `bonogate` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bonogate -- validate BonosVip voucher codes from the command line
#[derive(Debug, Parser)]
#[command(
    name = "bonogate",
    version,
    about = "Validate BonosVip voucher codes from the command line",
    long_about = "A gateway to the BonosVip partner portal.\n\n\
        The portal has no API: bonogate maintains an authenticated session\n\
        (from a configured cookie or a portal account login) and turns the\n\
        portal's HTML answers into structured validation results.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Portal base URL (overrides config)
    #[arg(long, env = "BONOSVIP_PORTAL", global = true)]
    pub portal: Option<String>,

    /// Validator display name sent with every validation call
    #[arg(long, env = "BONOSVIP_VALIDATOR", global = true)]
    pub validator: Option<String>,

    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Request timeout in seconds
    #[arg(long, env = "BONOSVIP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Plain,
    /// Pretty-printed JSON (Make.com-compatible shape)
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a voucher code against the portal
    #[command(alias = "v")]
    Validate(ValidateArgs),

    /// Force a fresh portal login and report the result
    Login,

    /// Report whether credential material is configured (no network)
    Status,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Voucher code in H-Q-S form (e.g. 1332-8584OGDTFXURK-1)
    pub code: String,

    /// Include the raw portal response body in the output
    #[arg(long)]
    pub raw: bool,
}
