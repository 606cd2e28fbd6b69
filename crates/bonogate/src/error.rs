//! CLI error types with miette diagnostics.
//!
//! Maps `bonogate_api::Error` and `ConfigError` variants into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use bonogate_config::ConfigError;

/// Exit codes. `REJECTED` is not an error: the call succeeded and the
/// portal declined the voucher.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("Malformed voucher code '{code}'")]
    #[diagnostic(
        code(bonogate::malformed_code),
        help(
            "Codes look like 1332-8584OGDTFXURK-1: three dash-separated segments.\n\
             Reason: {reason}"
        )
    )]
    MalformedCode { code: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No usable credentials configured")]
    #[diagnostic(
        code(bonogate::no_credentials),
        help(
            "Set BONOSVIP_COOKIES to a session cookie string, or\n\
             BONOSVIP_EMAIL and BONOSVIP_PASSWORD for account login.\n\
             Config file: {path}"
        )
    )]
    NoCredentials { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(bonogate::config))]
    Config { message: String },

    // ── Portal ───────────────────────────────────────────────────────
    #[error("Portal rejected our credentials")]
    #[diagnostic(
        code(bonogate::auth_failed),
        help(
            "The stored session has likely expired.\n\
             Refresh BONOSVIP_COOKIES, or check the account password.\n\
             Detail: {message}"
        )
    )]
    AuthFailed { message: String },

    #[error("Request to the portal timed out")]
    #[diagnostic(code(bonogate::timeout), help("Increase --timeout or retry later."))]
    Timeout,

    #[error("Could not reach the portal")]
    #[diagnostic(
        code(bonogate::connection),
        help("Check network access to the portal URL.")
    )]
    Connection {
        #[source]
        source: bonogate_api::Error,
    },

    #[error("Unexpected portal response (HTTP {status})")]
    #[diagnostic(
        code(bonogate::portal_error),
        help("The portal may be down for maintenance; not retried.")
    )]
    Portal { status: u16 },
}

impl CliError {
    /// Map this error to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedCode { .. } => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NoCredentials { .. } | Self::Config { .. } => exit_code::CONFIG,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Connection { .. } | Self::Portal { .. } => exit_code::CONNECTION,
        }
    }
}

impl From<bonogate_api::Error> for CliError {
    fn from(err: bonogate_api::Error) -> Self {
        use bonogate_api::Error;
        match err {
            Error::Format { code, reason } => Self::MalformedCode { code, reason },
            Error::Config { message } => Self::Config { message },
            Error::Auth { message } => Self::AuthFailed { message },
            Error::UnexpectedStatus { status } => Self::Portal { status },
            Error::Transport(ref e) if e.is_timeout() => Self::Timeout,
            other @ (Error::Transport(_) | Error::InvalidUrl(_) | Error::Parse { .. }) => {
                Self::Connection { source: other }
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials => Self::NoCredentials {
                path: bonogate_config::config_path().display().to_string(),
            },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
