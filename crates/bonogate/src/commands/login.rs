//! `bonogate login` — force a fresh portal login.
//!
//! Useful for checking credentials without burning a voucher code. With a
//! static cookie source this just re-validates the configured cookie's shape.

use crate::cli::GlobalOpts;
use crate::error::{CliError, exit_code};

pub async fn handle(global: &GlobalOpts) -> Result<i32, CliError> {
    let config = super::load_config(global)?;
    let client = super::build_client(config)?;

    client.force_login().await?;

    println!("login ok (session {:?})", client.session_state());
    Ok(exit_code::SUCCESS)
}
