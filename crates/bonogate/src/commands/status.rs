//! `bonogate status` — report readiness without touching the network.

use crate::cli::GlobalOpts;
use crate::error::{CliError, exit_code};
use crate::output;

pub fn handle(global: &GlobalOpts) -> Result<i32, CliError> {
    // Missing credentials are the thing this command reports, not a failure.
    let ready = match super::load_config(global) {
        Ok(config) => super::build_client(config)?.ready(),
        Err(CliError::NoCredentials { .. }) => false,
        Err(other) => return Err(other),
    };

    output::print_status(ready, &global.output);
    Ok(exit_code::SUCCESS)
}
