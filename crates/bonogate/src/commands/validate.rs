//! `bonogate validate <CODE>` — submit one voucher code.

use bonogate_api::VoucherCode;
use tracing::info;

use crate::cli::{GlobalOpts, ValidateArgs};
use crate::error::{CliError, exit_code};
use crate::output;

pub async fn handle(args: ValidateArgs, global: &GlobalOpts) -> Result<i32, CliError> {
    // Parse before touching configuration or the network: a malformed code
    // is a usage error regardless of what is configured.
    let code: VoucherCode = args.code.parse().map_err(CliError::from)?;

    let config = super::load_config(global)?;
    let client = super::build_client(config)?;

    info!(code = %code, "validating voucher");
    let outcome = client.submit(&code).await?;

    output::print_outcome(&outcome, &global.output, args.raw);

    Ok(if outcome.valid {
        exit_code::SUCCESS
    } else {
        exit_code::REJECTED
    })
}
