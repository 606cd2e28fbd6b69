//! Output rendering for validation outcomes and status reports.

use bonogate_api::ValidationOutcome;

use crate::cli::OutputFormat;

/// Render a validation outcome to stdout.
///
/// The raw portal body is withheld unless `include_raw` is set; it is HTML
/// noise for humans but useful when auditing a classification.
pub fn print_outcome(outcome: &ValidationOutcome, format: &OutputFormat, include_raw: bool) {
    match format {
        OutputFormat::Json => {
            let mut view = outcome.clone();
            if !include_raw {
                view.raw_body = String::new();
            }
            match serde_json::to_string_pretty(&view) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("failed to render JSON: {err}"),
            }
        }
        OutputFormat::Plain => {
            println!("{}", if outcome.valid { "VALID" } else { "INVALID" });
            if !outcome.service.is_empty() {
                println!("Service:  {}", outcome.service);
            }
            if !outcome.customer.is_empty() {
                println!("Customer: {}", outcome.customer);
            }
            if let Some(ref message) = outcome.error_message {
                println!("Error:    {message}");
            }
            if include_raw {
                println!("--- raw response ---");
                println!("{}", outcome.raw_body);
            }
        }
    }
}

/// Render the readiness report (the `status` command).
pub fn print_status(ready: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Json => println!("{{\"ready\": {ready}}}"),
        OutputFormat::Plain => println!("ready: {ready}"),
    }
}
