use std::error::Error as _;
use std::path::Path;

use badge_dl::{Error, PersistenceError, ToExitCode, ValidationError};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_success(&self, path: &Path) {
        println!("Badge generated successfully at: {}", path.display());
    }

    pub fn print_error(&self, error: &Error) {
        eprintln!("Error: {}", describe(error));

        if self.verbose {
            eprintln!("\nError details ({}):", error.error_code());
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
        }
    }
}

/// One-line message for each failure kind
fn describe(error: &Error) -> String {
    match error {
        Error::Validation(ValidationError::MissingField { field }) => {
            format!("Missing required input: {}", field)
        }
        Error::Validation(ValidationError::MissingFields { fields }) => {
            format!("Missing required inputs: {}", fields.join(", "))
        }
        Error::Validation(ValidationError::InvalidOption { option, reason }) => {
            format!("Invalid --{}: {}", option, reason)
        }
        Error::Transport { url, message } => {
            format!("Could not reach the badge service ({}): {}", url, message)
        }
        Error::HttpStatus { url, code } => {
            format!("Badge service returned HTTP {} for {}", code, url)
        }
        Error::Persistence(PersistenceError::NotWritable { path }) => {
            format!("Directory is not writable: {}", path.display())
        }
        Error::Persistence(e) => format!("Failed to save badge: {}", e),
        other => other.to_string(),
    }
}
