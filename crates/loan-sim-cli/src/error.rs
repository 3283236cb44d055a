use loan_sim_core::LoanSimError;
use thiserror::Error;

/// Exit code for a rejected product or request.
pub const EXIT_INVALID: i32 = 2;
/// Exit code for a product id that is not in the catalog.
pub const EXIT_NOT_FOUND: i32 = 3;
/// Exit code for anything else.
pub const EXIT_INTERNAL: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LoanSimError),

    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(LoanSimError::Validation(_)) => EXIT_INVALID,
            CliError::Core(LoanSimError::ProductNotFound { .. }) => EXIT_NOT_FOUND,
            CliError::Usage(_) | CliError::Json(_) | CliError::Config(_) => EXIT_INVALID,
            _ => EXIT_INTERNAL,
        }
    }

    /// The message shown to the user. Internal failures stay opaque; their
    /// detail only goes to the log.
    pub fn user_message(&self) -> String {
        match self.exit_code() {
            EXIT_INVALID => match self {
                CliError::Core(LoanSimError::Validation(e)) => e.to_string(),
                other => other.to_string(),
            },
            EXIT_NOT_FOUND => "not found".to_string(),
            _ => "internal error, check the logs".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
