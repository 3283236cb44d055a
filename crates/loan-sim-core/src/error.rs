use thiserror::Error;

/// A rejected product definition or simulation request.
///
/// Every variant is a deterministic precondition failure; none of them is
/// worth retrying with the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name must be between 5 and 50 characters")]
    InvalidProductName,

    #[error("Annual interest rate must be between 0 and 100%")]
    InvalidRate,

    #[error("Maximum term must be between 1 and 720 months")]
    InvalidTerm,

    #[error("Requested amount must be between 1.00 and 1000000000000000.00")]
    InvalidAmount,

    #[error("Requested term is shorter than the minimum")]
    TermTooShort,

    #[error("Requested term is longer than the product's maximum")]
    TermTooLong,
}

#[derive(Debug, Error)]
pub enum LoanSimError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Product {id} not found")]
    ProductNotFound { id: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanSimError {
    fn from(e: serde_json::Error) -> Self {
        LoanSimError::SerializationError(e.to_string())
    }
}
