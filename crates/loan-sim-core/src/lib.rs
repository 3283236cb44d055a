pub mod catalog;
pub mod error;
pub mod installment;
pub mod rates;
pub mod schedule;
pub mod simulation;
pub mod types;
pub mod validation;

pub use error::{LoanSimError, ValidationError};
pub use simulation::{run_simulation, simulate, simulate_with_metadata};
pub use types::*;

/// Standard result type for all loan-sim operations
pub type LoanSimResult<T> = Result<T, LoanSimError>;
