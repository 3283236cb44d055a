use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless the field name says percent.
pub type Rate = Decimal;

/// A loan product as defined by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTerms {
    pub name: String,
    /// Annual nominal rate as a percentage (18 = 18% a year).
    pub annual_nominal_rate_percent: Decimal,
    pub max_term_months: u32,
}

impl ProductTerms {
    /// Build a product, trimming surrounding whitespace from the name.
    pub fn new(name: &str, annual_nominal_rate_percent: Decimal, max_term_months: u32) -> Self {
        Self {
            name: name.trim().to_string(),
            annual_nominal_rate_percent,
            max_term_months,
        }
    }
}

/// The borrower's side of a simulation: how much, for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub requested_amount: Money,
    pub term_months: u32,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// 1-based month number
    pub month: u32,
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub interest: Money,
    pub principal_paid: Money,
}

/// Output of a single fixed-installment simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Compound monthly rate, rounded to 6 dp for reporting
    pub effective_monthly_rate: Rate,
    pub monthly_installment: Money,
    pub total_paid: Money,
    pub schedule: Vec<PaymentPeriod>,
}

/// A simulation with the product embedded in the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub product: ProductTerms,
    pub requested_amount: Money,
    pub term_months: u32,
}

impl SimulationInput {
    pub fn loan_request(&self) -> LoanRequest {
        LoanRequest {
            requested_amount: self.requested_amount,
            term_months: self.term_months,
        }
    }
}

/// A simulation referencing a catalog product by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub product_id: u32,
    pub requested_amount: Money,
    pub term_months: u32,
}

impl SimulationRequest {
    pub fn loan_request(&self) -> LoanRequest {
        LoanRequest {
            requested_amount: self.requested_amount,
            term_months: self.term_months,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
