use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use loan_sim_core::rates::{effective_monthly_rate, report_rate};
use loan_sim_core::types::{ProductTerms, SimulationInput};
use loan_sim_core::validation;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Run a simulation from a JSON `SimulationInput` (product embedded) and
/// return the output envelope as JSON.
#[napi]
pub fn simulate_loan(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_sim_core::run_simulation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Effective monthly rate for an annual nominal percentage, as a 6 dp string.
#[napi]
pub fn monthly_rate(annual_nominal_rate_percent: String) -> NapiResult<String> {
    let annual = Decimal::from_str(annual_nominal_rate_percent.trim()).map_err(to_napi_error)?;
    let product = ProductTerms::new("rate check", annual, 1);
    validation::validate_product(&product).map_err(to_napi_error)?;
    Ok(report_rate(effective_monthly_rate(annual)).to_string())
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Validate a JSON `ProductTerms`; resolves to the trimmed product or rejects
/// with the validation message.
#[napi]
pub fn validate_product(input_json: String) -> NapiResult<String> {
    let product: ProductTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let product = ProductTerms::new(
        &product.name,
        product.annual_nominal_rate_percent,
        product.max_term_months,
    );
    validation::validate_product(&product).map_err(to_napi_error)?;
    serde_json::to_string(&product).map_err(to_napi_error)
}
