use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::installment::{fixed_installment, MIN_INSTALLMENT};
use crate::rates::{effective_monthly_rate, report_rate};
use crate::schedule::build_schedule;
use crate::types::*;
use crate::validation::validate;
use crate::LoanSimResult;

/// Run a full fixed-installment simulation.
///
/// Validates first and does no arithmetic on rejected input. The unrounded
/// monthly rate drives the installment and the schedule; only the reported
/// `effective_monthly_rate` is rounded. `total_paid` is the installment times
/// the term, which the schedule's terminal correction guarantees equals the
/// sum of every period's interest and principal.
pub fn simulate(
    product: &ProductTerms,
    request: &LoanRequest,
) -> Result<SimulationResult, ValidationError> {
    validate(product, request)?;

    let monthly_rate = effective_monthly_rate(product.annual_nominal_rate_percent);
    let installment = fixed_installment(request.requested_amount, monthly_rate, request.term_months);
    let schedule = build_schedule(
        request.requested_amount,
        monthly_rate,
        installment,
        request.term_months,
    );

    let total_paid = installment
        .checked_mul(Decimal::from(request.term_months))
        .ok_or(ValidationError::InvalidAmount)?;

    Ok(SimulationResult {
        effective_monthly_rate: report_rate(monthly_rate),
        monthly_installment: installment,
        total_paid,
        schedule,
    })
}

/// Simulate a loan against an embedded product and wrap the result in the
/// standard output envelope.
pub fn run_simulation(
    input: &SimulationInput,
) -> LoanSimResult<ComputationOutput<SimulationResult>> {
    simulate_with_metadata(&input.product, &input.loan_request())
}

/// Same as [`run_simulation`] for callers that already hold the product and
/// request separately (e.g. after a catalog lookup).
pub fn simulate_with_metadata(
    product: &ProductTerms,
    request: &LoanRequest,
) -> LoanSimResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();

    let result = simulate(product, request).map_err(|e| {
        info!(product = %product.name, error = %e, "simulation rejected");
        e
    })?;

    debug!(
        product = %product.name,
        amount = %request.requested_amount,
        term = request.term_months,
        installment = %result.monthly_installment,
        "simulation complete"
    );

    let warnings = collect_warnings(product, request, &result);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-installment amortization (French system)",
        &serde_json::json!({
            "product": product.name,
            "annual_nominal_rate_percent": product.annual_nominal_rate_percent.to_string(),
            "requested_amount": request.requested_amount.to_string(),
            "term_months": request.term_months,
            "rate_conversion": "annual compound, (1 + i)^(1/12) - 1",
            "rounding": "half away from zero; 2 dp money, 6 dp reported rate",
        }),
        warnings,
        elapsed,
        result,
    ))
}

fn collect_warnings(
    product: &ProductTerms,
    request: &LoanRequest,
    result: &SimulationResult,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if product.annual_nominal_rate_percent.is_zero() {
        warnings.push("Zero-rate product: installment is principal divided by term".into());
        if result.total_paid != request.requested_amount {
            warnings.push(format!(
                "Principal does not split evenly into cents over {} months; total paid is {}",
                request.term_months, result.total_paid
            ));
        }
    } else if result.total_paid < request.requested_amount {
        warnings.push(format!(
            "Installment rounding leaves total paid ({}) below the requested amount",
            result.total_paid
        ));
    }

    if result.monthly_installment == MIN_INSTALLMENT {
        warnings.push("Installment raised to the 0.01 minimum".into());
    }

    if let Some(last) = result.schedule.last() {
        if last.interest.is_sign_negative() && !last.interest.is_zero() {
            warnings.push(format!(
                "Final period interest is negative ({}) after terminal rounding correction",
                last.interest
            ));
        }
    }

    warnings
}
