use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ValidationError;
use crate::types::{LoanRequest, ProductTerms};

pub const NAME_MIN_CHARS: usize = 5;
pub const NAME_MAX_CHARS: usize = 50;
pub const RATE_MIN_PERCENT: Decimal = dec!(0);
pub const RATE_MAX_PERCENT: Decimal = dec!(100);
pub const TERM_MIN_MONTHS: u32 = 1;
pub const TERM_MAX_MONTHS: u32 = 720;
pub const AMOUNT_MIN: Decimal = dec!(1.00);
/// Largest principal accepted. At the 100% / 720-month extreme the total paid
/// stays around 43x the principal, far inside `Decimal`'s range.
pub const AMOUNT_MAX: Decimal = dec!(1000000000000000.00);

/// Check a product definition on its own. Name length is counted in chars
/// after trimming whitespace.
pub fn validate_product(product: &ProductTerms) -> Result<(), ValidationError> {
    let name_len = product.name.trim().chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
        return Err(ValidationError::InvalidProductName);
    }

    let rate = product.annual_nominal_rate_percent;
    if rate < RATE_MIN_PERCENT || rate > RATE_MAX_PERCENT {
        return Err(ValidationError::InvalidRate);
    }

    if !(TERM_MIN_MONTHS..=TERM_MAX_MONTHS).contains(&product.max_term_months) {
        return Err(ValidationError::InvalidTerm);
    }

    Ok(())
}

/// Check a product together with a request against it, failing on the first
/// violated rule.
pub fn validate(product: &ProductTerms, request: &LoanRequest) -> Result<(), ValidationError> {
    validate_product(product)?;

    if request.requested_amount < AMOUNT_MIN || request.requested_amount > AMOUNT_MAX {
        return Err(ValidationError::InvalidAmount);
    }
    if request.term_months < TERM_MIN_MONTHS {
        return Err(ValidationError::TermTooShort);
    }
    if request.term_months > product.max_term_months {
        return Err(ValidationError::TermTooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductTerms {
        ProductTerms::new("Emprestimo Valido", dec!(18), 12)
    }

    fn request(amount: Decimal, term: u32) -> LoanRequest {
        LoanRequest {
            requested_amount: amount,
            term_months: term,
        }
    }

    #[test]
    fn test_limits_are_ordered() {
        assert!(TERM_MIN_MONTHS > 0);
        assert!(TERM_MAX_MONTHS > TERM_MIN_MONTHS);
        assert!(RATE_MAX_PERCENT > RATE_MIN_PERCENT);
        assert!(NAME_MAX_CHARS > NAME_MIN_CHARS);
    }

    #[test]
    fn test_valid_inputs_pass() {
        assert_eq!(validate(&product(), &request(dec!(1000), 12)), Ok(()));
        assert_eq!(validate(&product(), &request(dec!(1.00), 1)), Ok(()));
    }

    #[test]
    fn test_name_length_bounds() {
        let mut p = product();
        p.name = "abcd".into();
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidProductName));
        p.name = "abcde".into();
        assert_eq!(validate_product(&p), Ok(()));
        p.name = "x".repeat(50);
        assert_eq!(validate_product(&p), Ok(()));
        p.name = "x".repeat(51);
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidProductName));
    }

    #[test]
    fn test_name_is_trimmed_before_counting() {
        let mut p = product();
        p.name = "   abcd   ".into();
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidProductName));
    }

    #[test]
    fn test_name_counts_chars_not_bytes() {
        let mut p = product();
        // 5 chars, 10 bytes
        p.name = "ééééé".into();
        assert_eq!(validate_product(&p), Ok(()));
    }

    #[test]
    fn test_rate_bounds() {
        let mut p = product();
        p.annual_nominal_rate_percent = dec!(-1);
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidRate));
        p.annual_nominal_rate_percent = dec!(101);
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidRate));
        p.annual_nominal_rate_percent = dec!(0);
        assert_eq!(validate_product(&p), Ok(()));
        p.annual_nominal_rate_percent = dec!(100);
        assert_eq!(validate_product(&p), Ok(()));
    }

    #[test]
    fn test_max_term_bounds() {
        let mut p = product();
        p.max_term_months = 0;
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidTerm));
        p.max_term_months = 721;
        assert_eq!(validate_product(&p), Err(ValidationError::InvalidTerm));
        p.max_term_months = 720;
        assert_eq!(validate_product(&p), Ok(()));
    }

    #[test]
    fn test_request_rejections() {
        let p = product();
        assert_eq!(
            validate(&p, &request(dec!(0.99), 6)),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            validate(&p, &request(dec!(-100), 6)),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            validate(&p, &request(AMOUNT_MAX + dec!(0.01), 6)),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(validate(&p, &request(AMOUNT_MAX, 6)), Ok(()));
        assert_eq!(
            validate(&p, &request(dec!(1000), 0)),
            Err(ValidationError::TermTooShort)
        );
        assert_eq!(
            validate(&p, &request(dec!(1000), 13)),
            Err(ValidationError::TermTooLong)
        );
    }

    #[test]
    fn test_product_errors_take_precedence() {
        let mut p = product();
        p.name = "bad".into();
        p.annual_nominal_rate_percent = dec!(900);
        assert_eq!(
            validate(&p, &request(dec!(0), 0)),
            Err(ValidationError::InvalidProductName)
        );
    }
}
