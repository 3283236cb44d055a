use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Decimal places kept on every monetary amount.
pub const MONEY_DP: u32 = 2;

/// Smallest installment the solver will ever return.
pub const MIN_INSTALLMENT: Money = dec!(0.01);

/// Round to cents, half away from zero.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed monthly payment for a fully amortizing loan.
///
/// Uses the annuity formula `P * r / (1 - (1 + r)^-n)`. At `r == 0` the
/// formula degenerates to `P / n`. The result is rounded to cents and
/// never drops below [`MIN_INSTALLMENT`].
///
/// `term_months` must be at least 1; callers validate before solving.
pub fn fixed_installment(principal: Money, monthly_rate: Rate, term_months: u32) -> Money {
    let raw = if monthly_rate.is_zero() {
        principal / Decimal::from(term_months)
    } else {
        let growth = (Decimal::ONE + monthly_rate).powu(u64::from(term_months));
        principal * monthly_rate / (Decimal::ONE - Decimal::ONE / growth)
    };

    round_money(raw).max(MIN_INSTALLMENT)
}
