use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::Rate;

/// Decimal places kept on the reported monthly rate.
pub const RATE_DP: u32 = 6;

const ROOT_TOLERANCE: Decimal = dec!(0.000000000000000000000001);
const MAX_ROOT_ITERATIONS: u32 = 64;

/// Convert an annual nominal percentage into the equivalent compound monthly
/// rate: `(1 + annual/100)^(1/12) - 1`.
///
/// The value is returned at full precision; only [`report_rate`] rounds it.
pub fn effective_monthly_rate(annual_nominal_rate_percent: Decimal) -> Rate {
    if annual_nominal_rate_percent.is_zero() {
        return Decimal::ZERO;
    }

    let growth = Decimal::ONE + annual_nominal_rate_percent / dec!(100);
    twelfth_root(growth) - Decimal::ONE
}

/// Twelfth root of `x >= 1` by Newton-Raphson on `y^12 - x`.
///
/// Starting at `1 + (x - 1)/12`, which is never below the root, the iterates
/// decrease monotonically onto it. Pure decimal arithmetic, so the result is
/// identical on every platform.
fn twelfth_root(x: Decimal) -> Decimal {
    let twelve = dec!(12);
    let mut y = Decimal::ONE + (x - Decimal::ONE) / twelve;

    for _ in 0..MAX_ROOT_ITERATIONS {
        let y11 = y.powu(11);
        let next = y - (y11 * y - x) / (twelve * y11);
        if (next - y).abs() < ROOT_TOLERANCE {
            return next;
        }
        y = next;
    }

    y
}

/// Round a rate for presentation, half away from zero.
pub fn report_rate(rate: Rate) -> Rate {
    rate.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}
