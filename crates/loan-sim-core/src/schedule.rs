use rust_decimal::Decimal;

use crate::installment::round_money;
use crate::types::{Money, PaymentPeriod, Rate};

/// Build the month-by-month amortization schedule for a fixed installment.
///
/// Interest is charged on the opening balance and rounded to cents; the rest
/// of the installment amortizes principal. Because the rate carries far more
/// precision than cents, the balance left after the last installment is a few
/// cents off zero (either sign). That residual is folded into the final
/// period: its principal grows by the residual, its interest shrinks by the
/// same amount, and the closing balance is set to exactly zero. Only the last
/// period's interest/principal split departs from the rate; the schedule
/// still sums to `installment * term_months`.
pub fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    installment: Money,
    term_months: u32,
) -> Vec<PaymentPeriod> {
    let mut periods = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for month in 1..=term_months {
        let opening = balance;
        let mut interest = round_money(balance * monthly_rate);
        let mut principal_paid = installment - interest;
        balance -= principal_paid;
        let mut closing = balance;

        if month == term_months {
            principal_paid += closing;
            interest -= closing;
            closing = Decimal::ZERO;
        }

        periods.push(PaymentPeriod {
            month,
            opening_balance: opening,
            closing_balance: closing,
            interest,
            principal_paid,
        });
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installment::fixed_installment;
    use crate::rates::effective_monthly_rate;
    use rust_decimal_macros::dec;

    fn eighteen_percent_schedule(principal: Money, term: u32) -> (Money, Vec<PaymentPeriod>) {
        let r = effective_monthly_rate(dec!(18));
        let pmt = fixed_installment(principal, r, term);
        (pmt, build_schedule(principal, r, pmt, term))
    }

    #[test]
    fn test_first_period() {
        let (pmt, sched) = eighteen_percent_schedule(dec!(10000), 12);
        let first = &sched[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.opening_balance, dec!(10000));
        // 10000 * 0.01388843 = 138.88
        assert_eq!(first.interest, dec!(138.88));
        assert_eq!(first.principal_paid, pmt - dec!(138.88));
        assert_eq!(first.closing_balance, dec!(10000) - first.principal_paid);
    }

    #[test]
    fn test_balances_chain() {
        let (_, sched) = eighteen_percent_schedule(dec!(3210), 11);
        for pair in sched.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
            assert_eq!(pair[1].month, pair[0].month + 1);
        }
    }

    #[test]
    fn test_terminal_correction_absorbs_residual() {
        // Without correction 1192.12 over 12 ends at -0.02
        let (pmt, sched) = eighteen_percent_schedule(dec!(1192.12), 12);
        let r = effective_monthly_rate(dec!(18));
        let last = sched.last().unwrap();
        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert_eq!(last.principal_paid, last.opening_balance);
        assert_eq!(
            last.interest,
            round_money(last.opening_balance * r) + dec!(0.02)
        );

        // The correction moves cents between interest and principal only.
        for p in &sched {
            assert_eq!(p.interest + p.principal_paid, pmt);
        }
    }

    #[test]
    fn test_total_matches_installment_times_term() {
        for (principal, term) in [
            (dec!(10000), 12),
            (dec!(1192.12), 12),
            (dec!(3210), 11),
            (dec!(1430), 6),
            (dec!(1120), 31),
        ] {
            let (pmt, sched) = eighteen_percent_schedule(principal, term);
            let total: Decimal = sched.iter().map(|p| p.interest + p.principal_paid).sum();
            assert_eq!(total, pmt * Decimal::from(term));
            let amortized: Decimal = sched.iter().map(|p| p.principal_paid).sum();
            assert_eq!(amortized, principal);
        }
    }

    #[test]
    fn test_single_period() {
        let (pmt, sched) = eighteen_percent_schedule(dec!(500), 1);
        assert_eq!(sched.len(), 1);
        assert_eq!(sched[0].principal_paid, dec!(500));
        assert_eq!(sched[0].interest, pmt - dec!(500));
        assert_eq!(sched[0].closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_has_no_interest_when_even() {
        let sched = build_schedule(dec!(1200), Decimal::ZERO, dec!(100), 12);
        assert!(sched.iter().all(|p| p.interest.is_zero()));
        assert!(sched.iter().all(|p| p.principal_paid == dec!(100)));
        assert_eq!(sched[11].closing_balance, Decimal::ZERO);
    }
}
