use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::rates::{growth_factor, normalize};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Periods};
use crate::FinanceCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the future value of a present sum plus periodic deposits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueInput {
    /// Lump sum held today.
    pub present_value: Money,
    /// Number of periods to grow over; may be fractional.
    pub num_periods: Periods,
    /// Periodic interest rate as a percentage (5 = 5%).
    pub interest_rate: Percent,
    /// Times interest compounds within one period; must be >= 1. One
    /// deposit is made per sub-period.
    pub times_compounded_per_period: u32,
    /// Amount deposited each sub-period. Positive = cash paid in by the
    /// depositor.
    pub deposit_amount: Money,
    /// Annuity-due timing: deposits at the start of each sub-period.
    pub deposit_at_beginning: bool,
}

/// Output of the future value calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueOutput {
    /// Compounded value of the lump sum plus the deposit stream.
    pub future_value: Money,
    /// Growth beyond contributions: `fv - present_value - deposits paid`.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Future value of a lump sum and an annuity of deposits under
/// `times_compounded_per_period`-times-per-period compounding:
/// `fv = pv * (1 + r)^n + d * ((1 + r)^n - 1) / r`.
pub fn calculate_future_value(
    input: &FutureValueInput,
) -> FinanceCalcResult<ComputationOutput<FutureValueOutput>> {
    let start = Instant::now();

    let normalized = normalize(
        input.interest_rate,
        input.num_periods,
        input.times_compounded_per_period,
    )?;
    let r = normalized.rate;
    let n = normalized.sub_periods;

    // Zero horizon: nothing grows and no deposits are ever made
    if n.is_zero() {
        let output = FutureValueOutput {
            future_value: input.present_value,
            total_interest: Decimal::ZERO,
        };
        let elapsed = start.elapsed().as_micros() as u64;
        return Ok(with_metadata(
            "Compound Future Value with Periodic Deposits",
            input,
            Vec::new(),
            elapsed,
            output,
        ));
    }

    let factor = growth_factor(r, n)?;
    let fv_lump = input.present_value * factor;

    let mut fv_deposits = if r.is_zero() {
        // Deposits accumulate without growth
        input.deposit_amount * n
    } else {
        input.deposit_amount * (factor - Decimal::ONE) / r
    };
    if input.deposit_at_beginning {
        fv_deposits *= Decimal::ONE + r;
    }

    let future_value = fv_lump + fv_deposits;
    let output = FutureValueOutput {
        future_value,
        total_interest: future_value - input.present_value - input.deposit_amount * n,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound Future Value with Periodic Deposits",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    fn sample_input() -> FutureValueInput {
        FutureValueInput {
            present_value: dec!(1000),
            num_periods: dec!(10),
            interest_rate: dec!(5),
            times_compounded_per_period: 1,
            deposit_amount: dec!(100),
            deposit_at_beginning: false,
        }
    }

    #[test]
    fn test_fv_reference() {
        let out = calculate_future_value(&sample_input()).unwrap().result;

        // Lump: 1000 * 1.05^10 = 1628.89; deposits: 100 * (1.05^10 - 1) / 0.05 = 1257.79
        assert!((out.future_value - dec!(2886.68)).abs() < dec!(0.01));
        assert!((out.total_interest - dec!(886.68)).abs() < dec!(0.01));
    }

    #[test]
    fn test_fv_zero_periods_ignores_deposits() {
        let mut input = sample_input();
        input.num_periods = Decimal::ZERO;
        input.deposit_at_beginning = true;

        let out = calculate_future_value(&input).unwrap().result;
        assert_eq!(out.future_value, dec!(1000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_fv_zero_rate_is_linear() {
        let mut input = sample_input();
        input.interest_rate = Decimal::ZERO;

        let out = calculate_future_value(&input).unwrap().result;
        // 1000 + 10 deposits of 100, no growth
        assert_eq!(out.future_value, dec!(2000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_fv_sub_annual_compounding() {
        let mut input = sample_input();
        input.times_compounded_per_period = 12;
        input.deposit_amount = Decimal::ZERO;

        let out = calculate_future_value(&input).unwrap().result;
        // 1000 * (1 + 0.05/12)^120 = 1647.00...
        assert!((out.future_value - dec!(1647.01)).abs() < dec!(0.02));
    }

    #[test]
    fn test_fv_due_deposits_grow_one_extra_sub_period() {
        let ordinary = sample_input();
        let mut due = sample_input();
        due.deposit_at_beginning = true;

        let fv_ord = calculate_future_value(&ordinary).unwrap().result;
        let fv_due = calculate_future_value(&due).unwrap().result;

        let lump = dec!(1000) * dec!(1.05).powi(10);
        let deposits_ord = fv_ord.future_value - lump;
        let deposits_due = fv_due.future_value - lump;
        assert!((deposits_due - deposits_ord * dec!(1.05)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_fv_zero_compounding_frequency_rejected() {
        let mut input = sample_input();
        input.times_compounded_per_period = 0;
        assert!(calculate_future_value(&input).is_err());
    }

    #[test]
    fn test_fv_minus_100_pct_rejected() {
        let mut input = sample_input();
        input.interest_rate = dec!(-100);
        assert!(calculate_future_value(&input).is_err());
    }

    #[test]
    fn test_fv_negative_rate_decays() {
        let mut input = sample_input();
        input.interest_rate = dec!(-5);
        input.deposit_amount = Decimal::ZERO;

        let out = calculate_future_value(&input).unwrap().result;
        assert!(out.future_value < dec!(1000));
        assert!(out.total_interest < Decimal::ZERO);
    }
}
