use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinanceCalcError;
use crate::types::{Percent, Periods, Rate};
use crate::FinanceCalcResult;

const PERCENT_SCALE: Decimal = dec!(100);

/// A nominal percentage rate reduced to per-sub-period decimal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// Decimal growth rate applied once per sub-period.
    pub rate: Rate,
    /// Effective number of sub-periods over the whole horizon.
    pub sub_periods: Decimal,
}

/// Reduce a nominal percentage rate and a compounding frequency to the
/// per-sub-period decimal rate `r = (percent/100)/frequency` and the
/// effective sub-period count `n = num_periods * frequency`.
pub fn normalize(
    rate: Percent,
    num_periods: Periods,
    compounds_per_period: u32,
) -> FinanceCalcResult<Normalized> {
    if compounds_per_period == 0 {
        return Err(FinanceCalcError::InvalidInput {
            field: "compounds_per_period".into(),
            reason: "Compounding frequency must be a positive integer".into(),
        });
    }
    if num_periods < Decimal::ZERO {
        return Err(FinanceCalcError::InvalidInput {
            field: "num_periods".into(),
            reason: "Number of periods must not be negative".into(),
        });
    }

    let frequency = Decimal::from(compounds_per_period);
    Ok(Normalized {
        rate: rate / PERCENT_SCALE / frequency,
        sub_periods: num_periods * frequency,
    })
}

/// Compound growth factor `(1 + rate)^sub_periods`.
///
/// A zero horizon or a zero rate short-circuits to 1, which lets annuity
/// callers branch to the degenerate linear form without re-checking. A
/// compounding base `(1 + rate) <= 0` over a nonzero horizon has no finite
/// value and is rejected, as is a horizon long enough to overflow the
/// 96-bit mantissa.
pub fn growth_factor(rate: Rate, sub_periods: Decimal) -> FinanceCalcResult<Decimal> {
    if sub_periods.is_zero() || rate.is_zero() {
        return Ok(Decimal::ONE);
    }

    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(FinanceCalcError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Rate must be greater than -100% over a nonzero horizon".into(),
        });
    }

    base.checked_powd(sub_periods)
        .ok_or_else(|| FinanceCalcError::InvalidInput {
            field: "num_periods".into(),
            reason: "Growth factor overflows over this horizon".into(),
        })
}

/// Discount factor `(1 + rate)^-sub_periods`.
pub fn discount_factor(rate: Rate, sub_periods: Decimal) -> FinanceCalcResult<Decimal> {
    let factor = growth_factor(rate, sub_periods)?;
    if factor.is_zero() {
        return Err(FinanceCalcError::DivisionByZero {
            context: format!("discount factor over {sub_periods} sub-periods"),
        });
    }
    Ok(Decimal::ONE / factor)
}
