use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::rates::{discount_factor, normalize};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Periods};
use crate::FinanceCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types — PV of future money
// ---------------------------------------------------------------------------

/// Input for the present value of a single future lump sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueOfFutureMoneyInput {
    /// Amount received after `num_periods` periods.
    pub future_value: Money,
    /// Number of periods until the sum is received; may be fractional.
    pub num_periods: Periods,
    /// Periodic interest rate as a percentage (5 = 5%).
    pub interest_rate: Percent,
}

/// Output of the lump-sum present value calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueOfFutureMoneyOutput {
    /// Value today of the future sum.
    pub present_value: Money,
    /// Interest embedded in the future sum: `future_value - present_value`.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Input / Output types — PV of deposits
// ---------------------------------------------------------------------------

/// Input for the present value of a stream of equal periodic deposits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueOfDepositsInput {
    /// Number of deposits; may be fractional.
    pub num_periods: Periods,
    /// Periodic interest rate as a percentage (5 = 5%).
    pub interest_rate: Percent,
    /// Amount deposited each period. Positive = cash paid in by the
    /// depositor; negative amounts are valid signed flows.
    pub deposit_amount: Money,
    /// Annuity-due timing: deposits at the start of each period rather
    /// than the end.
    pub deposit_at_beginning: bool,
}

/// Output of the annuity present value calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueOfDepositsOutput {
    /// Value today of the whole deposit stream.
    pub present_value: Money,
    /// Undiscounted sum of all deposits: `deposit_amount * num_periods`.
    pub total_principal: Money,
    /// Interest earned between today and the nominal total, fixed as
    /// `total_principal - present_value` (positive for positive rates).
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Present value of a single future sum under discrete annual compounding:
/// `pv = fv / (1 + r)^n`.
pub fn calculate_present_value_of_future_money(
    input: &PresentValueOfFutureMoneyInput,
) -> FinanceCalcResult<ComputationOutput<PresentValueOfFutureMoneyOutput>> {
    let start = Instant::now();

    let normalized = normalize(input.interest_rate, input.num_periods, 1)?;
    let discount = discount_factor(normalized.rate, normalized.sub_periods)?;

    let present_value = input.future_value * discount;
    let output = PresentValueOfFutureMoneyOutput {
        present_value,
        total_interest: input.future_value - present_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump-Sum Present Value (discrete compounding)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Present value of an ordinary or due annuity of equal deposits:
/// `pv = d * (1 - (1 + r)^-n) / r`, times `(1 + r)` for annuity-due.
pub fn calculate_present_value_of_deposits(
    input: &PresentValueOfDepositsInput,
) -> FinanceCalcResult<ComputationOutput<PresentValueOfDepositsOutput>> {
    let start = Instant::now();

    let normalized = normalize(input.interest_rate, input.num_periods, 1)?;
    let r = normalized.rate;
    let n = normalized.sub_periods;

    let total_principal = input.deposit_amount * n;

    let present_value = if r.is_zero() {
        // No discounting: the annuity factor degenerates to n
        total_principal
    } else {
        let discount = discount_factor(r, n)?;
        let annuity_factor = (Decimal::ONE - discount) / r;
        let mut pv = input.deposit_amount * annuity_factor;
        if input.deposit_at_beginning {
            pv *= Decimal::ONE + r;
        }
        pv
    };

    let output = PresentValueOfDepositsOutput {
        present_value,
        total_principal,
        total_interest: total_principal - present_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity Present Value (ordinary/due)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
