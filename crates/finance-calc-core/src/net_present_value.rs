use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::rates::{discount_factor, normalize};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinanceCalcResult;

/// Input for net present value of an irregular cash-flow series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPresentValueInput {
    /// Period-0 outlay, subtracted from the discounted inflows.
    pub initial_investment: Money,
    /// Periodic discount rate as a percentage (10 = 10%).
    pub discount_rate: Percent,
    /// Times the discount rate compounds within one period; must be >= 1.
    pub times_compounded_per_period: u32,
    /// Flows occur at the start of their period rather than the end,
    /// shifting every discount exponent back by one period's worth of
    /// sub-periods.
    pub cash_flows_at_beginning: bool,
    /// One flow per period, starting at period 1. Negative values are
    /// ordinary signed outflows.
    pub cash_flow: Vec<Money>,
}

/// Net present value: discount each period's flow and net against the
/// initial investment. The result is the bare NPV figure.
pub fn calculate_net_present_value(
    input: &NetPresentValueInput,
) -> FinanceCalcResult<ComputationOutput<Money>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let periods = Decimal::from(input.cash_flow.len() as u64);
    let normalized = normalize(
        input.discount_rate,
        periods,
        input.times_compounded_per_period,
    )?;
    let r = normalized.rate;
    let k = Decimal::from(input.times_compounded_per_period);

    if input.cash_flow.is_empty() {
        warnings.push("No cash flows provided; NPV is the negated initial investment".into());
    }

    let mut npv = -input.initial_investment;
    for (i, flow) in input.cash_flow.iter().enumerate() {
        let period = Decimal::from(i as u64 + 1);
        let mut exponent = period * k;
        if input.cash_flows_at_beginning {
            exponent -= k;
        }
        npv += flow * discount_factor(r, exponent)?;
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Net Present Value (periodic discounting)",
        input,
        warnings,
        elapsed,
        npv,
    ))
}
