use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, non_negative, positive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInputs {
    pub monthly_investment: f64,
    /// Expected annual return, in percent.
    pub expected_return_pct: f64,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipOutputs {
    pub months: u32,
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYearRow {
    pub year: u32,
    pub invested_amount: f64,
    pub total_value: f64,
    pub estimated_returns: f64,
}

pub fn evaluate(inputs: &SipInputs) -> Result<SipOutputs, CoreError> {
    let months = months(inputs)?;
    let rate = monthly_rate(inputs);
    let invested = inputs.monthly_investment * f64::from(months);
    let value = future_value(inputs.monthly_investment, rate, months)?;

    Ok(SipOutputs {
        months,
        invested_amount: money("invested amount", invested)?,
        estimated_returns: money("estimated returns", value - invested)?,
        total_value: money("total value", value)?,
    })
}

/// Value of the plan at the end of each year; a partial final year gets its own row.
pub fn yearly_breakdown(inputs: &SipInputs) -> Result<Vec<SipYearRow>, CoreError> {
    let months = months(inputs)?;
    let rate = monthly_rate(inputs);

    (1..=months.div_ceil(12))
        .map(|year| {
            let elapsed = (year * 12).min(months);
            let invested = inputs.monthly_investment * f64::from(elapsed);
            let value = future_value(inputs.monthly_investment, rate, elapsed)?;
            Ok(SipYearRow {
                year,
                invested_amount: money("invested amount", invested)?,
                total_value: money("total value", value)?,
                estimated_returns: money("estimated returns", value - invested)?,
            })
        })
        .collect()
}

fn months(inputs: &SipInputs) -> Result<u32, CoreError> {
    positive("monthlyInvestment", inputs.monthly_investment)?;
    non_negative("expectedReturnPct", inputs.expected_return_pct)?;
    positive("years", inputs.years)?;

    let months = (inputs.years * 12.0).round();
    if months < 1.0 {
        return Err(CoreError::ValidationError(
            "Investment period must be at least one month".into(),
        ));
    }
    if months > f64::from(u32::MAX) {
        return Err(CoreError::ValidationError(
            "Investment period is too long".into(),
        ));
    }
    Ok(months as u32)
}

fn monthly_rate(inputs: &SipInputs) -> f64 {
    inputs.expected_return_pct / 12.0 / 100.0
}

/// Future value of an annuity due: each instalment is invested at the start of its month.
fn future_value(instalment: f64, rate: f64, months: u32) -> Result<f64, CoreError> {
    let n = f64::from(months);
    if rate == 0.0 {
        return Ok(instalment * n);
    }
    let growth = finite("compounded growth", (1.0 + rate).powf(n))?;
    finite("SIP value", instalment * ((growth - 1.0) / rate) * (1.0 + rate))
}
