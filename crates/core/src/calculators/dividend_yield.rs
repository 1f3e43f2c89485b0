use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{money, non_negative, positive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendYieldInputs {
    pub share_price: f64,
    /// Annual dividend yield, in percent. Zero is allowed.
    pub dividend_yield_pct: f64,
    /// Shares held; when present the total payout is computed too.
    #[serde(default)]
    pub shares: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendYieldOutputs {
    pub dividend_per_share: f64,
    pub total_dividend: Option<f64>,
}

pub fn evaluate(inputs: &DividendYieldInputs) -> Result<DividendYieldOutputs, CoreError> {
    positive("sharePrice", inputs.share_price)?;
    non_negative("dividendYieldPct", inputs.dividend_yield_pct)?;
    if let Some(shares) = inputs.shares {
        positive("shares", shares)?;
    }

    let per_share = inputs.dividend_yield_pct / 100.0 * inputs.share_price;
    let total = inputs
        .shares
        .map(|shares| money("total dividend", per_share * shares))
        .transpose()?;

    Ok(DividendYieldOutputs {
        dividend_per_share: money("dividend per share", per_share)?,
        total_dividend: total,
    })
}
