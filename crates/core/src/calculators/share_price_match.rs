use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, SHARE_EPSILON};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePriceMatchInputs {
    pub shares_owned: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub target_average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePriceMatchOutputs {
    /// Whole shares to buy at the current price (rounded up).
    pub additional_shares: f64,
    pub investment_required: f64,
    pub total_shares: f64,
    /// Average after buying the rounded-up share count; at or below the target.
    pub resulting_average_price: f64,
}

pub fn evaluate(inputs: &SharePriceMatchInputs) -> Result<SharePriceMatchOutputs, CoreError> {
    positive("sharesOwned", inputs.shares_owned)?;
    positive("averagePrice", inputs.average_price)?;
    positive("currentPrice", inputs.current_price)?;
    positive("targetAveragePrice", inputs.target_average_price)?;

    let current = inputs.current_price;
    let target = inputs.target_average_price;
    let average = inputs.average_price;

    if !(current < target && target < average) {
        return Err(CoreError::ValidationError(
            "Target average must lie strictly between the current price and the average price"
                .into(),
        ));
    }

    let raw = finite(
        "additional shares",
        inputs.shares_owned * (average - target) / (target - current),
    )?;
    let additional = (raw - SHARE_EPSILON).ceil().max(0.0);
    let investment = additional * current;
    let total_shares = inputs.shares_owned + additional;
    let resulting = finite(
        "resulting average",
        (inputs.shares_owned * average + investment) / total_shares,
    )?;

    Ok(SharePriceMatchOutputs {
        additional_shares: additional,
        investment_required: money("investment required", investment)?,
        total_shares,
        resulting_average_price: money("resulting average", resulting)?,
    })
}
