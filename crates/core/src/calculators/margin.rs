use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, SHARE_EPSILON};

/// Delivery trades are unleveraged.
pub const DELIVERY_LEVERAGE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginInputs {
    pub amount: f64,
    pub share_price: f64,
    /// Compute the delivery (1x) position.
    pub delivery: bool,
    /// Compute the intraday position at this leverage; `None` leaves it out.
    #[serde(default)]
    pub intraday_leverage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginPosition {
    pub leverage: f64,
    pub buying_power: f64,
    pub shares_can_buy: u64,
    pub value_bought: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOutputs {
    pub delivery: Option<MarginPosition>,
    pub intraday: Option<MarginPosition>,
}

pub fn evaluate(inputs: &MarginInputs) -> Result<MarginOutputs, CoreError> {
    positive("amount", inputs.amount)?;
    positive("sharePrice", inputs.share_price)?;

    if !inputs.delivery && inputs.intraday_leverage.is_none() {
        return Err(CoreError::ValidationError(
            "Select at least one of delivery or intraday".into(),
        ));
    }
    if let Some(leverage) = inputs.intraday_leverage {
        positive("intradayLeverage", leverage)?;
    }

    let delivery = if inputs.delivery {
        Some(position(inputs.amount, inputs.share_price, DELIVERY_LEVERAGE)?)
    } else {
        None
    };
    let intraday = inputs
        .intraday_leverage
        .map(|leverage| position(inputs.amount, inputs.share_price, leverage))
        .transpose()?;

    Ok(MarginOutputs { delivery, intraday })
}

fn position(amount: f64, price: f64, leverage: f64) -> Result<MarginPosition, CoreError> {
    let buying_power = finite("buying power", amount * leverage)?;
    let shares = finite("share count", (buying_power / price + SHARE_EPSILON).floor())?;
    if shares > u64::MAX as f64 {
        return Err(CoreError::CalculationError("Share count overflows".into()));
    }
    let value = shares * price;

    Ok(MarginPosition {
        leverage,
        buying_power: money("buying power", buying_power)?,
        shares_can_buy: shares as u64,
        value_bought: money("value bought", value)?,
        remaining: money("remaining amount", buying_power - value)?,
    })
}
