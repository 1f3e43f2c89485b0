use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, TradeOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossInputs {
    pub buy_price: f64,
    pub sell_price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossOutputs {
    pub buy_value: f64,
    pub sell_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
    pub outcome: TradeOutcome,
}

pub fn evaluate(inputs: &ProfitLossInputs) -> Result<ProfitLossOutputs, CoreError> {
    positive("buyPrice", inputs.buy_price)?;
    positive("sellPrice", inputs.sell_price)?;
    positive("quantity", inputs.quantity)?;

    let diff = inputs.sell_price - inputs.buy_price;
    let pnl = money("profit/loss", diff * inputs.quantity)?;
    let pct = finite("profit/loss percentage", diff / inputs.buy_price * 100.0)?;

    Ok(ProfitLossOutputs {
        buy_value: money("buy value", inputs.buy_price * inputs.quantity)?,
        sell_value: money("sell value", inputs.sell_price * inputs.quantity)?,
        profit_loss: pnl,
        profit_loss_pct: money("profit/loss percentage", pct)?,
        outcome: TradeOutcome::of(pnl),
    })
}
