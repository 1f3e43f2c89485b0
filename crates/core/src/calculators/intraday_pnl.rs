use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::charges::{self, Segment};
use super::{finite, money, positive, TradeOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayPnlInputs {
    pub buy_price: f64,
    pub sell_price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayPnlOutputs {
    pub turnover: f64,
    pub gross_pnl: f64,
    pub total_charges: f64,
    pub net_pnl: f64,
    /// Net P&L as a percentage of the buy value.
    pub net_return_pct: f64,
    pub breakeven_points: f64,
    pub outcome: TradeOutcome,
}

/// Same-day equity round trip, net of the intraday fee schedule.
pub fn evaluate(inputs: &IntradayPnlInputs) -> Result<IntradayPnlOutputs, CoreError> {
    positive("buyPrice", inputs.buy_price)?;
    positive("sellPrice", inputs.sell_price)?;
    positive("quantity", inputs.quantity)?;

    let buy_value = finite("buy value", inputs.buy_price * inputs.quantity)?;
    let sell_value = finite("sell value", inputs.sell_price * inputs.quantity)?;
    let charges = charges::compute(Segment::EquityIntraday, buy_value, sell_value)?;

    let gross = money("gross P&L", sell_value - buy_value)?;
    let net = money("net P&L", gross - charges.total)?;

    Ok(IntradayPnlOutputs {
        turnover: charges.turnover,
        gross_pnl: gross,
        total_charges: charges.total,
        net_pnl: net,
        net_return_pct: money("net return", net / buy_value * 100.0)?,
        breakeven_points: money("breakeven points", charges.total / inputs.quantity)?,
        outcome: TradeOutcome::of(net),
    })
}
