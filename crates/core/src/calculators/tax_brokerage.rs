use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::charges::{self, ChargeBreakdown, Segment};
use super::{finite, money, positive, TradeOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBrokerageInputs {
    pub segment: Segment,
    pub buy_price: f64,
    pub sell_price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBrokerageOutputs {
    pub charges: ChargeBreakdown,
    pub gross_pnl: f64,
    pub net_pnl: f64,
    /// Price move per share needed to cover all charges.
    pub breakeven_points: f64,
    pub outcome: TradeOutcome,
}

pub fn evaluate(inputs: &TaxBrokerageInputs) -> Result<TaxBrokerageOutputs, CoreError> {
    positive("buyPrice", inputs.buy_price)?;
    positive("sellPrice", inputs.sell_price)?;
    positive("quantity", inputs.quantity)?;

    let buy_value = finite("buy value", inputs.buy_price * inputs.quantity)?;
    let sell_value = finite("sell value", inputs.sell_price * inputs.quantity)?;
    let charges = charges::compute(inputs.segment, buy_value, sell_value)?;

    let gross = money("gross P&L", sell_value - buy_value)?;
    let net = money("net P&L", gross - charges.total)?;
    let breakeven = money("breakeven points", charges.total / inputs.quantity)?;

    Ok(TaxBrokerageOutputs {
        charges,
        gross_pnl: gross,
        net_pnl: net,
        breakeven_points: breakeven,
        outcome: TradeOutcome::of(net),
    })
}
