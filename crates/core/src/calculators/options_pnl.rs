use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, non_negative, positive, Position, TradeOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    Call,
    Put,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPnlInputs {
    pub option_type: OptionType,
    pub position: Position,
    pub strike_price: f64,
    /// Premium per share paid (long) or received (short).
    pub premium: f64,
    pub lot_size: u32,
    pub lots: u32,
    /// Underlying price at expiry.
    pub spot_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPnlOutputs {
    pub quantity: u64,
    pub intrinsic_value: f64,
    pub pnl_per_share: f64,
    pub total_pnl: f64,
    pub premium_value: f64,
    /// Total P&L as a percentage of the premium paid or received.
    pub return_pct: f64,
    pub breakeven_price: f64,
    /// `None` means unlimited.
    pub max_profit: Option<f64>,
    /// `None` means unlimited.
    pub max_loss: Option<f64>,
    pub outcome: TradeOutcome,
}

/// P&L of an option position held to expiry.
pub fn evaluate(inputs: &OptionsPnlInputs) -> Result<OptionsPnlOutputs, CoreError> {
    positive("strikePrice", inputs.strike_price)?;
    positive("premium", inputs.premium)?;
    positive("lotSize", f64::from(inputs.lot_size))?;
    positive("lots", f64::from(inputs.lots))?;
    non_negative("spotPrice", inputs.spot_price)?;

    let quantity = u64::from(inputs.lot_size) * u64::from(inputs.lots);
    let qty = quantity as f64;
    let strike = inputs.strike_price;
    let premium = inputs.premium;

    let intrinsic = match inputs.option_type {
        OptionType::Call => (inputs.spot_price - strike).max(0.0),
        OptionType::Put => (strike - inputs.spot_price).max(0.0),
    };
    let per_share = match inputs.position {
        Position::Long => intrinsic - premium,
        Position::Short => premium - intrinsic,
    };
    let total = money("total P&L", per_share * qty)?;
    let premium_value = finite("premium value", premium * qty)?;

    let breakeven = match inputs.option_type {
        OptionType::Call => strike + premium,
        OptionType::Put => strike - premium,
    };

    // A put's payoff is bounded by the strike; a call's is not.
    let put_floor = ((strike - premium) * qty).max(0.0);
    let (max_profit, max_loss) = match (inputs.position, inputs.option_type) {
        (Position::Long, OptionType::Call) => (None, Some(premium_value)),
        (Position::Long, OptionType::Put) => (Some(put_floor), Some(premium_value)),
        (Position::Short, OptionType::Call) => (Some(premium_value), None),
        (Position::Short, OptionType::Put) => (Some(premium_value), Some(put_floor)),
    };

    Ok(OptionsPnlOutputs {
        quantity,
        intrinsic_value: money("intrinsic value", intrinsic)?,
        pnl_per_share: money("P&L per share", per_share)?,
        total_pnl: total,
        premium_value: money("premium value", premium_value)?,
        return_pct: money("return", total / premium_value * 100.0)?,
        breakeven_price: money("breakeven price", breakeven)?,
        max_profit: max_profit.map(|v| money("max profit", v)).transpose()?,
        max_loss: max_loss.map(|v| money("max loss", v)).transpose()?,
        outcome: TradeOutcome::of(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(option_type: OptionType, position: Position, spot: f64) -> OptionsPnlInputs {
        OptionsPnlInputs {
            option_type,
            position,
            strike_price: 22_000.0,
            premium: 150.0,
            lot_size: 25,
            lots: 2,
            spot_price: spot,
        }
    }

    #[test]
    fn long_call_in_the_money() {
        let out = evaluate(&inputs(OptionType::Call, Position::Long, 22_400.0)).unwrap();
        assert_eq!(out.quantity, 50);
        assert_eq!(out.intrinsic_value, 400.0);
        assert_eq!(out.pnl_per_share, 250.0);
        assert_eq!(out.total_pnl, 12_500.0);
        assert_eq!(out.breakeven_price, 22_150.0);
        assert_eq!(out.max_profit, None);
        assert_eq!(out.max_loss, Some(7_500.0));
        assert_eq!(out.outcome, TradeOutcome::Profit);
    }

    #[test]
    fn long_put_expiring_worthless_loses_premium() {
        let out = evaluate(&inputs(OptionType::Put, Position::Long, 22_400.0)).unwrap();
        assert_eq!(out.intrinsic_value, 0.0);
        assert_eq!(out.total_pnl, -7_500.0);
        assert_eq!(out.return_pct, -100.0);
        assert_eq!(out.breakeven_price, 21_850.0);
        assert_eq!(out.max_profit, Some(1_092_500.0));
    }

    #[test]
    fn short_mirrors_long() {
        for t in [OptionType::Call, OptionType::Put] {
            let long = evaluate(&inputs(t, Position::Long, 21_900.0)).unwrap();
            let short = evaluate(&inputs(t, Position::Short, 21_900.0)).unwrap();
            assert_eq!(long.total_pnl, -short.total_pnl);
        }
        let short_call = evaluate(&inputs(OptionType::Call, Position::Short, 0.0)).unwrap();
        assert_eq!(short_call.max_loss, None);
        assert_eq!(short_call.max_profit, Some(7_500.0));
    }

    #[test]
    fn zero_lots_rejected() {
        let mut i = inputs(OptionType::Call, Position::Long, 22_000.0);
        i.lots = 0;
        assert!(matches!(
            evaluate(&i).unwrap_err(),
            CoreError::InvalidInput { ref field, .. } if field == "lots"
        ));
    }
}
