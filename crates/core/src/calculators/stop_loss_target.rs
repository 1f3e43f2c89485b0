use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{check, finite, money, positive, Position};
use crate::input::Rule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossTargetInputs {
    pub entry_price: f64,
    pub quantity: f64,
    pub stop_loss_pct: f64,
    pub target_pct: f64,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossTargetOutputs {
    pub stop_loss_price: f64,
    pub target_price: f64,
    pub risk_per_share: f64,
    pub reward_per_share: f64,
    pub total_risk: f64,
    pub total_reward: f64,
    /// Reward earned per unit of risk taken.
    pub risk_reward_ratio: f64,
}

pub fn evaluate(inputs: &StopLossTargetInputs) -> Result<StopLossTargetOutputs, CoreError> {
    positive("entryPrice", inputs.entry_price)?;
    positive("quantity", inputs.quantity)?;
    positive("targetPct", inputs.target_pct)?;
    check(
        "stopLossPct",
        inputs.stop_loss_pct,
        &[Rule::Positive, Rule::Below { other: "100%".into(), value: 100.0 }],
    )?;
    if inputs.position == Position::Short && inputs.target_pct >= 100.0 {
        return Err(CoreError::ValidationError(
            "A short target cannot be 100% or more below entry".into(),
        ));
    }

    let entry = inputs.entry_price;
    let sl = inputs.stop_loss_pct / 100.0;
    let tg = inputs.target_pct / 100.0;
    let (stop, target) = match inputs.position {
        Position::Long => (entry * (1.0 - sl), entry * (1.0 + tg)),
        Position::Short => (entry * (1.0 + sl), entry * (1.0 - tg)),
    };

    let risk = (entry - stop).abs();
    let reward = (target - entry).abs();
    let ratio = finite("risk/reward ratio", reward / risk)?;

    Ok(StopLossTargetOutputs {
        stop_loss_price: money("stop-loss price", stop)?,
        target_price: money("target price", target)?,
        risk_per_share: money("risk per share", risk)?,
        reward_per_share: money("reward per share", reward)?,
        total_risk: money("total risk", risk * inputs.quantity)?,
        total_reward: money("total reward", reward * inputs.quantity)?,
        risk_reward_ratio: money("risk/reward ratio", ratio)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(position: Position) -> StopLossTargetInputs {
        StopLossTargetInputs {
            entry_price: 400.0,
            quantity: 50.0,
            stop_loss_pct: 2.0,
            target_pct: 5.0,
            position,
        }
    }

    #[test]
    fn long_levels() {
        let out = evaluate(&inputs(Position::Long)).unwrap();
        assert_eq!(out.stop_loss_price, 392.0);
        assert_eq!(out.target_price, 420.0);
        assert_eq!(out.total_risk, 400.0);
        assert_eq!(out.total_reward, 1_000.0);
        assert_eq!(out.risk_reward_ratio, 2.5);
    }

    #[test]
    fn short_levels_are_mirrored() {
        let out = evaluate(&inputs(Position::Short)).unwrap();
        assert_eq!(out.stop_loss_price, 408.0);
        assert_eq!(out.target_price, 380.0);
        assert_eq!(out.risk_reward_ratio, 2.5);
    }

    #[test]
    fn stop_loss_of_hundred_percent_rejected() {
        let mut i = inputs(Position::Long);
        i.stop_loss_pct = 100.0;
        assert!(matches!(
            evaluate(&i).unwrap_err(),
            CoreError::InvalidInput { ref field, .. } if field == "stopLossPct"
        ));
    }
}
