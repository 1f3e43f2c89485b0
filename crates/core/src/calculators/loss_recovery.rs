use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, share_count};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossRecoveryInputs {
    pub shares_owned: f64,
    pub average_price: f64,
    /// How far below the average price the stock trades, in percent.
    pub current_loss_pct: f64,
    /// How many percentage points of the loss to recover by averaging down.
    pub recovery_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossRecoveryOutputs {
    pub current_price: f64,
    pub target_loss_pct: f64,
    pub new_average_price: f64,
    pub additional_shares: f64,
    pub investment_amount: f64,
    pub total_shares: f64,
    pub total_investment: f64,
}

/// Shares to buy at today's price so the position's loss shrinks to
/// `current_loss_pct - recovery_pct`.
///
/// `additional_shares` is the closed-form solve of
/// `(Q1·P1 + Q2·P2) / (Q1 + Q2) = P2 / (1 - target/100)` for `Q2`:
/// 100 shares bought at 50, now down 20%, need 125 more at 40 to sit at a 10% loss.
pub fn evaluate(inputs: &LossRecoveryInputs) -> Result<LossRecoveryOutputs, CoreError> {
    positive("sharesOwned", inputs.shares_owned)?;
    positive("averagePrice", inputs.average_price)?;
    positive("currentLossPct", inputs.current_loss_pct)?;
    positive("recoveryPct", inputs.recovery_pct)?;

    if inputs.current_loss_pct >= 100.0 {
        return Err(CoreError::ValidationError(
            "Current loss must be below 100%".into(),
        ));
    }
    if inputs.recovery_pct >= inputs.current_loss_pct {
        return Err(CoreError::ValidationError(
            "Recovery percentage must be less than the current loss percentage".into(),
        ));
    }

    let q1 = inputs.shares_owned;
    let p1 = inputs.average_price;
    let p2 = p1 * (1.0 - inputs.current_loss_pct / 100.0);
    let target_loss = inputs.current_loss_pct - inputs.recovery_pct;
    let p_avg = finite("new average price", p2 / (1.0 - target_loss / 100.0))?;
    let q2 = finite("additional shares", q1 * (p1 - p_avg) / (p_avg - p2))?;
    let investment = finite("investment amount", q2 * p2)?;

    Ok(LossRecoveryOutputs {
        current_price: money("current price", p2)?,
        target_loss_pct: money("target loss", target_loss)?,
        new_average_price: money("new average price", p_avg)?,
        additional_shares: share_count("additional shares", q2)?,
        investment_amount: money("investment amount", investment)?,
        total_shares: share_count("total shares", q1 + q2)?,
        total_investment: money("total investment", q1 * p1 + investment)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(q: f64, p: f64, loss: f64, recovery: f64) -> LossRecoveryInputs {
        LossRecoveryInputs {
            shares_owned: q,
            average_price: p,
            current_loss_pct: loss,
            recovery_pct: recovery,
        }
    }

    #[test]
    fn halving_a_twenty_percent_loss() {
        let out = evaluate(&inputs(100.0, 50.0, 20.0, 10.0)).unwrap();
        assert_eq!(out.current_price, 40.0);
        assert_eq!(out.target_loss_pct, 10.0);
        assert_eq!(out.new_average_price, 44.44);
        assert_eq!(out.additional_shares, 125.0);
        assert_eq!(out.investment_amount, 5000.0);
        assert_eq!(out.total_investment, 10_000.0);
    }

    #[test]
    fn blended_position_sits_at_target_loss() {
        let out = evaluate(&inputs(40.0, 310.0, 35.0, 15.0)).unwrap();
        let blended = out.total_investment / out.total_shares;
        let loss = (blended - out.current_price) / blended * 100.0;
        assert!((loss - out.target_loss_pct).abs() < 0.05);
    }

    #[test]
    fn recovery_must_be_below_loss() {
        let err = evaluate(&inputs(100.0, 50.0, 20.0, 20.0)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        let err = evaluate(&inputs(100.0, 50.0, 20.0, 25.0)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn total_loss_rejected() {
        let err = evaluate(&inputs(100.0, 50.0, 100.0, 10.0)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}
