use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive};

/// Minimum number of valid purchase rows needed to average anything.
pub const MIN_PURCHASES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub quantity: f64,
    pub price: f64,
}

impl Purchase {
    pub fn new(quantity: f64, price: f64) -> Self {
        Self { quantity, price }
    }

    fn is_valid(&self) -> bool {
        self.quantity.is_finite()
            && self.price.is_finite()
            && self.quantity > 0.0
            && self.price > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageBuyInputs {
    pub purchases: Vec<Purchase>,
    /// Market price used for the unrealized P&L section; optional.
    #[serde(default)]
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageBuyOutputs {
    /// Purchase rows that survived filtering.
    pub rows_used: usize,
    pub total_quantity: f64,
    pub total_investment: f64,
    pub average_price: f64,
    pub current_value: Option<f64>,
    pub profit_loss: Option<f64>,
    pub profit_loss_pct: Option<f64>,
}

/// Weighted-average cost basis across purchase rows.
///
/// Rows with a non-positive quantity or price are dropped, not zero-filled.
/// Fewer than [`MIN_PURCHASES`] remaining rows is a validation error.
pub fn evaluate(inputs: &AverageBuyInputs) -> Result<AverageBuyOutputs, CoreError> {
    if let Some(price) = inputs.current_price {
        positive("currentPrice", price)?;
    }

    let valid: Vec<&Purchase> = inputs.purchases.iter().filter(|p| p.is_valid()).collect();
    if valid.len() < MIN_PURCHASES {
        return Err(CoreError::ValidationError(format!(
            "At least {MIN_PURCHASES} purchases with positive quantity and price are required ({} given)",
            valid.len()
        )));
    }

    let total_quantity: f64 = valid.iter().map(|p| p.quantity).sum();
    let total_investment: f64 = valid.iter().map(|p| p.quantity * p.price).sum();
    let average = finite("average price", total_investment / total_quantity)?;

    let (current_value, profit_loss, profit_loss_pct) = match inputs.current_price {
        Some(price) => {
            let value = finite("current value", total_quantity * price)?;
            let pnl = value - total_investment;
            let pct = finite("profit/loss percentage", pnl / total_investment * 100.0)?;
            (
                Some(money("current value", value)?),
                Some(money("profit/loss", pnl)?),
                Some(money("profit/loss percentage", pct)?),
            )
        }
        None => (None, None, None),
    };

    Ok(AverageBuyOutputs {
        rows_used: valid.len(),
        total_quantity,
        total_investment: money("total investment", total_investment)?,
        average_price: money("average price", average)?,
        current_value,
        profit_loss,
        profit_loss_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lots_with_current_price() {
        let out = evaluate(&AverageBuyInputs {
            purchases: vec![Purchase::new(10.0, 100.0), Purchase::new(10.0, 120.0)],
            current_price: Some(130.0),
        })
        .unwrap();
        assert_eq!(out.average_price, 110.0);
        assert_eq!(out.total_investment, 2200.0);
        assert_eq!(out.total_quantity, 20.0);
        assert_eq!(out.current_value, Some(2600.0));
        assert_eq!(out.profit_loss, Some(400.0));
        assert_eq!(out.profit_loss_pct, Some(18.18));
    }

    #[test]
    fn invalid_rows_dropped_before_aggregation() {
        let out = evaluate(&AverageBuyInputs {
            purchases: vec![
                Purchase::new(5.0, 200.0),
                Purchase::new(0.0, 999.0),
                Purchase::new(15.0, 100.0),
                Purchase::new(3.0, -1.0),
            ],
            current_price: None,
        })
        .unwrap();
        assert_eq!(out.rows_used, 2);
        assert_eq!(out.total_quantity, 20.0);
        assert_eq!(out.average_price, 125.0);
        assert_eq!(out.profit_loss, None);
    }

    #[test]
    fn one_valid_row_left_is_an_error() {
        let err = evaluate(&AverageBuyInputs {
            purchases: vec![
                Purchase::new(10.0, 100.0),
                Purchase::new(-1.0, 100.0),
                Purchase::new(10.0, 0.0),
            ],
            current_price: Some(100.0),
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}
