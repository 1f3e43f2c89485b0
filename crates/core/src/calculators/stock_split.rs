use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, share_count, SHARE_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorporateAction {
    Split,
    Bonus,
}

/// `numerator : denominator`, e.g. 2:1 split, 1:2 bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    pub numerator: u32,
    pub denominator: u32,
}

impl Ratio {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    fn factor(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSplitInputs {
    pub action: CorporateAction,
    pub current_shares: f64,
    pub current_price: f64,
    pub ratio: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSplitOutputs {
    pub total_shares: f64,
    pub extra_shares: f64,
    /// Bonus entitlement that does not make a whole share; always 0 for splits.
    pub fractional_shares: f64,
    pub new_price: f64,
    pub value_before: f64,
    pub value_after: f64,
}

pub fn evaluate(inputs: &StockSplitInputs) -> Result<StockSplitOutputs, CoreError> {
    positive("currentShares", inputs.current_shares)?;
    positive("currentPrice", inputs.current_price)?;
    positive("ratioNumerator", f64::from(inputs.ratio.numerator))?;
    positive("ratioDenominator", f64::from(inputs.ratio.denominator))?;

    let shares = inputs.current_shares;
    let price = inputs.current_price;
    let factor = inputs.ratio.factor();

    let (total, extra, fractional, new_price) = match inputs.action {
        CorporateAction::Split => {
            if inputs.ratio.numerator <= inputs.ratio.denominator {
                return Err(CoreError::ValidationError(format!(
                    "Split ratio {} must give more new shares than old",
                    inputs.ratio
                )));
            }
            let total = finite("split shares", shares * factor)?;
            (total, total - shares, 0.0, price / factor)
        }
        CorporateAction::Bonus => {
            let entitlement = finite("bonus shares", shares * factor)?;
            let whole = (entitlement + SHARE_EPSILON).floor();
            let fractional = (entitlement - whole).max(0.0);
            (shares + whole, whole, fractional, price)
        }
    };

    Ok(StockSplitOutputs {
        total_shares: share_count("total shares", total)?,
        extra_shares: money("extra shares", extra)?,
        fractional_shares: share_count("fractional shares", fractional)?,
        new_price: money("new price", new_price)?,
        value_before: money("value before", shares * price)?,
        value_after: money("value after", total * new_price)?,
    })
}
