//! Formula evaluators, one module per calculator kind.
//!
//! Every evaluator is a pure function of its typed inputs. Non-finite
//! intermediates are reported as `CoreError::CalculationError`; outputs are
//! rounded to display precision (2 places for money and percentages).

pub mod average_buy;
pub mod cagr;
pub mod charges;
pub mod dividend_yield;
pub mod intraday_pnl;
pub mod loss_recovery;
pub mod margin;
pub mod options_pnl;
pub mod profit_loss;
pub mod share_price_match;
pub mod sip;
pub mod stock_split;
pub mod stop_loss_target;
pub mod tax_brokerage;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::input::{self, Rule};
use crate::models::record::{CalculationInputs, CalculationOutputs};

/// Slack used when snapping a computed share count to a whole number,
/// so that 99.99999999997 rounds up to 100 and not 101.
pub(crate) const SHARE_EPSILON: f64 = 1e-9;

/// Evaluate any calculation input with the evaluator for its kind.
pub fn evaluate(inputs: &CalculationInputs) -> Result<CalculationOutputs, CoreError> {
    Ok(match inputs {
        CalculationInputs::Cagr(i) => CalculationOutputs::Cagr(cagr::evaluate(i)?),
        CalculationInputs::Sip(i) => CalculationOutputs::Sip(sip::evaluate(i)?),
        CalculationInputs::IntradayPnl(i) => {
            CalculationOutputs::IntradayPnl(intraday_pnl::evaluate(i)?)
        }
        CalculationInputs::AverageBuy(i) => {
            CalculationOutputs::AverageBuy(average_buy::evaluate(i)?)
        }
        CalculationInputs::OptionsPnl(i) => {
            CalculationOutputs::OptionsPnl(options_pnl::evaluate(i)?)
        }
        CalculationInputs::DividendYield(i) => {
            CalculationOutputs::DividendYield(dividend_yield::evaluate(i)?)
        }
        CalculationInputs::StopLossTarget(i) => {
            CalculationOutputs::StopLossTarget(stop_loss_target::evaluate(i)?)
        }
        CalculationInputs::Margin(i) => CalculationOutputs::Margin(margin::evaluate(i)?),
        CalculationInputs::TaxBrokerage(i) => {
            CalculationOutputs::TaxBrokerage(tax_brokerage::evaluate(i)?)
        }
        CalculationInputs::StockSplit(i) => {
            CalculationOutputs::StockSplit(stock_split::evaluate(i)?)
        }
        CalculationInputs::LossRecovery(i) => {
            CalculationOutputs::LossRecovery(loss_recovery::evaluate(i)?)
        }
        CalculationInputs::SharePriceMatch(i) => {
            CalculationOutputs::SharePriceMatch(share_price_match::evaluate(i)?)
        }
        CalculationInputs::ProfitLoss(i) => {
            CalculationOutputs::ProfitLoss(profit_loss::evaluate(i)?)
        }
    })
}

// ── Shared result vocabulary ────────────────────────────────────────

/// Sign classification of a realized or hypothetical trade result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeOutcome {
    Profit,
    Loss,
    Breakeven,
}

impl TradeOutcome {
    /// Classify an amount already rounded to display precision.
    #[must_use]
    pub fn of(amount: f64) -> Self {
        if amount > 0.0 {
            TradeOutcome::Profit
        } else if amount < 0.0 {
            TradeOutcome::Loss
        } else {
            TradeOutcome::Breakeven
        }
    }
}

impl std::fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeOutcome::Profit => write!(f, "Profit"),
            TradeOutcome::Loss => write!(f, "Loss"),
            TradeOutcome::Breakeven => write!(f, "Breakeven"),
        }
    }
}

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Bought first, profits when price rises.
    Long,
    /// Sold first, profits when price falls.
    Short,
}

// ── Numeric helpers ─────────────────────────────────────────────────

/// Round half away from zero to `places` decimal places.
/// Negative zero is normalized to `0.0`. Values too large to scale have no
/// fractional part left to round and are returned unchanged.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Currency and percentage precision.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Fractional share-count precision.
#[must_use]
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Fail with `CalculationError` when an intermediate is NaN or infinite.
pub(crate) fn finite(what: &str, value: f64) -> Result<f64, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::CalculationError(format!(
            "{what} is not a finite number"
        )))
    }
}

/// An output amount or percentage: finite, rounded to 2 places.
pub(crate) fn money(what: &str, value: f64) -> Result<f64, CoreError> {
    finite(what, value).map(round2)
}

/// An output share count: finite, rounded to 3 places.
pub(crate) fn share_count(what: &str, value: f64) -> Result<f64, CoreError> {
    finite(what, value).map(round3)
}

/// Apply input rules to an already-typed value.
pub(crate) fn check(field: &str, value: f64, rules: &[Rule]) -> Result<(), CoreError> {
    input::validate(field, value, rules)
}

pub(crate) fn positive(field: &str, value: f64) -> Result<(), CoreError> {
    check(field, value, &[Rule::Positive])
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    check(field, value, &[Rule::NonNegative])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.345_000_1), -2.35);
        assert_eq!(round3(99.999_99), 100.0);
    }

    #[test]
    fn negative_zero_normalized() {
        let r = round2(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn rounding_huge_values_stays_finite() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round3(-f64::MAX), -f64::MAX);
    }

    #[test]
    fn money_rejects_overflow() {
        assert!(matches!(
            money("total", 1e300 * 1e10).unwrap_err(),
            CoreError::CalculationError(_)
        ));
        assert_eq!(money("total", 2.345_000_1).unwrap(), 2.35);
        assert_eq!(share_count("shares", 1.234_56).unwrap(), 1.235);
    }

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert!(finite("x", f64::NAN).is_err());
        assert!(finite("x", f64::INFINITY).is_err());
        assert_eq!(finite("x", 1.5).unwrap(), 1.5);
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(TradeOutcome::of(0.01), TradeOutcome::Profit);
        assert_eq!(TradeOutcome::of(-0.01), TradeOutcome::Loss);
        assert_eq!(TradeOutcome::of(0.0), TradeOutcome::Breakeven);
    }
}
