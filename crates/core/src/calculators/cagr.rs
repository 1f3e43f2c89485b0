use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money, positive, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrInputs {
    pub initial_value: f64,
    pub final_value: f64,
    /// Holding period in years (fractional periods allowed).
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrOutputs {
    /// Compound annual growth rate, in percent.
    pub cagr_pct: f64,
    /// Overall return over the whole period, in percent.
    pub total_return_pct: f64,
    /// `final - initial`
    pub absolute_gain: f64,
}

/// One compounding year of the breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrYearRow {
    pub year: u32,
    pub start_value: f64,
    pub growth: f64,
    pub end_value: f64,
}

pub fn evaluate(inputs: &CagrInputs) -> Result<CagrOutputs, CoreError> {
    let rate = growth_rate(inputs)?;
    let gain = inputs.final_value - inputs.initial_value;
    let total_return = finite("total return", gain / inputs.initial_value * 100.0)?;

    Ok(CagrOutputs {
        cagr_pct: money("CAGR", rate * 100.0)?,
        total_return_pct: money("total return", total_return)?,
        absolute_gain: money("absolute gain", gain)?,
    })
}

/// Year-by-year compounding at the CAGR rate for `year = 1..=floor(years)`.
///
/// The result is a plan; call [`YearlyBreakdown::iter`] as many times as needed.
pub fn yearly_breakdown(inputs: &CagrInputs) -> Result<YearlyBreakdown, CoreError> {
    let rate = growth_rate(inputs)?;
    Ok(YearlyBreakdown {
        initial_value: inputs.initial_value,
        rate,
        years: inputs.years.floor() as u32,
    })
}

/// Unrounded annual growth rate as a fraction (0.0845 for 8.45%).
fn growth_rate(inputs: &CagrInputs) -> Result<f64, CoreError> {
    positive("initialValue", inputs.initial_value)?;
    positive("finalValue", inputs.final_value)?;
    positive("years", inputs.years)?;

    if inputs.initial_value >= inputs.final_value {
        return Err(CoreError::ValidationError(
            "Final value must be greater than initial value".into(),
        ));
    }

    let ratio = finite("growth ratio", inputs.final_value / inputs.initial_value)?;
    finite("CAGR", ratio.powf(1.0 / inputs.years) - 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyBreakdown {
    initial_value: f64,
    rate: f64,
    years: u32,
}

impl YearlyBreakdown {
    #[must_use]
    pub fn len(&self) -> usize {
        self.years as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years == 0
    }

    /// Fresh iterator starting at year 1.
    pub fn iter(&self) -> YearlyBreakdownIter {
        YearlyBreakdownIter {
            plan: *self,
            year: 0,
            value: self.initial_value,
        }
    }
}

impl IntoIterator for &YearlyBreakdown {
    type Item = CagrYearRow;
    type IntoIter = YearlyBreakdownIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct YearlyBreakdownIter {
    plan: YearlyBreakdown,
    year: u32,
    value: f64,
}

impl Iterator for YearlyBreakdownIter {
    type Item = CagrYearRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.year >= self.plan.years {
            return None;
        }
        self.year += 1;
        let start = self.value;
        let end = start * (1.0 + self.plan.rate);
        self.value = end;

        Some(CagrYearRow {
            year: self.year,
            start_value: round2(start),
            growth: round2(end - start),
            end_value: round2(end),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.plan.years - self.year) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for YearlyBreakdownIter {}
