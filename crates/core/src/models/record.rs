use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculators::{
    self, average_buy::AverageBuyInputs, average_buy::AverageBuyOutputs, cagr::CagrInputs,
    cagr::CagrOutputs, dividend_yield::DividendYieldInputs, dividend_yield::DividendYieldOutputs,
    intraday_pnl::IntradayPnlInputs, intraday_pnl::IntradayPnlOutputs,
    loss_recovery::LossRecoveryInputs, loss_recovery::LossRecoveryOutputs, margin::MarginInputs,
    margin::MarginOutputs, options_pnl::OptionsPnlInputs, options_pnl::OptionsPnlOutputs,
    profit_loss::ProfitLossInputs, profit_loss::ProfitLossOutputs,
    share_price_match::SharePriceMatchInputs, share_price_match::SharePriceMatchOutputs,
    sip::SipInputs, sip::SipOutputs, stock_split::StockSplitInputs,
    stock_split::StockSplitOutputs, stop_loss_target::StopLossTargetInputs,
    stop_loss_target::StopLossTargetOutputs, tax_brokerage::TaxBrokerageInputs,
    tax_brokerage::TaxBrokerageOutputs,
};
use crate::errors::CoreError;

use super::calculator::CalculatorKind;

/// Inputs of any calculator, tagged by kind: `{"kind": "cagr", "initialValue": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CalculationInputs {
    Cagr(CagrInputs),
    Sip(SipInputs),
    IntradayPnl(IntradayPnlInputs),
    AverageBuy(AverageBuyInputs),
    OptionsPnl(OptionsPnlInputs),
    DividendYield(DividendYieldInputs),
    StopLossTarget(StopLossTargetInputs),
    Margin(MarginInputs),
    TaxBrokerage(TaxBrokerageInputs),
    StockSplit(StockSplitInputs),
    LossRecovery(LossRecoveryInputs),
    SharePriceMatch(SharePriceMatchInputs),
    ProfitLoss(ProfitLossInputs),
}

/// Results of any calculator, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CalculationOutputs {
    Cagr(CagrOutputs),
    Sip(SipOutputs),
    IntradayPnl(IntradayPnlOutputs),
    AverageBuy(AverageBuyOutputs),
    OptionsPnl(OptionsPnlOutputs),
    DividendYield(DividendYieldOutputs),
    StopLossTarget(StopLossTargetOutputs),
    Margin(MarginOutputs),
    TaxBrokerage(TaxBrokerageOutputs),
    StockSplit(StockSplitOutputs),
    LossRecovery(LossRecoveryOutputs),
    SharePriceMatch(SharePriceMatchOutputs),
    ProfitLoss(ProfitLossOutputs),
}

impl CalculationInputs {
    #[must_use]
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationInputs::Cagr(_) => CalculatorKind::Cagr,
            CalculationInputs::Sip(_) => CalculatorKind::Sip,
            CalculationInputs::IntradayPnl(_) => CalculatorKind::IntradayPnl,
            CalculationInputs::AverageBuy(_) => CalculatorKind::AverageBuy,
            CalculationInputs::OptionsPnl(_) => CalculatorKind::OptionsPnl,
            CalculationInputs::DividendYield(_) => CalculatorKind::DividendYield,
            CalculationInputs::StopLossTarget(_) => CalculatorKind::StopLossTarget,
            CalculationInputs::Margin(_) => CalculatorKind::Margin,
            CalculationInputs::TaxBrokerage(_) => CalculatorKind::TaxBrokerage,
            CalculationInputs::StockSplit(_) => CalculatorKind::StockSplit,
            CalculationInputs::LossRecovery(_) => CalculatorKind::LossRecovery,
            CalculationInputs::SharePriceMatch(_) => CalculatorKind::SharePriceMatch,
            CalculationInputs::ProfitLoss(_) => CalculatorKind::ProfitLoss,
        }
    }

    /// Run the evaluator for this kind.
    pub fn evaluate(&self) -> Result<CalculationOutputs, CoreError> {
        calculators::evaluate(self)
    }
}

impl CalculationOutputs {
    #[must_use]
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutputs::Cagr(_) => CalculatorKind::Cagr,
            CalculationOutputs::Sip(_) => CalculatorKind::Sip,
            CalculationOutputs::IntradayPnl(_) => CalculatorKind::IntradayPnl,
            CalculationOutputs::AverageBuy(_) => CalculatorKind::AverageBuy,
            CalculationOutputs::OptionsPnl(_) => CalculatorKind::OptionsPnl,
            CalculationOutputs::DividendYield(_) => CalculatorKind::DividendYield,
            CalculationOutputs::StopLossTarget(_) => CalculatorKind::StopLossTarget,
            CalculationOutputs::Margin(_) => CalculatorKind::Margin,
            CalculationOutputs::TaxBrokerage(_) => CalculatorKind::TaxBrokerage,
            CalculationOutputs::StockSplit(_) => CalculatorKind::StockSplit,
            CalculationOutputs::LossRecovery(_) => CalculatorKind::LossRecovery,
            CalculationOutputs::SharePriceMatch(_) => CalculatorKind::SharePriceMatch,
            CalculationOutputs::ProfitLoss(_) => CalculatorKind::ProfitLoss,
        }
    }
}

/// An input set together with the outputs its evaluator produced.
///
/// The only constructor is [`Calculation::evaluate`], so `outputs` can never
/// drift from `inputs`. Deserialization re-evaluates too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalculationRepr")]
pub struct Calculation {
    inputs: CalculationInputs,
    outputs: CalculationOutputs,
}

impl Calculation {
    pub fn evaluate(inputs: CalculationInputs) -> Result<Self, CoreError> {
        let outputs = inputs.evaluate()?;
        ensure_storable(&outputs)?;
        Ok(Self { inputs, outputs })
    }

    #[must_use]
    pub fn kind(&self) -> CalculatorKind {
        self.inputs.kind()
    }

    #[must_use]
    pub fn inputs(&self) -> &CalculationInputs {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &CalculationOutputs {
        &self.outputs
    }

    pub fn into_parts(self) -> (CalculationInputs, CalculationOutputs) {
        (self.inputs, self.outputs)
    }

    /// Rebuild from a stored pair. Inputs are authoritative: the outputs are
    /// recomputed and a mismatching stored copy is discarded.
    fn restore(
        inputs: CalculationInputs,
        stored: Option<CalculationOutputs>,
    ) -> Result<Self, CoreError> {
        let calculation = Self::evaluate(inputs)?;
        if let Some(stored) = stored {
            if stored != calculation.outputs {
                tracing::warn!(
                    kind = %calculation.kind(),
                    "stored outputs were stale, recomputed from inputs"
                );
            }
        }
        Ok(calculation)
    }
}

/// Outputs must read back from JSON exactly as written. serde_json stores
/// NaN and infinities as `null`, which would make the saved blob unloadable.
fn ensure_storable(outputs: &CalculationOutputs) -> Result<(), CoreError> {
    let stored = serde_json::to_value(outputs)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize outputs: {e}")))?;
    match serde_json::from_value::<CalculationOutputs>(stored) {
        Ok(read_back) if read_back == *outputs => Ok(()),
        _ => Err(CoreError::CalculationError(format!(
            "{} result contains a number that is not finite",
            outputs.kind()
        ))),
    }
}

#[derive(Deserialize)]
struct CalculationRepr {
    inputs: CalculationInputs,
    #[serde(default)]
    outputs: Option<CalculationOutputs>,
}

impl TryFrom<CalculationRepr> for Calculation {
    type Error = CoreError;

    fn try_from(repr: CalculationRepr) -> Result<Self, Self::Error> {
        Calculation::restore(repr.inputs, repr.outputs)
    }
}

/// A named, timestamped calculation in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr", into = "RecordRepr")]
pub struct CalculationRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Display name chosen by the user
    pub label: Option<String>,

    /// Set once at creation
    pub created_at: DateTime<Utc>,

    /// Set on every edit or rename
    pub updated_at: Option<DateTime<Utc>>,

    calculation: Calculation,
}

impl CalculationRecord {
    pub fn new(calculation: Calculation, label: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            created_at: Utc::now(),
            updated_at: None,
            calculation,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CalculatorKind {
        self.calculation.kind()
    }

    #[must_use]
    pub fn calculation(&self) -> &Calculation {
        &self.calculation
    }

    #[must_use]
    pub fn inputs(&self) -> &CalculationInputs {
        self.calculation.inputs()
    }

    #[must_use]
    pub fn outputs(&self) -> &CalculationOutputs {
        self.calculation.outputs()
    }

    /// Swap in a freshly evaluated calculation of the same kind.
    pub(crate) fn replace_calculation(&mut self, calculation: Calculation) {
        self.calculation = calculation;
        self.updated_at = Some(Utc::now());
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = Some(label);
        self.updated_at = Some(Utc::now());
    }
}

/// Wire shape of a record: kind, inputs and outputs side by side.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRepr {
    id: Uuid,
    kind: CalculatorKind,
    #[serde(default)]
    label: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    inputs: CalculationInputs,
    #[serde(default)]
    outputs: Option<CalculationOutputs>,
}

impl From<CalculationRecord> for RecordRepr {
    fn from(record: CalculationRecord) -> Self {
        let kind = record.kind();
        let (inputs, outputs) = record.calculation.into_parts();
        Self {
            id: record.id,
            kind,
            label: record.label,
            created_at: record.created_at,
            updated_at: record.updated_at,
            inputs,
            outputs: Some(outputs),
        }
    }
}

impl TryFrom<RecordRepr> for CalculationRecord {
    type Error = CoreError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        if repr.inputs.kind() != repr.kind {
            return Err(CoreError::Deserialization(format!(
                "Record {} is tagged '{}' but holds '{}' inputs",
                repr.id,
                repr.kind,
                repr.inputs.kind()
            )));
        }
        let calculation = Calculation::restore(repr.inputs, repr.outputs)?;
        Ok(Self {
            id: repr.id,
            label: repr.label,
            created_at: repr.created_at,
            updated_at: repr.updated_at,
            calculation,
        })
    }
}
