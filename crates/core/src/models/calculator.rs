use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The fixed set of calculators the engine provides.
/// Serialized in kebab-case (`"average-buy"`, `"stock-split"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Cagr,
    Sip,
    IntradayPnl,
    AverageBuy,
    OptionsPnl,
    DividendYield,
    StopLossTarget,
    Margin,
    TaxBrokerage,
    StockSplit,
    LossRecovery,
    SharePriceMatch,
    ProfitLoss,
}

impl CalculatorKind {
    /// Every calculator, in menu order.
    pub const ALL: [CalculatorKind; 13] = [
        CalculatorKind::Cagr,
        CalculatorKind::Sip,
        CalculatorKind::IntradayPnl,
        CalculatorKind::AverageBuy,
        CalculatorKind::OptionsPnl,
        CalculatorKind::DividendYield,
        CalculatorKind::StopLossTarget,
        CalculatorKind::Margin,
        CalculatorKind::TaxBrokerage,
        CalculatorKind::StockSplit,
        CalculatorKind::LossRecovery,
        CalculatorKind::SharePriceMatch,
        CalculatorKind::ProfitLoss,
    ];

    /// Stable identifier, identical to the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Cagr => "cagr",
            CalculatorKind::Sip => "sip",
            CalculatorKind::IntradayPnl => "intraday-pnl",
            CalculatorKind::AverageBuy => "average-buy",
            CalculatorKind::OptionsPnl => "options-pnl",
            CalculatorKind::DividendYield => "dividend-yield",
            CalculatorKind::StopLossTarget => "stop-loss-target",
            CalculatorKind::Margin => "margin",
            CalculatorKind::TaxBrokerage => "tax-brokerage",
            CalculatorKind::StockSplit => "stock-split",
            CalculatorKind::LossRecovery => "loss-recovery",
            CalculatorKind::SharePriceMatch => "share-price-match",
            CalculatorKind::ProfitLoss => "profit-loss",
        }
    }

    /// Human-readable title for menus and history headers.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Cagr => "CAGR Calculator",
            CalculatorKind::Sip => "SIP Calculator",
            CalculatorKind::IntradayPnl => "Intraday P&L Calculator",
            CalculatorKind::AverageBuy => "Average Buy Price Calculator",
            CalculatorKind::OptionsPnl => "Options P&L Calculator",
            CalculatorKind::DividendYield => "Dividend Yield Calculator",
            CalculatorKind::StopLossTarget => "Stop Loss & Target Calculator",
            CalculatorKind::Margin => "Margin Calculator",
            CalculatorKind::TaxBrokerage => "Tax & Brokerage Calculator",
            CalculatorKind::StockSplit => "Stock Split & Bonus Calculator",
            CalculatorKind::LossRecovery => "Loss Recovery Calculator",
            CalculatorKind::SharePriceMatch => "Share Price Match Calculator",
            CalculatorKind::ProfitLoss => "Profit/Loss Calculator",
        }
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CalculatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CalculatorKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown calculator kind '{s}'")))
    }
}
