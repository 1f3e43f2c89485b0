//! Statutory charges and brokerage for a round-trip trade (one buy, one sell).
//!
//! Rates follow a typical Indian discount-broker fee card. Every component is
//! rounded to 2 places and the total is the sum of the rounded components, so
//! a rendered breakdown always adds up.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::{finite, money};

/// Goods and services tax on brokerage plus exchange and SEBI fees.
pub const GST_RATE: f64 = 0.18;

/// SEBI turnover fee: 10 per crore.
pub const SEBI_RATE: f64 = 10.0 / 10_000_000.0;

/// Market segment a trade belongs to; selects the fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    EquityDelivery,
    EquityIntraday,
    Options,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::EquityDelivery => write!(f, "Equity Delivery"),
            Segment::EquityIntraday => write!(f, "Equity Intraday"),
            Segment::Options => write!(f, "Options"),
        }
    }
}

/// How brokerage is charged on each executed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brokerage {
    Free,
    Flat(f64),
    /// Percentage of order value, capped per order.
    PercentCapped { rate: f64, cap: f64 },
}

impl Brokerage {
    fn per_order(&self, order_value: f64) -> f64 {
        match *self {
            Brokerage::Free => 0.0,
            Brokerage::Flat(fee) => fee,
            Brokerage::PercentCapped { rate, cap } => (order_value * rate).min(cap),
        }
    }
}

/// Fee card for one segment. Rates are fractions (0.001 = 0.1%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeSchedule {
    pub brokerage: Brokerage,
    pub stt_buy: f64,
    pub stt_sell: f64,
    /// Exchange transaction charge on turnover.
    pub exchange: f64,
    /// Stamp duty on the buy side.
    pub stamp_buy: f64,
}

impl Segment {
    #[must_use]
    pub fn schedule(&self) -> ChargeSchedule {
        match self {
            Segment::EquityDelivery => ChargeSchedule {
                brokerage: Brokerage::Free,
                stt_buy: 0.001,
                stt_sell: 0.001,
                exchange: 0.000_029_7,
                stamp_buy: 0.000_15,
            },
            Segment::EquityIntraday => ChargeSchedule {
                brokerage: Brokerage::PercentCapped {
                    rate: 0.000_3,
                    cap: 20.0,
                },
                stt_buy: 0.0,
                stt_sell: 0.000_25,
                exchange: 0.000_029_7,
                stamp_buy: 0.000_03,
            },
            Segment::Options => ChargeSchedule {
                brokerage: Brokerage::Flat(20.0),
                stt_buy: 0.0,
                stt_sell: 0.001,
                exchange: 0.000_350_3,
                stamp_buy: 0.000_03,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    pub turnover: f64,
    pub brokerage: f64,
    pub stt: f64,
    pub exchange_charges: f64,
    pub sebi_fees: f64,
    pub stamp_duty: f64,
    pub gst: f64,
    pub total: f64,
}

/// Charges for buying `buy_value` and selling `sell_value` worth in `segment`.
/// Fails with `CalculationError` when the trade is too large to price.
pub fn compute(
    segment: Segment,
    buy_value: f64,
    sell_value: f64,
) -> Result<ChargeBreakdown, CoreError> {
    let s = segment.schedule();
    let turnover = finite("turnover", buy_value + sell_value)?;

    let brokerage = s.brokerage.per_order(buy_value) + s.brokerage.per_order(sell_value);
    let stt = buy_value * s.stt_buy + sell_value * s.stt_sell;
    let exchange = turnover * s.exchange;
    let sebi = turnover * SEBI_RATE;
    let stamp = buy_value * s.stamp_buy;
    let gst = (brokerage + exchange + sebi) * GST_RATE;

    let brokerage = money("brokerage", brokerage)?;
    let stt = money("STT", stt)?;
    let exchange = money("exchange charges", exchange)?;
    let sebi = money("SEBI fees", sebi)?;
    let stamp = money("stamp duty", stamp)?;
    let gst = money("GST", gst)?;
    let total = money("total charges", brokerage + stt + exchange + sebi + stamp + gst)?;

    Ok(ChargeBreakdown {
        turnover: money("turnover", turnover)?,
        brokerage,
        stt,
        exchange_charges: exchange,
        sebi_fees: sebi,
        stamp_duty: stamp,
        gst,
        total,
    })
}
