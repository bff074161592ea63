use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleKind {
    Bullish,
    Bearish,
}

/// One closed time bucket of market data. Dates are exchange time (UTC),
/// epoch milliseconds. Immutable once read from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub date_ms: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    /// Asset/quote signature as stored in the source file, e.g. `BTC/EUR`.
    pub pair: String,
}

impl Candle {
    pub fn new(
        date_ms: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        pair: String,
    ) -> Self {
        Candle {
            date_ms,
            open,
            high,
            low,
            close,
            volume,
            pair,
        }
    }

    // A close below the open renders with the decreasing colour.
    pub fn kind(&self) -> CandleKind {
        if self.close < self.open {
            CandleKind::Bearish
        } else {
            CandleKind::Bullish
        }
    }
}
