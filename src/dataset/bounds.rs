//! Per-panel axis limits and the padding rule shared with the client-side
//! auto-fit: 5% of the raw span on each end, except the volume floor which
//! stays on the axis so bars sit on it.

use {
    crate::config::constants::VOLUME_FLOOR_MAX,
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Panel {
    #[strum(serialize = "candlestick")]
    Candlestick,
    #[strum(serialize = "volume")]
    Volume,
    #[strum(serialize = "macd")]
    Macd,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Candlestick, Panel::Volume, Panel::Macd];
}

/// Unpadded extrema over the whole working dataset, recomputed on every
/// reload. Explicit per-panel mapping, no name-keyed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLimits {
    pub volume_min: f64,
    pub volume_max: f64,
    pub macd_min: f64,
    pub macd_max: f64,
    pub candle_min: f64,
    pub candle_max: f64,
}

impl RawLimits {
    pub fn for_panel(&self, panel: Panel) -> (f64, f64) {
        match panel {
            Panel::Candlestick => (self.candle_min, self.candle_max),
            Panel::Volume => (self.volume_min, self.volume_max),
            Panel::Macd => (self.macd_min, self.macd_max),
        }
    }

    /// Padded vertical range for one panel. Pure function of the stored
    /// extrema; the volume floor is clamped to `[0, VOLUME_FLOOR_MAX]` and
    /// left unpadded.
    pub fn padded(&self, panel: Panel, scale: f64) -> (f64, f64) {
        let (lower, upper) = self.for_panel(panel);
        match panel {
            Panel::Candlestick | Panel::Macd => {
                let pad = (upper - lower).abs() * scale;
                (lower - pad, upper + pad)
            }
            Panel::Volume => {
                let lower = lower.min(VOLUME_FLOOR_MAX).max(0.0);
                let pad = (upper - lower).abs() * scale;
                (lower, upper + pad)
            }
        }
    }
}
