//! Indicator configuration types (Immutable Blueprints)

use {
    crate::{
        config::constants::indicator as defaults,
        error::{ChartError, Result},
    },
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default)]
pub enum MaKind {
    #[default]
    #[strum(serialize = "SMA")]
    Sma,
    #[strum(serialize = "EMA")]
    Ema,
}

impl MaKind {
    /// Parse a widget label such as `"SMA (13/30)"`; only the leading token matters.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.split_whitespace().next() {
            Some("SMA") => Ok(Self::Sma),
            Some("EMA") => Ok(Self::Ema),
            other => Err(ChartError::Config(format!(
                "unrecognized moving-average kind: '{}'",
                other.unwrap_or_default()
            ))),
        }
    }
}

/// Moving-average pair configuration. `fast_period < slow_period` is assumed
/// for meaningful output, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaConfig {
    pub kind: MaKind,
    pub slow_period: usize,
    pub fast_period: usize,
}

impl Default for MaConfig {
    fn default() -> Self {
        Self {
            kind: MaKind::default(),
            slow_period: defaults::MA_SLOW_LENGTH,
            fast_period: defaults::MA_FAST_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: defaults::MACD_FAST_LENGTH,
            slow_period: defaults::MACD_SLOW_LENGTH,
            signal_period: defaults::MACD_SIGNAL_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_widget_labels() {
        assert_eq!(MaKind::from_label("SMA (13/30)").unwrap(), MaKind::Sma);
        assert_eq!(MaKind::from_label("EMA (13/30)").unwrap(), MaKind::Ema);
        assert!(MaKind::from_label("WMA (13/30)").is_err());
        assert!(MaKind::from_label("").is_err());
    }

    #[test]
    fn default_periods_match_dashboard() {
        let ma = MaConfig::default();
        assert_eq!((ma.fast_period, ma.slow_period), (13, 30));

        let macd = MacdConfig::default();
        assert_eq!(
            (macd.fast_period, macd.slow_period, macd.signal_period),
            (13, 30, 9)
        );
    }
}
