use {
    crate::{
        config::constants::BAR_PADDING_PCT,
        error::ChartError,
    },
    serde::{Deserialize, Serialize},
    strum_macros::EnumIter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum Timeframe {
    #[default]
    M5,
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub fn minutes(self) -> i64 {
        match self {
            Self::M5 => 5,
            Self::M15 => 15,
            Self::H1 => 60,
            Self::H4 => 240,
            Self::D1 => 1440,
        }
    }

    /// One bar slot in epoch milliseconds.
    pub fn slot_ms(self) -> i64 {
        self.minutes() * 60 * 1000
    }

    /// Rendered bar width: the slot minus padding on both sides.
    pub fn bar_width_ms(self) -> f64 {
        self.slot_ms() as f64 * (1.0 - 2.0 * BAR_PADDING_PCT)
    }

    /// Lower-cased token used in the source filename template.
    pub fn file_token(self) -> &'static str {
        match self {
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::M5 => write!(f, "5m"),
            Self::M15 => write!(f, "15m"),
            Self::H1 => write!(f, "1h"),
            Self::H4 => write!(f, "4h"),
            Self::D1 => write!(f, "1D"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1D" | "1d" => Ok(Self::D1),
            other => Err(ChartError::Config(format!(
                "unrecognized timeframe label: '{other}'"
            ))),
        }
    }
}
