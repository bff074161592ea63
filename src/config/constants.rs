// Top Level Constants

/// Fraction of the raw span added as head-room when padding axis limits.
pub const PADDING_SCALE: f64 = 0.05;

/// Percent of the bar slot left empty on each side (bars fill 60% of the slot).
pub const BAR_PADDING_PCT: f64 = 0.20;

/// Ceiling applied when clamping the volume axis floor.
pub const VOLUME_FLOOR_MAX: f64 = 999_999_999.0;

// Colour scheme for increasing and decreasing candles.
pub const INCREASING_COLOR: &str = "#30A092";
pub const DECREASING_COLOR: &str = "#DC5B55";

pub mod indicator {
    pub const MA_FAST_LENGTH: usize = 13;
    pub const MA_SLOW_LENGTH: usize = 30;

    pub const MACD_FAST_LENGTH: usize = 13;
    pub const MACD_SLOW_LENGTH: usize = 30;
    pub const MACD_SIGNAL_LENGTH: usize = 9;
}

pub mod widget {
    /// Default timezone selection shown by the dashboard.
    pub const DEFAULT_TIMEZONE_LABEL: &str = "(UTC+01:00) London";
    pub const DEFAULT_MA_LABEL: &str = "SMA (13/30)";
    pub const DEFAULT_ASSET: &str = "BTC";
    pub const DEFAULT_PAIR: &str = "EUR";

    pub const ASSET_OPTIONS: &[&str] = &[
        "BTC", "ETH", "ZEC", "LTC", "XMR", "DASH", "EOS", "ETC", "XLM", "XRP",
    ];
    pub const PAIR_OPTIONS: &[&str] = &["EUR", "USD"];
}
