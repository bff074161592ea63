//! Working dataset construction: indicator columns, per-row bound columns and
//! the raw axis limits derived from them.

mod bounds;

pub use bounds::{Panel, RawLimits};

use {
    crate::{
        config::{MaConfig, MaKind, MacdConfig},
        domain::Candle,
        error::{ChartError, Result},
        indicators,
    },
    itertools::izip,
};

/// Column-major enriched dataset for one pair and timeframe. Replaced
/// wholesale on every active reload; only `dates_ms` is rewritten between
/// reloads (timezone rebasing).
#[derive(Debug, Clone, Default)]
pub struct WorkingDataset {
    /// Display dates: naive wall-clock epoch-ms under the selected timezone.
    pub dates_ms: Vec<i64>,

    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,

    pub ma_slow: Vec<f64>,
    pub ma_fast: Vec<f64>,

    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,

    pub candle_bound_min: Vec<f64>,
    pub candle_bound_max: Vec<f64>,
    pub macd_bound_min: Vec<f64>,
    pub macd_bound_max: Vec<f64>,
    pub volume_bound_min: Vec<f64>,
    pub volume_bound_max: Vec<f64>,

    /// Asset/quote signature shared by every row.
    pub pair: String,
}

impl WorkingDataset {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn first_date_ms(&self) -> Option<i64> {
        self.dates_ms.first().copied()
    }

    pub fn last_date_ms(&self) -> Option<i64> {
        self.dates_ms.last().copied()
    }
}

fn ma_columns(closes: &[f64], kind: MaKind, config: &MaConfig) -> (Vec<f64>, Vec<f64>) {
    match kind {
        MaKind::Sma => (
            indicators::sma(closes, config.slow_period),
            indicators::sma(closes, config.fast_period),
        ),
        MaKind::Ema => (
            indicators::ema(closes, config.slow_period),
            indicators::ema(closes, config.fast_period),
        ),
    }
}

fn column_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn column_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Build the enriched dataset and its raw limits from source rows.
///
/// With `drop_last`, the most recent bucket is dropped: that candle has not
/// closed yet and its values are still changing. The input is not mutated.
pub fn build(
    rows: &[Candle],
    ma_config: &MaConfig,
    macd_config: &MacdConfig,
    drop_last: bool,
) -> Result<(WorkingDataset, RawLimits)> {
    let rows = if drop_last && !rows.is_empty() {
        &rows[..rows.len() - 1]
    } else {
        rows
    };
    if rows.is_empty() {
        return Err(ChartError::Data("no closed candles to chart".into()));
    }

    let len = rows.len();
    let mut ds = WorkingDataset {
        pair: rows[0].pair.clone(),
        ..Default::default()
    };
    ds.dates_ms = Vec::with_capacity(len);
    ds.open = Vec::with_capacity(len);
    ds.high = Vec::with_capacity(len);
    ds.low = Vec::with_capacity(len);
    ds.close = Vec::with_capacity(len);
    ds.volume = Vec::with_capacity(len);

    for row in rows {
        ds.dates_ms.push(row.date_ms);
        ds.open.push(row.open);
        ds.high.push(row.high);
        ds.low.push(row.low);
        ds.close.push(row.close);
        ds.volume.push(row.volume);
    }

    let (ma_slow, ma_fast) = ma_columns(&ds.close, ma_config.kind, ma_config);
    ds.ma_slow = ma_slow;
    ds.ma_fast = ma_fast;

    let macd = indicators::macd(
        &ds.close,
        macd_config.fast_period,
        macd_config.slow_period,
        macd_config.signal_period,
    );

    // Per-row bound columns feed the client-side window-restricted auto-fit.
    ds.candle_bound_min = ds.low.clone();
    ds.candle_bound_max = ds.high.clone();

    ds.macd_bound_min = Vec::with_capacity(len);
    ds.macd_bound_max = Vec::with_capacity(len);
    for (l, s, h) in izip!(&macd.line, &macd.signal, &macd.histogram) {
        ds.macd_bound_min.push(l.min(*s).min(*h));
        ds.macd_bound_max.push(l.max(*s).max(*h));
    }

    ds.macd = macd.line;
    ds.macd_signal = macd.signal;
    ds.macd_histogram = macd.histogram;

    ds.volume_bound_min = vec![0.0; len];
    ds.volume_bound_max = ds.volume.clone();

    let limits = RawLimits {
        volume_min: column_min(&ds.volume_bound_min),
        volume_max: column_max(&ds.volume_bound_max),
        macd_min: column_min(&ds.macd_bound_min),
        macd_max: column_max(&ds.macd_bound_max),
        candle_min: column_min(&ds.candle_bound_min),
        candle_max: column_max(&ds.candle_bound_max),
    };

    Ok((ds, limits))
}

/// Recompute the MA columns in place from the live widget kind.
///
/// Explicit replacement for the original dashboard's side-effecting wrangle
/// callback: a pure function of the dataset's closes, the requested kind and
/// the period configuration, so switching kind needs no reload.
pub fn recompute_moving_averages(dataset: &mut WorkingDataset, kind: MaKind, config: &MaConfig) {
    let (ma_slow, ma_fast) = ma_columns(&dataset.close, kind, config);
    dataset.ma_slow = ma_slow;
    dataset.ma_fast = ma_fast;
}
