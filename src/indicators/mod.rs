//! Moving-average and MACD series computation.
//!
//! Plain functions over `&[f64]`, no state. Output length always equals input
//! length so every chart row stays dense.

/// MACD line, its smoothed signal line, and their difference. All three are
/// the same length as the input closes.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Rolling arithmetic mean over `window` samples.
///
/// Positions before the first full window are backfilled with the first
/// fully-computed mean (constant-extrapolation pad), never NaN and never a
/// partial-window average. `window` is clamped to `1..=len`.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let window = window.clamp(1, values.len());

    let mut rolling: f64 = values[..window].iter().sum();
    let first = rolling / window as f64;

    let mut out = vec![first; window];
    for i in window..values.len() {
        rolling += values[i] - values[i - window];
        out.push(rolling / window as f64);
    }
    out
}

/// Exponential moving average with `alpha = 2 / (window + 1)`, seeded with the
/// first sample (the `span=window, adjust=false` recurrence).
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let alpha = 2.0 / (window as f64 + 1.0);

    let mut prev = values[0];
    let mut out = Vec::with_capacity(values.len());
    out.push(prev);
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// MACD over `values`: fast EMA minus slow EMA, an EMA of that line as the
/// signal, and the line/signal difference as the histogram.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ma = ema(values, fast);
    let slow_ma = ema(values, slow);

    let line: Vec<f64> = fast_ma.iter().zip(&slow_ma).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(l, s)| l - s)
        .collect();

    MacdSeries {
        line,
        signal: signal_line,
        histogram,
    }
}
