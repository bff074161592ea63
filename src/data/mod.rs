//! CSV source loading.
//!
//! One file per timeframe (`data_5m.csv`, `data_1h.csv`, ...), each holding
//! every asset/quote pair in sequential blocks. The loader maps the header
//! by name, converts unix-second timestamps to epoch-ms exchange dates and
//! isolates the requested pair slice, preserving file order.

use {
    crate::{
        domain::{Candle, Timeframe},
        error::{ChartError, Result},
    },
    log::info,
    std::path::{Path, PathBuf},
};

/// Resolve the source file for a timeframe against the data directory.
pub fn source_path(data_dir: &Path, timeframe: Timeframe) -> PathBuf {
    data_dir.join(format!("data_{}.csv", timeframe.file_token()))
}

/// Load the rows whose `pair` column equals `field` (e.g. `BTC/EUR`).
pub fn load_candles(path: &Path, field: &str) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .from_path(path)
        .map_err(|e| ChartError::Data(format!("cannot open {}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            ChartError::Data(format!("missing column '{name}' in {}", path.display()))
        })
    };

    let ts_col = column("timestamp")?;
    let pair_col = column("pair")?;
    let open_col = column("open")?;
    let high_col = column("high")?;
    let low_col = column("low")?;
    let close_col = column("close")?;
    let volume_col = column("volume")?;

    let mut candles = Vec::new();
    for record in reader.records() {
        let record = record?;
        let pair = record.get(pair_col).unwrap_or("").trim();
        if pair != field {
            continue;
        }

        let number = |idx: usize| -> Result<f64> {
            record.get(idx).unwrap_or("").trim().parse::<f64>().map_err(|e| {
                ChartError::Data(format!("bad numeric field in {}: {e}", path.display()))
            })
        };

        let mut timestamp = number(ts_col)?;
        // Some exports stamp in milliseconds already.
        if timestamp > 1e12 {
            timestamp /= 1000.0;
        }

        candles.push(Candle::new(
            (timestamp * 1000.0) as i64,
            number(open_col)?,
            number(high_col)?,
            number(low_col)?,
            number(close_col)?,
            number(volume_col)?,
            pair.to_string(),
        ));
    }

    if candles.is_empty() {
        return Err(ChartError::Data(format!(
            "no rows for pair '{field}' in {}",
            path.display()
        )));
    }

    info!("loaded {} rows for {} from {}", candles.len(), field, path.display());
    Ok(candles)
}
