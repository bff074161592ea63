use thiserror::Error;

/// Error taxonomy for one refresh cycle. Both variants are fatal to the cycle
/// that raised them; nothing in the core retries. The previously published
/// payload stays on screen.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Unrecognized moving-average kind or timezone label.
    #[error("configuration error: {0}")]
    Config(String),

    /// Source file missing or malformed, or the requested asset/pair slice is empty.
    #[error("data error: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        ChartError::Data(err.to_string())
    }
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Data(err.to_string())
    }
}
