mod candle;
mod timeframe;

pub use candle::{Candle, CandleKind};
pub use timeframe::Timeframe;
