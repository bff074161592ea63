//! Configuration module for the chart dashboard core.

mod indicator;

// Public
pub mod constants;

// Re-export commonly used items
pub use indicator::{MaConfig, MaKind, MacdConfig};
