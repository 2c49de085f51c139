//! Momentum indicator and divergence detection.

/// Momentum comparison between same-direction swings.
pub mod divergence;
/// MACD over raw closes.
pub mod macd;

pub use divergence::{DivergenceScan, detect_divergences};
pub use macd::{compute_macd, ema};
