//! Momentum indicator points and divergence signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One MACD sample, aligned with a raw input bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Raw bar index.
    pub index: usize,
    /// Raw bar timestamp.
    pub ts: DateTime<Utc>,
    /// Fast EMA minus slow EMA.
    pub dif: f64,
    /// Signal-period EMA of `dif`.
    pub dea: f64,
    /// Histogram: `2 * (dif - dea)`.
    pub macd: f64,
}

/// Which way price outran momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// Higher high with weaker upside momentum.
    TopDivergence,
    /// Lower low with weaker downside momentum.
    BottomDivergence,
}

/// Structural level at which two swings were compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceLevel {
    /// Two strokes within one segment.
    Stroke,
    /// Two segments.
    Segment,
    /// The segments entering and leaving one center.
    Center,
}

/// Extreme of one compared swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Timestamp of the extreme.
    pub ts: DateTime<Utc>,
    /// Extreme price.
    pub price: f64,
    /// Raw bar index of the extreme.
    pub origin_index: usize,
    /// Momentum measured over the swing ending at this extreme.
    pub momentum: f64,
}

/// A new price extreme that momentum failed to confirm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceSignal {
    /// Time of the second, unconfirmed extreme.
    pub signal_time: DateTime<Utc>,
    /// Top or bottom divergence.
    pub signal_type: DivergenceKind,
    /// Structural level of the comparison.
    pub level: DivergenceLevel,
    /// The earlier extreme followed by the later one.
    pub reference_points: Vec<ReferencePoint>,
    /// Relative momentum loss in `[0, 1]`.
    pub strength: f64,
}
