//! chan
//!
//! Deterministic Chan Theory structural analysis of OHLCV bar series.
//!
//! Overview
//! - Merges bars in an inclusion relation, then finds fractals (three-bar
//!   turning points), strokes (alternating fractal pairs), segments (stroke
//!   groups closed by a feature-sequence break), and centers (zones where
//!   consecutive segments overlap).
//! - Computes MACD over the raw closes and flags divergence where a swing sets
//!   a new extreme on weaker momentum than the comparable swing before it.
//! - Scores every layer by how many candidates survived and attaches hints
//!   for weak or missing structure.
//!
//! Key behaviors
//! - Validation is strict: malformed bars fail with `ChanError::InvalidInput`
//!   and are never silently repaired.
//! - Stages short of input do not fail the run. They leave their layer empty
//!   and record `ChanError::InsufficientData` in `AnalysisResult::warnings`.
//! - Output is a pure function of input and configuration; repeated runs
//!   produce identical results.
//!
//! Examples
//! ```
//! use chan::{Bar, ChanConfig};
//! use chrono::DateTime;
//!
//! let bars: Vec<Bar> = [(10.0, 8.0), (12.0, 9.0), (15.0, 11.0), (11.0, 7.0), (9.0, 6.0)]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &(high, low))| {
//!         let ts = DateTime::from_timestamp(i as i64 * 86_400, 0).unwrap();
//!         Bar::new(ts, low, high, low, high, 1_000.0)
//!     })
//!     .collect();
//!
//! let result = chan::analyze(&bars, &ChanConfig::default())?;
//! assert_eq!(result.fractals.len(), 1);
//! assert!(result.strokes.is_empty());
//! assert!(!result.warnings.is_empty());
//! # Ok::<(), chan::ChanError>(())
//! ```
//!
//! See `chan/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod invariants;
mod pipeline;
mod quality;

pub use core::{Chan, ChanBuilder};

pub use chan_core::summary::summarize;
pub use chan_types::{
    AnalysisResult, AnalysisSummary, Bar, BarStats, Center, CenterKind, CenterRelation,
    CenterStats, ChanConfig, ChanError, Direction, DivergenceKind, DivergenceLevel,
    DivergenceScope, DivergenceSignal, DivergenceStats, ExtensionKind, Fractal, FractalKind,
    FractalStats, FractalStrength, IndicatorPoint, LayerQuality, MergedBar, MomentumMeasure,
    QualityHint, QualityMetrics, ReferencePoint, Segment, SegmentBreak, Stage, Stroke, StrokeStats,
};

/// Run the full analysis over `bars` with `config`.
///
/// # Errors
/// Returns `ChanError::Configuration` for an invalid `config`,
/// `ChanError::InvalidInput` for a malformed series, and
/// `ChanError::InvariantViolation` if a stage breaks a structural guarantee.
pub fn analyze(bars: &[Bar], config: &ChanConfig) -> Result<AnalysisResult, ChanError> {
    pipeline::run(bars, config)
}
