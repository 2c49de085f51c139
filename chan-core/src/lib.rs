//! chan-core
//!
//! Stage algorithms for Chan structural analysis of OHLCV bar series.
//!
//! - `validate`: input checks on raw bars.
//! - `structure`: inclusion merging, fractals, strokes, segments, and centers.
//! - `momentum`: MACD and divergence detection.
//! - `summary`: descriptive statistics over a finished analysis.
//! - `extremum`: the three-element turning-point test shared by fractal and
//!   segment detection.
//!
//! Every stage is a pure function of its inputs. Stages that cannot run for
//! lack of input return `ChanError::InsufficientData`, which callers treat as
//! a non-fatal "empty layer" outcome.
//!
//! Tracing
//! -------
//! With the `tracing` feature enabled each stage entry point opens a span
//! named `chan_core::<module>::<fn>` and emits a debug event with its counts.
#![warn(missing_docs)]

/// Shared interval helpers and the three-element extremum test.
pub mod extremum;
pub mod momentum;
pub mod structure;
pub mod summary;
pub mod types;
/// Raw input validation.
pub mod validate;

pub use momentum::{DivergenceScan, compute_macd, detect_divergences, ema};
pub use structure::{
    CenterScan, FractalScan, build_segments, build_strokes, detect_fractals, find_centers,
    normalize,
};
pub use summary::{center_relations, summarize};
pub use types::*;
pub use validate::validate_bars;
