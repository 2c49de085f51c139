use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stage that produced an error or warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Stage {
    /// Input bar validation.
    Validation,
    /// Inclusion merging of raw bars.
    Normalize,
    /// Three-bar turning point detection.
    Fractal,
    /// Stroke construction from alternating fractals.
    Stroke,
    /// Segment construction from strokes.
    Segment,
    /// Center (pivot) identification over segments.
    Center,
    /// Momentum divergence detection.
    Divergence,
}

impl Stage {
    /// Stable lowercase label used in error messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Normalize => "normalize",
            Self::Fractal => "fractal",
            Self::Stroke => "stroke",
            Self::Segment => "segment",
            Self::Center => "center",
            Self::Divergence => "divergence",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the chan workspace.
///
/// Fatal variants (`InvalidInput`, `Configuration`, `InvariantViolation`) abort an
/// analysis run. `InsufficientData` is reported per stage and collected into
/// `AnalysisResult::warnings` while the pipeline continues with an empty layer.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChanError {
    /// The bar sequence is malformed.
    #[error("invalid input{}: {reason}", fmt_index(.index))]
    InvalidInput {
        /// Offending bar position in the input, when a single bar is at fault.
        index: Option<usize>,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A stage received fewer elements than it needs to produce output.
    #[error("insufficient data for {stage}: required {required}, available {available}")]
    InsufficientData {
        /// Stage that could not run.
        stage: Stage,
        /// Minimum number of input elements the stage needs.
        required: usize,
        /// Number of input elements actually available.
        available: usize,
    },

    /// The analysis configuration is invalid.
    #[error("invalid configuration `{field}`: {reason}")]
    Configuration {
        /// Name of the offending configuration field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A stage produced output that breaks one of its structural guarantees.
    #[error("invariant violated in {stage}: {invariant}")]
    InvariantViolation {
        /// Stage whose output failed the check.
        stage: Stage,
        /// Description of the broken invariant.
        invariant: String,
    },
}

fn fmt_index(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!(" at bar {i}"))
}

impl ChanError {
    /// Helper: build an `InvalidInput` error for the bar at `index`.
    pub fn invalid_bar(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Helper: build an `InvalidInput` error that is not tied to one bar.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index: None,
            reason: reason.into(),
        }
    }

    /// Helper: build a `Configuration` error for `field`.
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `InsufficientData` error.
    #[must_use]
    pub const fn insufficient(stage: Stage, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            stage,
            required,
            available,
        }
    }

    /// Helper: build an `InvariantViolation` error.
    pub fn invariant(stage: Stage, invariant: impl Into<String>) -> Self {
        Self::InvariantViolation {
            stage,
            invariant: invariant.into(),
        }
    }

    /// Returns true if this error aborts an analysis run.
    ///
    /// Only `InsufficientData` is non-fatal: it empties one structural layer
    /// and is surfaced as a warning instead.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::InsufficientData { .. })
    }

    /// Stage associated with this error, if any.
    ///
    /// `InvalidInput` maps to [`Stage::Validation`]; `Configuration` errors are
    /// raised before any stage runs and return `None`.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::InvalidInput { .. } => Some(Stage::Validation),
            Self::InsufficientData { stage, .. } | Self::InvariantViolation { stage, .. } => {
                Some(*stage)
            }
            Self::Configuration { .. } => None,
        }
    }
}
