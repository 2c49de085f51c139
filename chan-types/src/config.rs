//! Analysis configuration shared by the pipeline stages and the facade builder.

use serde::{Deserialize, Serialize};

use crate::error::ChanError;

/// Scoring function used to assign a strength to each fractal candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FractalStrength {
    /// Height of the middle bar above its higher neighbor, normalized by the
    /// three-bar range.
    #[default]
    Prominence,
    /// Weighted blend of windowed prominence, volume confirmation, surrounding
    /// confirmation, and position within the series.
    Composite,
}

/// How momentum over a swing is aggregated from the MACD histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MomentumMeasure {
    /// Sum of the histogram over the swing, signed in the swing's direction.
    #[default]
    Sum,
    /// Largest single histogram value in the swing's direction.
    Peak,
}

/// Structural levels scanned for divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DivergenceScope {
    /// Compare same-direction strokes inside one segment.
    Stroke,
    /// Compare same-direction segments.
    Segment,
    /// Compare the segment entering each center with the one leaving it.
    Center,
    /// Scan every level.
    #[default]
    All,
}

impl DivergenceScope {
    /// True when stroke-level pairs should be compared.
    #[must_use]
    pub const fn includes_strokes(self) -> bool {
        matches!(self, Self::Stroke | Self::All)
    }

    /// True when segment-level pairs should be compared.
    #[must_use]
    pub const fn includes_segments(self) -> bool {
        matches!(self, Self::Segment | Self::All)
    }

    /// True when pairs around centers should be compared.
    #[must_use]
    pub const fn includes_centers(self) -> bool {
        matches!(self, Self::Center | Self::All)
    }
}

/// Configuration for one analysis run.
///
/// Every field has a default, so partial JSON documents deserialize cleanly:
///
/// ```
/// use chan_types::ChanConfig;
///
/// let cfg = ChanConfig::from_json_str(r#"{ "min_stroke_separation": 3 }"#).unwrap();
/// assert_eq!(cfg.min_stroke_separation, 3);
/// assert_eq!(cfg.ema_slow, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChanConfig {
    /// Minimum number of merged bars strictly between a stroke's two fractals.
    pub min_stroke_separation: usize,
    /// Fast EMA period of the MACD.
    pub ema_fast: usize,
    /// Slow EMA period of the MACD; must exceed `ema_fast`.
    pub ema_slow: usize,
    /// Signal (DEA) EMA period of the MACD.
    pub ema_signal: usize,
    /// Minimum number of overlapping segments that form a center (at least 3).
    pub min_center_segments: usize,
    /// Momentum loss that must be exceeded before a divergence is reported.
    ///
    /// Zero means a strict less-than comparison.
    pub divergence_tolerance: f64,
    /// Strength function applied to fractal candidates.
    pub fractal_strength: FractalStrength,
    /// Candidates weaker than this are discarded before same-kind reduction.
    pub min_fractal_strength: f64,
    /// Aggregation applied to the MACD histogram over a swing.
    pub momentum_measure: MomentumMeasure,
    /// Levels scanned for divergence.
    pub divergence_scope: DivergenceScope,
}

impl Default for ChanConfig {
    fn default() -> Self {
        Self {
            min_stroke_separation: 4,
            ema_fast: 12,
            ema_slow: 26,
            ema_signal: 9,
            min_center_segments: 3,
            divergence_tolerance: 0.0,
            fractal_strength: FractalStrength::Prominence,
            min_fractal_strength: 0.0,
            momentum_measure: MomentumMeasure::Sum,
            divergence_scope: DivergenceScope::All,
        }
    }
}

impl ChanConfig {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    /// Returns `ChanError::Configuration` naming the first offending field.
    pub fn validate(&self) -> Result<(), ChanError> {
        if self.min_stroke_separation == 0 {
            return Err(ChanError::configuration(
                "min_stroke_separation",
                "must be at least 1",
            ));
        }
        if self.ema_fast == 0 {
            return Err(ChanError::configuration("ema_fast", "must be at least 1"));
        }
        if self.ema_slow <= self.ema_fast {
            return Err(ChanError::configuration(
                "ema_slow",
                format!(
                    "must be greater than ema_fast ({} <= {})",
                    self.ema_slow, self.ema_fast
                ),
            ));
        }
        if self.ema_signal == 0 {
            return Err(ChanError::configuration("ema_signal", "must be at least 1"));
        }
        if self.min_center_segments < 3 {
            return Err(ChanError::configuration(
                "min_center_segments",
                format!("must be at least 3, got {}", self.min_center_segments),
            ));
        }
        if !self.divergence_tolerance.is_finite() || self.divergence_tolerance < 0.0 {
            return Err(ChanError::configuration(
                "divergence_tolerance",
                format!(
                    "must be a finite, non-negative number, got {}",
                    self.divergence_tolerance
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_fractal_strength) {
            return Err(ChanError::configuration(
                "min_fractal_strength",
                format!("must lie in [0, 1], got {}", self.min_fractal_strength),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    /// Returns `ChanError::Configuration` if the document is not valid JSON for
    /// this shape or if [`validate`](Self::validate) rejects it.
    pub fn from_json_str(json: &str) -> Result<Self, ChanError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ChanError::configuration("<document>", e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
