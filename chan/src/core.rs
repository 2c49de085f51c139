use chan_core::{
    AnalysisResult, AnalysisSummary, Bar, ChanConfig, ChanError, DivergenceScope,
    FractalStrength, MomentumMeasure,
};

use crate::pipeline;

/// Configured analyzer. Holds only its immutable configuration, so one
/// instance can serve any number of series, from any thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Chan {
    pub(crate) cfg: ChanConfig,
}

/// Builder for constructing a [`Chan`] analyzer with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ChanBuilder {
    cfg: ChanConfig,
}

impl ChanBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: stroke separation 4, MACD 12/26/9, centers of at least three
    /// segments, zero divergence tolerance, prominence fractal strength with
    /// no floor, summed momentum, and divergence at every level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration, e.g. one loaded with
    /// [`ChanConfig::from_json_str`].
    #[must_use]
    pub fn config(mut self, cfg: ChanConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Minimum number of merged bars strictly between a stroke's endpoints.
    ///
    /// Higher values suppress short wiggles at the cost of reacting later to
    /// genuine reversals.
    #[must_use]
    pub const fn min_stroke_separation(mut self, bars: usize) -> Self {
        self.cfg.min_stroke_separation = bars;
        self
    }

    /// MACD periods: fast EMA, slow EMA, and signal EMA.
    #[must_use]
    pub const fn ema_periods(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.cfg.ema_fast = fast;
        self.cfg.ema_slow = slow;
        self.cfg.ema_signal = signal;
        self
    }

    /// Minimum overlapping segments that form a center (at least 3).
    #[must_use]
    pub const fn min_center_segments(mut self, segments: usize) -> Self {
        self.cfg.min_center_segments = segments;
        self
    }

    /// Momentum shortfall the later swing must exceed to signal divergence.
    ///
    /// Zero keeps the strict comparison; larger values trade sensitivity for
    /// fewer marginal signals.
    #[must_use]
    pub const fn divergence_tolerance(mut self, tolerance: f64) -> Self {
        self.cfg.divergence_tolerance = tolerance;
        self
    }

    /// Scoring function for fractal strength.
    #[must_use]
    pub const fn fractal_strength(mut self, strength: FractalStrength) -> Self {
        self.cfg.fractal_strength = strength;
        self
    }

    /// Drop fractal candidates scoring below `floor` (in `[0, 1]`).
    #[must_use]
    pub const fn min_fractal_strength(mut self, floor: f64) -> Self {
        self.cfg.min_fractal_strength = floor;
        self
    }

    /// How histogram values over a swing aggregate into its momentum.
    #[must_use]
    pub const fn momentum_measure(mut self, measure: MomentumMeasure) -> Self {
        self.cfg.momentum_measure = measure;
        self
    }

    /// Which swing levels are compared for divergence.
    #[must_use]
    pub const fn divergence_scope(mut self, scope: DivergenceScope) -> Self {
        self.cfg.divergence_scope = scope;
        self
    }

    /// Build the analyzer.
    ///
    /// # Errors
    /// Returns `ChanError::Configuration` naming the first invalid field.
    pub fn build(self) -> Result<Chan, ChanError> {
        self.cfg.validate()?;
        Ok(Chan { cfg: self.cfg })
    }
}

impl Chan {
    /// Start building a new analyzer.
    ///
    /// ```
    /// use chan::{Chan, MomentumMeasure};
    ///
    /// let chan = Chan::builder()
    ///     .min_stroke_separation(3)
    ///     .momentum_measure(MomentumMeasure::Peak)
    ///     .build()?;
    /// assert_eq!(chan.config().min_stroke_separation, 3);
    /// # Ok::<(), chan::ChanError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ChanBuilder {
        ChanBuilder::new()
    }

    /// The validated configuration this analyzer runs with.
    #[must_use]
    pub const fn config(&self) -> &ChanConfig {
        &self.cfg
    }

    /// Run the full pipeline over `bars`.
    ///
    /// # Errors
    /// Returns `ChanError::InvalidInput` for a malformed series and
    /// `ChanError::InvariantViolation` if a stage breaks a structural
    /// post-condition. Stages short of input do not fail the call; their
    /// `InsufficientData` errors land in `AnalysisResult::warnings`.
    pub fn analyze(&self, bars: &[Bar]) -> Result<AnalysisResult, ChanError> {
        pipeline::run(bars, &self.cfg)
    }

    /// Analyze `bars` and digest the result into descriptive statistics.
    ///
    /// # Errors
    /// Same as [`Chan::analyze`].
    pub fn summarize(&self, bars: &[Bar]) -> Result<AnalysisSummary, ChanError> {
        let result = self.analyze(bars)?;
        Ok(chan_core::summarize(bars, &result))
    }
}

impl Default for Chan {
    fn default() -> Self {
        Self {
            cfg: ChanConfig::default(),
        }
    }
}
