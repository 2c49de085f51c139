//! Chan analysis data transfer objects, configuration, and error types.
#![warn(missing_docs)]

mod bar;
mod config;
mod error;
mod reports;
mod signal;
mod structure;

pub use bar::{Bar, MergedBar};
pub use config::{ChanConfig, DivergenceScope, FractalStrength, MomentumMeasure};
pub use error::{ChanError, Stage};
pub use reports::{
    AnalysisResult, AnalysisSummary, BarStats, CenterRelation, CenterStats, DivergenceStats,
    ExtensionKind, FractalStats, LayerQuality, QualityHint, QualityMetrics, StrokeStats,
};
pub use signal::{DivergenceKind, DivergenceLevel, DivergenceSignal, IndicatorPoint, ReferencePoint};
pub use structure::{
    Center, CenterKind, Direction, Fractal, FractalKind, Segment, SegmentBreak, Stroke,
};
