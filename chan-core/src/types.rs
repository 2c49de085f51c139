//! Re-export of the shared data model from `chan-types`.
// Downstream crates can depend on `chan-core` alone.

pub use chan_types::{
    AnalysisResult, AnalysisSummary, Bar, BarStats, Center, CenterKind, CenterRelation,
    CenterStats, ChanConfig, ChanError, Direction, DivergenceKind, DivergenceLevel,
    DivergenceScope, DivergenceSignal, DivergenceStats, ExtensionKind, Fractal, FractalKind,
    FractalStats, FractalStrength, IndicatorPoint, LayerQuality, MergedBar, MomentumMeasure,
    QualityHint, QualityMetrics, ReferencePoint, Segment, SegmentBreak, Stage, Stroke, StrokeStats,
};
