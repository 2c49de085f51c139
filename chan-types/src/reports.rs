//! Report envelopes produced by an analysis run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bar::MergedBar;
use crate::error::ChanError;
use crate::signal::{DivergenceSignal, IndicatorPoint};
use crate::structure::{Center, Fractal, Segment, Stroke};

/// Everything one analysis run derives from a bar series.
///
/// Layers are ordered by time. Stages that lacked input leave their layer
/// empty and record an `InsufficientData` entry in `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    /// Inclusion-free bars.
    pub merged_bars: Vec<MergedBar>,
    /// Alternating turning points.
    pub fractals: Vec<Fractal>,
    /// Alternating strokes.
    pub strokes: Vec<Stroke>,
    /// Alternating segments partitioning the strokes.
    pub segments: Vec<Segment>,
    /// Non-overlapping centers.
    pub centers: Vec<Center>,
    /// One MACD point per raw bar.
    pub indicator_series: Vec<IndicatorPoint>,
    /// Divergences ordered by time, then level, then type.
    pub divergence_signals: Vec<DivergenceSignal>,
    /// Per-layer survival counts and the overall score.
    pub quality_metrics: QualityMetrics,
    /// Non-fatal issues encountered while building the result.
    pub warnings: Vec<ChanError>,
}

/// Survival statistics for one structural layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LayerQuality {
    /// Elements considered by the stage.
    pub candidates: usize,
    /// Elements that made it into the output.
    pub survivors: usize,
    /// `survivors / candidates`, or 0 without candidates.
    pub confidence: f64,
}

impl LayerQuality {
    /// Build a layer entry and derive its confidence.
    #[must_use]
    pub fn new(candidates: usize, survivors: usize) -> Self {
        let confidence = if candidates == 0 {
            0.0
        } else {
            (survivors as f64 / candidates as f64).clamp(0.0, 1.0)
        };
        Self {
            candidates,
            survivors,
            confidence,
        }
    }
}

/// Actionable observation about the input or the derived structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QualityHint {
    /// Fewer than 50 bars; structure is likely incomplete.
    FewBars,
    /// No turning points were found.
    NoFractals,
    /// Mean fractal strength is below 0.6.
    LowFractalStrength,
    /// No strokes could be formed.
    NoStrokes,
    /// Stroke price range per bar is 0.5 or less.
    LowStrokeEfficiency,
    /// No centers were found.
    NoCenters,
    /// Mean center strength is below 0.5.
    WeakCenters,
}

/// Per-layer counts and the weighted overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QualityMetrics {
    /// Input bars versus merged bars.
    pub merged_bars: LayerQuality,
    /// Raw turning points versus retained fractals.
    pub fractals: LayerQuality,
    /// Adjacent fractal pairs versus accepted strokes.
    pub strokes: LayerQuality,
    /// Segments built versus confirmed segments.
    pub segments: LayerQuality,
    /// Window starts examined versus centers emitted.
    pub centers: LayerQuality,
    /// Swing pairs compared versus signals emitted.
    pub divergences: LayerQuality,
    /// Weighted blend of data, fractal, stroke, and center quality in `[0, 1]`.
    pub overall_score: f64,
    /// Observations worth surfacing to a user.
    pub hints: Vec<QualityHint>,
}

/// Descriptive statistics over the input bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarStats {
    /// Number of raw bars.
    pub count: usize,
    /// First bar timestamp.
    pub first_ts: DateTime<Utc>,
    /// Last bar timestamp.
    pub last_ts: DateTime<Utc>,
    /// First close.
    pub first_close: f64,
    /// Last close.
    pub last_close: f64,
    /// Highest high.
    pub highest: f64,
    /// Lowest low.
    pub lowest: f64,
}

/// Descriptive statistics over fractals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FractalStats {
    /// Peak count.
    pub peaks: usize,
    /// Trough count.
    pub troughs: usize,
    /// Mean strength.
    pub mean_strength: f64,
}

/// Descriptive statistics over strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StrokeStats {
    /// Up stroke count.
    pub up: usize,
    /// Down stroke count.
    pub down: usize,
    /// Mean absolute price range.
    pub mean_range: f64,
    /// Largest absolute price range.
    pub max_range: f64,
    /// Smallest absolute price range.
    pub min_range: f64,
    /// Mean merged-bar count per stroke.
    pub mean_bars: f64,
    /// Total price range divided by total merged-bar count.
    pub efficiency: f64,
}

/// Descriptive statistics over centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CenterStats {
    /// Up center count.
    pub up: usize,
    /// Down center count.
    pub down: usize,
    /// Consolidation center count.
    pub consolidation: usize,
    /// Mean strength.
    pub mean_strength: f64,
    /// Largest strength.
    pub max_strength: f64,
    /// Smallest strength.
    pub min_strength: f64,
    /// Mean zone width.
    pub mean_range: f64,
    /// Mean duration in hours.
    pub mean_duration_hours: f64,
}

/// Descriptive statistics over divergence signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DivergenceStats {
    /// Top divergence count.
    pub top: usize,
    /// Bottom divergence count.
    pub bottom: usize,
    /// Mean strength.
    pub mean_strength: f64,
}

/// How a center relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Mid price moved less than 1%.
    Horizontal,
    /// Mid price rose more than 5%.
    Upward,
    /// Mid price fell more than 5%.
    Downward,
    /// Anything in between.
    SlightTrend,
}

/// Relation between two consecutive centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterRelation {
    /// Index of the earlier center in `AnalysisResult::centers`.
    pub from: usize,
    /// Index of the later center.
    pub to: usize,
    /// Relative mid-price change from the earlier to the later center.
    pub change_ratio: f64,
    /// Bucketed change.
    pub kind: ExtensionKind,
    /// Hours between the end of the earlier and the start of the later center.
    pub gap_hours: f64,
    /// Score in `[0, 1]` from change size and proximity.
    pub strength: f64,
}

/// Human-oriented digest of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Input statistics; `None` for an empty result.
    pub bars: Option<BarStats>,
    /// Fractal statistics.
    pub fractals: FractalStats,
    /// Stroke statistics.
    pub strokes: StrokeStats,
    /// Number of segments.
    pub segment_count: usize,
    /// Center statistics.
    pub centers: CenterStats,
    /// Relations between consecutive centers.
    pub center_relations: Vec<CenterRelation>,
    /// Divergence statistics.
    pub divergences: DivergenceStats,
}
