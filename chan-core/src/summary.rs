//! Descriptive digests of an analysis result.

use chan_types::{
    AnalysisResult, AnalysisSummary, Bar, BarStats, Center, CenterKind, CenterRelation,
    CenterStats, Direction, DivergenceKind, DivergenceSignal, DivergenceStats, ExtensionKind,
    Fractal, FractalKind, FractalStats, Stroke, StrokeStats,
};

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Build an [`AnalysisSummary`] for `result`, which was computed from `bars`.
#[must_use]
pub fn summarize(bars: &[Bar], result: &AnalysisResult) -> AnalysisSummary {
    AnalysisSummary {
        bars: bar_stats(bars),
        fractals: fractal_stats(&result.fractals),
        strokes: stroke_stats(&result.strokes),
        segment_count: result.segments.len(),
        centers: center_stats(&result.centers),
        center_relations: center_relations(&result.centers),
        divergences: divergence_stats(&result.divergence_signals),
    }
}

/// Range and endpoint statistics of the raw series; `None` when empty.
#[must_use]
pub fn bar_stats(bars: &[Bar]) -> Option<BarStats> {
    let (first, last) = (bars.first()?, bars.last()?);
    Some(BarStats {
        count: bars.len(),
        first_ts: first.ts,
        last_ts: last.ts,
        first_close: first.close,
        last_close: last.close,
        highest: bars.iter().map(|b| b.high).fold(f64::MIN, f64::max),
        lowest: bars.iter().map(|b| b.low).fold(f64::MAX, f64::min),
    })
}

/// Kind counts and mean strength.
#[must_use]
pub fn fractal_stats(fractals: &[Fractal]) -> FractalStats {
    FractalStats {
        peaks: fractals.iter().filter(|f| f.kind == FractalKind::Peak).count(),
        troughs: fractals
            .iter()
            .filter(|f| f.kind == FractalKind::Trough)
            .count(),
        mean_strength: mean(fractals.iter().map(|f| f.strength)),
    }
}

/// Direction counts, price-range spread, and efficiency (range per bar).
#[must_use]
pub fn stroke_stats(strokes: &[Stroke]) -> StrokeStats {
    if strokes.is_empty() {
        return StrokeStats::default();
    }
    let ranges: Vec<f64> = strokes.iter().map(Stroke::price_range).collect();
    let total_range: f64 = ranges.iter().sum();
    let total_bars: usize = strokes.iter().map(Stroke::bar_count).sum();
    StrokeStats {
        up: strokes.iter().filter(|s| s.direction == Direction::Up).count(),
        down: strokes
            .iter()
            .filter(|s| s.direction == Direction::Down)
            .count(),
        mean_range: mean(ranges.iter().copied()),
        max_range: ranges.iter().copied().fold(f64::MIN, f64::max),
        min_range: ranges.iter().copied().fold(f64::MAX, f64::min),
        mean_bars: mean(strokes.iter().map(|s| s.bar_count() as f64)),
        efficiency: if total_bars == 0 {
            0.0
        } else {
            total_range / total_bars as f64
        },
    }
}

/// Kind counts, strength spread, width, and duration.
#[must_use]
pub fn center_stats(centers: &[Center]) -> CenterStats {
    if centers.is_empty() {
        return CenterStats::default();
    }
    let count = |kind: CenterKind| centers.iter().filter(|c| c.kind == kind).count();
    CenterStats {
        up: count(CenterKind::Up),
        down: count(CenterKind::Down),
        consolidation: count(CenterKind::Consolidation),
        mean_strength: mean(centers.iter().map(|c| c.strength)),
        max_strength: centers.iter().map(|c| c.strength).fold(f64::MIN, f64::max),
        min_strength: centers.iter().map(|c| c.strength).fold(f64::MAX, f64::min),
        mean_range: mean(centers.iter().map(Center::range)),
        mean_duration_hours: mean(centers.iter().map(|c| hours_between(c.start_time, c.end_time))),
    }
}

/// Relate each center to the next one by mid-price change and time gap.
///
/// The change ratio buckets into horizontal (under 1%), upward (over 5%),
/// downward (under -5%), or slight trend. Strength grows with the size of
/// the change and with proximity in time.
#[must_use]
pub fn center_relations(centers: &[Center]) -> Vec<CenterRelation> {
    centers
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (cur, next) = (&pair[0], &pair[1]);
            let base = cur.mid();
            let change_ratio = if base.abs() > f64::EPSILON {
                (next.mid() - base) / base
            } else {
                0.0
            };
            let kind = if change_ratio.abs() < 0.01 {
                ExtensionKind::Horizontal
            } else if change_ratio > 0.05 {
                ExtensionKind::Upward
            } else if change_ratio < -0.05 {
                ExtensionKind::Downward
            } else {
                ExtensionKind::SlightTrend
            };
            let gap_hours = hours_between(cur.end_time, next.start_time);
            let strength =
                (change_ratio.abs() * 10.0 + 1.0 / (gap_hours.max(0.0) + 1.0)).clamp(0.0, 1.0);
            CenterRelation {
                from: i,
                to: i + 1,
                change_ratio,
                kind,
                gap_hours,
                strength,
            }
        })
        .collect()
}

/// Kind counts and mean strength.
#[must_use]
pub fn divergence_stats(signals: &[DivergenceSignal]) -> DivergenceStats {
    DivergenceStats {
        top: signals
            .iter()
            .filter(|s| s.signal_type == DivergenceKind::TopDivergence)
            .count(),
        bottom: signals
            .iter()
            .filter(|s| s.signal_type == DivergenceKind::BottomDivergence)
            .count(),
        mean_strength: mean(signals.iter().map(|s| s.strength)),
    }
}

fn hours_between(from: chrono::DateTime<chrono::Utc>, to: chrono::DateTime<chrono::Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
