//! Per-layer survival counts and the overall quality score.

use chan_core::summary::stroke_stats;
use chan_core::{Center, Fractal, LayerQuality, QualityHint, QualityMetrics, Segment, Stroke};

/// Fewer bars than this weigh the data score down to a flat 0.5.
const MIN_BARS: usize = 50;
/// Bar count at which the data score saturates.
const FULL_BARS: f64 = 100.0;
const LOW_FRACTAL_STRENGTH: f64 = 0.6;
const LOW_STROKE_EFFICIENCY: f64 = 0.5;
const WEAK_CENTER_STRENGTH: f64 = 0.5;

/// Stage counts gathered while the pipeline runs.
pub(crate) struct Counts<'a> {
    pub bars: usize,
    pub merged: usize,
    pub fractal_candidates: usize,
    pub fractals: &'a [Fractal],
    pub strokes: &'a [Stroke],
    pub segments: &'a [Segment],
    pub center_windows: usize,
    pub centers: &'a [Center],
    pub divergence_pairs: usize,
    pub divergences: usize,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub(crate) fn assess(c: &Counts<'_>) -> QualityMetrics {
    let mut hints = Vec::new();

    let data = if c.bars >= MIN_BARS {
        (c.bars as f64 / FULL_BARS).min(1.0)
    } else {
        hints.push(QualityHint::FewBars);
        0.5
    };

    let fractal = match mean(c.fractals.iter().map(|f| f.strength)) {
        Some(m) => {
            if m < LOW_FRACTAL_STRENGTH {
                hints.push(QualityHint::LowFractalStrength);
            }
            m
        }
        None => {
            hints.push(QualityHint::NoFractals);
            0.0
        }
    };

    let stroke = if c.strokes.is_empty() {
        hints.push(QualityHint::NoStrokes);
        0.0
    } else if stroke_stats(c.strokes).efficiency > LOW_STROKE_EFFICIENCY {
        0.8
    } else {
        hints.push(QualityHint::LowStrokeEfficiency);
        0.6
    };

    let center = match mean(c.centers.iter().map(|z| z.strength)) {
        Some(m) => {
            if m < WEAK_CENTER_STRENGTH {
                hints.push(QualityHint::WeakCenters);
            }
            m
        }
        None => {
            hints.push(QualityHint::NoCenters);
            0.0
        }
    };

    QualityMetrics {
        merged_bars: LayerQuality::new(c.bars, c.merged),
        fractals: LayerQuality::new(c.fractal_candidates, c.fractals.len()),
        strokes: LayerQuality::new(c.fractals.len().saturating_sub(1), c.strokes.len()),
        segments: LayerQuality::new(
            c.segments.len(),
            c.segments.iter().filter(|s| s.confirmed).count(),
        ),
        centers: LayerQuality::new(c.center_windows, c.centers.len()),
        divergences: LayerQuality::new(c.divergence_pairs, c.divergences),
        overall_score: (data * 0.2 + fractal * 0.3 + stroke * 0.3 + center * 0.2).clamp(0.0, 1.0),
        hints,
    }
}
