use chan_types::{Bar, ChanConfig, ChanError, Fractal, FractalKind, FractalStrength, MergedBar, Stage};

use crate::extremum::{PriceExtent, reduce_same_kind, turning_points};

/// Output of fractal detection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FractalScan {
    /// Retained fractals, alternating in kind.
    pub fractals: Vec<Fractal>,
    /// Number of raw three-bar turning points before filtering and reduction.
    pub candidates: usize,
}

/// Find turning points on an inclusion-free bar sequence.
///
/// Each interior merged bar whose high exceeds both neighbors' highs is a
/// peak candidate; one whose low undercuts both neighbors' lows is a trough
/// candidate. Candidates are scored with `config.fractal_strength`, those
/// below `config.min_fractal_strength` are dropped, and runs of the same kind
/// collapse to the most extreme member (earliest on ties).
///
/// `bars` is the raw series `merged` was built from; it is used to locate the
/// raw bar that printed each extreme.
///
/// # Errors
/// Returns `ChanError::InsufficientData` when fewer than three merged bars
/// are available.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::structure::detect_fractals",
        skip(merged, bars, config),
        fields(merged = merged.len()),
    )
)]
pub fn detect_fractals(
    merged: &[MergedBar],
    bars: &[Bar],
    config: &ChanConfig,
) -> Result<FractalScan, ChanError> {
    if merged.len() < 3 {
        return Err(ChanError::insufficient(Stage::Fractal, 3, merged.len()));
    }

    let raw = turning_points(merged, PriceExtent::extent);
    let candidates = raw.len();

    let scored: Vec<Fractal> = raw
        .into_iter()
        .map(|(position, kind)| {
            let strength = match config.fractal_strength {
                FractalStrength::Composite => composite(merged, position, kind),
                _ => prominence(merged, position, kind),
            };
            build_fractal(merged, bars, position, kind, strength)
        })
        .filter(|f| f.strength >= config.min_fractal_strength)
        .collect();

    let fractals = reduce_same_kind(scored, |f| (f.kind, f.price));

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target = "chan_core::structure::detect_fractals",
        candidates,
        kept = fractals.len(),
        "fractal scan complete"
    );

    Ok(FractalScan {
        fractals,
        candidates,
    })
}

fn build_fractal(
    merged: &[MergedBar],
    bars: &[Bar],
    position: usize,
    kind: FractalKind,
    strength: f64,
) -> Fractal {
    let mb = &merged[position];
    let price = match kind {
        FractalKind::Peak => mb.high,
        FractalKind::Trough => mb.low,
    };
    // The merged extreme is always one absorbed bar's own extreme.
    let origin = mb
        .origin_indices
        .iter()
        .copied()
        .find(|&i| {
            bars.get(i).is_some_and(|b| match kind {
                FractalKind::Peak => b.high == price,
                FractalKind::Trough => b.low == price,
            })
        })
        .unwrap_or_else(|| mb.last_origin());
    let ts = bars.get(origin).map_or(mb.ts, |b| b.ts);

    Fractal {
        position,
        kind,
        price,
        strength,
        ts,
        origin_index: origin,
    }
}

/// Height above the higher neighbor, normalized by the three-bar range.
fn prominence(merged: &[MergedBar], i: usize, kind: FractalKind) -> f64 {
    let (l, m, r) = (&merged[i - 1], &merged[i], &merged[i + 1]);
    let (lift, span) = match kind {
        FractalKind::Peak => (
            m.high - l.high.max(r.high),
            m.high - l.low.min(m.low).min(r.low),
        ),
        FractalKind::Trough => (
            l.low.min(r.low) - m.low,
            l.high.max(m.high).max(r.high) - m.low,
        ),
    };
    if span <= 0.0 {
        return 0.0;
    }
    (lift / span).clamp(0.0, 1.0)
}

const NEUTRAL: f64 = 0.5;

/// Weighted blend of four windowed factors.
fn composite(merged: &[MergedBar], i: usize, kind: FractalKind) -> f64 {
    let score = windowed_prominence(merged, i, kind) * 0.3
        + volume_confirmation(merged, i) * 0.2
        + surrounding_confirmation(merged, i, kind) * 0.3
        + relative_position(merged, i, kind) * 0.2;
    score.clamp(0.0, 1.0)
}

/// Neighbor indices within `radius` on both sides, or `None` when the window
/// would be narrower than `min_radius`.
fn neighbors(len: usize, i: usize, radius: usize, min_radius: usize) -> Option<Vec<usize>> {
    let w = radius.min(i).min(len - i - 1);
    if w < min_radius {
        return None;
    }
    Some((i - w..=i + w).filter(|&j| j != i).collect())
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn windowed_prominence(merged: &[MergedBar], i: usize, kind: FractalKind) -> f64 {
    let Some(idx) = neighbors(merged.len(), i, 5, 1) else {
        return NEUTRAL;
    };
    let m = &merged[i];
    let raw = match kind {
        FractalKind::Peak => {
            let nearest = idx.iter().map(|&j| merged[j].high).fold(f64::MIN, f64::max);
            let Some(avg) = mean(idx.iter().map(|&j| merged[j].high)) else {
                return NEUTRAL;
            };
            if nearest == 0.0 || avg == 0.0 {
                return NEUTRAL;
            }
            (m.high - nearest) / nearest + 0.5 * (m.high - avg) / avg
        }
        FractalKind::Trough => {
            let nearest = idx.iter().map(|&j| merged[j].low).fold(f64::MAX, f64::min);
            let Some(avg) = mean(idx.iter().map(|&j| merged[j].low)) else {
                return NEUTRAL;
            };
            if avg == 0.0 {
                return NEUTRAL;
            }
            (nearest - m.low) / avg + 0.5 * (avg - m.low) / avg
        }
    };
    (raw * 10.0).clamp(0.0, 1.0)
}

fn volume_confirmation(merged: &[MergedBar], i: usize) -> f64 {
    let Some(idx) = neighbors(merged.len(), i, 3, 1) else {
        return NEUTRAL;
    };
    match mean(idx.iter().map(|&j| merged[j].volume)) {
        Some(avg) if avg > 0.0 => (merged[i].volume / avg - 0.5).clamp(0.0, 1.0),
        _ => NEUTRAL,
    }
}

fn surrounding_confirmation(merged: &[MergedBar], i: usize, kind: FractalKind) -> f64 {
    let Some(idx) = neighbors(merged.len(), i, 10, 2) else {
        return NEUTRAL;
    };
    let m = &merged[i];
    let confirming = idx
        .iter()
        .filter(|&&j| match kind {
            FractalKind::Peak => merged[j].high < m.high,
            FractalKind::Trough => merged[j].low > m.low,
        })
        .count();
    confirming as f64 / idx.len() as f64
}

fn relative_position(merged: &[MergedBar], i: usize, kind: FractalKind) -> f64 {
    let values: Vec<f64> = match kind {
        FractalKind::Peak => merged.iter().map(|b| b.high).collect(),
        FractalKind::Trough => merged.iter().map(|b| b.low).collect(),
    };
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    if max <= min {
        return NEUTRAL;
    }
    let pos = (values[i] - min) / (max - min);
    match kind {
        FractalKind::Peak => pos,
        FractalKind::Trough => 1.0 - pos,
    }
}
