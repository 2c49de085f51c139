use chan_types::{
    Center, ChanConfig, ChanError, Direction, DivergenceKind, DivergenceLevel, DivergenceSignal,
    Fractal, IndicatorPoint, MomentumMeasure, ReferencePoint, Segment, Stage, Stroke,
};

/// Output of divergence detection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DivergenceScan {
    /// Signals ordered by time, then level, then type.
    pub signals: Vec<DivergenceSignal>,
    /// Number of swing pairs compared.
    pub compared: usize,
}

/// A directed move between two fractals, as seen by the comparison.
#[derive(Clone, Copy)]
struct Swing<'a> {
    start: &'a Fractal,
    end: &'a Fractal,
    direction: Direction,
}

/// Compare momentum between consecutive same-direction swings.
///
/// Pairs come from three levels, selected by `config.divergence_scope`:
/// - strokes `i` and `i + 2` inside one segment whose direction matches theirs;
/// - segments `j` and `j + 2`;
/// - the segment just before each center and the one just after it, when
///   both exist and run the same way.
///
/// Momentum for a swing is read from `indicator` over the raw bars between
/// the swing's start and end extremes, aggregated per
/// `config.momentum_measure` and signed in the swing's direction. A signal is
/// emitted when the later swing sets a strictly new extreme while its
/// momentum falls short of the earlier swing's by more than
/// `config.divergence_tolerance`.
///
/// # Errors
/// Returns `ChanError::InsufficientData` when fewer than three strokes exist,
/// since no comparable pair can be formed.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::momentum::detect_divergences",
        skip(strokes, segments, centers, indicator, config),
        fields(strokes = strokes.len(), segments = segments.len(), centers = centers.len()),
    )
)]
pub fn detect_divergences(
    strokes: &[Stroke],
    segments: &[Segment],
    centers: &[Center],
    indicator: &[IndicatorPoint],
    config: &ChanConfig,
) -> Result<DivergenceScan, ChanError> {
    if strokes.len() < 3 {
        return Err(ChanError::insufficient(Stage::Divergence, 3, strokes.len()));
    }

    let mut scan = DivergenceScan::default();

    if config.divergence_scope.includes_strokes() {
        for segment in segments {
            for pair in segment.strokes.windows(3) {
                let (first, second) = (&pair[0], &pair[2]);
                if first.direction != segment.direction {
                    continue;
                }
                compare(
                    &mut scan,
                    DivergenceLevel::Stroke,
                    stroke_swing(first),
                    stroke_swing(second),
                    indicator,
                    config,
                );
            }
        }
    }

    if config.divergence_scope.includes_segments() {
        for pair in segments.windows(3) {
            if let (Some(first), Some(second)) = (segment_swing(&pair[0]), segment_swing(&pair[2]))
            {
                compare(
                    &mut scan,
                    DivergenceLevel::Segment,
                    first,
                    second,
                    indicator,
                    config,
                );
            }
        }
    }

    if config.divergence_scope.includes_centers() {
        for center in centers {
            let swings = around_center(segments, center).and_then(|(entering, leaving)| {
                Some((segment_swing(entering)?, segment_swing(leaving)?))
            });
            if let Some((first, second)) = swings {
                compare(
                    &mut scan,
                    DivergenceLevel::Center,
                    first,
                    second,
                    indicator,
                    config,
                );
            }
        }
    }

    scan.signals.sort_by(|a, b| {
        (a.signal_time, a.level, a.signal_type).cmp(&(b.signal_time, b.level, b.signal_type))
    });

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target = "chan_core::momentum::detect_divergences",
        compared = scan.compared,
        signals = scan.signals.len(),
        "divergence scan complete"
    );

    Ok(scan)
}

fn stroke_swing(stroke: &Stroke) -> Swing<'_> {
    Swing {
        start: &stroke.start,
        end: &stroke.end,
        direction: stroke.direction,
    }
}

fn segment_swing(segment: &Segment) -> Option<Swing<'_>> {
    Some(Swing {
        start: segment.start_fractal()?,
        end: segment.end_fractal()?,
        direction: segment.direction,
    })
}

/// The segments entering and leaving `center`, located by its first member.
fn around_center<'a>(
    segments: &'a [Segment],
    center: &Center,
) -> Option<(&'a Segment, &'a Segment)> {
    let first_ts = center.member_segments.first()?.start_ts()?;
    let start = segments.iter().position(|s| s.start_ts() == Some(first_ts))?;
    let entering = segments.get(start.checked_sub(1)?)?;
    let leaving = segments.get(start + center.member_segments.len())?;
    Some((entering, leaving))
}

fn compare(
    scan: &mut DivergenceScan,
    level: DivergenceLevel,
    first: Swing<'_>,
    second: Swing<'_>,
    indicator: &[IndicatorPoint],
    config: &ChanConfig,
) {
    if first.direction != second.direction {
        return;
    }
    scan.compared += 1;

    let new_extreme = match first.direction {
        Direction::Up => second.end.price > first.end.price,
        Direction::Down => second.end.price < first.end.price,
    };
    if !new_extreme {
        return;
    }

    let m1 = swing_momentum(first, indicator, config.momentum_measure);
    let m2 = swing_momentum(second, indicator, config.momentum_measure);
    if m1 - m2 <= config.divergence_tolerance {
        return;
    }

    let strength = if m1.abs() > f64::EPSILON {
        ((m1 - m2) / m1.abs()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let signal_type = match first.direction {
        Direction::Up => DivergenceKind::TopDivergence,
        Direction::Down => DivergenceKind::BottomDivergence,
    };

    scan.signals.push(DivergenceSignal {
        signal_time: second.end.ts,
        signal_type,
        level,
        reference_points: vec![reference(first.end, m1), reference(second.end, m2)],
        strength,
    });
}

fn reference(f: &Fractal, momentum: f64) -> ReferencePoint {
    ReferencePoint {
        ts: f.ts,
        price: f.price,
        origin_index: f.origin_index,
        momentum,
    }
}

/// Histogram momentum between a swing's extremes, signed in its direction.
fn swing_momentum(swing: Swing<'_>, indicator: &[IndicatorPoint], measure: MomentumMeasure) -> f64 {
    let lo = swing.start.origin_index.min(swing.end.origin_index);
    let hi = swing.start.origin_index.max(swing.end.origin_index);
    let Some(last) = indicator.len().checked_sub(1) else {
        return 0.0;
    };
    let Some(span) = indicator.get(lo.min(last)..=hi.min(last)) else {
        return 0.0;
    };

    let sign = swing.direction.sign();
    let directed = span.iter().map(|p| sign * p.macd);
    match measure {
        MomentumMeasure::Peak => directed.fold(0.0, f64::max),
        _ => directed.sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chan_types::{DivergenceScope, FractalKind};

    fn fractal(pos: usize, kind: FractalKind, price: f64) -> Fractal {
        Fractal {
            position: pos,
            kind,
            price,
            strength: 0.5,
            ts: chrono::DateTime::from_timestamp(pos as i64 * 60, 0).unwrap(),
            origin_index: pos,
        }
    }

    fn indicator(hist: &[f64]) -> Vec<IndicatorPoint> {
        hist.iter()
            .enumerate()
            .map(|(i, &h)| IndicatorPoint {
                index: i,
                ts: chrono::DateTime::from_timestamp(i as i64 * 60, 0).unwrap(),
                dif: h,
                dea: 0.0,
                macd: h,
            })
            .collect()
    }

    #[test]
    fn peak_measure_uses_largest_directed_bar() {
        let up = Stroke::new(
            fractal(0, FractalKind::Trough, 1.0),
            fractal(3, FractalKind::Peak, 2.0),
        );
        let ind = indicator(&[0.5, 2.0, -1.0, 1.0]);
        let sum = swing_momentum(stroke_swing(&up), &ind, MomentumMeasure::Sum);
        let peak = swing_momentum(stroke_swing(&up), &ind, MomentumMeasure::Peak);
        assert!((sum - 2.5).abs() < 1e-12);
        assert!((peak - 2.0).abs() < 1e-12);
    }

    #[test]
    fn tolerance_suppresses_small_momentum_loss() {
        let s0 = Stroke::new(
            fractal(0, FractalKind::Trough, 10.0),
            fractal(5, FractalKind::Peak, 20.0),
        );
        let s1 = Stroke::new(s0.end.clone(), fractal(10, FractalKind::Trough, 15.0));
        let s2 = Stroke::new(s1.end.clone(), fractal(15, FractalKind::Peak, 21.0));
        let strokes = vec![s0, s1, s2];
        let segment = Segment {
            strokes: strokes.clone(),
            direction: Direction::Up,
            high: 21.0,
            low: 10.0,
            confirmed: false,
            termination: None,
        };
        let mut hist = vec![1.0; 16];
        hist[10..16].fill(0.9);
        let ind = indicator(&hist);

        let strict = ChanConfig {
            divergence_scope: DivergenceScope::Stroke,
            ..ChanConfig::default()
        };
        let scan = detect_divergences(&strokes, &[segment.clone()], &[], &ind, &strict).unwrap();
        assert_eq!(scan.signals.len(), 1);

        let tolerant = ChanConfig {
            divergence_tolerance: 1.0,
            ..strict
        };
        let scan = detect_divergences(&strokes, &[segment], &[], &ind, &tolerant).unwrap();
        assert!(scan.signals.is_empty());
        assert_eq!(scan.compared, 1);
    }
}
