mod common;

use chan_core::{
    Center, CenterKind, ChanConfig, ChanError, DivergenceKind, DivergenceLevel,
    DivergenceScope, FractalKind, IndicatorPoint, MomentumMeasure, Segment, Stage, Stroke,
    build_segments, detect_divergences,
};
use common::{fractal, ts};

fn indicator(hist: &[f64]) -> Vec<IndicatorPoint> {
    hist.iter()
        .enumerate()
        .map(|(i, &h)| IndicatorPoint {
            index: i,
            ts: ts(i),
            dif: h,
            dea: 0.0,
            macd: h,
        })
        .collect()
}

fn falling_strokes(last_low: f64) -> Vec<Stroke> {
    let f = [
        fractal(0, FractalKind::Peak, 30.0),
        fractal(5, FractalKind::Trough, 20.0),
        fractal(10, FractalKind::Peak, 25.0),
        fractal(15, FractalKind::Trough, last_low),
    ];
    f.windows(2)
        .map(|w| Stroke::new(w[0].clone(), w[1].clone()))
        .collect()
}

fn fading_histogram() -> Vec<IndicatorPoint> {
    let mut hist = vec![0.0; 16];
    hist[0..=5].fill(-2.0);
    hist[6..10].fill(1.0);
    hist[10..=15].fill(-0.5);
    indicator(&hist)
}

#[test]
fn new_low_on_weaker_momentum_is_bottom_divergence() {
    let strokes = falling_strokes(18.0);
    let segments = build_segments(&strokes).unwrap();
    assert_eq!(segments.len(), 1);

    let scan =
        detect_divergences(&strokes, &segments, &[], &fading_histogram(), &ChanConfig::default())
            .unwrap();
    assert_eq!(scan.compared, 1);
    assert_eq!(scan.signals.len(), 1);

    let signal = &scan.signals[0];
    assert_eq!(signal.signal_type, DivergenceKind::BottomDivergence);
    assert_eq!(signal.level, DivergenceLevel::Stroke);
    assert_eq!(signal.signal_time, ts(15));
    assert_eq!(signal.reference_points.len(), 2);
    assert_eq!(signal.reference_points[0].price, 20.0);
    assert_eq!(signal.reference_points[1].price, 18.0);
    // Sum of directed histogram: 6 * 2.0 against 6 * 0.5.
    assert!((signal.reference_points[0].momentum - 12.0).abs() < 1e-12);
    assert!((signal.reference_points[1].momentum - 3.0).abs() < 1e-12);
    assert!((signal.strength - 0.75).abs() < 1e-12);
}

#[test]
fn peak_measure_still_detects_fading_momentum() {
    let strokes = falling_strokes(18.0);
    let segments = build_segments(&strokes).unwrap();
    let cfg = ChanConfig {
        momentum_measure: MomentumMeasure::Peak,
        ..ChanConfig::default()
    };
    let scan = detect_divergences(&strokes, &segments, &[], &fading_histogram(), &cfg).unwrap();
    assert_eq!(scan.signals.len(), 1);
    assert!((scan.signals[0].strength - 0.75).abs() < 1e-12);
}

#[test]
fn higher_low_is_not_a_divergence() {
    let strokes = falling_strokes(21.0);
    let segments = build_segments(&strokes).unwrap();
    let scan =
        detect_divergences(&strokes, &segments, &[], &fading_histogram(), &ChanConfig::default())
            .unwrap();
    assert_eq!(scan.compared, 1);
    assert!(scan.signals.is_empty());
}

#[test]
fn fewer_than_three_strokes_is_insufficient() {
    let strokes = falling_strokes(18.0)[..2].to_vec();
    let segments = build_segments(&strokes).unwrap();
    let err = detect_divergences(&strokes, &segments, &[], &fading_histogram(), &ChanConfig::default())
        .unwrap_err();
    assert_eq!(err, ChanError::insufficient(Stage::Divergence, 3, 2));
}

/// Five one-stroke segments: an up leg into a three-segment band, then an up
/// leg out of it to a higher high.
fn banded_segments() -> (Vec<Stroke>, Vec<Segment>) {
    let f = [
        fractal(0, FractalKind::Trough, 10.0),
        fractal(5, FractalKind::Peak, 20.0),
        fractal(10, FractalKind::Trough, 16.0),
        fractal(15, FractalKind::Peak, 19.0),
        fractal(20, FractalKind::Trough, 17.0),
        fractal(25, FractalKind::Peak, 25.0),
    ];
    let strokes: Vec<Stroke> = f
        .windows(2)
        .map(|w| Stroke::new(w[0].clone(), w[1].clone()))
        .collect();
    let segments = strokes
        .iter()
        .map(|s| Segment {
            strokes: vec![s.clone()],
            direction: s.direction,
            high: s.start.price.max(s.end.price),
            low: s.start.price.min(s.end.price),
            confirmed: true,
            termination: None,
        })
        .collect();
    (strokes, segments)
}

fn band(members: &[Segment]) -> Center {
    Center {
        high: members.iter().map(|s| s.high).fold(f64::MAX, f64::min),
        low: members.iter().map(|s| s.low).fold(f64::MIN, f64::max),
        start_time: members[0].start_ts().unwrap(),
        end_time: members[members.len() - 1].end_ts().unwrap(),
        kind: CenterKind::Up,
        member_segments: members.to_vec(),
        strength: 0.5,
    }
}

fn exit_fades_histogram() -> Vec<IndicatorPoint> {
    let mut hist = vec![0.0; 26];
    hist[0..=5].fill(2.0);
    hist[20..=25].fill(0.5);
    indicator(&hist)
}

#[test]
fn weaker_exit_from_a_center_is_center_level_divergence() {
    let (strokes, segments) = banded_segments();
    let centers = vec![band(&segments[1..4])];
    let scan = detect_divergences(
        &strokes,
        &segments,
        &centers,
        &exit_fades_histogram(),
        &ChanConfig::default(),
    )
    .unwrap();

    // Three segment pairs plus the pair around the center.
    assert_eq!(scan.compared, 4);
    assert_eq!(scan.signals.len(), 1);
    let signal = &scan.signals[0];
    assert_eq!(signal.level, DivergenceLevel::Center);
    assert_eq!(signal.signal_type, DivergenceKind::TopDivergence);
    assert_eq!(signal.signal_time, ts(25));
    assert_eq!(signal.reference_points[0].price, 20.0);
    assert_eq!(signal.reference_points[1].price, 25.0);
    assert!((signal.reference_points[0].momentum - 12.0).abs() < 1e-12);
    assert!((signal.reference_points[1].momentum - 3.0).abs() < 1e-12);
    assert!((signal.strength - 0.75).abs() < 1e-12);
}

#[test]
fn center_scope_skips_other_levels() {
    let (strokes, segments) = banded_segments();
    let centers = vec![band(&segments[1..4])];
    let cfg = ChanConfig {
        divergence_scope: DivergenceScope::Center,
        ..ChanConfig::default()
    };
    let scan =
        detect_divergences(&strokes, &segments, &centers, &exit_fades_histogram(), &cfg).unwrap();
    assert_eq!(scan.compared, 1);
    assert_eq!(scan.signals.len(), 1);

    let cfg = ChanConfig {
        divergence_scope: DivergenceScope::Segment,
        ..ChanConfig::default()
    };
    let scan =
        detect_divergences(&strokes, &segments, &centers, &exit_fades_histogram(), &cfg).unwrap();
    assert!(scan.signals.is_empty());
}

#[test]
fn center_without_an_entering_segment_is_not_compared() {
    let (strokes, segments) = banded_segments();
    let centers = vec![band(&segments[0..3])];
    let cfg = ChanConfig {
        divergence_scope: DivergenceScope::Center,
        ..ChanConfig::default()
    };
    let scan =
        detect_divergences(&strokes, &segments, &centers, &exit_fades_histogram(), &cfg).unwrap();
    assert_eq!(scan.compared, 0);
    assert!(scan.signals.is_empty());
}
