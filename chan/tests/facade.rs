mod helpers;

use chan::{
    Chan, ChanConfig, DivergenceScope, FractalStrength, MomentumMeasure, analyze, summarize,
};
use helpers::series;

#[test]
fn builder_setters_land_in_config() {
    let chan = Chan::builder()
        .min_stroke_separation(3)
        .ema_periods(5, 10, 4)
        .min_center_segments(4)
        .divergence_tolerance(0.25)
        .fractal_strength(FractalStrength::Composite)
        .min_fractal_strength(0.1)
        .momentum_measure(MomentumMeasure::Peak)
        .divergence_scope(DivergenceScope::Stroke)
        .build()
        .unwrap();
    let cfg = chan.config();
    assert_eq!(cfg.min_stroke_separation, 3);
    assert_eq!((cfg.ema_fast, cfg.ema_slow, cfg.ema_signal), (5, 10, 4));
    assert_eq!(cfg.min_center_segments, 4);
    assert_eq!(cfg.divergence_tolerance, 0.25);
    assert_eq!(cfg.fractal_strength, FractalStrength::Composite);
    assert_eq!(cfg.min_fractal_strength, 0.1);
    assert_eq!(cfg.momentum_measure, MomentumMeasure::Peak);
    assert_eq!(cfg.divergence_scope, DivergenceScope::Stroke);
}

#[test]
fn analyzer_matches_free_function() {
    let bars = series("trend_center");
    let chan = Chan::builder().build().unwrap();
    assert_eq!(chan, Chan::default());
    assert_eq!(
        chan.analyze(&bars).unwrap(),
        analyze(&bars, &ChanConfig::default()).unwrap()
    );
}

#[test]
fn config_loaded_from_json_drives_the_builder() {
    let cfg = ChanConfig::from_json_str(r#"{"divergence_scope": "segment"}"#).unwrap();
    let chan = Chan::builder().config(cfg).build().unwrap();
    let result = chan.analyze(&series("trend_center")).unwrap();
    assert_eq!(result.divergence_signals.len(), 1);
}

#[test]
fn summary_digests_the_analysis() {
    let bars = series("trend_center");
    let chan = Chan::default();
    let summary = chan.summarize(&bars).unwrap();
    assert_eq!(summary, summarize(&bars, &chan.analyze(&bars).unwrap()));

    let stats = summary.bars.as_ref().unwrap();
    assert_eq!(stats.count, bars.len());
    assert_eq!(stats.first_ts, bars[0].ts);
    assert_eq!(summary.segment_count, 3);
    assert_eq!(summary.centers.consolidation, 1);
    assert!(summary.center_relations.is_empty());
    assert_eq!(summary.divergences.top, 3);
    assert_eq!(summary.divergences.bottom, 0);
    assert_eq!(summary.strokes.up + summary.strokes.down, 21);
}

#[test]
fn analyzer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Chan>();

    let chan = Chan::default();
    let bars = series("zigzag");
    let expected = chan.analyze(&bars).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| chan.analyze(&bars).unwrap())).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
