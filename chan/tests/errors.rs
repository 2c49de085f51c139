use chan::{Bar, Chan, ChanConfig, ChanError, analyze};

fn field_of(err: ChanError) -> String {
    match err {
        ChanError::Configuration { field, .. } => field,
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn empty_input_is_invalid() {
    let err = analyze(&[], &ChanConfig::default()).unwrap_err();
    assert!(matches!(err, ChanError::InvalidInput { index: None, .. }));
    assert!(err.is_fatal());
}

#[test]
fn nan_price_fails_fast_with_bar_index() {
    let mut bars = chan_mock::rising(10);
    bars[4].high = f64::NAN;
    let err = analyze(&bars, &ChanConfig::default()).unwrap_err();
    assert!(matches!(err, ChanError::InvalidInput { index: Some(4), .. }));
}

#[test]
fn out_of_order_timestamps_are_rejected() {
    let mut bars = chan_mock::rising(10);
    bars.swap(3, 4);
    let err = analyze(&bars, &ChanConfig::default()).unwrap_err();
    assert!(matches!(err, ChanError::InvalidInput { index: Some(4), .. }));
}

#[test]
fn bad_ohlc_ordering_is_not_corrected() {
    let mut bars: Vec<Bar> = chan_mock::rising(5);
    bars[2].open = bars[2].high + 1.0;
    assert!(matches!(
        analyze(&bars, &ChanConfig::default()),
        Err(ChanError::InvalidInput { index: Some(2), .. })
    ));
}

#[test]
fn builder_rejects_invalid_configuration() {
    let slow = Chan::builder().ema_periods(26, 12, 9).build().unwrap_err();
    assert_eq!(field_of(slow), "ema_slow");

    let centers = Chan::builder().min_center_segments(2).build().unwrap_err();
    assert_eq!(field_of(centers), "min_center_segments");

    let tolerance = Chan::builder().divergence_tolerance(-0.1).build().unwrap_err();
    assert_eq!(field_of(tolerance), "divergence_tolerance");

    let separation = Chan::builder().min_stroke_separation(0).build().unwrap_err();
    assert_eq!(field_of(separation), "min_stroke_separation");

    let floor = Chan::builder().min_fractal_strength(1.5).build().unwrap_err();
    assert_eq!(field_of(floor), "min_fractal_strength");
}

#[test]
fn configuration_is_checked_before_input() {
    let cfg = ChanConfig {
        ema_fast: 30,
        ..ChanConfig::default()
    };
    // Empty input would be InvalidInput; the config error wins.
    let err = analyze(&[], &cfg).unwrap_err();
    assert_eq!(field_of(err), "ema_slow");
}
