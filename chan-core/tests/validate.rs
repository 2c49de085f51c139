mod common;

use chan_core::{Bar, ChanError, validate_bars};
use common::{bar, bars_from, ts};

fn index_of(err: &ChanError) -> Option<usize> {
    match err {
        ChanError::InvalidInput { index, .. } => *index,
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn well_formed_series_passes() {
    let bars = bars_from(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0)]);
    assert!(validate_bars(&bars).is_ok());
}

#[test]
fn empty_series_is_rejected_without_index() {
    let err = validate_bars(&[]).unwrap_err();
    assert_eq!(index_of(&err), None);
    assert!(err.is_fatal());
}

#[test]
fn non_finite_price_names_the_bar() {
    let mut bars = bars_from(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0)]);
    bars[2].close = f64::NAN;
    assert_eq!(index_of(&validate_bars(&bars).unwrap_err()), Some(2));
}

#[test]
fn inverted_range_is_rejected() {
    let bars = vec![bar(0, 10.0, 8.0), Bar::new(ts(1), 9.0, 8.0, 10.0, 9.0, 1.0)];
    assert_eq!(index_of(&validate_bars(&bars).unwrap_err()), Some(1));
}

#[test]
fn close_outside_range_is_rejected() {
    let bars = vec![Bar::new(ts(0), 9.0, 10.0, 8.0, 10.5, 1.0)];
    assert_eq!(index_of(&validate_bars(&bars).unwrap_err()), Some(0));
}

#[test]
fn negative_volume_is_rejected() {
    let mut bars = bars_from(&[(10.0, 8.0), (12.0, 9.0)]);
    bars[1].volume = -1.0;
    assert_eq!(index_of(&validate_bars(&bars).unwrap_err()), Some(1));
}

#[test]
fn repeated_timestamp_is_rejected() {
    let mut bars = bars_from(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0)]);
    bars[2].ts = bars[1].ts;
    let err = validate_bars(&bars).unwrap_err();
    assert_eq!(index_of(&err), Some(2));
    assert!(err.to_string().contains("at bar 2"));
}
