//! chan-mock
//!
//! Deterministic bar series for tests and examples. Every generator is a pure
//! function of its arguments, so fixtures are stable across runs and
//! platforms.
//!
//! - [`zigzag`] walks linearly between pivot prices; every interior pivot is
//!   a clean three-bar fractal.
//! - [`rising`] and [`flat`] cover the degenerate shapes.
//! - [`by_name`] returns the named scenario series used across the test
//!   suites.
#![warn(missing_docs)]

use chan_core::Bar;
use chrono::{DateTime, TimeDelta, Utc};

/// First bar timestamp: 2024-01-02 00:00:00 UTC.
pub const START_SECS: i64 = 1_704_153_600;

/// Half-width of each generated bar around its close.
pub const HALF_RANGE: f64 = 0.5;

/// Timestamp of bar `index`, one hour apart from [`START_SECS`].
#[must_use]
pub fn ts(index: usize) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
        + TimeDelta::seconds(START_SECS)
        + TimeDelta::hours(i64::try_from(index).unwrap_or(i64::MAX / 3600))
}

/// One bar per close, centered on it with [`HALF_RANGE`] on each side.
///
/// The open is the previous close clamped into the bar, so every bar is well
/// formed. Bars with distinct consecutive closes are never in an inclusion
/// relation.
#[must_use]
pub fn from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let high = close + HALF_RANGE;
            let low = (close - HALF_RANGE).max(0.0);
            let prev = i.checked_sub(1).map_or(close, |p| closes[p]);
            Bar::new(ts(i), prev.clamp(low, high), high, low, close, volume(i))
        })
        .collect()
}

/// Bars from explicit `(high, low)` pairs; opens at the low, closes at the high.
#[must_use]
pub fn from_high_low(ranges: &[(f64, f64)]) -> Vec<Bar> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| Bar::new(ts(i), low, high, low, high, volume(i)))
        .collect()
}

/// Linear walk through `pivots`, `bars_per_leg` bars per leg.
///
/// Interior pivots land exactly `bars_per_leg` bars apart, so with the
/// default stroke separation of four any `bars_per_leg >= 5` turns every
/// pivot into a stroke endpoint.
#[must_use]
pub fn zigzag(pivots: &[f64], bars_per_leg: usize) -> Vec<f64> {
    let Some(&first) = pivots.first() else {
        return Vec::new();
    };
    let steps = bars_per_leg.max(1);
    let mut closes = vec![first];
    for leg in pivots.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        for k in 1..=steps {
            closes.push(from + (to - from) * k as f64 / steps as f64);
        }
    }
    closes
}

/// `n` bars with closes rising by one from 100.
#[must_use]
pub fn rising(n: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
    from_closes(&closes)
}

/// `n` identical bars at `price`.
#[must_use]
pub fn flat(n: usize, price: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| Bar::new(ts(i), price, price, price, price, volume(i)))
        .collect()
}

/// Named scenario series.
///
/// - `"uptrend"`: 60 steadily rising bars, no turning points.
/// - `"flat"`: 40 identical bars.
/// - `"zigzag"`: an up segment closed by a feature top, then an open down leg.
/// - `"trend_center"`: three segments overlapping in one band, which yields
///   a center, followed by a push to new highs.
/// - `"exhaustion"`: higher highs on progressively weaker rallies after a
///   flat warm-up.
#[must_use]
pub fn by_name(name: &str) -> Option<Vec<Bar>> {
    let bars = match name {
        "uptrend" => rising(60),
        "flat" => flat(40, 100.0),
        "zigzag" => from_closes(&zigzag(ZIGZAG_PIVOTS, 6)),
        "trend_center" => from_closes(&zigzag(TREND_CENTER_PIVOTS, 6)),
        "exhaustion" => from_closes(&zigzag(EXHAUSTION_PIVOTS, 8)),
        _ => return None,
    };
    Some(bars)
}

/// Every named series accepted by [`by_name`].
pub const SCENARIOS: &[&str] = &["uptrend", "flat", "zigzag", "trend_center", "exhaustion"];

const ZIGZAG_PIVOTS: &[f64] = &[
    30.0, 10.0, 20.0, 15.0, 25.0, 18.0, 30.0, 22.0, 27.0, 12.0, 17.0, 14.0,
];

const TREND_CENTER_PIVOTS: &[f64] = &[
    60.0, 40.0, 50.0, 45.0, 55.0, 48.0, 62.0, 52.0, 58.0, 42.0, 50.0, 44.0, 47.0, 38.0, 45.0,
    41.0, 56.0, 49.0, 60.0, 52.0, 66.0, 58.0, 63.0, 50.0,
];

const EXHAUSTION_PIVOTS: &[f64] = &[100.0, 100.0, 100.0, 80.0, 130.0, 115.0, 140.0, 132.0, 143.0, 120.0];

fn volume(i: usize) -> f64 {
    1_000.0 + (i % 7) as f64 * 100.0
}
