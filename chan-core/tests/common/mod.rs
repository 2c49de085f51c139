#![allow(dead_code)]

use chan_core::{Bar, Direction, Fractal, FractalKind, Stroke};
use chrono::{DateTime, Utc};
use proptest::prelude::*;

pub fn ts(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + i as i64 * 3600, 0).unwrap()
}

/// Bar with open at the low and close at the high.
pub fn bar(i: usize, high: f64, low: f64) -> Bar {
    Bar::new(ts(i), low, high, low, high, 100.0)
}

pub fn bars_from(ranges: &[(f64, f64)]) -> Vec<Bar> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| bar(i, high, low))
        .collect()
}

/// Well-formed random walk of bars with hourly timestamps.
pub fn arb_bars(max_len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-20i32..=20, 1i32..=10, 0u8..=10, 0u8..=10, 1u32..1000), 1..max_len)
        .prop_map(|steps| {
            let mut mid = 200.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, spread, o, c, vol))| {
                    mid = f64::max(20.0, mid + f64::from(step));
                    let high = mid + f64::from(spread);
                    let low = mid - f64::from(spread);
                    let at = |frac: u8| low + (high - low) * f64::from(frac) / 10.0;
                    Bar::new(ts(i), at(o), high, low, at(c), f64::from(vol))
                })
                .collect()
        })
}

/// Alternating fractals through a zigzag with the given leg sizes.
pub fn arb_zigzag_strokes(max_legs: usize) -> impl Strategy<Value = Vec<Stroke>> {
    (any::<bool>(), prop::collection::vec(1u32..50, 1..max_legs)).prop_map(|(rising, legs)| {
        let first = if rising {
            FractalKind::Trough
        } else {
            FractalKind::Peak
        };
        let mut price = 1_000.0;
        let mut fractals = vec![fractal(0, first, price)];
        let mut kind = first;
        for (i, leg) in legs.into_iter().enumerate() {
            kind = kind.opposite();
            let direction = Direction::ending_at(kind);
            price += direction.sign() * f64::from(leg);
            fractals.push(fractal((i + 1) * 5, kind, price));
        }
        fractals
            .windows(2)
            .map(|w| Stroke::new(w[0].clone(), w[1].clone()))
            .collect()
    })
}

pub fn fractal(position: usize, kind: FractalKind, price: f64) -> Fractal {
    Fractal {
        position,
        kind,
        price,
        strength: 0.5,
        ts: ts(position),
        origin_index: position,
    }
}
