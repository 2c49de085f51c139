#![allow(dead_code)]

use chan::Bar;
use proptest::prelude::*;

/// Named fixture series; panics on an unknown name.
pub fn series(name: &str) -> Vec<Bar> {
    chan_mock::by_name(name).unwrap_or_else(|| panic!("unknown fixture series {name}"))
}

/// Random walk of closes turned into well-formed bars.
pub fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec(-6i32..=6, 1..max_len).prop_map(|steps| {
        let mut price = 100.0;
        let closes: Vec<f64> = steps
            .into_iter()
            .map(|s| {
                price = f64::max(10.0, price + f64::from(s));
                price
            })
            .collect();
        chan_mock::from_closes(&closes)
    })
}
