use chan::Bar;

/// Fixture series picked by `CHAN_EXAMPLES_SERIES`, defaulting to `trend_center`.
#[must_use]
pub fn get_series() -> Vec<Bar> {
    let name = std::env::var("CHAN_EXAMPLES_SERIES").unwrap_or_else(|_| "trend_center".into());
    chan_mock::by_name(&name).unwrap_or_else(|| {
        println!("--- (unknown series {name}; choose one of {:?}) ---", chan_mock::SCENARIOS);
        chan_mock::by_name("trend_center").unwrap_or_default()
    })
}
