use chan_types::{Bar, Direction, MergedBar};

use crate::extremum::{Extent, PriceExtent};

/// Merge bars in an inclusion relation into an inclusion-free sequence.
///
/// The scan keeps an append-only output buffer. Each incoming bar is either
/// pushed or folded into the last output bar when one interval contains the
/// other. The merge direction comes from the last two output bars:
/// - rising (last high above the one before): keep the higher high and higher low;
/// - falling: keep the lower high and lower low;
/// - no established trend (a single output bar): keep the union.
///
/// Merged bars take the timestamp and close of the last absorbed bar and the
/// open of the first, with open and close clamped into the merged range.
/// Volumes are summed and `origin_indices` lists every absorbed input index.
///
/// Because adjacent non-inclusive bars have strictly ordered highs and lows,
/// a directional merge never creates inclusion with the bar before it, so the
/// output needs no backward pass.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::structure::normalize",
        skip(bars),
        fields(bars = bars.len()),
    )
)]
pub fn normalize(bars: &[Bar]) -> Vec<MergedBar> {
    let mut out: Vec<MergedBar> = Vec::with_capacity(bars.len());

    for (index, bar) in bars.iter().enumerate() {
        let incoming = MergedBar::from_bar(bar, index);
        let trend = trend_of(&out);
        match out.last_mut() {
            Some(last) if last.extent().is_inclusive_with(incoming.extent()) => {
                absorb(last, incoming, trend);
            }
            _ => out.push(incoming),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target = "chan_core::structure::normalize",
        input = bars.len(),
        merged = out.len(),
        "normalized bars"
    );

    out
}

/// Direction set by the last two output bars, if there are two.
fn trend_of(out: &[MergedBar]) -> Option<Direction> {
    match out {
        [.., prev, last] => Some(if last.high > prev.high {
            Direction::Up
        } else {
            Direction::Down
        }),
        _ => None,
    }
}

fn absorb(last: &mut MergedBar, incoming: MergedBar, trend: Option<Direction>) {
    let a = last.extent();
    let b = incoming.extent();
    let merged = match trend {
        Some(Direction::Up) => Extent::new(a.high.max(b.high), a.low.max(b.low)),
        Some(Direction::Down) => Extent::new(a.high.min(b.high), a.low.min(b.low)),
        None => a.union(b),
    };

    last.high = merged.high;
    last.low = merged.low;
    last.open = last.open.clamp(merged.low, merged.high);
    last.close = incoming.close.clamp(merged.low, merged.high);
    last.ts = incoming.ts;
    last.volume += incoming.volume;
    last.origin_indices.extend(incoming.origin_indices);
}
