use chan_types::{ChanError, Direction, FractalKind, Segment, SegmentBreak, Stage, Stroke};

use crate::extremum::{Extent, PriceExtent, is_turning};

/// Group strokes into alternating segments.
///
/// Starting at the first unconsumed stroke, the segment direction is that
/// stroke's direction and its feature sequence is the opposite-direction
/// strokes that follow (positions 1, 3, 5, ... of the run). Each new feature
/// element is tested for two terminations, earliest end first:
///
/// - **feature reversal**: the previous three feature elements form a top
///   (up segment) or bottom (down segment) under the shared three-element
///   extremum test, and the middle element starts at the segment's running
///   extreme. The segment ends just before the middle element.
/// - **gap break**: the new feature element covers the segment's whole range,
///   reaching its extreme on one side and breaking past the other. The
///   segment ends just before it.
///
/// A confirmed segment always holds at least three strokes. Strokes left
/// over at the end form one trailing segment with `confirmed = false`.
///
/// # Errors
/// Returns `ChanError::InsufficientData` when there are no strokes.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::structure::build_segments",
        skip(strokes),
        fields(strokes = strokes.len()),
    )
)]
pub fn build_segments(strokes: &[Stroke]) -> Result<Vec<Segment>, ChanError> {
    if strokes.is_empty() {
        return Err(ChanError::insufficient(Stage::Segment, 1, 0));
    }

    let mut segments: Vec<Segment> = Vec::new();
    let mut start = 0;
    while start < strokes.len() {
        let run = &strokes[start..];
        if let Some((len, reason)) = find_break(run) {
            segments.push(make_segment(&run[..len], Some(reason)));
            start += len;
        } else {
            segments.push(make_segment(run, None));
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target = "chan_core::structure::build_segments",
        segments = segments.len(),
        confirmed = segments.iter().filter(|s| s.confirmed).count(),
        "segments built"
    );

    Ok(segments)
}

/// Locate the end of the segment starting at `run[0]`.
///
/// Returns the number of strokes the segment consumes and why it ended.
fn find_break(run: &[Stroke]) -> Option<(usize, SegmentBreak)> {
    let direction = run.first()?.direction;
    let top = match direction {
        Direction::Up => FractalKind::Peak,
        Direction::Down => FractalKind::Trough,
    };

    // Feature element m is run[2m + 1].
    let feature = |m: usize| run[2 * m + 1].extent();

    let mut m = 1;
    while 2 * m + 1 < run.len() {
        // Segment extent up to the stroke preceding feature m.
        let body = span(&run[..=2 * m]);

        let j = m - 1;
        if j >= 1 {
            let seg_end = 2 * j;
            let at_extreme = reaches_extreme(direction, feature(j), span(&run[..=seg_end]));
            if at_extreme && is_turning(top, feature(j - 1), feature(j), feature(m)) {
                return Some((seg_end + 1, SegmentBreak::FeatureReversal));
            }
        }

        if covers(direction, feature(m), body) {
            return Some((2 * m + 1, SegmentBreak::GapBreak));
        }
        m += 1;
    }
    None
}

fn span(strokes: &[Stroke]) -> Extent {
    strokes
        .iter()
        .map(PriceExtent::extent)
        .reduce(Extent::union)
        .unwrap_or(Extent::new(f64::MIN, f64::MAX))
}

/// True if `element` starts at the segment's running extreme.
fn reaches_extreme(direction: Direction, element: Extent, body: Extent) -> bool {
    match direction {
        Direction::Up => element.high >= body.high,
        Direction::Down => element.low <= body.low,
    }
}

/// True if an opposing `element` spans the whole `body` and breaks past its origin.
fn covers(direction: Direction, element: Extent, body: Extent) -> bool {
    match direction {
        Direction::Up => element.high >= body.high && element.low < body.low,
        Direction::Down => element.low <= body.low && element.high > body.high,
    }
}

fn make_segment(strokes: &[Stroke], termination: Option<SegmentBreak>) -> Segment {
    let extent = span(strokes);
    Segment {
        strokes: strokes.to_vec(),
        direction: strokes.first().map_or(Direction::Up, |s| s.direction),
        high: extent.high,
        low: extent.low,
        confirmed: termination.is_some(),
        termination,
    }
}
