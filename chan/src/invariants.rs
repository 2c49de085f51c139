//! Post-condition checks run on each stage's output.

use chan_core::extremum::PriceExtent;
use chan_core::{Center, ChanError, Fractal, MergedBar, Segment, Stage, Stroke};

pub(crate) fn inclusion_free(merged: &[MergedBar]) -> Result<(), ChanError> {
    match merged
        .windows(2)
        .position(|w| w[0].extent().is_inclusive_with(w[1].extent()))
    {
        Some(i) => Err(ChanError::invariant(
            Stage::Normalize,
            format!("merged bars {i} and {} are in inclusion", i + 1),
        )),
        None => Ok(()),
    }
}

pub(crate) fn fractals_alternate(fractals: &[Fractal]) -> Result<(), ChanError> {
    match fractals.windows(2).position(|w| w[0].kind == w[1].kind) {
        Some(i) => Err(ChanError::invariant(
            Stage::Fractal,
            format!("fractals {i} and {} share a kind", i + 1),
        )),
        None => Ok(()),
    }
}

pub(crate) fn strokes_alternate(strokes: &[Stroke]) -> Result<(), ChanError> {
    match strokes
        .windows(2)
        .position(|w| w[0].direction == w[1].direction || w[0].end != w[1].start)
    {
        Some(i) => Err(ChanError::invariant(
            Stage::Stroke,
            format!("strokes {i} and {} do not alternate", i + 1),
        )),
        None => Ok(()),
    }
}

pub(crate) fn segments_partition(strokes: &[Stroke], segments: &[Segment]) -> Result<(), ChanError> {
    let mut members = segments.iter().flat_map(|s| s.strokes.iter());
    let covered = strokes.iter().all(|s| members.next() == Some(s)) && members.next().is_none();
    if !covered {
        return Err(ChanError::invariant(
            Stage::Segment,
            "segments do not partition the strokes",
        ));
    }
    let open_before_last = segments
        .split_last()
        .is_some_and(|(_, earlier)| earlier.iter().any(|s| !s.confirmed));
    if open_before_last {
        return Err(ChanError::invariant(
            Stage::Segment,
            "an unconfirmed segment precedes the last one",
        ));
    }
    Ok(())
}

pub(crate) fn centers_valid(centers: &[Center], min_segments: usize) -> Result<(), ChanError> {
    for (i, c) in centers.iter().enumerate() {
        if c.high <= c.low {
            return Err(ChanError::invariant(
                Stage::Center,
                format!("center {i} has an empty zone [{}, {}]", c.low, c.high),
            ));
        }
        if c.member_segments.len() < min_segments {
            return Err(ChanError::invariant(
                Stage::Center,
                format!(
                    "center {i} spans {} segments, fewer than {min_segments}",
                    c.member_segments.len()
                ),
            ));
        }
    }
    Ok(())
}
