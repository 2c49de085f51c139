use chan_types::{ChanError, Direction, Fractal, Stage, Stroke};

use crate::extremum::more_extreme;

/// Connect alternating fractals into strokes.
///
/// A greedy left-to-right state machine over a chain of accepted fractals.
/// For each incoming fractal:
/// - same kind as the chain end: it replaces the end if strictly more
///   extreme (extending the last stroke), otherwise it is dropped;
/// - opposite kind: it is appended when at least `min_separation` merged
///   bars lie strictly between the two positions and price moves in the
///   stroke's direction;
/// - opposite kind but too close or moving the wrong way: while no stroke
///   has been accepted yet, the weaker of the two fractals is dropped
///   (the incoming one on equal strength) and the scan continues from the
///   survivor; once a stroke exists its endpoints are fixed and the
///   incoming fractal is dropped.
///
/// Consecutive chain entries always differ in kind, so the resulting strokes
/// alternate direction.
///
/// # Errors
/// Returns `ChanError::InsufficientData` when fewer than two fractals are
/// available.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::structure::build_strokes",
        skip(fractals),
        fields(fractals = fractals.len()),
    )
)]
pub fn build_strokes(fractals: &[Fractal], min_separation: usize) -> Result<Vec<Stroke>, ChanError> {
    if fractals.len() < 2 {
        return Err(ChanError::insufficient(Stage::Stroke, 2, fractals.len()));
    }

    let mut chain: Vec<Fractal> = Vec::with_capacity(fractals.len());
    for f in fractals {
        let Some(last) = chain.last() else {
            chain.push(f.clone());
            continue;
        };

        if last.kind == f.kind {
            if more_extreme(f.kind, f.price, last.price) {
                let n = chain.len();
                chain[n - 1] = f.clone();
            }
            continue;
        }

        if forms_stroke(last, f, min_separation) {
            chain.push(f.clone());
        } else if chain.len() == 1 && f.strength > last.strength {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target = "chan_core::structure::build_strokes",
                dropped = last.position,
                survivor = f.position,
                "replacing weaker opening fractal"
            );
            chain[0] = f.clone();
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target = "chan_core::structure::build_strokes",
                dropped = f.position,
                "fractal too close to chain end"
            );
        }
    }

    Ok(chain
        .windows(2)
        .map(|w| Stroke::new(w[0].clone(), w[1].clone()))
        .collect())
}

/// True when `start` and `end` are far enough apart and price moves the right way.
fn forms_stroke(start: &Fractal, end: &Fractal, min_separation: usize) -> bool {
    let between = end.position.saturating_sub(start.position).saturating_sub(1);
    if between < min_separation {
        return false;
    }
    match Direction::ending_at(end.kind) {
        Direction::Up => end.price > start.price,
        Direction::Down => end.price < start.price,
    }
}
