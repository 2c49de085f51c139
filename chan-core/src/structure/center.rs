use chan_types::{Center, CenterKind, ChanError, Direction, Segment, Stage};

/// Output of center identification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CenterScan {
    /// Non-overlapping centers in time order.
    pub centers: Vec<Center>,
    /// Number of window start positions examined.
    pub windows: usize,
}

/// Find overlap zones among consecutive segments.
///
/// From each start position the window grows while the running intersection
/// `[max(lows), min(highs)]` stays non-empty. A window of at least
/// `min_segments` members becomes a center and scanning resumes after its
/// last member; otherwise scanning moves one segment forward.
///
/// The center kind compares the segment just before the window with the one
/// just after it: both up gives [`CenterKind::Up`], both down gives
/// [`CenterKind::Down`], anything else (including a missing neighbor) gives
/// [`CenterKind::Consolidation`].
///
/// # Errors
/// Returns `ChanError::InsufficientData` when fewer than `min_segments`
/// segments are available.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::structure::find_centers",
        skip(segments),
        fields(segments = segments.len()),
    )
)]
pub fn find_centers(segments: &[Segment], min_segments: usize) -> Result<CenterScan, ChanError> {
    if segments.len() < min_segments {
        return Err(ChanError::insufficient(
            Stage::Center,
            min_segments,
            segments.len(),
        ));
    }

    let mut scan = CenterScan::default();
    let mut j = 0;
    while j + min_segments <= segments.len() {
        scan.windows += 1;
        let (end, high, low) = widest_overlap(segments, j);
        let center = (end - j >= min_segments)
            .then(|| make_center(segments, j, end, high, low))
            .flatten();
        match center {
            Some(center) => {
                scan.centers.push(center);
                j = end;
            }
            None => j += 1,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target = "chan_core::structure::find_centers",
        windows = scan.windows,
        centers = scan.centers.len(),
        "center scan complete"
    );

    Ok(scan)
}

/// Grow a window from `start`; returns its exclusive end and the zone bounds.
fn widest_overlap(segments: &[Segment], start: usize) -> (usize, f64, f64) {
    let mut high = segments[start].high;
    let mut low = segments[start].low;
    let mut end = start + 1;
    while let Some(next) = segments.get(end) {
        let h = high.min(next.high);
        let l = low.max(next.low);
        if h <= l {
            break;
        }
        high = h;
        low = l;
        end += 1;
    }
    (end, high, low)
}

fn make_center(
    segments: &[Segment],
    start: usize,
    end: usize,
    high: f64,
    low: f64,
) -> Option<Center> {
    let members = &segments[start..end];
    let start_time = members.first()?.start_ts()?;
    let end_time = members.last()?.end_ts()?;

    let before = start.checked_sub(1).and_then(|i| segments.get(i));
    let after = segments.get(end);
    let kind = match (before.map(|s| s.direction), after.map(|s| s.direction)) {
        (Some(Direction::Up), Some(Direction::Up)) => CenterKind::Up,
        (Some(Direction::Down), Some(Direction::Down)) => CenterKind::Down,
        _ => CenterKind::Consolidation,
    };

    let hours = (end_time - start_time).num_seconds() as f64 / 3600.0;
    let strength = center_strength(members, high, low, hours);

    Some(Center {
        high,
        low,
        start_time,
        end_time,
        kind,
        member_segments: members.to_vec(),
        strength,
    })
}

/// Equal-weight blend of member count, zone width, duration, and oscillation.
fn center_strength(members: &[Segment], high: f64, low: f64, hours: f64) -> f64 {
    let range = high - low;
    let mid = (high + low) / 2.0;

    let count = ((members.len() as f64 - 3.0) / 5.0 + 0.5).min(1.0);
    let width = if mid > 0.0 {
        (range / mid / 0.1).min(1.0)
    } else {
        0.0
    };
    let duration = if members.len() > 1 {
        (hours / 24.0).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let oscillation = if range > 0.0 {
        let travelled: f64 = members
            .iter()
            .filter_map(|s| Some((s.start_fractal()?.price, s.end_fractal()?.price)))
            .filter(|&(a, b)| {
                let inside = |p: f64| (low..=high).contains(&p);
                inside(a) && inside(b)
            })
            .map(|(a, b)| (b - a).abs())
            .sum();
        (travelled / range / 2.0).min(1.0)
    } else {
        0.0
    };

    ((count + width + duration + oscillation) * 0.25).clamp(0.0, 1.0)
}
