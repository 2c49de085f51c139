//! Generic three-element extremum scanning.
//!
//! The same turning-point test runs on merged bars (to find fractals) and on
//! stroke feature sequences (to find segment reversals). Callers supply an
//! extraction function mapping their element type to an [`Extent`].

use chan_types::{FractalKind, MergedBar, Segment, Stroke};

/// Closed price interval `[low, high]` covered by an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Upper bound.
    pub high: f64,
    /// Lower bound.
    pub low: f64,
}

impl Extent {
    /// Build an extent from its bounds.
    #[must_use]
    pub const fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// True when one interval lies within the other (bounds inclusive).
    ///
    /// Equal intervals count as inclusion in both directions.
    #[must_use]
    pub fn is_inclusive_with(self, other: Self) -> bool {
        let inner = self.high <= other.high && self.low >= other.low;
        let outer = self.high >= other.high && self.low <= other.low;
        inner || outer
    }

    /// Smallest interval covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.high.max(other.high), self.low.min(other.low))
    }
}

/// Types that cover a price interval.
pub trait PriceExtent {
    /// The covered interval.
    fn extent(&self) -> Extent;
}

impl PriceExtent for MergedBar {
    fn extent(&self) -> Extent {
        Extent::new(self.high, self.low)
    }
}

impl PriceExtent for Stroke {
    fn extent(&self) -> Extent {
        Extent::new(self.high(), self.low())
    }
}

impl PriceExtent for Segment {
    fn extent(&self) -> Extent {
        Extent::new(self.high, self.low)
    }
}

/// True if `mid` is a turning point of `kind` between `left` and `right`.
///
/// A peak needs a strictly higher high than both neighbors; a trough needs a
/// strictly lower low.
#[must_use]
pub fn is_turning(kind: FractalKind, left: Extent, mid: Extent, right: Extent) -> bool {
    match kind {
        FractalKind::Peak => mid.high > left.high && mid.high > right.high,
        FractalKind::Trough => mid.low < left.low && mid.low < right.low,
    }
}

/// Classify the middle of three consecutive extents.
///
/// When both tests hold (possible only for input that is not inclusion-free)
/// the element is reported as a peak.
#[must_use]
pub fn classify(left: Extent, mid: Extent, right: Extent) -> Option<FractalKind> {
    [FractalKind::Peak, FractalKind::Trough]
        .into_iter()
        .find(|&kind| is_turning(kind, left, mid, right))
}

/// Scan `items` for interior turning points.
///
/// Returns `(index, kind)` pairs in ascending index order.
pub fn turning_points<T, F>(items: &[T], extent_of: F) -> Vec<(usize, FractalKind)>
where
    F: Fn(&T) -> Extent,
{
    items
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            classify(extent_of(&w[0]), extent_of(&w[1]), extent_of(&w[2])).map(|k| (i + 1, k))
        })
        .collect()
}

/// True if `candidate` is a strictly more extreme turning point than `incumbent`.
///
/// Both must be of `kind`; peaks compare by higher price, troughs by lower.
#[must_use]
pub fn more_extreme(kind: FractalKind, candidate: f64, incumbent: f64) -> bool {
    match kind {
        FractalKind::Peak => candidate > incumbent,
        FractalKind::Trough => candidate < incumbent,
    }
}

/// Collapse runs of same-kind items to their most extreme member.
///
/// `key` maps an item to its kind and price. Ties keep the earliest item.
pub fn reduce_same_kind<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> (FractalKind, f64),
{
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let (kind, price) = key(&item);
        if let Some(last) = out.last_mut() {
            let (last_kind, last_price) = key(&*last);
            if last_kind == kind {
                if more_extreme(kind, price, last_price) {
                    *last = item;
                }
                continue;
            }
        }
        out.push(item);
    }
    out
}
