//! Structural units derived from merged bars: fractals, strokes, segments, centers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a three-bar turning point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalKind {
    /// Local high: the middle bar's high exceeds both neighbors.
    Peak,
    /// Local low: the middle bar's low is below both neighbors.
    Trough,
}

impl FractalKind {
    /// The other kind.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Peak => Self::Trough,
            Self::Trough => Self::Peak,
        }
    }
}

/// Direction of a stroke or segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Rising: starts at a trough, ends at a peak.
    Up,
    /// Falling: starts at a peak, ends at a trough.
    Down,
}

impl Direction {
    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Direction of a move that ends on a fractal of `kind`.
    #[must_use]
    pub const fn ending_at(kind: FractalKind) -> Self {
        match kind {
            FractalKind::Peak => Self::Up,
            FractalKind::Trough => Self::Down,
        }
    }

    /// `1.0` for up, `-1.0` for down.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// A turning point on the merged bar sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fractal {
    /// Index into the merged bar sequence.
    pub position: usize,
    /// Peak or trough.
    pub kind: FractalKind,
    /// The high of the middle bar for peaks, its low for troughs.
    pub price: f64,
    /// Score in `[0, 1]`; higher means more pronounced.
    pub strength: f64,
    /// Timestamp of the raw bar that printed the extreme.
    pub ts: DateTime<Utc>,
    /// Raw bar index that printed the extreme.
    pub origin_index: usize,
}

/// Directed move between two alternating fractals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Fractal the stroke starts from.
    pub start: Fractal,
    /// Fractal the stroke ends at.
    pub end: Fractal,
    /// Up for trough to peak, down for peak to trough.
    pub direction: Direction,
}

impl Stroke {
    /// Build a stroke; the direction follows from the end fractal's kind.
    #[must_use]
    pub fn new(start: Fractal, end: Fractal) -> Self {
        let direction = Direction::ending_at(end.kind);
        Self {
            start,
            end,
            direction,
        }
    }

    /// Highest price touched by the stroke.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.start.price.max(self.end.price)
    }

    /// Lowest price touched by the stroke.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.start.price.min(self.end.price)
    }

    /// Number of merged bars covered, both endpoints included.
    #[must_use]
    pub const fn bar_count(&self) -> usize {
        self.end.position - self.start.position + 1
    }

    /// Absolute price travelled.
    #[must_use]
    pub fn price_range(&self) -> f64 {
        (self.end.price - self.start.price).abs()
    }
}

/// Why a segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentBreak {
    /// The feature sequence formed a top (up segment) or bottom (down segment).
    FeatureReversal,
    /// An opposing stroke covered the whole segment range.
    GapBreak,
}

/// A trend unit built from an odd run of alternating strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Member strokes in order; the first one sets the direction.
    pub strokes: Vec<Stroke>,
    /// Direction of the segment.
    pub direction: Direction,
    /// Highest price over the member strokes.
    pub high: f64,
    /// Lowest price over the member strokes.
    pub low: f64,
    /// False for a trailing segment whose end is not yet confirmed.
    pub confirmed: bool,
    /// How the segment ended; `None` when unconfirmed.
    pub termination: Option<SegmentBreak>,
}

impl Segment {
    /// Start time, taken from the first stroke's start fractal.
    #[must_use]
    pub fn start_ts(&self) -> Option<DateTime<Utc>> {
        self.strokes.first().map(|s| s.start.ts)
    }

    /// End time, taken from the last stroke's end fractal.
    #[must_use]
    pub fn end_ts(&self) -> Option<DateTime<Utc>> {
        self.strokes.last().map(|s| s.end.ts)
    }

    /// Fractal the segment starts from.
    #[must_use]
    pub fn start_fractal(&self) -> Option<&Fractal> {
        self.strokes.first().map(|s| &s.start)
    }

    /// Fractal the segment ends at.
    #[must_use]
    pub fn end_fractal(&self) -> Option<&Fractal> {
        self.strokes.last().map(|s| &s.end)
    }
}

/// Classification of a center by the trend around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterKind {
    /// Entered and left by up segments.
    Up,
    /// Entered and left by down segments.
    Down,
    /// Mixed or unknown surrounding direction.
    Consolidation,
}

/// Overlap zone of at least three consecutive segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    /// Lowest member high; upper bound of the zone.
    pub high: f64,
    /// Highest member low; lower bound of the zone.
    pub low: f64,
    /// Start of the first member segment.
    pub start_time: DateTime<Utc>,
    /// End of the last member segment.
    pub end_time: DateTime<Utc>,
    /// Up, down, or consolidation.
    pub kind: CenterKind,
    /// The overlapping segments.
    pub member_segments: Vec<Segment>,
    /// Score in `[0, 1]` from member count, zone width, duration, and oscillation.
    pub strength: f64,
}

impl Center {
    /// Midpoint of the zone.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Width of the zone.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
