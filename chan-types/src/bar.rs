//! Raw and inclusion-merged price bars.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV price bar as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp; strictly increasing across a series.
    pub ts: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Bar {
    /// Build a bar from its components.
    #[must_use]
    pub const fn new(
        ts: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A bar produced by inclusion merging, possibly absorbing several raw bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedBar {
    /// Timestamp of the last absorbed raw bar.
    pub ts: DateTime<Utc>,
    /// Open of the first absorbed raw bar.
    pub open: f64,
    /// Merged high, chosen by the prevailing trend direction.
    pub high: f64,
    /// Merged low, chosen by the prevailing trend direction.
    pub low: f64,
    /// Close of the last absorbed raw bar.
    pub close: f64,
    /// Sum of absorbed volumes.
    pub volume: f64,
    /// Positions of the absorbed bars in the raw input, ascending.
    pub origin_indices: Vec<usize>,
}

impl MergedBar {
    /// Wrap a single raw bar located at `index` in the input.
    #[must_use]
    pub fn from_bar(bar: &Bar, index: usize) -> Self {
        Self {
            ts: bar.ts,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            origin_indices: vec![index],
        }
    }

    /// Last raw bar index absorbed by this merged bar.
    #[must_use]
    pub fn last_origin(&self) -> usize {
        self.origin_indices.last().copied().unwrap_or_default()
    }

    /// View this merged bar as a plain [`Bar`], dropping the origin mapping.
    #[must_use]
    pub const fn to_bar(&self) -> Bar {
        Bar {
            ts: self.ts,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}
