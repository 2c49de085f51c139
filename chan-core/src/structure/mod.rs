//! Structural layers built bottom-up from raw bars.
//!
//! Each stage consumes the output of the previous one: inclusion merging,
//! fractals, strokes, segments, then centers.

/// Overlap zones among consecutive segments.
pub mod center;
/// Turning points on the merged sequence.
pub mod fractal;
/// Inclusion merging of adjacent bars.
pub mod normalize;
/// Feature-sequence grouping of strokes.
pub mod segment;
/// Alternating fractal pairs.
pub mod stroke;

pub use center::{CenterScan, find_centers};
pub use fractal::{FractalScan, detect_fractals};
pub use normalize::normalize;
pub use segment::build_segments;
pub use stroke::build_strokes;
