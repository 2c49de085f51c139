mod common;

use chan_core::extremum::PriceExtent;
use chan_core::{SegmentBreak, Stroke, build_segments};
use common::arb_zigzag_strokes;
use proptest::prelude::*;

proptest! {
    #[test]
    fn segments_partition_strokes_in_order(strokes in arb_zigzag_strokes(60)) {
        let segments = build_segments(&strokes).unwrap();
        let flat: Vec<Stroke> = segments.iter().flat_map(|s| s.strokes.iter().cloned()).collect();
        prop_assert_eq!(flat, strokes);
    }

    #[test]
    fn segments_alternate_and_only_the_last_is_open(strokes in arb_zigzag_strokes(60)) {
        let segments = build_segments(&strokes).unwrap();
        for w in segments.windows(2) {
            prop_assert_eq!(w[0].direction, w[1].direction.opposite());
        }
        let (last, confirmed) = segments.split_last().unwrap();
        prop_assert!(!last.confirmed);
        prop_assert!(last.termination.is_none());
        for seg in confirmed {
            prop_assert!(seg.confirmed);
            prop_assert!(matches!(
                seg.termination,
                Some(SegmentBreak::FeatureReversal | SegmentBreak::GapBreak)
            ));
            prop_assert!(seg.strokes.len() >= 3);
            prop_assert_eq!(seg.strokes.len() % 2, 1);
        }
    }

    #[test]
    fn segment_bounds_cover_member_strokes(strokes in arb_zigzag_strokes(60)) {
        for seg in build_segments(&strokes).unwrap() {
            let high = seg.strokes.iter().map(|s| s.extent().high).fold(f64::MIN, f64::max);
            let low = seg.strokes.iter().map(|s| s.extent().low).fold(f64::MAX, f64::min);
            prop_assert_eq!(seg.high, high);
            prop_assert_eq!(seg.low, low);
            prop_assert_eq!(seg.direction, seg.strokes[0].direction);
        }
    }
}
