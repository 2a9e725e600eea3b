//! Gap interpolation over the detected page-number map
//!
//! Detection is sparse: decorated, image-only, or oddly laid out pages yield
//! nothing. The passes here fill in pages without a detection when the local
//! numbering pattern is trustworthy, and leave everything else unmapped.
//! Detected entries are never overwritten.

use tracing::debug;

use super::PageNumberMap;

/// Widest anchor gap a linear fill is trusted across.
const MAX_INTERIOR_GAP: usize = 10;

/// Printed-number drift tolerated around a 1:1 physical gap.
const GAP_TOLERANCE: i64 = 2;

impl PageNumberMap {
    /// Extend the map with inferred entries.
    ///
    /// Passes run in order: interior gaps between consecutive anchors, then
    /// backward extension before the first anchor, then forward extension
    /// after the last. The ranges they touch are disjoint, and every pass
    /// only fills indices absent from the map.
    pub fn interpolate(&mut self, page_count: usize) {
        let anchors = self.anchor_entries();
        if anchors.is_empty() {
            return;
        }

        self.fill_interior_gaps(&anchors);
        self.extend_backward(anchors[0]);
        self.extend_forward(&anchors, page_count);
    }

    fn fill_interior_gaps(&mut self, anchors: &[(usize, u32)]) {
        for pair in anchors.windows(2) {
            let (idx1, num1) = pair[0];
            let (idx2, num2) = pair[1];
            let phys_gap = idx2 - idx1;
            let page_gap = num2 as i64 - num1 as i64;

            // No interior pages, or a gap too large to trust a linear guess
            if phys_gap <= 1 || phys_gap > MAX_INTERIOR_GAP {
                continue;
            }
            // Numbering pattern too irregular
            if (page_gap - phys_gap as i64).abs() > GAP_TOLERANCE {
                continue;
            }

            if page_gap == phys_gap as i64 {
                // 1:1 sequential numbering across the gap
                for j in 1..phys_gap {
                    self.insert_inferred(idx1 + j, num1 + j as u32);
                }
            } else if page_gap == phys_gap as i64 - 1 {
                // Exactly one interior page is assumed unnumbered (e.g. a
                // separator). Hand out sequential numbers while they stay
                // strictly below the right anchor; the index that would
                // collide with it is left unfilled.
                let mut next = num1 + 1;
                for index in idx1 + 1..idx2 {
                    if next < num2 {
                        self.insert_inferred(index, next);
                        next += 1;
                    }
                }
            } else {
                // page_gap of phys_gap+1, phys_gap+2 or phys_gap-2: inside
                // the tolerance window but not a pattern this heuristic
                // understands. Known limitation: the interior stays unfilled.
                debug!(
                    idx1,
                    idx2, page_gap, "unhandled numbering pattern, leaving gap unfilled"
                );
            }
        }
    }

    fn extend_backward(&mut self, first: (usize, u32)) {
        let (idx0, num0) = first;

        if num0 <= 1 {
            return;
        }
        // Fire only if there are enough preceding physical pages to plausibly
        // hold numbers 1..num0-1.
        if (num0 as usize) - 1 > idx0 {
            return;
        }

        for index in (0..idx0).rev() {
            let offset = (idx0 - index) as u32;
            if offset >= num0 {
                break;
            }
            if self.numbers.contains_key(&index) {
                break;
            }
            self.numbers.insert(index, num0 - offset);
        }
    }

    fn extend_forward(&mut self, anchors: &[(usize, u32)], page_count: usize) {
        if anchors.len() < 2 {
            return;
        }
        let (prev_idx, _) = anchors[anchors.len() - 2];
        let (last_idx, last_num) = anchors[anchors.len() - 1];

        // Adjacent trailing anchors indicate reliable sequential numbering at
        // the end of the document; anything looser is not extrapolated.
        if last_idx - prev_idx != 1 {
            return;
        }

        for index in last_idx + 1..page_count {
            self.insert_inferred(index, last_num + (index - last_idx) as u32);
        }
    }

    fn insert_inferred(&mut self, index: usize, number: u32) {
        self.numbers.entry(index).or_insert(number);
    }
}

#[cfg(test)]
mod tests {
    use super::super::scan_printed_numbers;
    use super::*;

    /// Build a map with detections at the given (index, number) pairs.
    fn map_with_anchors(anchors: &[(usize, u32)]) -> PageNumberMap {
        let mut map = PageNumberMap::new();
        for &(index, number) in anchors {
            map.insert_detected(index, number);
        }
        map
    }

    #[test]
    fn perfect_gap_fills_one_to_one() {
        let mut map = map_with_anchors(&[(0, 10), (5, 15)]);
        map.interpolate(6);

        assert_eq!(map.get(1), Some(11));
        assert_eq!(map.get(2), Some(12));
        assert_eq!(map.get(3), Some(13));
        assert_eq!(map.get(4), Some(14));
    }

    #[test]
    fn one_unnumbered_page_leaves_the_colliding_index_unfilled() {
        let mut map = map_with_anchors(&[(0, 10), (4, 13)]);
        map.interpolate(5);

        assert_eq!(map.get(1), Some(11));
        assert_eq!(map.get(2), Some(12));
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn adjacent_anchors_fill_nothing_interior() {
        let mut map = map_with_anchors(&[(2, 5), (3, 6)]);
        map.interpolate(4);

        assert_eq!(map.len(), 2);
    }

    #[test]
    fn gap_wider_than_ten_pages_is_not_trusted() {
        let mut map = map_with_anchors(&[(0, 1), (12, 13)]);
        map.interpolate(13);

        assert_eq!(map.get(6), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn irregular_numbering_outside_tolerance_is_skipped() {
        let mut map = map_with_anchors(&[(0, 10), (4, 20)]);
        map.interpolate(5);

        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), None);
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn in_window_but_unhandled_pattern_stays_unfilled() {
        // page_gap == phys_gap + 1 is within tolerance but has no fill rule.
        let mut map = map_with_anchors(&[(0, 10), (4, 15)]);
        map.interpolate(5);

        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), None);
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn duplicate_anchor_numbers_fill_nothing() {
        // page_gap of 0 across a 3-page gap falls outside the tolerance
        // window entirely.
        let mut map = map_with_anchors(&[(0, 7), (3, 7)]);
        map.interpolate(4);

        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), None);
    }

    #[test]
    fn backward_extension_fills_down_to_one() {
        let mut map = map_with_anchors(&[(4, 5), (5, 6)]);
        map.interpolate(6);

        assert_eq!(map.get(3), Some(4));
        assert_eq!(map.get(2), Some(3));
        assert_eq!(map.get(1), Some(2));
        assert_eq!(map.get(0), Some(1));
    }

    #[test]
    fn backward_extension_stops_before_zero() {
        let mut map = map_with_anchors(&[(5, 3), (6, 4)]);
        map.interpolate(7);

        assert_eq!(map.get(4), Some(2));
        assert_eq!(map.get(3), Some(1));
        assert_eq!(map.get(2), None);
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(0), None);
    }

    #[test]
    fn backward_extension_needs_enough_preceding_pages() {
        // num0 - 1 = 4 preceding numbers, but only 3 preceding pages
        let mut map = map_with_anchors(&[(3, 5)]);
        map.interpolate(10);

        assert_eq!(map.get(0), None);
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), None);
    }

    #[test]
    fn forward_extension_requires_adjacent_trailing_anchors() {
        let mut map = map_with_anchors(&[(0, 1), (5, 6)]);
        map.interpolate(10);

        // Interior filled 1:1, but nothing beyond the last anchor
        assert_eq!(map.get(4), Some(5));
        assert_eq!(map.get(6), None);
        assert_eq!(map.get(9), None);
    }

    #[test]
    fn forward_extension_runs_to_the_end_of_the_document() {
        let mut map = map_with_anchors(&[(3, 7), (4, 8)]);
        map.interpolate(8);

        assert_eq!(map.get(5), Some(9));
        assert_eq!(map.get(6), Some(10));
        assert_eq!(map.get(7), Some(11));
    }

    #[test]
    fn single_anchor_is_left_alone() {
        let mut map = map_with_anchors(&[(0, 1)]);
        map.interpolate(10);

        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_map_interpolates_to_nothing() {
        let mut map = PageNumberMap::new();
        map.interpolate(10);

        assert!(map.is_empty());
    }

    #[test]
    fn interpolation_never_overwrites_existing_entries() {
        let texts = ["1", "mystery page", "3", "4"];
        let mut map = scan_printed_numbers(4, |i| texts.get(i).map(|t| t.to_string()));
        let before: Vec<(usize, u32)> = map.iter().collect();

        map.interpolate(4);

        for (index, number) in before {
            assert_eq!(map.get(index), Some(number));
            assert!(map.is_anchor(index));
        }
        // The gap itself got filled
        assert_eq!(map.get(1), Some(2));
        assert!(!map.is_anchor(1));
    }
}
