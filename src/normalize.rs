//! Mapping raw encoder positions onto menu indexes.

/// Inclusive range of legal indexes for one menu node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexRange {
    /// Lowest legal index.
    pub lower: i32,
    /// Highest legal index.
    pub upper: i32,
}

impl IndexRange {
    /// Range `0..=item_count - 1`. A node always has at least one item.
    pub const fn for_items(item_count: usize) -> Self {
        let upper = if item_count == 0 { 0 } else { item_count as i32 - 1 };
        Self { lower: 0, upper }
    }

    /// Clamps `raw` into this range.
    #[inline]
    pub fn clamp(&self, raw: i32) -> i32 {
        normalize(raw, self.lower, self.upper)
    }

    /// Returns true if `index` lies inside the range.
    #[inline]
    pub fn contains(&self, index: i32) -> bool {
        index >= self.lower && index <= self.upper
    }

    /// Signed distance from the range to `raw`; zero when inside.
    ///
    /// Saturates at the `i32` bounds.
    ///
    /// ```rust
    /// use explorer_tx::IndexRange;
    ///
    /// let range = IndexRange::for_items(4);
    /// assert_eq!(range.excess(7), 4);
    /// assert_eq!(range.excess(-2), -2);
    /// assert_eq!(range.excess(2), 0);
    /// ```
    #[inline]
    pub fn excess(&self, raw: i32) -> i32 {
        raw.saturating_sub(self.clamp(raw))
    }
}

/// Clamps a raw position into `[lower, upper]`.
///
/// Total: a position already in range is returned unchanged, anything else
/// lands on the nearest bound. With `lower > upper` the result is `lower`.
#[inline]
pub fn normalize(raw: i32, lower: i32, upper: i32) -> i32 {
    lower.max(upper.min(raw))
}

/// Returns true if `new` differs from the last rendered index.
///
/// `previous` is `None` until something has been rendered.
#[inline]
pub fn has_changed(new: i32, previous: Option<i32>) -> bool {
    previous != Some(new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_is_identity() {
        for lo in -3..3 {
            for hi in lo..lo + 5 {
                for r in lo..=hi {
                    assert_eq!(normalize(r, lo, hi), r);
                }
            }
        }
    }

    #[test]
    fn result_always_within_bounds() {
        for lo in -4..4 {
            for hi in lo..lo + 6 {
                for r in -50..50 {
                    let n = normalize(r, lo, hi);
                    assert!(n >= lo && n <= hi, "normalize({r}, {lo}, {hi}) = {n}");
                }
            }
        }
    }

    #[test]
    fn extreme_values_clamped() {
        assert_eq!(normalize(i32::MAX, 0, 3), 3);
        assert_eq!(normalize(i32::MIN, 0, 3), 0);
    }

    #[test]
    fn single_item_range() {
        let range = IndexRange::for_items(1);
        assert_eq!(range, IndexRange { lower: 0, upper: 0 });
        assert_eq!(range.clamp(9), 0);
        assert_eq!(range.clamp(-9), 0);
    }

    #[test]
    fn excess_saturates_far_below_range() {
        let range = IndexRange { lower: 5, upper: 9 };
        assert_eq!(range.excess(i32::MIN), i32::MIN);
        assert_eq!(range.excess(i32::MAX), i32::MAX - 9);
        assert_eq!(IndexRange { lower: -9, upper: -5 }.excess(i32::MAX), i32::MAX);
    }

    #[test]
    fn empty_node_degrades_to_one_slot() {
        assert_eq!(IndexRange::for_items(0), IndexRange::for_items(1));
    }

    #[test]
    fn range_contains() {
        let range = IndexRange::for_items(3);
        assert!(range.contains(0));
        assert!(range.contains(2));
        assert!(!range.contains(3));
        assert!(!range.contains(-1));
    }

    #[test]
    fn change_detection() {
        assert!(has_changed(0, None));
        assert!(has_changed(1, Some(0)));
        assert!(!has_changed(2, Some(2)));
    }
}
