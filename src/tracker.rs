/// Sentinel marking a retired global id in debug builds.
#[cfg(debug_assertions)]
const DEAD: usize = usize::MAX;

/// Bijection between packed group ids and stable global ids.
///
/// Packed ids are contiguous in `0..packed_size()` and get reshuffled by
/// removals (the last packed id moves into the freed slot, mirroring
/// [`AlignedVec::packed_remove`](crate::vector::AlignedVec::packed_remove)).
/// Global ids are minted in strictly increasing order and never reused, so
/// they are the only ids safe to hold across mutations.
///
/// `remove_group` must be called in lockstep with the packed-array removal
/// it mirrors, with the same packed id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdTracker {
    packed_to_global: Vec<usize>,
    global_to_packed: Vec<usize>,
}

impl IdTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            packed_to_global: Vec::new(),
            global_to_packed: Vec::new(),
        }
    }

    /// Reset to `group_count` freshly numbered groups.
    pub fn init(&mut self, group_count: usize) {
        self.packed_to_global.clear();
        self.global_to_packed.clear();
        for _ in 0..group_count {
            self.add_group();
        }
    }

    /// Append packed id `packed_size()` mapped to a fresh global id.
    pub fn add_group(&mut self) {
        let packed = self.packed_to_global.len();
        let global = self.global_to_packed.len();
        self.packed_to_global.push(global);
        self.global_to_packed.push(packed);
    }

    /// Retire `packed`, renumbering the last packed id into its slot.
    ///
    /// # Panics
    /// If `packed` is out of range.
    pub fn remove_group(&mut self, packed: usize) {
        assert!(
            packed < self.packed_size(),
            "bad packed id: {packed} >= {}",
            self.packed_size()
        );
        #[cfg(debug_assertions)]
        {
            let global = self.packed_to_global[packed];
            self.global_to_packed[global] = DEAD;
        }
        let last = self.packed_size() - 1;
        if packed != last {
            let moved_global = self.packed_to_global[last];
            self.packed_to_global[packed] = moved_global;
            self.global_to_packed[moved_global] = packed;
        }
        self.packed_to_global.truncate(last);
    }

    /// The global id currently living at `packed`.
    ///
    /// # Panics
    /// If `packed` is out of range.
    #[must_use]
    pub fn packed_to_global(&self, packed: usize) -> usize {
        assert!(
            packed < self.packed_size(),
            "bad packed id: {packed} >= {}",
            self.packed_size()
        );
        let global = self.packed_to_global[packed];
        debug_assert!(global < self.global_size(), "bad global id: {global}");
        global
    }

    /// The packed id currently assigned to `global`.
    ///
    /// # Panics
    /// If `global` was never issued, or (in debug builds) is stale.
    #[must_use]
    pub fn global_to_packed(&self, global: usize) -> usize {
        assert!(
            global < self.global_size(),
            "bad global id: {global} >= {}",
            self.global_size()
        );
        let packed = self.global_to_packed[global];
        debug_assert!(
            packed < self.packed_size(),
            "stale global id: {global} (packed {packed})"
        );
        packed
    }

    #[must_use]
    pub const fn packed_size(&self) -> usize {
        self.packed_to_global.len()
    }

    /// The number of global ids ever issued.
    #[must_use]
    pub const fn global_size(&self) -> usize {
        self.global_to_packed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_groups_are_identity_mapped() {
        let mut tracker = IdTracker::new();
        tracker.init(4);
        assert_eq!(tracker.packed_size(), 4);
        assert_eq!(tracker.global_size(), 4);
        for id in 0..4 {
            assert_eq!(tracker.packed_to_global(id), id);
            assert_eq!(tracker.global_to_packed(id), id);
        }
    }

    #[test]
    fn remove_renumbers_last_group() {
        let mut tracker = IdTracker::new();
        tracker.init(4);
        tracker.remove_group(1);

        // Global 3 was at the last packed slot and moves into slot 1.
        assert_eq!(tracker.packed_size(), 3);
        assert_eq!(tracker.packed_to_global(1), 3);
        assert_eq!(tracker.global_to_packed(3), 1);
        assert_eq!(tracker.packed_to_global(0), 0);
        assert_eq!(tracker.packed_to_global(2), 2);
    }

    #[test]
    fn global_ids_are_never_reused() {
        let mut tracker = IdTracker::new();
        tracker.init(2);
        tracker.remove_group(0);
        tracker.add_group();
        assert_eq!(tracker.packed_to_global(1), 2);
        assert_eq!(tracker.global_size(), 3);
    }

    #[test]
    fn bijection_survives_removals() {
        let mut tracker = IdTracker::new();
        tracker.init(8);
        for packed in [5, 0, 3, 0] {
            tracker.remove_group(packed);
            for q in 0..tracker.packed_size() {
                let global = tracker.packed_to_global(q);
                assert_eq!(tracker.global_to_packed(global), q);
            }
        }
        assert_eq!(tracker.packed_size(), 4);
        assert_eq!(tracker.global_size(), 8);
    }

    #[test]
    #[should_panic(expected = "stale global id")]
    #[cfg(debug_assertions)]
    fn stale_global_lookup_panics() {
        let mut tracker = IdTracker::new();
        tracker.init(1);
        tracker.remove_group(0);
        tracker.global_to_packed(0);
    }
}
