use std::collections::BTreeSet;
use std::fmt::Debug;

use itertools::zip_eq;
use rand::Rng;

/// A prior over partitions, scored through occupancy summaries alone.
///
/// Both hooks see the same four summaries: the target group's size, the
/// number of nonempty groups, the total sample size, and the number of
/// empty placeholder groups. Any exchangeable clustering prior expressible
/// through these plugs into [`MixtureDriver::score_value`].
pub trait ClusterPrior {
    /// Log-probability that the next value joins a group of `group_size`
    /// (a new group when `group_size == 0`).
    fn score_add_value(
        &self,
        group_size: usize,
        nonempty_group_count: usize,
        sample_size: usize,
        empty_group_count: usize,
    ) -> f64;

    /// Log-probability change from removing one value out of a group of
    /// `group_size`. Defined so that an add followed by the matching
    /// remove sums to zero.
    fn score_remove_value(
        &self,
        group_size: usize,
        nonempty_group_count: usize,
        sample_size: usize,
        empty_group_count: usize,
    ) -> f64;
}

/// Occupancy state machine for a dynamic set of groups.
///
/// Tracks one count per packed group id, the set of currently-empty
/// packed ids, and the running sample size. Mutations report add-group
/// and remove-group events so that callers holding parallel per-group
/// arrays (sufficient statistics, score caches) can mirror the packed
/// growth and swap-removal exactly.
///
/// Invariant: at least one empty group always exists, so a new cluster
/// can always be started. `add_value` restores it by appending a fresh
/// empty group whenever it populates the last one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MixtureDriver {
    counts: Vec<usize>,
    empty_groupids: BTreeSet<usize>,
    sample_size: usize,
}

impl MixtureDriver {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: Vec::new(),
            empty_groupids: BTreeSet::new(),
            sample_size: 0,
        }
    }

    /// Build from a bulk-loaded count vector.
    ///
    /// # Panics
    /// If `counts` contains no empty group.
    #[must_use]
    pub fn from_counts(counts: Vec<usize>) -> Self {
        let mut driver = Self {
            counts,
            empty_groupids: BTreeSet::new(),
            sample_size: 0,
        };
        driver.init();
        driver
    }

    /// Rescan the count vector to rebuild the empty set and sample size.
    ///
    /// Used once after bulk construction or deserialization; incremental
    /// mutations never need it.
    ///
    /// # Panics
    /// If no group is empty. Bulk loaders must pre-allocate at least one.
    pub fn init(&mut self) {
        self.sample_size = self.counts.iter().sum();
        self.empty_groupids = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(groupid, _)| groupid)
            .collect();
        assert!(
            !self.empty_groupids.is_empty(),
            "no empty group among {} groups",
            self.counts.len()
        );
    }

    /// Add `count` values to `groupid`; returns whether a new group was
    /// created (the target went from empty to populated).
    ///
    /// On an add-group event a fresh empty group is appended at the end,
    /// growing the packed id space by one. Callers with parallel arrays
    /// must append in lockstep.
    ///
    /// # Panics
    /// If `count == 0` or `groupid` is out of range.
    pub fn add_value(&mut self, groupid: usize, count: usize) -> bool {
        assert!(count > 0, "adding zero values");
        assert!(
            groupid < self.counts.len(),
            "bad group id: {groupid} >= {}",
            self.counts.len()
        );
        let old = self.counts[groupid];
        self.counts[groupid] = old + count;
        self.sample_size += count;

        let added = old == 0;
        if added {
            let was_empty = self.empty_groupids.remove(&groupid);
            debug_assert!(was_empty, "populated group {groupid} in the empty set");
            self.counts.push(0);
            self.empty_groupids.insert(self.counts.len() - 1);
        }
        added
    }

    /// Remove `count` values from `groupid`; returns whether the group
    /// was destroyed (its count reached zero).
    ///
    /// On a remove-group event the group is packed-removed: the last
    /// packed id moves into `groupid`'s slot and the id space shrinks by
    /// one. Callers with parallel arrays must swap-remove in lockstep.
    ///
    /// # Panics
    /// If `count == 0`, `groupid` is out of range, or `count` exceeds the
    /// group's current size (removing from an empty group included).
    pub fn remove_value(&mut self, groupid: usize, count: usize) -> bool {
        assert!(count > 0, "removing zero values");
        assert!(
            groupid < self.counts.len(),
            "bad group id: {groupid} >= {}",
            self.counts.len()
        );
        let old = self.counts[groupid];
        assert!(
            count <= old,
            "removing {count} values from a group of {old}"
        );
        self.counts[groupid] = old - count;
        self.sample_size -= count;

        let removed = self.counts[groupid] == 0;
        if removed {
            // The destroyed group was populated, so it is not in the
            // empty set. Only the moved last group needs renumbering.
            let last = self.counts.len() - 1;
            self.counts.swap_remove(groupid);
            if groupid != last && self.empty_groupids.remove(&last) {
                self.empty_groupids.insert(groupid);
            }
        }
        removed
    }

    /// Fill one prior score per group via the closed-form hook.
    ///
    /// This is the slow O(K) fallback; cached specializations like
    /// [`PitmanYorMixture`](crate::clustering::PitmanYorMixture) produce
    /// the same numbers incrementally.
    ///
    /// # Panics
    /// If `scores` and the group array differ in length.
    pub fn score_value<P: ClusterPrior>(&self, prior: &P, scores: &mut [f64]) {
        let nonempty = self.nonempty_group_count();
        let empty = self.empty_groupids.len();
        for (score, &count) in zip_eq(scores.iter_mut(), &self.counts) {
            *score = prior.score_add_value(count, nonempty, self.sample_size, empty);
        }
    }

    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub const fn empty_groupids(&self) -> &BTreeSet<usize> {
        &self.empty_groupids
    }

    #[must_use]
    pub const fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn nonempty_group_count(&self) -> usize {
        self.counts.len() - self.empty_groupids.len()
    }
}

/// A conjugate model family: per-group sufficient statistics plus the
/// closed-form add/remove/score formulas over them.
pub trait MixtureComponent {
    type Value;
    type Group: Clone + Debug;

    /// A group holding no values yet.
    fn new_group<R: Rng>(&self, rng: &mut R) -> Self::Group;

    fn add_value(&self, group: &mut Self::Group, value: &Self::Value);

    fn remove_value(&self, group: &mut Self::Group, value: &Self::Value);

    /// Posterior predictive log-density of `value` under `group`.
    fn score_value(&self, group: &Self::Group, value: &Self::Value) -> f64;

    /// Marginal log-likelihood of all values in `group`.
    fn score_group(&self, group: &Self::Group) -> f64;

    /// Number of values observed by `group`.
    fn group_size(&self, group: &Self::Group) -> usize;
}

/// Per-group derived caches for scoring a candidate value against every
/// group at once.
///
/// The cache-maintenance hooks default to no-ops so that cacheless
/// scorers only implement `score_value_group`. Cached scorers override
/// the hooks; the mixture calls them in lockstep with its packed group
/// array, so cache arrays stay index-aligned with it.
pub trait ValueScorer<M: MixtureComponent> {
    /// Extend the caches for a freshly appended group.
    fn add_group<R: Rng>(&mut self, _model: &M, _group: &M::Group, _rng: &mut R) {}

    /// Packed-remove the cache entries for a destroyed group.
    fn remove_group(&mut self, _model: &M, _groupid: usize) {}

    /// Refresh the cache entries for a single mutated group.
    fn update_group(&mut self, _model: &M, _groupid: usize, _group: &M::Group) {}

    /// Log-score of `value` against one group.
    fn score_value_group(&self, model: &M, group: &M::Group, groupid: usize, value: &M::Value)
    -> f64;

    /// Add each group's log-score of `value` into the accumulator.
    ///
    /// Must agree with calling `score_value_group` once per group; the
    /// default does exactly that. Cached scorers override this with a
    /// flat pass over their score arrays.
    ///
    /// # Panics
    /// If `scores` and `groups` differ in length.
    fn score_value(&self, model: &M, groups: &[M::Group], value: &M::Value, scores: &mut [f64]) {
        for (groupid, (score, group)) in zip_eq(scores.iter_mut(), groups).enumerate() {
            *score += self.score_value_group(model, group, groupid, value);
        }
    }

    /// Debug-level consistency check of cache sizes against the group
    /// count. Never called from hot paths.
    fn validate(&self, _model: &M, _group_count: usize) {}
}

/// The cacheless scorer: recomputes every score from raw sufficient
/// statistics. Reference semantics for the cached scorers.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackScorer;

impl<M: MixtureComponent> ValueScorer<M> for FallbackScorer {
    fn score_value_group(
        &self,
        model: &M,
        group: &M::Group,
        _groupid: usize,
        value: &M::Value,
    ) -> f64 {
        model.score_value(group, value)
    }
}

/// A [`MixtureDriver`] composed with per-group sufficient statistics and
/// a pluggable [`ValueScorer`].
///
/// Owns all three arrays and keeps them index-aligned: every add-group
/// and remove-group event the driver reports is applied to the group
/// array and forwarded to the scorer with the same packed id.
pub struct GroupMixture<M: MixtureComponent, S> {
    driver: MixtureDriver,
    groups: Vec<M::Group>,
    scorer: S,
}

impl<M, S> Clone for GroupMixture<M, S>
where
    M: MixtureComponent,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            driver: self.driver.clone(),
            groups: self.groups.clone(),
            scorer: self.scorer.clone(),
        }
    }
}

impl<M, S> Debug for GroupMixture<M, S>
where
    M: MixtureComponent,
    S: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupMixture")
            .field("driver", &self.driver)
            .field("groups", &self.groups)
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl<M, S> GroupMixture<M, S>
where
    M: MixtureComponent,
    S: ValueScorer<M>,
{
    /// An empty mixture: one placeholder group, no values.
    pub fn new<R: Rng>(model: &M, scorer: S, rng: &mut R) -> Self {
        Self::from_groups(model, vec![model.new_group(rng)], scorer, rng)
    }

    /// Build from bulk-loaded groups, rebuilding occupancy and caches.
    ///
    /// # Panics
    /// If no group in `groups` is empty.
    pub fn from_groups<R: Rng>(model: &M, groups: Vec<M::Group>, scorer: S, rng: &mut R) -> Self {
        let counts = groups.iter().map(|group| model.group_size(group)).collect();
        let driver = MixtureDriver::from_counts(counts);
        let mut scorer = scorer;
        for (groupid, group) in groups.iter().enumerate() {
            scorer.add_group(model, group, rng);
            scorer.update_group(model, groupid, group);
        }
        Self {
            driver,
            groups,
            scorer,
        }
    }

    /// Add one value to `groupid`; returns whether a new group was
    /// created (see [`MixtureDriver::add_value`]).
    pub fn add_value<R: Rng>(
        &mut self,
        model: &M,
        groupid: usize,
        value: &M::Value,
        rng: &mut R,
    ) -> bool {
        model.add_value(&mut self.groups[groupid], value);
        let added = self.driver.add_value(groupid, 1);
        self.scorer.update_group(model, groupid, &self.groups[groupid]);
        if added {
            let fresh = model.new_group(rng);
            self.scorer.add_group(model, &fresh, rng);
            self.groups.push(fresh);
        }
        added
    }

    /// Remove one value from `groupid`; returns whether the group was
    /// destroyed (see [`MixtureDriver::remove_value`]).
    pub fn remove_value(&mut self, model: &M, groupid: usize, value: &M::Value) -> bool {
        model.remove_value(&mut self.groups[groupid], value);
        let removed = self.driver.remove_value(groupid, 1);
        if removed {
            self.groups.swap_remove(groupid);
            self.scorer.remove_group(model, groupid);
        } else {
            self.scorer.update_group(model, groupid, &self.groups[groupid]);
        }
        removed
    }

    /// Log-score of `value` against a single group.
    pub fn score_value_group(&self, model: &M, groupid: usize, value: &M::Value) -> f64 {
        self.scorer
            .score_value_group(model, &self.groups[groupid], groupid, value)
    }

    /// Add each group's log-score of `value` into the accumulator.
    ///
    /// # Panics
    /// If `scores.len() != group_count()`.
    pub fn score_value(&self, model: &M, value: &M::Value, scores: &mut [f64]) {
        self.scorer.score_value(model, &self.groups, value, scores);
    }

    /// Aggregate marginal log-likelihood over all groups.
    pub fn score_data(&self, model: &M) -> f64 {
        self.groups
            .iter()
            .map(|group| model.score_group(group))
            .sum()
    }

    /// O(K) consistency check of occupancy against the raw statistics.
    ///
    /// # Panics
    /// If any parallel array disagrees with the driver.
    pub fn validate(&self, model: &M) {
        assert_eq!(self.groups.len(), self.driver.group_count());
        for (group, &count) in zip_eq(&self.groups, self.driver.counts()) {
            assert_eq!(model.group_size(group), count);
        }
        self.scorer.validate(model, self.groups.len());
    }

    #[must_use]
    pub const fn driver(&self) -> &MixtureDriver {
        &self.driver
    }

    #[must_use]
    pub fn groups(&self) -> &[M::Group] {
        &self.groups
    }

    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }
}
