use std::fmt::Debug;
use std::marker::PhantomData;

use rand::{Rng, SeedableRng};
use rv::prelude::DataOrSuffStat;
use rv::traits::{ConjugatePrior, HasSuffStat, Rv, SuffStat};

use crate::mixture::{GroupMixture, MixtureComponent, ValueScorer};

/// A mixture over a [`Conjugate`] family with per-group posterior caches.
pub type ConjugateMixture<X, Fx, Pr> = GroupMixture<Conjugate<X, Fx, Pr>, PosteriorScorer<X, Fx, Pr>>;

/// Adapter giving any conjugate (likelihood, prior) pair the
/// [`MixtureComponent`] interface.
///
/// A group is the likelihood's sufficient statistic; adding and removing
/// values is `observe`/`forget`, and scoring goes through the prior's
/// closed-form posterior predictive and marginal likelihood.
pub struct Conjugate<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
{
    prior: Pr,
    empty_stat: Fx::Stat,
    _phantom_x: PhantomData<X>,
    _phantom_fx: PhantomData<Fx>,
}

impl<X, Fx, Pr> Conjugate<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
{
    pub fn new(prior: Pr) -> Self {
        // The empty suffstat's shape can depend on the likelihood, so
        // draw a throwaway one; the seed is irrelevant for an empty stat.
        let fx = prior.draw(&mut rand::rngs::SmallRng::seed_from_u64(0x1234));
        Self {
            empty_stat: fx.empty_suffstat(),
            prior,
            _phantom_x: PhantomData,
            _phantom_fx: PhantomData,
        }
    }

    pub fn prior(&self) -> &Pr {
        &self.prior
    }

    pub fn empty_stat(&self) -> &Fx::Stat {
        &self.empty_stat
    }
}

impl<X, Fx, Pr> Clone for Conjugate<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx> + Clone,
    Fx::Stat: Clone,
{
    fn clone(&self) -> Self {
        Self {
            prior: self.prior.clone(),
            empty_stat: self.empty_stat.clone(),
            _phantom_x: PhantomData,
            _phantom_fx: PhantomData,
        }
    }
}

impl<X, Fx, Pr> Debug for Conjugate<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx> + Debug,
    Fx::Stat: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conjugate")
            .field("prior", &self.prior)
            .field("empty_stat", &self.empty_stat)
            .finish()
    }
}

impl<X, Fx, Pr> MixtureComponent for Conjugate<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
    Fx::Stat: Clone + Debug,
{
    type Value = X;
    type Group = Fx::Stat;

    fn new_group<R: Rng>(&self, _rng: &mut R) -> Self::Group {
        self.empty_stat.clone()
    }

    fn add_value(&self, group: &mut Self::Group, value: &X) {
        group.observe(value);
    }

    fn remove_value(&self, group: &mut Self::Group, value: &X) {
        group.forget(value);
    }

    fn score_value(&self, group: &Self::Group, value: &X) -> f64 {
        self.prior.ln_pp(value, &DataOrSuffStat::SuffStat(group))
    }

    fn score_group(&self, group: &Self::Group) -> f64 {
        self.prior.ln_m(&DataOrSuffStat::SuffStat(group))
    }

    fn group_size(&self, group: &Self::Group) -> usize {
        group.n()
    }
}

/// Cached value-scorer for a [`Conjugate`] family.
///
/// Keeps one posterior-predictive cache per group, refreshed only for
/// the group a mutation touched. Scoring a value against K groups is K
/// cache evaluations with no posterior updates, against the fallback's K
/// full posterior computations.
pub struct PosteriorScorer<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
{
    caches: Vec<Pr::PpCache>,
    _phantom_x: PhantomData<X>,
    _phantom_fx: PhantomData<Fx>,
}

impl<X, Fx, Pr> PosteriorScorer<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: Vec::new(),
            _phantom_x: PhantomData,
            _phantom_fx: PhantomData,
        }
    }
}

impl<X, Fx, Pr> Default for PosteriorScorer<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, Fx, Pr> Clone for PosteriorScorer<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
    Pr::PpCache: Clone,
{
    fn clone(&self) -> Self {
        Self {
            caches: self.caches.clone(),
            _phantom_x: PhantomData,
            _phantom_fx: PhantomData,
        }
    }
}

impl<X, Fx, Pr> ValueScorer<Conjugate<X, Fx, Pr>> for PosteriorScorer<X, Fx, Pr>
where
    Fx: Rv<X> + HasSuffStat<X>,
    Pr: ConjugatePrior<X, Fx>,
    Fx::Stat: Clone + Debug,
{
    fn add_group<R: Rng>(
        &mut self,
        model: &Conjugate<X, Fx, Pr>,
        group: &Fx::Stat,
        _rng: &mut R,
    ) {
        self.caches
            .push(model.prior.ln_pp_cache(&DataOrSuffStat::SuffStat(group)));
    }

    fn remove_group(&mut self, _model: &Conjugate<X, Fx, Pr>, groupid: usize) {
        self.caches.swap_remove(groupid);
    }

    fn update_group(&mut self, model: &Conjugate<X, Fx, Pr>, groupid: usize, group: &Fx::Stat) {
        self.caches[groupid] = model.prior.ln_pp_cache(&DataOrSuffStat::SuffStat(group));
    }

    fn score_value_group(
        &self,
        model: &Conjugate<X, Fx, Pr>,
        _group: &Fx::Stat,
        groupid: usize,
        value: &X,
    ) -> f64 {
        model.prior.ln_pp_with_cache(&self.caches[groupid], value)
    }

    fn validate(&self, _model: &Conjugate<X, Fx, Pr>, group_count: usize) {
        assert_eq!(self.caches.len(), group_count);
    }
}
