//! Incremental bookkeeping and vectorized scoring for Dirichlet-process
//! mixture models.
//!
//! The center of the crate is [`mixture::MixtureDriver`], the occupancy
//! state machine over a dynamic set of groups, and
//! [`mixture::GroupMixture`], which composes it with model-specific
//! sufficient statistics and pluggable score caches. The
//! [`clustering`] module supplies the Pitman-Yor / CRP partition prior
//! with its own cached mixture, and [`models`] adapts any `rv`
//! conjugate pair into a mixture component.

pub mod clustering;
pub mod mixture;
pub mod models;
pub mod sparse;
pub mod tracker;
pub mod vector;

pub use clustering::{LowEntropy, PitmanYor, PitmanYorError, PitmanYorMixture};
pub use mixture::{
    ClusterPrior, FallbackScorer, GroupMixture, MixtureComponent, MixtureDriver, ValueScorer,
};
pub use models::{Conjugate, ConjugateMixture, PosteriorScorer};
pub use sparse::SparseCounter;
pub use tracker::IdTracker;
pub use vector::AlignedVec;
