//! Model families pluggable into a [`GroupMixture`](crate::mixture::GroupMixture).

pub mod conjugate;

pub use conjugate::{Conjugate, ConjugateMixture, PosteriorScorer};
