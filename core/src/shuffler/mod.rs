use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Produces a permutation of `cards`: same length, every element exactly once.
pub trait Shuffler {
    fn shuffle(&mut self, cards: &[CardIdentity]) -> Vec<CardIdentity>;
}
