use super::*;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Fisher-Yates pass over a seeded RNG, so every call terminates and every permutation is equally likely.
#[derive(Clone, Debug)]
pub struct RandomShuffler {
    rng: SmallRng,
}

impl RandomShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, cards: &[CardIdentity]) -> Vec<CardIdentity> {
        let mut shuffled = cards.to_vec();
        shuffled.as_mut_slice().shuffle(&mut self.rng);
        shuffled
    }
}
