//! Dice challenge: roll two dice, win on a total of 7.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "🎲";
const TARGET: u8 = 7;

pub struct DiceChallenge {
    rng: SmallRng,
}

impl DiceChallenge {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Roll both dice and conclude the challenge.
    pub fn roll(&mut self, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        let a: u8 = self.rng.gen_range(1..=6);
        let b: u8 = self.rng.gen_range(1..=6);
        let sum = a + b;
        handle.report_assigned(sum == TARGET, format!("sum={sum}"))
    }
}

impl Default for DiceChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for DiceChallenge {
    fn name(&self) -> &str {
        "Dice"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}
