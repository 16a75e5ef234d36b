//! Sequence challenge: repeat a shown pattern of pad presses.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "🎯";
const PATTERN_LEN: usize = 5;
const PADS: u8 = 9;

pub struct SequenceChallenge {
    rng: SmallRng,
    pattern: Vec<u8>,
    input: Vec<u8>,
    concluded: bool,
}

impl SequenceChallenge {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            pattern: Vec::new(),
            input: Vec::new(),
            concluded: false,
        }
    }

    /// Generate a fresh pattern and return it for presentation.
    pub fn start(&mut self) -> &[u8] {
        self.pattern = (0..PATTERN_LEN)
            .map(|_| self.rng.gen_range(0..PADS))
            .collect();
        self.input.clear();
        self.concluded = false;
        &self.pattern
    }

    /// Press a pad. Ignored before `start` and after conclusion; the
    /// challenge reports once the input reaches the pattern's length.
    pub fn press(&mut self, pad: u8, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        if self.concluded || self.pattern.is_empty() || pad >= PADS {
            return None;
        }

        self.input.push(pad);
        if self.input.len() == self.pattern.len() {
            self.concluded = true;
            let won = self.input == self.pattern;
            return handle.report_assigned(won, format!("len={}", self.pattern.len()));
        }
        None
    }
}

impl Default for SequenceChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for SequenceChallenge {
    fn name(&self) -> &str {
        "Sequence"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}
