//! Simon challenge: an echo sequence that grows by one pad per round.
//!
//! Each round replays the whole sequence so far and the player echoes
//! it back. A correct echo of a sequence that has reached three pads
//! wins; a correct echo of a shorter one appends a pad and plays again;
//! any wrong echo loses. Mismatches are only judged once the echo
//! reaches the sequence's full length.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "✅";
const PADS: u8 = 4;
const WIN_LEN: usize = 3;

pub struct SimonChallenge {
    rng: SmallRng,
    sequence: Vec<u8>,
    input: Vec<u8>,
    concluded: bool,
}

impl SimonChallenge {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            sequence: Vec::new(),
            input: Vec::new(),
            concluded: false,
        }
    }

    /// Begin a fresh game with a one-pad sequence, returned for replay.
    pub fn start(&mut self) -> &[u8] {
        self.sequence.clear();
        self.input.clear();
        self.concluded = false;
        self.extend_sequence();
        &self.sequence
    }

    fn extend_sequence(&mut self) {
        let pad = self.rng.gen_range(0..PADS);
        self.sequence.push(pad);
        self.input.clear();
    }

    /// Echo one pad. Ignored before `start` and after conclusion.
    ///
    /// Reports a win on a correct full echo of a length-3 sequence, a
    /// loss on a wrong full echo; a correct echo of a shorter sequence
    /// grows it by one pad and the round continues.
    pub fn press(&mut self, pad: u8, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        if self.concluded || self.sequence.is_empty() || pad >= PADS {
            return None;
        }

        self.input.push(pad);
        if self.input.len() < self.sequence.len() {
            return None;
        }

        if self.input == self.sequence {
            if self.sequence.len() >= WIN_LEN {
                self.concluded = true;
                return handle.report_assigned(true, format!("len={}", self.sequence.len()));
            }
            self.extend_sequence();
            return None;
        }

        self.concluded = true;
        handle.report_assigned(false, format!("len={}", self.sequence.len()))
    }

    /// The sequence to replay for the current round.
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }
}

impl Default for SimonChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for SimonChallenge {
    fn name(&self) -> &str {
        "Simon"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}
