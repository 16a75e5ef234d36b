//! Memory challenge: level-based color sequences.
//!
//! Each level shows a fresh random color sequence of length level + 2.
//! Repeating it exactly advances to the next level; completing level 3
//! wins, and any wrong repeat loses. As with the other echo games, a
//! repeat is only judged once it reaches the sequence's full length.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "⭐";
const WIN_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    fn from_index(i: u8) -> Color {
        match i % 4 {
            0 => Color::Red,
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        }
    }
}

pub struct MemoryChallenge {
    rng: SmallRng,
    level: u8,
    sequence: Vec<Color>,
    input: Vec<Color>,
    concluded: bool,
}

impl MemoryChallenge {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            level: 1,
            sequence: Vec::new(),
            input: Vec::new(),
            concluded: false,
        }
    }

    /// Begin at level 1 with a three-color sequence, returned for
    /// presentation.
    pub fn start(&mut self) -> &[Color] {
        self.level = 1;
        self.concluded = false;
        self.next_sequence();
        &self.sequence
    }

    fn next_sequence(&mut self) {
        let len = usize::from(self.level) + 2;
        self.sequence = (0..len)
            .map(|_| Color::from_index(self.rng.gen_range(0..4)))
            .collect();
        self.input.clear();
    }

    /// Repeat one color. Ignored before `start` and after conclusion.
    ///
    /// A correct full repeat of the level-3 sequence wins; a correct
    /// repeat below that regenerates a longer sequence one level up; a
    /// wrong full repeat loses.
    pub fn press(&mut self, color: Color, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        if self.concluded || self.sequence.is_empty() {
            return None;
        }

        self.input.push(color);
        if self.input.len() < self.sequence.len() {
            return None;
        }

        if self.input == self.sequence {
            if self.level >= WIN_LEVEL {
                self.concluded = true;
                return handle.report_assigned(true, format!("level={}", self.level));
            }
            self.level += 1;
            self.next_sequence();
            return None;
        }

        self.concluded = true;
        handle.report_assigned(false, format!("level={}", self.level))
    }

    /// The sequence to present for the current level.
    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }
}

impl Default for MemoryChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for MemoryChallenge {
    fn name(&self) -> &str {
        "Memory"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}
