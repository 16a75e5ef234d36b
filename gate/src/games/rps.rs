//! Rock-paper-scissors challenge, first to 3 round wins.
//!
//! Individual rounds resolve immediately, but the challenge only reports
//! once the whole match concludes; ties replay the round.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "✊";
const TARGET_WINS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    fn beats(self, other: Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Rock, Hand::Scissors) | (Hand::Paper, Hand::Rock) | (Hand::Scissors, Hand::Paper)
        )
    }

    fn from_index(i: u8) -> Hand {
        match i % 3 {
            0 => Hand::Rock,
            1 => Hand::Paper,
            _ => Hand::Scissors,
        }
    }
}

/// Outcome of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win { cpu: Hand },
    Loss { cpu: Hand },
    Tie { cpu: Hand },
}

pub struct RpsChallenge {
    rng: SmallRng,
    player_score: u8,
    cpu_score: u8,
    concluded: bool,
}

impl RpsChallenge {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            player_score: 0,
            cpu_score: 0,
            concluded: false,
        }
    }

    /// Play one round. Reports through `handle` only when a side reaches
    /// the match target; returns that final outcome when it happens.
    pub fn play(
        &mut self,
        hand: Hand,
        handle: &ChallengeHandle,
    ) -> (Option<RoundResult>, Option<AttemptOutcome>) {
        if self.concluded {
            return (None, None);
        }

        let cpu = Hand::from_index(self.rng.gen_range(0..3));
        let round = if hand == cpu {
            RoundResult::Tie { cpu }
        } else if hand.beats(cpu) {
            self.player_score += 1;
            RoundResult::Win { cpu }
        } else {
            self.cpu_score += 1;
            RoundResult::Loss { cpu }
        };

        debug!(
            player = self.player_score,
            cpu = self.cpu_score,
            "RPS round resolved"
        );

        if self.player_score >= TARGET_WINS || self.cpu_score >= TARGET_WINS {
            self.concluded = true;
            let won = self.player_score >= TARGET_WINS;
            let detail = format!("you={} cpu={}", self.player_score, self.cpu_score);
            let outcome = handle.report_assigned(won, detail);
            return (Some(round), outcome);
        }

        (Some(round), None)
    }

    pub fn scores(&self) -> (u8, u8) {
        (self.player_score, self.cpu_score)
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }
}

impl Default for RpsChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for RpsChallenge {
    fn name(&self) -> &str {
        "Stone-Paper-Scissor"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}
