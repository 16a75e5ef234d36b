//! Tic-tac-toe challenge: human X against a random-move CPU O.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "⭕";

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    X,
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminal {
    XWins,
    OWins,
    Draw,
}

pub struct TicTacToeChallenge {
    rng: SmallRng,
    board: [Option<Cell>; 9],
    concluded: bool,
}

impl TicTacToeChallenge {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            board: [None; 9],
            concluded: false,
        }
    }

    /// Place X at `cell` (0..9), then let the CPU answer.
    ///
    /// Occupied cells, out-of-range indices, and input after the game has
    /// concluded are ignored. The win check fully resolves before any
    /// report goes out; the report fires at most once.
    pub fn play(&mut self, cell: usize, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        if self.concluded || cell >= 9 || self.board[cell].is_some() {
            return None;
        }

        self.board[cell] = Some(Cell::X);
        if let Some(t) = self.terminal() {
            return self.finish(t, handle);
        }

        self.cpu_move();
        if let Some(t) = self.terminal() {
            return self.finish(t, handle);
        }

        None
    }

    fn cpu_move(&mut self) {
        let empty: Vec<usize> = (0..9).filter(|&i| self.board[i].is_none()).collect();
        if !empty.is_empty() {
            let pick = empty[self.rng.gen_range(0..empty.len())];
            self.board[pick] = Some(Cell::O);
        }
    }

    fn terminal(&self) -> Option<Terminal> {
        for line in &LINES {
            if let Some(first) = self.board[line[0]] {
                if line.iter().all(|&i| self.board[i] == Some(first)) {
                    return Some(match first {
                        Cell::X => Terminal::XWins,
                        Cell::O => Terminal::OWins,
                    });
                }
            }
        }
        if self.board.iter().all(|c| c.is_some()) {
            return Some(Terminal::Draw);
        }
        None
    }

    fn finish(&mut self, terminal: Terminal, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        self.concluded = true;
        let won = terminal == Terminal::XWins;
        handle.report_assigned(won, format!("board={}", self.render()))
    }

    fn render(&self) -> String {
        self.board
            .iter()
            .map(|c| match c {
                Some(Cell::X) => 'X',
                Some(Cell::O) => 'O',
                None => '.',
            })
            .collect()
    }

    /// Current board contents, row-major.
    pub fn board(&self) -> &[Option<Cell>; 9] {
        &self.board
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }
}

impl Default for TicTacToeChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for TicTacToeChallenge {
    fn name(&self) -> &str {
        "Tic-Tac-Toe"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;
    use crate::engine::AccessEngine;
    use crate::protocol::GateSession;
    use gatestore::MemoryStore;
    use std::sync::Arc;

    fn session() -> GateSession {
        GateSession::new(AccessEngine::new(
            Arc::new(MemoryStore::new()),
            &GateConfig::default(),
        ))
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let session = session();
        let mut game = TicTacToeChallenge::with_seed(1);
        let handle = session.begin(&game);

        game.play(4, &handle);
        let board_before = *game.board();
        game.play(4, &handle);
        assert_eq!(*game.board(), board_before);
    }

    #[test]
    fn test_x_win_detection() {
        // Drive full games; with a random CPU, X wins some and not
        // others, and every concluded game must carry a final board.
        let mut x_won = false;
        let mut x_lost_or_drew = false;

        for seed in 0..40 {
            let session = session();
            let mut game = TicTacToeChallenge::with_seed(seed);
            let handle = session.begin(&game);

            let mut outcome = None;
            for cell in 0..9 {
                if outcome.is_none() {
                    outcome = game.play(cell, &handle);
                }
            }

            let out = outcome.expect("game reaches a terminal state");
            assert!(out.record.detail.starts_with("board="));
            assert_eq!(out.record.produced_symbol, Symbol::from(SYMBOL));
            if game_won(&out.record.detail) {
                x_won = true;
            } else {
                x_lost_or_drew = true;
            }
            assert!(game.is_concluded());
            assert_eq!(session.history().len(), 1);
        }

        assert!(x_won && x_lost_or_drew);
    }

    fn game_won(detail: &str) -> bool {
        // Recompute from the rendered board: any line of three X's.
        let board: Vec<char> = detail["board=".len()..].chars().collect();
        LINES
            .iter()
            .any(|l| l.iter().all(|&i| board[i] == 'X'))
    }

    #[test]
    fn test_input_after_conclusion_is_inert() {
        let session = session();
        let mut game = TicTacToeChallenge::with_seed(2);
        let handle = session.begin(&game);

        let mut outcome = None;
        for cell in 0..9 {
            if outcome.is_none() {
                outcome = game.play(cell, &handle);
            }
        }
        assert!(outcome.is_some());
        assert!(game.play(0, &handle).is_none());
        assert_eq!(session.history().len(), 1);
    }
}
