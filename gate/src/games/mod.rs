//! Mini-game logic units.
//!
//! Each game here is the playable core of one challenge, stripped of any
//! rendering: board state, win conditions, and the single terminal report
//! through its [`ChallengeHandle`](crate::protocol::ChallengeHandle).
//! Every game carries exactly one assigned symbol for all of its reports.

pub mod dice;
pub mod gesture_unlock;
pub mod memory;
pub mod rps;
pub mod sequence;
pub mod simon;
pub mod tictactoe;
pub mod word;

pub use dice::DiceChallenge;
pub use gesture_unlock::GestureUnlockChallenge;
pub use memory::{Color, MemoryChallenge};
pub use rps::{Hand, RoundResult, RpsChallenge};
pub use sequence::SequenceChallenge;
pub use simon::SimonChallenge;
pub use tictactoe::{Cell, TicTacToeChallenge};
pub use word::WordChallenge;
