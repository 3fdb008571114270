//! One-peg engine library.
//!
//! Models triangular peg solitaire: the board and its hex adjacency, jump
//! generation and application, game sessions, and the replayable game
//! corpus used to collect played games for later analysis.

pub mod board;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
pub mod store;
