//! Game sessions.
//!
//! A `Game` owns one board and one move log. The driver loop asks the move
//! generator for legal jumps, lets a [`MoveSource`] pick one, applies it,
//! and logs the resulting notation. At the end the session converts into
//! a [`GameRecord`] for the corpus.

use thiserror::Error;

use crate::board::{Board, BoardError, Configuration, Move, Position};
use crate::movegen::{legal_moves, MoveSource};
use crate::protocol::{record_applied, GameRecord, MoveNotation, RecordError};
use crate::resolve::{apply_move, is_game_over, score};

/// Errors raised while driving or replaying a game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("move source picked {start}>{end}, which was not offered")]
    MoveNotOffered { start: Position, end: Position },

    #[error("replay diverged at move {ply}: recorded {recorded}, board is {actual}")]
    ReplayMismatch {
        ply: usize,
        recorded: String,
        actual: String,
    },
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    initial: Configuration,
    log: Vec<MoveNotation>,
}

impl Game {
    /// Starts a game from the board's current fill state.
    pub fn new(board: Board) -> Self {
        let initial = board.configuration();
        Game {
            board,
            initial,
            log: Vec::new(),
        }
    }

    /// Starts a game on the standard layout (only position 0 empty).
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        Ok(Game::new(Board::standard(size)?))
    }

    pub fn from_configuration(size: usize, initial: &Configuration) -> Result<Self, BoardError> {
        Ok(Game::new(Board::from_configuration(size, initial)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn initial(&self) -> &Configuration {
        &self.initial
    }

    pub fn moves(&self) -> &[MoveNotation] {
        &self.log
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board)
    }

    pub fn is_over(&self) -> bool {
        is_game_over(&self.board)
    }

    pub fn score(&self) -> usize {
        score(&self.board)
    }

    /// Applies the jump from `start` to `end` and logs it.
    pub fn play(&mut self, start: Position, end: Position) -> Result<Move, BoardError> {
        let mv = apply_move(&mut self.board, start, end)?;
        self.log.push(record_applied(&mv, &self.board));
        Ok(mv)
    }

    /// Plays one move chosen by `source`. Returns `None` once no jump is left.
    pub fn step<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> Result<Option<Move>, GameError> {
        let legal = self.legal_moves();
        let Some(chosen) = source.choose(&legal) else {
            return Ok(None);
        };
        if !legal.contains(&chosen) {
            return Err(GameError::MoveNotOffered {
                start: chosen.start,
                end: chosen.end,
            });
        }
        Ok(Some(self.play(chosen.start, chosen.end)?))
    }

    /// Plays until no jump is left and returns the final score.
    pub fn run<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> Result<usize, GameError> {
        while self.step(source)?.is_some() {}
        Ok(self.score())
    }

    /// Snapshot of the game so far as a corpus record.
    pub fn record(&self) -> GameRecord {
        GameRecord::new(self.board.size(), self.initial.clone(), self.log.clone())
    }
}

/// Replays a record from its initial layout, checking every move is legal
/// and that each recorded configuration matches the board it produced.
pub fn replay(record: &GameRecord) -> Result<Game, GameError> {
    let mut game = Game::from_configuration(record.size, &record.initial)?;
    for (ply, notation) in record.moves.iter().enumerate() {
        game.play(notation.start, notation.end)?;
        let actual = game.board.configuration();
        if actual != notation.configuration {
            return Err(GameError::ReplayMismatch {
                ply,
                recorded: notation.configuration.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(game)
}
