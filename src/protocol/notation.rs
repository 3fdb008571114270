//! Move notation.
//!
//! Each recorded move is written as `{start}>{end}-{configuration}`, where
//! the configuration is the full board after the move. A record is
//! therefore replayable and inspectable without re-deriving intermediate
//! positions.
//!
//! Example (side length 3): `3>0-TFTFTT`

use std::fmt;

use crate::board::{Board, Configuration, Move, Position};

use super::configuration::{parse_configuration_exact, RecordError};

/// One recorded move: its endpoints and the board it produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveNotation {
    pub start: Position,
    pub end: Position,
    pub configuration: Configuration,
}

impl fmt::Display for MoveNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}-{}", self.start, self.end, self.configuration)
    }
}

/// Records a move from its endpoints and the board after it was applied.
pub fn record_move(start: Position, end: Position, board_after: &Board) -> MoveNotation {
    MoveNotation {
        start,
        end,
        configuration: board_after.configuration(),
    }
}

/// Records an applied [`Move`] against the board it produced.
pub fn record_applied(mv: &Move, board_after: &Board) -> MoveNotation {
    record_move(mv.start, mv.end, board_after)
}

/// Formats a move log as notation strings.
pub fn format_moves(moves: &[MoveNotation]) -> Vec<String> {
    moves.iter().map(MoveNotation::to_string).collect()
}

/// Parses a single `{start}>{end}-{configuration}` string.
///
/// `position_count` is the number of holes on the board the move was
/// recorded on; both endpoints must be below it and the configuration
/// must have exactly that many cells.
pub fn parse_move_notation(s: &str, position_count: usize) -> Result<MoveNotation, RecordError> {
    let s = s.trim();
    let (start_str, rest) = s.split_once('>').ok_or_else(|| RecordError::MissingSeparator {
        notation: s.to_string(),
        separator: '>',
    })?;
    let (end_str, config_str) = rest.split_once('-').ok_or_else(|| RecordError::MissingSeparator {
        notation: s.to_string(),
        separator: '-',
    })?;

    let start = parse_position(start_str, position_count)?;
    let end = parse_position(end_str, position_count)?;
    let configuration = parse_configuration_exact(config_str, position_count)?;

    Ok(MoveNotation {
        start,
        end,
        configuration,
    })
}

/// Parses a list of notation strings, stopping at the first malformed one.
pub fn parse_moves<S: AsRef<str>>(
    moves: &[S],
    position_count: usize,
) -> Result<Vec<MoveNotation>, RecordError> {
    moves
        .iter()
        .map(|m| parse_move_notation(m.as_ref(), position_count))
        .collect()
}

fn parse_position(s: &str, count: usize) -> Result<Position, RecordError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::InvalidPosition(s.to_string()));
    }
    let position: Position = s
        .parse()
        .map_err(|_| RecordError::InvalidPosition(s.to_string()))?;
    if position >= count {
        return Err(RecordError::PositionOutOfRange { position, count });
    }
    Ok(position)
}
