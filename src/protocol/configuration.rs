//! Configuration strings.
//!
//! A configuration is written as one character per position, in position
//! order: `T` for a hole holding a peg, `F` for an empty hole. The string
//! length always equals the board's position count.
//!
//! Example (side length 3, apex empty): `FTTTTT`

use std::fmt::{self, Write};

use thiserror::Error;

use crate::board::{Board, Configuration, Position};

/// Errors raised while parsing or validating recorded games.
///
/// Every variant marks a malformed record; callers loading a corpus can
/// report and skip the offending game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid configuration character '{0}', expected 'T' or 'F'")]
    InvalidCell(char),

    #[error("configuration has {found} cells, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("missing '{separator}' in move notation '{notation}'")]
    MissingSeparator { notation: String, separator: char },

    #[error("invalid position '{0}' in move notation")]
    InvalidPosition(String),

    #[error("position {position} out of range for {count} positions")]
    PositionOutOfRange { position: Position, count: usize },

    #[error("invalid corpus key '{0}', expected '<size>-<configuration>'")]
    InvalidKey(String),

    #[error("recorded score {recorded} does not match {actual} remaining pegs")]
    ScoreMismatch { recorded: usize, actual: usize },

    #[error("malformed game entry: {0}")]
    MalformedEntry(String),
}

const FILLED: char = 'T';
const EMPTY: char = 'F';

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in self.cells() {
            f.write_char(if cell { FILLED } else { EMPTY })?;
        }
        Ok(())
    }
}

/// Parses a `T`/`F` configuration string of any length.
pub fn parse_configuration(s: &str) -> Result<Configuration, RecordError> {
    let cells = s
        .chars()
        .map(|c| match c {
            FILLED => Ok(true),
            EMPTY => Ok(false),
            other => Err(RecordError::InvalidCell(other)),
        })
        .collect::<Result<Vec<bool>, RecordError>>()?;
    Ok(Configuration::new(cells))
}

/// Parses a configuration string and checks it has `expected` cells.
pub fn parse_configuration_exact(s: &str, expected: usize) -> Result<Configuration, RecordError> {
    let config = parse_configuration(s)?;
    if config.len() != expected {
        return Err(RecordError::LengthMismatch {
            expected,
            found: config.len(),
        });
    }
    Ok(config)
}

/// Encodes the board's fill state as a `T`/`F` string in position order.
pub fn serialize_configuration(board: &Board) -> String {
    board.configuration().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_serializes_with_leading_f() {
        let board = Board::standard(3).unwrap();
        assert_eq!(serialize_configuration(&board), "FTTTTT");
        let board = Board::standard(5).unwrap();
        let s = serialize_configuration(&board);
        assert_eq!(s.len(), 15);
        assert!(s.starts_with('F'));
        assert_eq!(s.matches('T').count(), 14);
    }

    #[test]
    fn parse_then_display_is_identity() {
        for s in ["", "T", "FTTTTT", "TFTFTFTFTF"] {
            assert_eq!(parse_configuration(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(parse_configuration("TTX"), Err(RecordError::InvalidCell('X')));
        assert_eq!(parse_configuration("tf"), Err(RecordError::InvalidCell('t')));
    }

    #[test]
    fn exact_parse_checks_length() {
        assert!(parse_configuration_exact("FTTTTT", 6).is_ok());
        assert_eq!(
            parse_configuration_exact("FTTTT", 6),
            Err(RecordError::LengthMismatch {
                expected: 6,
                found: 5
            })
        );
    }
}
