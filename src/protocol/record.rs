//! Game records and the corpus they accumulate into.
//!
//! The corpus is a JSON object keyed by `"{size}-{initial configuration}"`.
//! Each key holds every game played from that starting layout:
//!
//! ```text
//! { "5-FTTTTTTTTTTTTTT": { "games": [ { "score": 3, "moves": ["3>0-...", ...] } ] } }
//! ```
//!
//! Merging is append-only. Existing games are never rewritten or removed,
//! and identical games are kept as separate entries. Stored games are kept
//! as raw JSON values and only decoded on read, so one game of the wrong
//! shape is reported on its own instead of failing the whole corpus.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::{is_valid_size, position_count, Configuration};

use super::configuration::{parse_configuration_exact, RecordError};
use super::notation::{format_moves, parse_moves, MoveNotation};

/// A finished (or abandoned) game in structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Side length of the triangle.
    pub size: usize,
    /// Board before the first move.
    pub initial: Configuration,
    /// Moves in play order, each with the board it produced.
    pub moves: Vec<MoveNotation>,
    /// Pegs left after the last move.
    pub score: usize,
}

impl GameRecord {
    /// Builds a record, deriving the score from the final configuration.
    ///
    /// Nothing is checked here; [`merge_into_corpus`] validates before
    /// storing.
    pub fn new(size: usize, initial: Configuration, moves: Vec<MoveNotation>) -> Self {
        let score = moves
            .last()
            .map(|m| m.configuration.filled_count())
            .unwrap_or_else(|| initial.filled_count());
        GameRecord {
            size,
            initial,
            moves,
            score,
        }
    }

    /// Corpus key for this record's size and starting layout.
    pub fn key(&self) -> String {
        corpus_key(self.size, &self.initial)
    }

    /// Configuration after the last move (the initial one if no moves).
    pub fn final_configuration(&self) -> &Configuration {
        self.moves
            .last()
            .map(|m| &m.configuration)
            .unwrap_or(&self.initial)
    }

    /// Checks that the record would decode again once stored: a supported
    /// size, every configuration sized for the board, and a score matching
    /// the final configuration.
    pub fn validate(&self) -> Result<(), RecordError> {
        if !is_valid_size(self.size) {
            return Err(RecordError::InvalidKey(self.key()));
        }
        let expected = position_count(self.size);
        let configs =
            std::iter::once(&self.initial).chain(self.moves.iter().map(|m| &m.configuration));
        for config in configs {
            if config.len() != expected {
                return Err(RecordError::LengthMismatch {
                    expected,
                    found: config.len(),
                });
            }
        }
        for m in &self.moves {
            for position in [m.start, m.end] {
                if position >= expected {
                    return Err(RecordError::PositionOutOfRange {
                        position,
                        count: expected,
                    });
                }
            }
        }
        let actual = self.final_configuration().filled_count();
        if self.score != actual {
            return Err(RecordError::ScoreMismatch {
                recorded: self.score,
                actual,
            });
        }
        Ok(())
    }

    /// Converts to the stored form, dropping size and layout into the key.
    pub fn to_entry(&self) -> GameEntry {
        GameEntry {
            score: self.score,
            moves: format_moves(&self.moves),
        }
    }

    /// Rebuilds a record from a corpus key and one of its stored games.
    ///
    /// Checks the key shape, every move's notation and configuration
    /// length, and that the stored score matches the final configuration.
    pub fn from_entry(key: &str, entry: &GameEntry) -> Result<GameRecord, RecordError> {
        let (size, initial) = parse_corpus_key(key)?;
        let moves = parse_moves(&entry.moves, position_count(size))?;
        let record = GameRecord::new(size, initial, moves);
        if record.score != entry.score {
            return Err(RecordError::ScoreMismatch {
                recorded: entry.score,
                actual: record.score,
            });
        }
        Ok(record)
    }

    /// Like [`GameRecord::from_entry`], starting from the raw stored JSON.
    pub fn from_stored(key: &str, stored: &Value) -> Result<GameRecord, RecordError> {
        GameRecord::from_entry(key, &GameEntry::from_value(stored)?)
    }
}

/// Formats a corpus key.
pub fn corpus_key(size: usize, initial: &Configuration) -> String {
    format!("{}-{}", size, initial)
}

/// Splits a corpus key into board size and initial configuration.
pub fn parse_corpus_key(key: &str) -> Result<(usize, Configuration), RecordError> {
    let invalid = || RecordError::InvalidKey(key.to_string());
    let (size_str, config_str) = key.split_once('-').ok_or_else(invalid)?;
    if size_str.is_empty() || !size_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let size: usize = size_str.parse().map_err(|_| invalid())?;
    if !is_valid_size(size) {
        return Err(invalid());
    }
    let initial = parse_configuration_exact(config_str, position_count(size))?;
    Ok((size, initial))
}

/// One stored game, decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub score: usize,
    pub moves: Vec<String>,
}

impl GameEntry {
    /// Decodes a stored game, reporting a wrong shape as `MalformedEntry`.
    pub fn from_value(value: &Value) -> Result<GameEntry, RecordError> {
        GameEntry::deserialize(value).map_err(|e| RecordError::MalformedEntry(e.to_string()))
    }

    /// The stored JSON form.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "score": self.score, "moves": self.moves })
    }
}

/// All stored games for one corpus key, as raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub games: Vec<Value>,
}

/// The accumulated collection of recorded games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: BTreeMap<String, CorpusEntry>,
}

/// Per-key statistics over stored scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySummary {
    pub key: String,
    /// Stored games, including ones that do not decode.
    pub games: usize,
    pub best_score: Option<usize>,
    /// Score -> number of games that finished with it. Games whose entry
    /// does not decode are left out.
    pub histogram: BTreeMap<usize, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total stored games across all keys.
    pub fn game_count(&self) -> usize {
        self.entries.values().map(|e| e.games.len()).sum()
    }

    pub fn get(&self, key: &str) -> Option<&CorpusEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Decodes every stored game. Malformed games yield an `Err` in place
    /// so the caller can skip or report them individually.
    pub fn records(&self) -> impl Iterator<Item = (&str, Result<GameRecord, RecordError>)> + '_ {
        self.entries.iter().flat_map(|(key, entry)| {
            entry
                .games
                .iter()
                .map(move |game| (key.as_str(), GameRecord::from_stored(key, game)))
        })
    }

    /// Score statistics for every key, in key order.
    pub fn summary(&self) -> Vec<KeySummary> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                let scores: Vec<usize> = entry
                    .games
                    .iter()
                    .filter_map(|g| GameEntry::from_value(g).ok())
                    .map(|g| g.score)
                    .collect();
                let mut histogram = BTreeMap::new();
                for &score in &scores {
                    *histogram.entry(score).or_insert(0) += 1;
                }
                KeySummary {
                    key: key.clone(),
                    games: entry.games.len(),
                    best_score: scores.iter().copied().min(),
                    histogram,
                }
            })
            .collect()
    }

    /// Parses a corpus from its JSON form.
    pub fn from_json(json: &str) -> Result<Corpus, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the corpus as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Appends a game to the corpus under its key, creating the key if absent.
///
/// Rejects a record that would not decode again, leaving the corpus
/// unchanged. Games already stored, malformed or not, are never touched.
pub fn merge_into_corpus(corpus: &mut Corpus, record: &GameRecord) -> Result<(), RecordError> {
    record.validate()?;
    corpus
        .entries
        .entry(record.key())
        .or_default()
        .games
        .push(record.to_entry().to_value());
    Ok(())
}
