//! Text formats for recorded games.
//!
//! Covers the `T`/`F` configuration string, the `start>end-configuration`
//! move notation, and the JSON corpus that accumulates game records keyed
//! by board size and starting layout.

pub mod configuration;
pub mod notation;
pub mod record;

pub use configuration::{
    parse_configuration, parse_configuration_exact, serialize_configuration, RecordError,
};
pub use notation::{
    format_moves, parse_move_notation, parse_moves, record_applied, record_move, MoveNotation,
};
pub use record::{
    corpus_key, merge_into_corpus, parse_corpus_key, Corpus, CorpusEntry, GameEntry, GameRecord,
    KeySummary,
};
