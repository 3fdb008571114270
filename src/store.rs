//! Corpus persistence.
//!
//! The engine never builds paths or creates directories. A caller hands a
//! [`CorpusStore`] to a [`Recorder`], which loads the corpus once, merges
//! records in memory, and writes the result back once on commit. Because
//! merging goes through `&mut Recorder`, a single owner serializes every
//! writer; parallel games send their records to that owner instead of
//! touching the store themselves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::protocol::{merge_into_corpus, Corpus, GameRecord, RecordError};

/// Errors raised while loading or saving a corpus.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to parse corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A place a corpus can be loaded from and saved to.
pub trait CorpusStore {
    /// Returns the stored corpus, or an empty one if nothing is stored yet.
    fn load(&self) -> Result<Corpus, StoreError>;

    /// Replaces the stored corpus. Readers never observe a partial write.
    fn save(&self, corpus: &Corpus) -> Result<(), StoreError>;
}

impl<S: CorpusStore + ?Sized> CorpusStore for &S {
    fn load(&self) -> Result<Corpus, StoreError> {
        (**self).load()
    }

    fn save(&self, corpus: &Corpus) -> Result<(), StoreError> {
        (**self).save(corpus)
    }
}

/// Stores the corpus as a JSON file at a caller-supplied path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl CorpusStore for JsonFileStore {
    fn load(&self) -> Result<Corpus, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Corpus::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if data.trim().is_empty() {
            return Ok(Corpus::new());
        }
        Ok(Corpus::from_json(&data)?)
    }

    fn save(&self, corpus: &Corpus) -> Result<(), StoreError> {
        let json = corpus.to_json()?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        // Rename within one directory replaces the target atomically.
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps the corpus in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    corpus: Mutex<Corpus>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_corpus(corpus: Corpus) -> Self {
        MemoryStore {
            corpus: Mutex::new(corpus),
        }
    }

    /// Returns a copy of the stored corpus.
    pub fn snapshot(&self) -> Corpus {
        self.corpus.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CorpusStore for MemoryStore {
    fn load(&self) -> Result<Corpus, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, corpus: &Corpus) -> Result<(), StoreError> {
        *self.corpus.lock().unwrap_or_else(|e| e.into_inner()) = corpus.clone();
        Ok(())
    }
}

/// Scoped write handle over a store: load once, merge many, save once.
pub struct Recorder<S: CorpusStore> {
    store: S,
    corpus: Corpus,
    merged: usize,
}

impl<S: CorpusStore> Recorder<S> {
    /// Loads the current corpus from `store`.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let corpus = store.load()?;
        Ok(Recorder {
            store,
            corpus,
            merged: 0,
        })
    }

    /// Appends a game to the in-memory corpus. A record that fails
    /// validation is not merged.
    pub fn merge(&mut self, record: &GameRecord) -> Result<(), RecordError> {
        merge_into_corpus(&mut self.corpus, record)?;
        self.merged += 1;
        Ok(())
    }

    /// Number of games merged since the recorder was opened.
    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Writes the merged corpus back and returns the store.
    pub fn commit(self) -> Result<S, StoreError> {
        self.store.save(&self.corpus)?;
        Ok(self.store)
    }
}
