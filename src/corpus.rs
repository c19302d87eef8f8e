//! Name corpus: the ordered list of display names players are drawn from.

use serde::Deserialize;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

/// Keys drawn when creating a player. Key 0 is never used.
pub const NAME_KEY_RANGE: Range<usize> = 1..769;

/// A corpus must cover every key in [`NAME_KEY_RANGE`].
pub const MIN_CORPUS_LEN: usize = NAME_KEY_RANGE.end;

/// Env var naming a CSV file (header `surname`) that replaces the built-in corpus.
pub const NAMES_ENV: &str = "BRACKET_NAMES";

const BUILTIN_SURNAMES: &str = include_str!("../data/surnames.csv");

#[derive(Debug)]
pub enum CorpusError {
    Csv(csv::Error),
    /// The corpus does not cover every drawable key.
    TooSmall { len: usize },
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::Csv(e) => write!(f, "Cannot read name corpus: {}", e),
            CorpusError::TooSmall { len } => write!(
                f,
                "Name corpus has {} names, need at least {}",
                len, MIN_CORPUS_LEN
            ),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Csv(e) => Some(e),
            CorpusError::TooSmall { .. } => None,
        }
    }
}

impl From<csv::Error> for CorpusError {
    fn from(e: csv::Error) -> Self {
        CorpusError::Csv(e)
    }
}

#[derive(Deserialize)]
struct NameRecord {
    surname: String,
}

#[derive(Clone, Debug)]
pub struct NameCorpus {
    names: Vec<String>,
}

impl NameCorpus {
    /// The corpus compiled into the crate.
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_reader(BUILTIN_SURNAMES.as_bytes())
    }

    /// Read a CSV corpus with a `surname` header. Row order defines the keys.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CorpusError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let names = rdr
            .deserialize::<NameRecord>()
            .map(|record| record.map(|r| r.surname.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_names(names)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// Load from `BRACKET_NAMES` when set, the built-in corpus otherwise.
    pub fn from_env() -> Result<Self, CorpusError> {
        match std::env::var(NAMES_ENV) {
            Ok(path) => {
                log::info!("Loading name corpus from {}", path);
                Self::from_path(path)
            }
            Err(_) => Self::builtin(),
        }
    }

    pub fn from_names(names: Vec<String>) -> Result<Self, CorpusError> {
        if names.len() < MIN_CORPUS_LEN {
            return Err(CorpusError::TooSmall { len: names.len() });
        }
        Ok(Self { names })
    }

    /// Name stored at `key`, if any.
    pub fn get(&self, key: usize) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
