use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use vocab_core::dictionary::{Lexicon, LexiconEntry, LexiconMetadata, LoadError};

// Row layout of the ECDICT export. Numeric columns arrive as numbers,
// numeric strings or empty strings depending on how the CSV was converted.
#[derive(Debug, Deserialize)]
struct EcdictRow {
    word: String,
    #[serde(default, deserialize_with = "lenient_string")]
    phonetic: String,
    #[serde(default, deserialize_with = "lenient_string")]
    definition: String,
    #[serde(default, deserialize_with = "lenient_string")]
    translation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pos: String,
    #[serde(default, deserialize_with = "lenient_number")]
    collins: u64,
    #[serde(default, deserialize_with = "lenient_number")]
    oxford: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    tag: String,
    #[serde(default, deserialize_with = "lenient_string")]
    exchange: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Bool(b)) => b as u64,
        _ => 0,
    })
}

/// CSV exports escape line breaks inside blobs as a literal backslash-n
fn unescape_lines(blob: String) -> String {
    if blob.contains("\\n") {
        blob.replace("\\r", "").replace("\\n", "\n")
    } else {
        blob
    }
}

impl From<EcdictRow> for LexiconEntry {
    fn from(row: EcdictRow) -> Self {
        LexiconEntry {
            word: row.word.trim().to_string(),
            phonetic: row.phonetic,
            definition: unescape_lines(row.definition),
            translation: unescape_lines(row.translation),
            pos: row.pos,
            collins: row.collins.min(5) as u8,
            oxford: row.oxford > 0,
            tag: row.tag,
            exchange: row.exchange,
        }
    }
}

/// In-memory ECDICT lexicon indexed by lowercased headword
#[derive(Default)]
pub struct Ecdict {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
}

impl Ecdict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut dict = Self::new();
        for entry in entries {
            dict.insert(entry);
        }
        dict
    }

    /// Load from a JSON array of ECDICT rows
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let rows: Vec<EcdictRow> = serde_json::from_str(json_str)
            .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

        Ok(Self::from_entries(
            rows.into_iter()
                .map(LexiconEntry::from)
                .filter(|e| !e.word.is_empty()),
        ))
    }

    /// Insert or replace the entry for its headword
    pub fn insert(&mut self, entry: LexiconEntry) {
        let key = entry.word.to_lowercase();
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Merge another lexicon into this one. Its rows win on equal headwords.
    pub fn merge(mut self, other: Ecdict) -> Self {
        for entry in other.entries {
            self.insert(entry);
        }
        self
    }
}

impl Lexicon for Ecdict {
    fn lookup(&self, word: &str) -> Option<LexiconEntry> {
        self.index
            .get(&word.trim().to_lowercase())
            .and_then(|&idx| self.entries.get(idx))
            .cloned()
    }

    fn metadata(&self) -> LexiconMetadata {
        LexiconMetadata {
            name: "ECDICT".to_string(),
            language: "en".to_string(),
            entry_count: self.entries.len(),
        }
    }
}
