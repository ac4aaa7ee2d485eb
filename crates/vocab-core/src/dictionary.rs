use serde::{Deserialize, Serialize};

/// Read-only headword store consulted before any network call
pub trait Lexicon: Send + Sync {
    /// Case-insensitive exact match on the stored headword
    fn lookup(&self, word: &str) -> Option<LexiconEntry>;

    /// Get lexicon metadata
    fn metadata(&self) -> LexiconMetadata;
}

/// Raw lexicon row. The blobs are parsed lazily by the language crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub phonetic: String,
    /// English definitions, one `<pos>. <text>` per line
    pub definition: String,
    /// Native translations, one `<pos>. <text>` per line
    pub translation: String,
    pub pos: String,
    pub collins: u8,
    pub oxford: bool,
    /// Space separated exam tags (`gk cet4 ...`)
    pub tag: String,
    /// `code:form/code:form/...`
    pub exchange: String,
}

impl LexiconEntry {
    pub fn tags(&self) -> Vec<String> {
        self.tag.split_whitespace().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone)]
pub struct LexiconMetadata {
    pub name: String,
    pub language: String,
    pub entry_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
