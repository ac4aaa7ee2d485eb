use vocab_types::WordRecord;

use crate::dictionary::LexiconEntry;

/// Network-free generator of related word forms
pub trait Morphology: Send + Sync {
    /// Candidate sibling forms of `word`, at most `limit`, in rule order
    fn derive_candidates(&self, word: &str, limit: usize) -> Vec<DerivationCandidate>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationCandidate {
    pub word: String,
    pub part_of_speech: String,
    /// Rule that produced the candidate, e.g. `-ize -> -ization`
    pub rule: String,
}

/// Language-specific handling of lexicon rows
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code)
    fn language_code(&self) -> &str;

    /// Local part of a record: translations, source definitions, word
    /// forms, tags and badges. Never touches the network.
    fn local_record(&self, headword: &str, entry: &LexiconEntry) -> WordRecord;

    /// Part-of-speech string of a record, used to pick a collocation strategy
    fn pos_summary(&self, record: &WordRecord) -> String;
}
