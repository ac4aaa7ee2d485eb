use async_trait::async_trait;
use vocab_types::Definition;

/// Online dictionary consulted when local data is missing.
///
/// Implementations never fail past their boundary: transport errors, non-2xx
/// statuses and malformed payloads all come back as `None`.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, word: &str) -> Option<DictionaryData>;
}

/// Ranked word-relation service (similar meaning, followers, spelling...)
#[async_trait]
pub trait RelationSource: Send + Sync {
    async fn related(&self, word: &str, kind: RelationKind, max: usize) -> Option<Vec<RelatedWord>>;
}

/// Source of cleaned, validated illustrative sentences
#[async_trait]
pub trait ExampleSource: Send + Sync {
    async fn examples(&self, word: &str) -> Option<Vec<String>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryData {
    pub phonetic: String,
    pub definitions: Vec<Definition>,
    pub examples: Vec<String>,
    /// Cross-references such as synonyms listed by the dictionary
    pub related: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    MeansLike,
    /// Words that commonly follow the query word
    Follows,
    /// Adjectives commonly used to modify the query noun
    ModifiedBy,
    SpelledLike,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::MeansLike => "means-like",
            RelationKind::Follows => "follows",
            RelationKind::ModifiedBy => "modified-by",
            RelationKind::SpelledLike => "spelled-like",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelatedWord {
    pub word: String,
    /// Relevance score as reported by the service, 0 when absent
    pub score: u64,
}

impl RelatedWord {
    pub fn new(word: impl Into<String>, score: u64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Stand-in for a collaborator that is not configured. Always reports no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl DictionarySource for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn lookup(&self, _word: &str) -> Option<DictionaryData> {
        None
    }
}

#[async_trait]
impl RelationSource for Unavailable {
    async fn related(&self, _word: &str, _kind: RelationKind, _max: usize) -> Option<Vec<RelatedWord>> {
        None
    }
}

#[async_trait]
impl ExampleSource for Unavailable {
    async fn examples(&self, _word: &str) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_reports_no_data() {
        assert!(DictionarySource::lookup(&Unavailable, "word").await.is_none());
        assert!(Unavailable.related("word", RelationKind::MeansLike, 5).await.is_none());
        assert!(Unavailable.examples("word").await.is_none());
    }
}
