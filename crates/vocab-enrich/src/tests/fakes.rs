use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::time::Instant;
use vocab_core::dictionary::LexiconEntry;
use vocab_core::source::{
    DictionaryData, DictionarySource, ExampleSource, RelatedWord, RelationKind, RelationSource,
};
use vocab_lang_english::{Ecdict, EnglishMorphology, EnglishProcessor};
use vocab_translator::{
    BatchTranslator, PacingPolicy, ProviderMetadata, TranslateError, Translation, Translator,
};

use crate::Enricher;

pub fn entry(word: &str, translation: &str) -> LexiconEntry {
    LexiconEntry {
        word: word.to_string(),
        translation: translation.to_string(),
        ..LexiconEntry::default()
    }
}

/// Relation service with canned rows per relation kind. Spelled-like
/// queries echo the word back only when it is listed as known.
#[derive(Default)]
pub struct FakeRelations {
    pub rows: HashMap<RelationKind, Vec<RelatedWord>>,
    pub known: Vec<String>,
    pub know_everything: bool,
    pub spelled_like_calls: AtomicUsize,
}

impl FakeRelations {
    pub fn with_rows(mut self, kind: RelationKind, rows: &[(&str, u64)]) -> Self {
        self.rows.insert(
            kind,
            rows.iter().map(|(w, s)| RelatedWord::new(*w, *s)).collect(),
        );
        self
    }

    pub fn knowing(mut self, words: &[&str]) -> Self {
        self.known = words.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn spelled_like_calls(&self) -> usize {
        self.spelled_like_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelationSource for FakeRelations {
    async fn related(&self, word: &str, kind: RelationKind, max: usize) -> Option<Vec<RelatedWord>> {
        if kind == RelationKind::SpelledLike {
            self.spelled_like_calls.fetch_add(1, Ordering::SeqCst);
            let known = self.know_everything || self.known.iter().any(|k| k == word);
            // an unknown spelling gets a near miss as its top hit
            let top = if known { word.to_string() } else { format!("{word}s") };
            return Some(vec![RelatedWord::new(top, 1000)]);
        }

        let mut rows = self.rows.get(&kind)?.clone();
        rows.truncate(max);
        Some(rows)
    }
}

pub struct FakeExamples(pub Option<Vec<String>>);

#[async_trait]
impl ExampleSource for FakeExamples {
    async fn examples(&self, _word: &str) -> Option<Vec<String>> {
        self.0.clone()
    }
}

pub struct FakeDictionary {
    pub data: Option<DictionaryData>,
    pub calls: AtomicUsize,
}

impl FakeDictionary {
    pub fn new(data: Option<DictionaryData>) -> Self {
        Self {
            data,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DictionarySource for FakeDictionary {
    fn name(&self) -> &str {
        "fake"
    }

    async fn lookup(&self, _word: &str) -> Option<DictionaryData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.data.clone()
    }
}

/// Prefixes every text with a provider tag and remembers what it saw and when
pub struct FakeTranslator {
    pub tag: &'static str,
    pub credentials: bool,
    pub seen: Mutex<Vec<(String, Instant)>>,
}

impl FakeTranslator {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            credentials: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            credentials: false,
            ..Self::new("none")
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn seen_at(&self) -> Vec<(String, Instant)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<Translation, TranslateError> {
        self.seen.lock().unwrap().push((text.to_string(), Instant::now()));
        Ok(Translation {
            text: format!("{}:{}", self.tag, text),
            from: from.to_string(),
            to: to.to_string(),
            provider: self.tag.to_string(),
            alternatives: vec![],
        })
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.tag.to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

pub fn batch(translator: Arc<FakeTranslator>) -> BatchTranslator {
    paced(translator, PacingPolicy::unpaced(0))
}

pub fn paced(translator: Arc<FakeTranslator>, pacing: PacingPolicy) -> BatchTranslator {
    BatchTranslator::new(translator, pacing, "en", "zh")
}

/// Enricher over the given lexicon rows, real English processing and
/// translators without credentials
pub fn enricher(entries: Vec<LexiconEntry>) -> Enricher {
    enricher_with_translators(
        entries,
        Arc::new(FakeTranslator::without_credentials()),
        Arc::new(FakeTranslator::without_credentials()),
    )
}

pub fn enricher_with_translators(
    entries: Vec<LexiconEntry>,
    phrases: Arc<FakeTranslator>,
    examples: Arc<FakeTranslator>,
) -> Enricher {
    enricher_with_batches(entries, batch(phrases), batch(examples))
}

pub fn enricher_with_batches(
    entries: Vec<LexiconEntry>,
    phrases: BatchTranslator,
    examples: BatchTranslator,
) -> Enricher {
    Enricher::new(
        Arc::new(Ecdict::from_entries(entries)),
        Arc::new(EnglishProcessor::new()),
        Arc::new(EnglishMorphology::new()),
        phrases,
        examples,
    )
}
