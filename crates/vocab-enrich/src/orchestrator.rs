use std::sync::Arc;

use vocab_core::dictionary::Lexicon;
use vocab_core::error::EnrichError;
use vocab_core::language::{DerivationCandidate, LanguageProcessor, Morphology};
use vocab_core::preprocess::{DefaultPreprocessor, Preprocessor};
use vocab_core::source::{DictionaryData, DictionarySource, ExampleSource, RelationSource, Unavailable};
use vocab_translator::BatchTranslator;
use vocab_types::{DerivedForm, Example, LookupMode, Phrase, Provenance, WordRecord};

/// Morphology bound per path
const FAST_CANDIDATES: usize = 4;
const FULL_CANDIDATES: usize = 8;

/// Builds one `WordRecord` per query from the lexicon and the online
/// collaborators. Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct Enricher {
    lexicon: Arc<dyn Lexicon>,
    processor: Arc<dyn LanguageProcessor>,
    morphology: Arc<dyn Morphology>,
    primary: Arc<dyn DictionarySource>,
    fallback: Arc<dyn DictionarySource>,
    relations: Arc<dyn RelationSource>,
    examples: Arc<dyn ExampleSource>,
    phrase_translator: BatchTranslator,
    example_translator: BatchTranslator,
}

impl Enricher {
    /// Online sources start out unavailable; attach them with the `with_*` methods.
    pub fn new(
        lexicon: Arc<dyn Lexicon>,
        processor: Arc<dyn LanguageProcessor>,
        morphology: Arc<dyn Morphology>,
        phrase_translator: BatchTranslator,
        example_translator: BatchTranslator,
    ) -> Self {
        Self {
            lexicon,
            processor,
            morphology,
            primary: Arc::new(Unavailable),
            fallback: Arc::new(Unavailable),
            relations: Arc::new(Unavailable),
            examples: Arc::new(Unavailable),
            phrase_translator,
            example_translator,
        }
    }

    pub fn with_dictionaries(
        mut self,
        primary: Arc<dyn DictionarySource>,
        fallback: Arc<dyn DictionarySource>,
    ) -> Self {
        self.primary = primary;
        self.fallback = fallback;
        self
    }

    pub fn with_relations(mut self, relations: Arc<dyn RelationSource>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_examples(mut self, examples: Arc<dyn ExampleSource>) -> Self {
        self.examples = examples;
        self
    }

    /// Build the record for `query`.
    ///
    /// Only the first whitespace-delimited token is looked up. A lexicon miss
    /// is reported as `NotFound` carrying a sentinel record; every collaborator
    /// failure past that point only leaves fields empty.
    pub async fn enrich(&self, query: &str, mode: LookupMode) -> Result<WordRecord, EnrichError> {
        let headword = DefaultPreprocessor
            .headword(query)
            .ok_or_else(|| EnrichError::BadRequest("query holds no word".to_string()))?;

        tracing::debug!(
            "Enriching '{}' ({}, {})",
            headword,
            self.processor.language_code(),
            mode.as_str()
        );

        let Some(entry) = self.lexicon.lookup(&headword) else {
            tracing::debug!("'{}' is not in the lexicon", headword);
            let record = self.not_found(&headword, mode).await;
            return Err(EnrichError::NotFound(Box::new(record)));
        };

        let mut record = self.processor.local_record(&headword, &entry);

        match mode {
            LookupMode::Fast => self.fast_path(&mut record).await,
            LookupMode::Full => self.full_path(&mut record).await?,
        }

        record.ensure_translation();
        record.enforce_caps();
        tracing::debug!(
            "Assembled '{}' from {} sources",
            record.headword,
            record.provenance.len()
        );
        Ok(record)
    }

    /// Terminal record for a lexicon miss: sentinel translation plus derived
    /// skeletons, existence-checked on the full path only.
    async fn not_found(&self, headword: &str, mode: LookupMode) -> WordRecord {
        let mut record = WordRecord::not_found(headword);

        let derived = match mode {
            LookupMode::Fast => self.morphology.derive_candidates(headword, FAST_CANDIDATES),
            LookupMode::Full => self.verified_candidates(headword).await,
        };

        record.derived_forms = derived.into_iter().map(skeleton).collect();
        if !record.derived_forms.is_empty() {
            record.record_source(Provenance::Morphology);
        }
        record.enforce_caps();
        record
    }

    /// Local data plus untranslated examples and collocations
    async fn fast_path(&self, record: &mut WordRecord) {
        self.attach_examples(record).await;
        self.attach_collocations(record).await;
    }

    async fn full_path(&self, record: &mut WordRecord) -> Result<(), EnrichError> {
        let dictionary = if record.translations.is_empty() {
            self.dictionary_fallback(record).await
        } else {
            None
        };

        self.attach_examples(record).await;
        if record.examples.is_empty() {
            if let Some(data) = &dictionary {
                record.examples = data.examples.iter().map(|s| untranslated_example(s)).collect();
            }
        }

        self.attach_collocations(record).await;

        record.synonyms = dedup(crate::find_synonyms(self.relations.as_ref(), &record.headword).await);
        if !record.synonyms.is_empty() {
            record.record_source(Provenance::Synonyms);
        } else if let Some(data) = &dictionary {
            record.synonyms = dedup(data.related.clone());
        }

        let derived = self.verified_candidates(&record.headword).await;
        if !derived.is_empty() {
            record.record_source(Provenance::Morphology);
        }

        self.translate_phrases_and_examples(record).await?;

        if !derived.is_empty() {
            let words: Vec<String> = derived.iter().map(|c| c.word.clone()).collect();
            let glosses = self.phrase_translator.translate_batch(&words).await;
            if glosses.iter().any(|g| !g.is_empty()) {
                record.record_source(Provenance::PhraseTranslator);
            }
            record.derived_forms = derived
                .into_iter()
                .zip(glosses)
                .map(|(candidate, gloss)| DerivedForm {
                    native_definition: gloss,
                    ..skeleton(candidate)
                })
                .collect();
        }

        Ok(())
    }

    /// Primary dictionary first, fallback only when the primary has no data.
    /// Fills translations and a missing phonetic; the data is returned for
    /// later back-filling.
    async fn dictionary_fallback(&self, record: &mut WordRecord) -> Option<DictionaryData> {
        let (data, source) = match self.primary.lookup(&record.headword).await {
            Some(data) => (data, Provenance::PrimaryDictionary),
            None => (
                self.fallback.lookup(&record.headword).await?,
                Provenance::FallbackDictionary,
            ),
        };

        tracing::debug!(
            "'{}' has no local translations, using {:?}",
            record.headword,
            source
        );

        record.translations = data.definitions.clone();
        if record.phonetic.is_empty() {
            record.phonetic = data.phonetic.clone();
        }
        record.record_source(source);
        Some(data)
    }

    async fn attach_examples(&self, record: &mut WordRecord) {
        let sentences = self.examples.examples(&record.headword).await.unwrap_or_default();
        if !sentences.is_empty() {
            record.record_source(Provenance::Examples);
        }
        record.examples = sentences.iter().map(|s| untranslated_example(s)).collect();
    }

    async fn attach_collocations(&self, record: &mut WordRecord) {
        let pos = self.processor.pos_summary(record);
        let phrases = crate::find_collocations(self.relations.as_ref(), &record.headword, &pos).await;
        if !phrases.is_empty() {
            record.record_source(Provenance::Collocations);
        }
        record.phrases = phrases
            .into_iter()
            .map(|phrase| Phrase {
                phrase,
                native_translation: String::new(),
            })
            .collect();
    }

    async fn verified_candidates(&self, headword: &str) -> Vec<DerivationCandidate> {
        let candidates = self.morphology.derive_candidates(headword, FULL_CANDIDATES);
        crate::verify_candidates(self.relations.as_ref(), candidates).await
    }

    /// Phrases through the first translator and examples through the second,
    /// concurrently. Both batches finish before this returns.
    async fn translate_phrases_and_examples(&self, record: &mut WordRecord) -> Result<(), EnrichError> {
        let phrases: Vec<String> = record.phrases.iter().map(|p| p.phrase.clone()).collect();
        let sentences: Vec<String> = record.examples.iter().map(|e| e.sentence.clone()).collect();

        let phrase_translator = self.phrase_translator.clone();
        let example_translator = self.example_translator.clone();

        let phrase_task =
            tokio::spawn(async move { phrase_translator.translate_batch(&phrases).await });
        let example_task =
            tokio::spawn(async move { example_translator.translate_batch(&sentences).await });

        let (phrase_texts, example_texts) = tokio::try_join!(phrase_task, example_task)
            .map_err(|e| EnrichError::Internal(format!("translation task failed: {}", e)))?;

        if phrase_texts.iter().any(|t| !t.is_empty()) {
            record.record_source(Provenance::PhraseTranslator);
        }
        if example_texts.iter().any(|t| !t.is_empty()) {
            record.record_source(Provenance::ExampleTranslator);
        }

        for (phrase, text) in record.phrases.iter_mut().zip(phrase_texts) {
            phrase.native_translation = text;
        }
        for (example, text) in record.examples.iter_mut().zip(example_texts) {
            example.native_translation = text;
        }
        Ok(())
    }
}

fn skeleton(candidate: DerivationCandidate) -> DerivedForm {
    DerivedForm {
        word: candidate.word,
        part_of_speech: candidate.part_of_speech,
        native_definition: String::new(),
    }
}

fn untranslated_example(sentence: &str) -> Example {
    Example {
        sentence: sentence.to_string(),
        native_translation: String::new(),
    }
}

/// Drop repeats and empty entries, keeping first occurrences
fn dedup(words: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        if !word.is_empty() && !unique.contains(&word) {
            unique.push(word);
        }
    }
    unique
}
