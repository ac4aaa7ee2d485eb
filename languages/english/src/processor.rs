use vocab_core::dictionary::LexiconEntry;
use vocab_core::language::LanguageProcessor;
use vocab_types::{Provenance, WordRecord};

use crate::levels::level_labels;
use crate::parse::{attach_source_definitions, parse_exchange, parse_translation_blob, pos_summary};

/// English lexicon-row interpretation (ECDICT blobs)
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishProcessor;

impl EnglishProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn language_code(&self) -> &str {
        "en"
    }

    fn local_record(&self, headword: &str, entry: &LexiconEntry) -> WordRecord {
        let mut record = WordRecord::new(headword);
        record.phonetic = entry.phonetic.trim().to_string();

        record.translations = parse_translation_blob(&entry.translation);
        attach_source_definitions(&mut record.translations, &entry.definition);

        record.word_forms = parse_exchange(&entry.exchange);
        record.tags = entry.tags();
        record.levels = level_labels(&record.tags);
        record.collins_stars = entry.collins;
        record.oxford = entry.oxford;

        record.record_source(Provenance::Lexicon);
        record
    }

    fn pos_summary(&self, record: &WordRecord) -> String {
        pos_summary(&record.translations)
    }
}
