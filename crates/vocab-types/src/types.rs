use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Native text shown when neither the lexicon nor any dictionary knows the word
pub const NO_DEFINITION: &str = "no definition found";

pub const MAX_DISCOVERED_PHRASES: usize = 6;
pub const MAX_PHRASES: usize = 3;
pub const MAX_EXAMPLES: usize = 3;
pub const MAX_SYNONYMS: usize = 8;
pub const MAX_DERIVED_FORMS: usize = 4;

/// One enriched lookup result, built fresh per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordRecord {
    pub headword: String,
    pub phonetic: String,
    pub translations: Vec<Definition>,
    pub phrases: Vec<Phrase>,
    pub examples: Vec<Example>,
    pub synonyms: Vec<String>,
    pub derived_forms: Vec<DerivedForm>,
    /// Grammatical role code (`p`, `d`, `3`, `s`...) to surface form
    pub word_forms: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub levels: Vec<String>,
    pub collins_stars: u8,
    pub oxford: bool,
    pub provenance: Vec<Provenance>,
}

impl WordRecord {
    pub fn new(headword: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            ..Self::default()
        }
    }

    /// Skeleton returned when the headword is unknown.
    pub fn not_found(headword: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            translations: vec![Definition::sentinel()],
            ..Self::default()
        }
    }

    /// Replaces an empty translation list with the sentinel row.
    pub fn ensure_translation(&mut self) {
        if self.translations.is_empty() {
            self.translations.push(Definition::sentinel());
        }
    }

    pub fn has_definition(&self) -> bool {
        self.translations.iter().any(|t| !t.is_sentinel())
    }

    pub fn record_source(&mut self, source: Provenance) {
        if !self.provenance.contains(&source) {
            self.provenance.push(source);
        }
    }

    /// Truncates every bounded list to its cap.
    pub fn enforce_caps(&mut self) {
        self.phrases.truncate(MAX_PHRASES);
        self.examples.truncate(MAX_EXAMPLES);
        self.synonyms.truncate(MAX_SYNONYMS);
        self.derived_forms.truncate(MAX_DERIVED_FORMS);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Definition {
    pub part_of_speech: String,
    pub native_definition: String,
    pub source_definition: String,
}

impl Definition {
    pub fn new(part_of_speech: impl Into<String>, native_definition: impl Into<String>) -> Self {
        Self {
            part_of_speech: part_of_speech.into(),
            native_definition: native_definition.into(),
            source_definition: String::new(),
        }
    }

    pub fn sentinel() -> Self {
        Self::new("", NO_DEFINITION)
    }

    pub fn is_sentinel(&self) -> bool {
        self.part_of_speech.is_empty() && self.native_definition == NO_DEFINITION
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phrase {
    pub phrase: String,
    pub native_translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Example {
    pub sentence: String,
    pub native_translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DerivedForm {
    pub word: String,
    pub part_of_speech: String,
    pub native_definition: String,
}

/// Which collaborator contributed to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Lexicon,
    PrimaryDictionary,
    FallbackDictionary,
    Collocations,
    Examples,
    Synonyms,
    Morphology,
    PhraseTranslator,
    ExampleTranslator,
}

/// Which orchestrator path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    Fast,
    Full,
}

impl LookupMode {
    pub fn from_fast_flag(fast_path_only: bool) -> Self {
        if fast_path_only { Self::Fast } else { Self::Full }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupMode::Fast => "fast",
            LookupMode::Full => "full",
        }
    }
}
