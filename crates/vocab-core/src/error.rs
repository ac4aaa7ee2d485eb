use vocab_types::WordRecord;

/// Outcomes of an enrichment request that the caller gets to see.
///
/// Adapter and translator failures never show up here; they are recovered
/// inside the pipeline as empty fields.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The lexicon has no entry. Carries the headword, the sentinel
    /// translation and derived-word skeletons.
    #[error("Word not found: {}", .0.headword)]
    NotFound(Box<WordRecord>),

    #[error("Internal failure: {0}")]
    Internal(String),
}

impl EnrichError {
    pub fn not_found_record(&self) -> Option<&WordRecord> {
        match self {
            EnrichError::NotFound(record) => Some(record),
            _ => None,
        }
    }
}
