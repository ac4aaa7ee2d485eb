use vocab_core::language::DerivationCandidate;
use vocab_core::source::{RelationKind, RelationSource};
use vocab_types::{MAX_DERIVED_FORMS, MAX_SYNONYMS};

/// Similar-meaning words in the service's ranked order, unmodified
pub async fn find_synonyms(relations: &dyn RelationSource, word: &str) -> Vec<String> {
    relations
        .related(word, RelationKind::MeansLike, MAX_SYNONYMS)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.word)
        .take(MAX_SYNONYMS)
        .collect()
}

/// A candidate exists when the spelled-like top hit is exactly the candidate
async fn exists(relations: &dyn RelationSource, word: &str) -> bool {
    relations
        .related(word, RelationKind::SpelledLike, 1)
        .await
        .and_then(|hits| hits.into_iter().next())
        .is_some_and(|top| top.word == word)
}

/// Check candidates one at a time, stopping at four verified words.
/// A candidate whose check fails for any reason is left out.
pub async fn verify_candidates(
    relations: &dyn RelationSource,
    candidates: Vec<DerivationCandidate>,
) -> Vec<DerivationCandidate> {
    let mut verified = Vec::new();

    for candidate in candidates {
        if verified.len() >= MAX_DERIVED_FORMS {
            break;
        }
        if exists(relations, &candidate.word).await {
            tracing::debug!("Verified derived form '{}' ({})", candidate.word, candidate.rule);
            verified.push(candidate);
        }
    }

    verified
}
