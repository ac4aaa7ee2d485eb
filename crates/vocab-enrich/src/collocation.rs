//! Collocation discovery over a word-relation service.
//!
//! The strategy depends on the coarse part of speech of the headword:
//! adjective + noun and noun + word pairs for nouns, verb/adjective +
//! preposition pairs for intransitive verbs and adjectives, nothing else.

use vocab_core::source::{RelatedWord, RelationKind, RelationSource};
use vocab_types::{MAX_DISCOVERED_PHRASES, MAX_PHRASES};

/// Rows requested per relation query
const QUERY_MAX: usize = 20;

const MODIFIER_MIN_SCORE: u64 = 100;
const FOLLOWER_MIN_SCORE: u64 = 80;
/// Keeps noun + word pairs ranked below adjective + noun pairs of similar score
const FOLLOWER_DISCOUNT: f64 = 0.9;
const PREPOSITION_MIN_SCORE: u64 = 30;

const FOLLOWER_STOPLIST: &[&str] = &["a", "an", "the", "is", "are", "was", "were", "be"];

const PREPOSITIONS: &[&str] = &[
    "to", "of", "in", "on", "at", "for", "with", "from", "by", "about", "into", "through", "over",
    "after", "before", "under", "between", "among", "around", "without",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosClass {
    /// Verb markers with no noun or intransitive marker
    TransitiveOnly,
    Noun,
    IntransitiveOrAdjective,
    Other,
}

impl PosClass {
    /// Classify a part-of-speech string such as `"n. vt."` or `"vt. & vi."`.
    ///
    /// Markers are whole tokens. When several apply, the transitive-only
    /// check wins, then noun, then intransitive/adjective.
    pub fn classify(pos: &str) -> Self {
        let markers: Vec<&str> = pos
            .split(|c: char| c.is_whitespace() || matches!(c, '&' | '/' | ','))
            .filter(|t| !t.is_empty())
            .collect();
        let has = |wanted: &[&str]| markers.iter().any(|m| wanted.contains(m));

        let verb = has(&["v.", "vt."]);
        let noun = has(&["n."]);
        let intransitive = has(&["vi."]);
        let adjective = has(&["adj.", "a."]);

        if verb && !noun && !intransitive {
            PosClass::TransitiveOnly
        } else if noun {
            PosClass::Noun
        } else if intransitive || adjective {
            PosClass::IntransitiveOrAdjective
        } else {
            PosClass::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    phrase: String,
    score: f64,
}

/// Rank candidates: drop repeated phrases, stable sort by descending score
fn rank(candidates: Vec<Candidate>) -> Vec<String> {
    let mut unique: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.iter().any(|c| c.phrase == candidate.phrase) {
            unique.push(candidate);
        }
    }

    unique.sort_by(|a, b| b.score.total_cmp(&a.score));
    unique.truncate(MAX_DISCOVERED_PHRASES);

    unique
        .into_iter()
        .take(MAX_PHRASES)
        .map(|c| c.phrase)
        .collect()
}

fn noun_candidates(word: &str, modifiers: &[RelatedWord], followers: &[RelatedWord]) -> Vec<Candidate> {
    let adjective_noun = modifiers
        .iter()
        .filter(|r| r.score > MODIFIER_MIN_SCORE)
        .map(|r| Candidate {
            phrase: format!("{} {}", r.word, word),
            score: r.score as f64,
        });

    let noun_word = followers
        .iter()
        .filter(|r| !FOLLOWER_STOPLIST.contains(&r.word.as_str()))
        .filter(|r| r.score > FOLLOWER_MIN_SCORE)
        .map(|r| Candidate {
            phrase: format!("{} {}", word, r.word),
            score: r.score as f64 * FOLLOWER_DISCOUNT,
        });

    adjective_noun.chain(noun_word).collect()
}

fn preposition_candidates(word: &str, followers: &[RelatedWord]) -> Vec<Candidate> {
    followers
        .iter()
        .filter(|r| PREPOSITIONS.contains(&r.word.as_str()))
        .filter(|r| r.score > PREPOSITION_MIN_SCORE)
        .map(|r| Candidate {
            phrase: format!("{} {}", word, r.word),
            score: r.score as f64,
        })
        .collect()
}

/// Up to three ranked collocations of `word`. Relation queries run one after
/// the other; a query without data contributes nothing.
pub async fn find_collocations(relations: &dyn RelationSource, word: &str, pos: &str) -> Vec<String> {
    let class = PosClass::classify(pos);
    tracing::debug!("Collocations for '{}' with pos '{}' as {:?}", word, pos, class);

    let candidates = match class {
        PosClass::TransitiveOnly | PosClass::Other => return Vec::new(),
        PosClass::Noun => {
            let modifiers = relations
                .related(word, RelationKind::ModifiedBy, QUERY_MAX)
                .await
                .unwrap_or_default();
            let followers = relations
                .related(word, RelationKind::Follows, QUERY_MAX)
                .await
                .unwrap_or_default();
            noun_candidates(word, &modifiers, &followers)
        }
        PosClass::IntransitiveOrAdjective => {
            let followers = relations
                .related(word, RelationKind::Follows, QUERY_MAX)
                .await
                .unwrap_or_default();
            preposition_candidates(word, &followers)
        }
    };

    rank(candidates)
}
