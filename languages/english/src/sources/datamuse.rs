use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use vocab_core::source::{RelatedWord, RelationKind, RelationSource};

use super::{SourceError, get_json, recover};

/// Keyless word-relation service
pub struct Datamuse {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    word: String,
    #[serde(default)]
    score: u64,
}

/// Query parameter selecting the relation
pub fn relation_param(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::MeansLike => "ml",
        RelationKind::Follows => "rel_bga",
        RelationKind::ModifiedBy => "rel_jjb",
        RelationKind::SpelledLike => "sp",
    }
}

/// Rows in service order. Rows that do not parse are skipped.
pub fn parse_rows(payload: &Value) -> Option<Vec<RelatedWord>> {
    let rows = payload.as_array()?;
    Some(
        rows.iter()
            .filter_map(|row| Row::deserialize(row).ok())
            .filter(|row| !row.word.is_empty())
            .map(|row| RelatedWord::new(row.word, row.score))
            .collect(),
    )
}

impl Datamuse {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    async fn fetch(
        &self,
        word: &str,
        kind: RelationKind,
        max: usize,
    ) -> Result<Option<Vec<RelatedWord>>, SourceError> {
        let url = format!("{}/words", self.api_url.trim_end_matches('/'));
        let max = max.to_string();
        let request = self
            .client
            .get(url)
            .query(&[(relation_param(kind), word), ("max", max.as_str())]);

        let payload = get_json(request).await?;
        Ok(parse_rows(&payload))
    }
}

#[async_trait]
impl RelationSource for Datamuse {
    async fn related(&self, word: &str, kind: RelationKind, max: usize) -> Option<Vec<RelatedWord>> {
        let source = format!("datamuse:{}", kind.as_str());
        recover(&source, word, self.fetch(word, kind, max).await)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rows_keep_order_and_default_score() {
        let payload = json!([
            {"word": "fast", "score": 3000, "tags": ["adj"]},
            {"word": "rapid"},
            {"score": 10},
            {"word": "", "score": 5}
        ]);
        let rows = parse_rows(&payload).unwrap();
        assert_eq!(rows, vec![RelatedWord::new("fast", 3000), RelatedWord::new("rapid", 0)]);
    }

    #[test]
    fn non_array_is_no_data() {
        assert!(parse_rows(&json!({"error": "x"})).is_none());
        assert_eq!(parse_rows(&json!([])), Some(vec![]));
    }

    #[test]
    fn every_relation_has_a_param() {
        assert_eq!(relation_param(RelationKind::MeansLike), "ml");
        assert_eq!(relation_param(RelationKind::ModifiedBy), "rel_jjb");
        assert_eq!(relation_param(RelationKind::Follows), "rel_bga");
        assert_eq!(relation_param(RelationKind::SpelledLike), "sp");
    }
}
