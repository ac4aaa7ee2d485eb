use async_trait::async_trait;
use vocab_core::source::ExampleSource;

use super::{SourceError, entry_url, get_json, recover};
use crate::examples::extract_examples;

/// Sentences collected per word
pub const EXAMPLE_LIMIT: usize = 2;

/// Learner's dictionary used as the example-sentence source. Requires a key.
pub struct MerriamWebster {
    client: reqwest::Client,
    api_url: String,
    key: String,
}

impl MerriamWebster {
    pub fn new(client: reqwest::Client, api_url: String, key: String) -> Self {
        Self {
            client,
            api_url,
            key,
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    async fn fetch(&self, word: &str) -> Result<Option<Vec<String>>, SourceError> {
        if !self.has_key() {
            return Err(SourceError::MissingKey);
        }

        let url = entry_url(&self.api_url, word)?;
        let request = self.client.get(url).query(&[("key", self.key.as_str())]);
        let payload = get_json(request).await?;

        let examples = extract_examples(&payload, EXAMPLE_LIMIT);
        Ok((!examples.is_empty()).then_some(examples))
    }
}

#[async_trait]
impl ExampleSource for MerriamWebster {
    async fn examples(&self, word: &str) -> Option<Vec<String>> {
        recover("merriam-webster", word, self.fetch(word).await)
    }
}
