//! Adapters for the third-party lookup services.
//!
//! Each adapter does its work in a fallible `fetch` and converts every
//! failure into "no data" at the trait boundary, logging the cause.

pub mod datamuse;
pub mod free_dictionary;
pub mod merriam_webster;
pub mod youdao_dict;

pub use datamuse::Datamuse;
pub use free_dictionary::FreeDictionary;
pub use merriam_webster::MerriamWebster;
pub use youdao_dict::YoudaoDictionary;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Service error code {0}")]
    Service(String),

    #[error("Missing API key")]
    MissingKey,

    #[error("Invalid base URL: {0}")]
    BadUrl(String),
}

/// Append `word` to the base URL as a single escaped path segment
pub(crate) fn entry_url(base: &str, word: &str) -> Result<reqwest::Url, SourceError> {
    let mut url = reqwest::Url::parse(base).map_err(|e| SourceError::BadUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::BadUrl(base.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}

/// Fold a fetch outcome into the adapter contract
pub(crate) fn recover<T>(source: &str, word: &str, result: Result<Option<T>, SourceError>) -> Option<T> {
    match result {
        Ok(data) => {
            if data.is_none() {
                tracing::debug!("{} has no data for '{}'", source, word);
            }
            data
        }
        Err(SourceError::MissingKey) => {
            tracing::debug!("{} is not configured, skipping '{}'", source, word);
            None
        }
        Err(e) => {
            tracing::warn!("{} lookup for '{}' failed: {}", source, word, e);
            None
        }
    }
}

/// Send the request and decode the body as JSON; non-2xx is an error
pub(crate) async fn get_json(
    request: reqwest::RequestBuilder,
) -> Result<serde_json::Value, SourceError> {
    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(SourceError::Status(response.status()));
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

    #[test]
    fn word_is_one_escaped_segment() {
        let url = entry_url(BASE, "c#").unwrap();
        assert_eq!(url.path(), "/api/v2/entries/en/c%23");
        assert!(url.fragment().is_none());

        let url = entry_url(BASE, "what?").unwrap();
        assert_eq!(url.path(), "/api/v2/entries/en/what%3F");
        assert!(url.query().is_none());

        let url = entry_url(BASE, "and/or").unwrap();
        assert_eq!(url.path(), "/api/v2/entries/en/and%2For");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let url = entry_url(&format!("{}/", BASE), "quick").unwrap();
        assert_eq!(url.as_str(), "https://api.dictionaryapi.dev/api/v2/entries/en/quick");
    }

    #[test]
    fn bad_base_url_is_a_source_error() {
        assert!(matches!(entry_url("not a url", "quick"), Err(SourceError::BadUrl(_))));
        assert!(matches!(entry_url("mailto:someone", "quick"), Err(SourceError::BadUrl(_))));
    }
}
