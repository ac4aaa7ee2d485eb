use async_trait::async_trait;
use serde_json::Value;
use vocab_core::source::{DictionaryData, DictionarySource};
use vocab_types::Definition;

use super::{SourceError, entry_url, get_json, recover};

const MAX_DEFINITIONS: usize = 6;
const MAX_EXAMPLES: usize = 3;
const SYNONYMS_PER_DEFINITION: usize = 5;
const MAX_SYNONYMS: usize = 6;

/// Keyless English dictionary used as the fallback source.
///
/// Its definitions are English, so they land in the native slot of the
/// record while the usage example goes to the source slot.
pub struct FreeDictionary {
    client: reqwest::Client,
    api_url: String,
}

impl FreeDictionary {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    async fn fetch(&self, word: &str) -> Result<Option<DictionaryData>, SourceError> {
        let url = entry_url(&self.api_url, word)?;
        let payload = match get_json(self.client.get(url)).await {
            Ok(payload) => payload,
            // unknown words come back as 404
            Err(SourceError::Status(status)) if status == reqwest::StatusCode::NOT_FOUND => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        Ok(parse_payload(&payload))
    }
}

fn phonetic_of(entry: &Value) -> String {
    let direct = entry["phonetic"].as_str().filter(|p| !p.is_empty());
    let first = entry["phonetics"][0]["text"].as_str().filter(|p| !p.is_empty());
    let any = || {
        entry["phonetics"]
            .as_array()?
            .iter()
            .filter_map(|p| p["text"].as_str())
            .find(|p| !p.is_empty())
    };

    direct.or(first).or_else(any).unwrap_or_default().to_string()
}

/// Only the first entry of the response is used
pub fn parse_payload(payload: &Value) -> Option<DictionaryData> {
    let entry = payload.as_array()?.first()?;

    let mut definitions = Vec::new();
    let mut examples = Vec::new();
    let mut related: Vec<String> = Vec::new();

    for meaning in entry["meanings"].as_array().into_iter().flatten() {
        let pos = meaning["partOfSpeech"].as_str().unwrap_or_default();

        for def in meaning["definitions"].as_array().into_iter().flatten() {
            let text = def["definition"].as_str().unwrap_or_default();
            let example = def["example"].as_str().unwrap_or_default();

            let mut definition = Definition::new(pos, text);
            definition.source_definition = example.to_string();
            definitions.push(definition);

            if !example.is_empty() {
                examples.push(example.to_string());
            }

            let synonyms = def["synonyms"].as_array().into_iter().flatten();
            for synonym in synonyms.filter_map(Value::as_str).take(SYNONYMS_PER_DEFINITION) {
                if !related.iter().any(|s| s == synonym) {
                    related.push(synonym.to_string());
                }
            }
        }
    }

    definitions.retain(|d| !d.native_definition.is_empty());
    if definitions.is_empty() {
        return None;
    }

    definitions.truncate(MAX_DEFINITIONS);
    examples.truncate(MAX_EXAMPLES);
    related.truncate(MAX_SYNONYMS);

    Some(DictionaryData {
        phonetic: phonetic_of(entry),
        definitions,
        examples,
        related,
    })
}

#[async_trait]
impl DictionarySource for FreeDictionary {
    fn name(&self) -> &str {
        "free-dictionary"
    }

    async fn lookup(&self, word: &str) -> Option<DictionaryData> {
        recover(self.name(), word, self.fetch(word).await)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn maps_meanings() {
        let payload = json!([{
            "word": "quick",
            "phonetics": [{"audio": "x.mp3"}, {"text": "/kwɪk/"}],
            "meanings": [
                {"partOfSpeech": "adjective", "definitions": [
                    {"definition": "Moving fast.", "example": "a quick walk", "synonyms": ["fast", "rapid"]},
                    {"definition": "Alive.", "synonyms": ["fast", "living"]}
                ]},
                {"partOfSpeech": "noun", "definitions": [
                    {"definition": "Raw flesh.", "example": "bitten to the quick"}
                ]}
            ]
        }, {"word": "ignored"}]);

        let data = parse_payload(&payload).unwrap();
        assert_eq!(data.phonetic, "/kwɪk/");
        assert_eq!(data.definitions.len(), 3);
        assert_eq!(data.definitions[0].part_of_speech, "adjective");
        assert_eq!(data.definitions[0].native_definition, "Moving fast.");
        assert_eq!(data.definitions[0].source_definition, "a quick walk");
        assert_eq!(data.examples, vec!["a quick walk", "bitten to the quick"]);
        assert_eq!(data.related, vec!["fast", "rapid", "living"]);
    }

    #[test]
    fn caps_definitions_and_examples() {
        let defs: Vec<Value> = (0..10)
            .map(|i| json!({"definition": format!("d{i}"), "example": format!("e{i}")}))
            .collect();
        let payload = json!([{"phonetic": "p", "meanings": [{"partOfSpeech": "verb", "definitions": defs}]}]);

        let data = parse_payload(&payload).unwrap();
        assert_eq!(data.phonetic, "p");
        assert_eq!(data.definitions.len(), MAX_DEFINITIONS);
        assert_eq!(data.examples.len(), MAX_EXAMPLES);
    }

    #[tokio::test]
    async fn request_path_escapes_the_word() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api/v2/entries/en", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            let head = String::from_utf8_lossy(&buf[..n]).to_string();
            head.lines().next().unwrap_or_default().to_string()
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let source = FreeDictionary::new(client, base);
        assert!(matches!(source.fetch("c#").await, Ok(None)));
        assert_eq!(server.await.unwrap(), "GET /api/v2/entries/en/c%23 HTTP/1.1");
    }

    #[test]
    fn unexpected_shapes_mean_no_data() {
        assert!(parse_payload(&json!({"title": "No Definitions Found"})).is_none());
        assert!(parse_payload(&json!([])).is_none());
        assert!(parse_payload(&json!([{"meanings": []}])).is_none());
    }
}
