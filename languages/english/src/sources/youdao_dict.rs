use async_trait::async_trait;
use serde_json::Value;
use vocab_core::source::{DictionaryData, DictionarySource};
use vocab_types::Definition;

use super::{SourceError, get_json, recover};
use crate::parse::parse_definition_line;

const WEB_FRAGMENTS_PER_ITEM: usize = 2;
const WEB_FRAGMENTS_TOTAL: usize = 3;

/// Primary online dictionary (keyed open API, native definitions)
pub struct YoudaoDictionary {
    client: reqwest::Client,
    api_url: String,
    keyfrom: String,
    key: String,
}

impl YoudaoDictionary {
    pub fn new(client: reqwest::Client, api_url: String, keyfrom: String, key: String) -> Self {
        Self {
            client,
            api_url,
            keyfrom,
            key,
        }
    }

    async fn fetch(&self, word: &str) -> Result<Option<DictionaryData>, SourceError> {
        let request = self.client.get(&self.api_url).query(&[
            ("keyfrom", self.keyfrom.as_str()),
            ("key", self.key.as_str()),
            ("type", "data"),
            ("doctype", "json"),
            ("version", "1.1"),
            ("q", word),
        ]);

        let payload = get_json(request).await?;
        if !error_code_is_zero(&payload["errorCode"]) {
            return Err(SourceError::Service(payload["errorCode"].to_string()));
        }
        Ok(parse_payload(&payload))
    }
}

fn error_code_is_zero(code: &Value) -> bool {
    match code {
        Value::Number(n) => n.as_i64() == Some(0),
        Value::String(s) => s.trim() == "0",
        _ => false,
    }
}

/// Turn a successful response into dictionary data. `None` when the
/// response carries no definition at all.
pub fn parse_payload(payload: &Value) -> Option<DictionaryData> {
    let basic = &payload["basic"];

    let definitions: Vec<Definition> = basic["explains"]
        .as_array()
        .map(|explains| {
            explains
                .iter()
                .filter_map(Value::as_str)
                .map(parse_definition_line)
                .filter(|(_, text)| !text.is_empty())
                .map(|(pos, text)| Definition::new(pos, text))
                .collect()
        })
        .unwrap_or_default();

    if definitions.is_empty() {
        return None;
    }

    let phonetic = [&basic["phonetic"], &basic["us-phonetic"]]
        .into_iter()
        .filter_map(Value::as_str)
        .find(|p| !p.is_empty())
        .unwrap_or_default()
        .to_string();

    let examples = payload["web"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["value"].as_array())
                .flat_map(|values| values.iter().take(WEB_FRAGMENTS_PER_ITEM))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .take(WEB_FRAGMENTS_TOTAL)
                .collect()
        })
        .unwrap_or_default();

    Some(DictionaryData {
        phonetic,
        definitions,
        examples,
        related: Vec::new(),
    })
}

#[async_trait]
impl DictionarySource for YoudaoDictionary {
    fn name(&self) -> &str {
        "youdao-dict"
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
    fn parses_explains_phonetic_and_web() {
        let payload = json!({
            "errorCode": 0,
            "query": "quick",
            "basic": {
                "us-phonetic": "kwɪk",
                "explains": ["adj. 快的；迅速的", "adv. 快地", "[医] 活肉"]
            },
            "web": [
                {"key": "quick", "value": ["快", "迅速", "敏捷"]},
                {"key": "quick fix", "value": ["权宜之计", "速效对策"]}
            ]
        });

        let data = parse_payload(&payload).unwrap();
        assert_eq!(data.phonetic, "kwɪk");
        assert_eq!(data.definitions.len(), 3);
        assert_eq!(data.definitions[0], Definition::new("adj.", "快的；迅速的"));
        assert_eq!(data.definitions[2], Definition::new("", "[医] 活肉"));
        assert_eq!(data.examples, vec!["快", "迅速", "权宜之计"]);
    }

    #[test]
    fn no_explains_means_no_data() {
        let payload = json!({"errorCode": 0, "web": [{"value": ["x"]}]});
        assert!(parse_payload(&payload).is_none());
    }

    #[test]
    fn error_code_forms() {
        assert!(error_code_is_zero(&json!(0)));
        assert!(error_code_is_zero(&json!("0")));
        assert!(!error_code_is_zero(&json!(60)));
        assert!(!error_code_is_zero(&Value::Null));
    }
}
