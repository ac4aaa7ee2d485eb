use async_trait::async_trait;
use md5::{Digest, Md5};
use serde_json::Value;
use vocab_translator::{ProviderMetadata, TranslateError, Translation, Translator};

use crate::http::salt;

/// Baidu error code for exceeding the per-second quota
const RATE_LIMITED: &str = "54003";

/// Example-sentence translator
#[derive(Clone)]
pub struct BaiduTranslator {
    client: reqwest::Client,
    app_id: String,
    secret: String,
    api_url: String,
}

impl BaiduTranslator {
    pub fn new(client: reqwest::Client, app_id: String, secret: String, api_url: String) -> Self {
        Self {
            client,
            app_id,
            secret,
            api_url,
        }
    }
}

pub fn sign(app_id: &str, q: &str, salt: &str, secret: &str) -> String {
    let digest = Md5::digest(format!("{app_id}{q}{salt}{secret}").as_bytes());
    format!("{:x}", digest)
}

fn parse_response(json: &Value) -> Result<Vec<String>, TranslateError> {
    if let Some(code) = json.get("error_code") {
        let code = match code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        // some deployments report success as an explicit 52000
        if code != "52000" {
            if code == RATE_LIMITED {
                return Err(TranslateError::RateLimitExceeded);
            }
            return Err(TranslateError::ProviderError { code });
        }
    }

    let texts: Vec<String> = json["trans_result"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| r["dst"].as_str())
        .map(str::to_string)
        .collect();

    if texts.is_empty() {
        return Err(TranslateError::ApiError("No translation in response".to_string()));
    }
    Ok(texts)
}

#[async_trait]
impl Translator for BaiduTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<Translation, TranslateError> {
        if !self.has_credentials() {
            return Err(TranslateError::MissingCredentials);
        }

        let salt = salt();
        let sign = sign(&self.app_id, text, &salt, &self.secret);

        let params = [
            ("q", text),
            ("from", from),
            ("to", to),
            ("appid", self.app_id.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
        ];

        let response = self.client.post(&self.api_url).form(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        // multi-line input comes back as one row per line
        let text = parse_response(&json)?.join("\n");

        Ok(Translation {
            text,
            from: from.to_string(),
            to: to.to_string(),
            provider: "baidu".to_string(),
            alternatives: vec![],
        })
    }

    fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.secret.is_empty()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Baidu".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn signature_matches_known_digest() {
        // md5("") is the well-known empty digest
        assert_eq!(sign("", "", "", ""), "d41d8cd98f00b204e9800998ecf8427e");
        // published sample: appid, q, salt, secret concatenated in that order
        assert_eq!(
            sign("2015063000000001", "apple", "1435660288", "12345678"),
            "f89f9594663708c1605f3d736d01d2d4"
        );
        assert_ne!(
            sign("2015063000000001", "apple", "12345678", "1435660288"),
            "f89f9594663708c1605f3d736d01d2d4"
        );
    }

    #[test]
    fn response_rows_and_errors() {
        let ok = json!({"from": "en", "to": "zh", "trans_result": [{"src": "a", "dst": "甲"}, {"src": "b", "dst": "乙"}]});
        assert_eq!(parse_response(&ok).unwrap(), vec!["甲", "乙"]);

        let limited = json!({"error_code": "54003", "error_msg": "Invalid Access Limit"});
        assert!(matches!(parse_response(&limited), Err(TranslateError::RateLimitExceeded)));

        let bad_sign = json!({"error_code": 54001});
        assert!(matches!(
            parse_response(&bad_sign),
            Err(TranslateError::ProviderError { code }) if code == "54001"
        ));
    }

    #[test]
    fn credentials_need_both_halves() {
        let t = BaiduTranslator::new(reqwest::Client::new(), "id".into(), String::new(), String::new());
        assert!(!t.has_credentials());
    }
}
