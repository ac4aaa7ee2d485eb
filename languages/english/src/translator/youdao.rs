use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use vocab_translator::{ProviderMetadata, TranslateError, Translation, Translator};

use super::unix_seconds;
use crate::http::salt;

/// Youdao error code for an exhausted quota
const RATE_LIMITED: &str = "411";

/// Phrase translator (signature v3)
#[derive(Clone)]
pub struct YoudaoTranslator {
    client: reqwest::Client,
    app_key: String,
    app_secret: String,
    api_url: String,
}

impl YoudaoTranslator {
    pub fn new(client: reqwest::Client, app_key: String, app_secret: String, api_url: String) -> Self {
        Self {
            client,
            app_key,
            app_secret,
            api_url,
        }
    }
}

/// Text fed to the signature: the query itself up to 20 chars, otherwise
/// its first 10 chars, its length and its last 10 chars
pub fn truncate_for_sign(q: &str) -> String {
    let chars: Vec<char> = q.chars().collect();
    let len = chars.len();
    if len <= 20 {
        return q.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[len - 10..].iter().collect();
    format!("{head}{len}{tail}")
}

pub fn sign(app_key: &str, q: &str, salt: &str, curtime: &str, app_secret: &str) -> String {
    let input = truncate_for_sign(q);
    let digest = Sha256::digest(format!("{app_key}{input}{salt}{curtime}{app_secret}").as_bytes());
    format!("{:x}", digest)
}

/// Youdao spells simplified Chinese differently from the other providers
fn language_code(code: &str) -> &str {
    match code {
        "zh" | "zh-cn" | "zh-CN" => "zh-CHS",
        other => other,
    }
}

fn parse_response(json: &Value) -> Result<Vec<String>, TranslateError> {
    let code = match &json["errorCode"] {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(TranslateError::ApiError("No error code in response".to_string())),
    };

    if code == RATE_LIMITED {
        return Err(TranslateError::RateLimitExceeded);
    }
    if code != "0" {
        return Err(TranslateError::ProviderError { code });
    }

    let texts: Vec<String> = json["translation"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    if texts.is_empty() {
        return Err(TranslateError::ApiError("No translation in response".to_string()));
    }
    Ok(texts)
}

#[async_trait]
impl Translator for YoudaoTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<Translation, TranslateError> {
        if !self.has_credentials() {
            return Err(TranslateError::MissingCredentials);
        }

        let salt = salt();
        let curtime = unix_seconds().to_string();
        let sign = sign(&self.app_key, text, &salt, &curtime, &self.app_secret);

        let params = [
            ("q", text),
            ("from", language_code(from)),
            ("to", language_code(to)),
            ("appKey", self.app_key.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
            ("signType", "v3"),
            ("curtime", curtime.as_str()),
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

        let mut texts = parse_response(&json)?;
        let first = texts.remove(0);

        Ok(Translation {
            text: first,
            from: from.to_string(),
            to: to.to_string(),
            provider: "youdao".to_string(),
            alternatives: texts,
        })
    }

    fn has_credentials(&self) -> bool {
        !self.app_key.is_empty() && !self.app_secret.is_empty()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Youdao".to_string(),
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
    fn short_queries_are_signed_verbatim() {
        assert_eq!(truncate_for_sign("quick fix"), "quick fix");
        assert_eq!(truncate_for_sign(&"a".repeat(20)), "a".repeat(20));
    }

    #[test]
    fn long_queries_are_folded() {
        let q = "She walked home quickly after work.";
        assert_eq!(q.chars().count(), 35);
        assert_eq!(truncate_for_sign(q), "She walked35fter work.");
        // counts characters, not bytes
        assert_eq!(truncate_for_sign("一二三四五六七八九十甲乙丙丁戊己庚辛壬癸子"), "一二三四五六七八九十21乙丙丁戊己庚辛壬癸子");
    }

    #[test]
    fn signature_is_lowercase_sha256_hex() {
        let a = sign("key", "quick", "salt", "1700000000", "secret");
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(a, sign("key", "quick", "salt", "1700000000", "secret"));
        assert_ne!(a, sign("key", "quick", "other", "1700000000", "secret"));
    }

    #[test]
    fn response_codes() {
        let ok = json!({"errorCode": "0", "translation": ["快速修复", "速效"]});
        assert_eq!(parse_response(&ok).unwrap(), vec!["快速修复", "速效"]);

        let limited = json!({"errorCode": "411"});
        assert!(matches!(parse_response(&limited), Err(TranslateError::RateLimitExceeded)));

        let bad = json!({"errorCode": "108"});
        assert!(matches!(
            parse_response(&bad),
            Err(TranslateError::ProviderError { code }) if code == "108"
        ));

        let empty = json!({"errorCode": "0", "translation": []});
        assert!(parse_response(&empty).is_err());
    }

    #[tokio::test]
    async fn refuses_without_credentials() {
        let t = YoudaoTranslator::new(
            reqwest::Client::new(),
            String::new(),
            String::new(),
            "http://127.0.0.1:9".to_string(),
        );
        assert!(!t.has_credentials());
        assert!(matches!(
            t.translate("quick", "en", "zh").await,
            Err(TranslateError::MissingCredentials)
        ));
    }
}
