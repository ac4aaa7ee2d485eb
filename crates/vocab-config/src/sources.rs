use std::env;

use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    8
}

fn default_youdao_dict_url() -> String {
    "http://fanyi.youdao.com/openapi.do".to_string()
}

fn default_youdao_keyfrom() -> String {
    "english-vocab".to_string()
}

fn default_free_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_datamuse_url() -> String {
    "https://api.datamuse.com".to_string()
}

fn default_merriam_webster_url() -> String {
    "https://www.dictionaryapi.com/api/v3/references/learners/json".to_string()
}

/// Endpoints and keys of the third-party lookup services
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    /// Per-call timeout; a timeout counts as a transport failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_youdao_dict_url")]
    pub youdao_dict_url: String,
    #[serde(default = "default_youdao_keyfrom")]
    pub youdao_keyfrom: String,
    #[serde(default)]
    pub youdao_key: String,
    #[serde(default = "default_free_dictionary_url")]
    pub free_dictionary_url: String,
    #[serde(default = "default_datamuse_url")]
    pub datamuse_url: String,
    #[serde(default = "default_merriam_webster_url")]
    pub merriam_webster_url: String,
    #[serde(default)]
    pub merriam_webster_key: String,
}

impl SourcesConfig {
    pub fn from_env() -> Self {
        let timeout_secs = env::var("VOCAB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Self {
            timeout_secs,
            youdao_key: env::var("YOUDAO_DICT_KEY").unwrap_or_default(),
            merriam_webster_key: env::var("MW_API_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            youdao_dict_url: default_youdao_dict_url(),
            youdao_keyfrom: default_youdao_keyfrom(),
            youdao_key: String::new(),
            free_dictionary_url: default_free_dictionary_url(),
            datamuse_url: default_datamuse_url(),
            merriam_webster_url: default_merriam_webster_url(),
            merriam_webster_key: String::new(),
        }
    }
}
