use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "data/lexicon.json".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// JSON lexicon file loaded at startup
    #[serde(default = "default_path")]
    pub path: String,
    /// Extra lexicon files merged over the main one, in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl DictionaryConfig {
    pub fn from_env() -> Self {
        let path = env::var("VOCAB_LEXICON_PATH").unwrap_or_else(|_| default_path());

        let additional_paths = env::var("VOCAB_EXTRA_LEXICONS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            enabled: default_enabled(),
            path,
            additional_paths,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
            additional_paths: vec![],
        }
    }
}
