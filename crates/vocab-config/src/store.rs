use std::env;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "vocab-store.json".to_string()
}

fn default_cache_ttl_days() -> u64 {
    7
}

fn default_history_limit() -> usize {
    100
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_cache_ttl_days")]
    pub cache_ttl_days: u64,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            path: env::var("VOCAB_STORE_PATH").unwrap_or_else(|_| default_path()),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            cache_ttl_days: default_cache_ttl_days(),
            history_limit: default_history_limit(),
        }
    }
}
