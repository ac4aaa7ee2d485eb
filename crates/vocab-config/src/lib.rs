use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::sources::SourcesConfig;
use self::store::StoreConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod sources;
pub mod store;
pub mod translator;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub sources: SourcesConfig,
    pub translator: TranslatorConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::from_env(),
            sources: SourcesConfig::from_env(),
            translator: TranslatorConfig::from_env(),
            store: StoreConfig::from_env(),
        }
    }

    /// Load a JSON profile. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
