use std::env;

use serde::{Deserialize, Serialize};

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "zh".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    1000
}

fn default_youdao_url() -> String {
    "https://openapi.youdao.com/api".to_string()
}

fn default_youdao_delay_ms() -> u64 {
    1000
}

fn default_baidu_url() -> String {
    "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string()
}

fn default_baidu_delay_ms() -> u64 {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Extra attempts after the first failed one
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    #[serde(default)]
    pub youdao: YoudaoConfig,
    #[serde(default)]
    pub baidu: BaiduConfig,
}

impl TranslatorConfig {
    pub fn from_env() -> Self {
        Self {
            youdao: YoudaoConfig {
                app_key: env::var("YOUDAO_APP_KEY").unwrap_or_default(),
                app_secret: env::var("YOUDAO_APP_SECRET").unwrap_or_default(),
                ..YoudaoConfig::default()
            },
            baidu: BaiduConfig {
                app_id: env::var("BAIDU_APP_ID").unwrap_or_default(),
                secret: env::var("BAIDU_SECRET").unwrap_or_default(),
                ..BaiduConfig::default()
            },
            ..Self::default()
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            youdao: YoudaoConfig::default(),
            baidu: BaiduConfig::default(),
        }
    }
}

/// Phrase translator
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct YoudaoConfig {
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub app_secret: String,
    #[serde(default = "default_youdao_url")]
    pub api_url: String,
    /// Pause between two items of a batch
    #[serde(default = "default_youdao_delay_ms")]
    pub delay_ms: u64,
}

impl Default for YoudaoConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            app_secret: String::new(),
            api_url: default_youdao_url(),
            delay_ms: default_youdao_delay_ms(),
        }
    }
}

/// Example-sentence translator
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BaiduConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_baidu_url")]
    pub api_url: String,
    #[serde(default = "default_baidu_delay_ms")]
    pub delay_ms: u64,
}

impl Default for BaiduConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            secret: String::new(),
            api_url: default_baidu_url(),
            delay_ms: default_baidu_delay_ms(),
        }
    }
}
