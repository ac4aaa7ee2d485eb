use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vocab_types::WordRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "初中")]
    JuniorHigh,
    #[serde(rename = "高中")]
    SeniorHigh,
    #[default]
    #[serde(rename = "其他")]
    Other,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::JuniorHigh => "初中",
            UserRole::SeniorHigh => "高中",
            UserRole::Other => "其他",
        }
    }

    /// Accepts the display label or an English alias
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "初中" | "junior" | "junior-high" => Some(UserRole::JuniorHigh),
            "高中" | "senior" | "senior-high" => Some(UserRole::SeniorHigh),
            "其他" | "other" => Some(UserRole::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: i64,
}

/// A record kept in a user's history or favorites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    #[serde(flatten)]
    pub record: WordRecord,
    pub saved_at: i64,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CacheEntry {
    pub data: WordRecord,
    pub cached_at: i64,
}

/// Per-user lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UserLists {
    pub history: Vec<SavedWord>,
    pub favorites: Vec<SavedWord>,
}

/// Everything the store persists, as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoreData {
    /// Keyed by lowercased headword, shared by every user
    pub cache: BTreeMap<String, CacheEntry>,
    pub users: Vec<User>,
    pub current_user: Option<String>,
    /// Keyed by user id
    pub lists: BTreeMap<String, UserLists>,
}
