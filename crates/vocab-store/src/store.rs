use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use vocab_config::store::StoreConfig;
use vocab_types::WordRecord;

use crate::error::StoreError;
use crate::model::{CacheEntry, SavedWord, StoreData, User, UserLists, UserRole};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const DEFAULT_USER_NAME: &str = "用户1";

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn set_aside(path: &Path) -> Result<PathBuf, StoreError> {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    let aside = PathBuf::from(name);
    fs::rename(path, &aside)?;
    Ok(aside)
}

/// Word cache, per-user history and favorites, and user profiles, kept in
/// one JSON file. Every mutation is written through.
pub struct Store {
    path: Option<PathBuf>,
    data: StoreData,
    ttl_ms: i64,
    history_limit: usize,
}

impl Store {
    /// Open the store file, starting empty when it does not exist yet.
    ///
    /// A file that no longer parses is renamed to `<path>.corrupt` and the
    /// store starts empty, so a damaged cache never blocks a lookup.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let path = PathBuf::from(&config.path);

        let data = if path.exists() {
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str(&json) {
                Ok(data) => data,
                Err(e) => {
                    let aside = set_aside(&path)?;
                    tracing::warn!(
                        "Store file {} is corrupt ({}), moved to {} and starting empty",
                        path.display(),
                        e,
                        aside.display()
                    );
                    StoreData::default()
                }
            }
        } else {
            StoreData::default()
        };

        tracing::info!(
            "Store opened at {} ({} cached words, {} users)",
            path.display(),
            data.cache.len(),
            data.users.len()
        );

        Ok(Self {
            path: Some(path),
            ..Self::in_memory(config, data)
        })
    }

    /// Store that never touches the disk
    pub fn ephemeral(config: &StoreConfig) -> Self {
        Self::in_memory(config, StoreData::default())
    }

    fn in_memory(config: &StoreConfig, data: StoreData) -> Self {
        Self {
            path: None,
            data,
            ttl_ms: config.cache_ttl_days as i64 * DAY_MS,
            history_limit: config.history_limit,
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        // write to a sibling file first so a crash never leaves half a document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.data)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    // ===== word cache (shared by every user) =====

    pub fn cached(&mut self, word: &str) -> Result<Option<WordRecord>, StoreError> {
        self.cached_at(word, now_ms())
    }

    /// Cached record for `word` as of `now`. An expired entry is removed.
    pub fn cached_at(&mut self, word: &str, now: i64) -> Result<Option<WordRecord>, StoreError> {
        let key = word.trim().to_lowercase();

        let Some(entry) = self.data.cache.get(&key) else {
            return Ok(None);
        };

        if now - entry.cached_at > self.ttl_ms {
            tracing::debug!("Cache entry for '{}' expired", key);
            self.data.cache.remove(&key);
            self.persist()?;
            return Ok(None);
        }

        Ok(Some(entry.data.clone()))
    }

    pub fn cache_word(&mut self, record: &WordRecord) -> Result<(), StoreError> {
        self.cache_word_at(record, now_ms())
    }

    pub fn cache_word_at(&mut self, record: &WordRecord, now: i64) -> Result<(), StoreError> {
        self.data.cache.insert(
            record.headword.to_lowercase(),
            CacheEntry {
                data: record.clone(),
                cached_at: now,
            },
        );
        self.persist()
    }

    /// Returns how many entries were dropped
    pub fn clear_cache(&mut self) -> Result<usize, StoreError> {
        let count = self.data.cache.len();
        self.data.cache.clear();
        self.persist()?;
        Ok(count)
    }

    // ===== users =====

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn current_user(&self) -> Option<&User> {
        let id = self.data.current_user.as_ref()?;
        self.data.users.iter().find(|u| &u.id == id)
    }

    /// Add a user and make it current
    pub fn add_user(&mut self, name: &str, role: UserRole) -> Result<User, StoreError> {
        let user = User {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            role,
            created_at: now_ms(),
        };

        self.data.users.push(user.clone());
        self.data.current_user = Some(user.id.clone());
        self.persist()?;

        tracing::info!("Added user '{}' ({})", user.name, user.id);
        Ok(user)
    }

    pub fn switch_user(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.data.users.iter().any(|u| u.id == id) {
            return Err(StoreError::UnknownUser(id.to_string()));
        }
        self.data.current_user = Some(id.to_string());
        self.persist()
    }

    /// Delete a user and its lists. Deleting the current user switches to the
    /// first remaining one, or to none.
    pub fn remove_user(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.data.users.len();
        self.data.users.retain(|u| u.id != id);
        if self.data.users.len() == before {
            return Err(StoreError::UnknownUser(id.to_string()));
        }

        if self.data.current_user.as_deref() == Some(id) {
            self.data.current_user = self.data.users.first().map(|u| u.id.clone());
        }
        self.data.lists.remove(id);
        self.persist()?;

        tracing::info!("Removed user {}", id);
        Ok(())
    }

    /// The current user, creating a default one on first use
    pub fn ensure_user(&mut self) -> Result<User, StoreError> {
        if let Some(user) = self.current_user() {
            return Ok(user.clone());
        }

        match self.data.users.first().cloned() {
            Some(first) => {
                self.data.current_user = Some(first.id.clone());
                self.persist()?;
                Ok(first)
            }
            None => self.add_user(DEFAULT_USER_NAME, UserRole::Other),
        }
    }

    fn lists_mut(&mut self) -> Result<&mut UserLists, StoreError> {
        let user = self.ensure_user()?;
        Ok(self.data.lists.entry(user.id).or_default())
    }

    fn lists(&self) -> Option<&UserLists> {
        let user = self.current_user()?;
        self.data.lists.get(&user.id)
    }

    // ===== history =====

    /// Newest first
    pub fn history(&self) -> &[SavedWord] {
        self.lists().map(|l| l.history.as_slice()).unwrap_or_default()
    }

    /// Save a record to the current user's history. A word already present is
    /// replaced where it stands; a new word goes to the front.
    pub fn save_to_history(&mut self, record: &WordRecord) -> Result<(), StoreError> {
        let limit = self.history_limit;
        let saved = SavedWord {
            record: record.clone(),
            saved_at: now_ms(),
            is_favorite: false,
        };

        let history = &mut self.lists_mut()?.history;
        match history
            .iter()
            .position(|s| s.record.headword == record.headword)
        {
            Some(idx) => history[idx] = saved,
            None => history.insert(0, saved),
        }
        history.truncate(limit);

        self.persist()
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.lists_mut()?.history.clear();
        self.persist()
    }

    // ===== favorites =====

    pub fn favorites(&self) -> &[SavedWord] {
        self.lists().map(|l| l.favorites.as_slice()).unwrap_or_default()
    }

    pub fn is_favorite(&self, word: &str) -> bool {
        self.favorites().iter().any(|s| s.record.headword == word)
    }

    /// Add the word when absent, remove it when present. Returns whether it was added.
    pub fn toggle_favorite(&mut self, record: &WordRecord) -> Result<bool, StoreError> {
        let favorites = &mut self.lists_mut()?.favorites;

        let added = match favorites
            .iter()
            .position(|s| s.record.headword == record.headword)
        {
            Some(idx) => {
                favorites.remove(idx);
                false
            }
            None => {
                favorites.insert(
                    0,
                    SavedWord {
                        record: record.clone(),
                        saved_at: now_ms(),
                        is_favorite: true,
                    },
                );
                true
            }
        };

        self.persist()?;
        Ok(added)
    }

    pub fn clear_favorites(&mut self) -> Result<(), StoreError> {
        self.lists_mut()?.favorites.clear();
        self.persist()
    }
}
