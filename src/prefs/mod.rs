//! Stored user preferences behind an injected key-value store.
//!
//! The core never touches storage directly: preferences are loaded once,
//! passed by value into the submission call, and written back through the
//! same `KeyValueStore` trait so tests can substitute any backend.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dashmap::DashMap;
use thiserror::Error;

pub const KEY_RESPONSE_LANGUAGE: &str = "response_language";
pub const KEY_WEB_SEARCH: &str = "web_search_enabled";
pub const KEY_API_KEY: &str = "api_key";

/// Minimal persistence interface for user preferences.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Flat JSON map on disk; the whole file is rewritten on every set/remove.
/// Preferences are a handful of short strings, so this stays simple.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading prefs file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing prefs file {}", self.path.display()))
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing prefs file {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("api keys must start with 'sk-'")]
    InvalidApiKey,
}

/// User preferences passed into every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Preferred language for the backend's response; `None` lets the
    /// backend (or free-text detection) decide.
    pub response_language: Option<String>,
    /// Whether the backend should corroborate claims with web search.
    pub web_search: bool,
    /// Optional user-supplied API key, passed through opaquely.
    pub api_key: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            response_language: None,
            web_search: true,
            api_key: None,
        }
    }
}

impl Preferences {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let response_language = store.get(KEY_RESPONSE_LANGUAGE)?;
        let web_search = match store.get(KEY_WEB_SEARCH)? {
            Some(raw) => raw == "true",
            None => true,
        };
        let api_key = store.get(KEY_API_KEY)?;
        Ok(Self {
            response_language,
            web_search,
            api_key,
        })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        match &self.response_language {
            Some(lang) => store.set(KEY_RESPONSE_LANGUAGE, lang)?,
            None => store.remove(KEY_RESPONSE_LANGUAGE)?,
        }
        store.set(KEY_WEB_SEARCH, if self.web_search { "true" } else { "false" })?;
        match &self.api_key {
            Some(key) => {
                if !key.starts_with("sk-") {
                    return Err(PrefsError::InvalidApiKey.into());
                }
                store.set(KEY_API_KEY, key)?;
            }
            None => store.remove(KEY_API_KEY)?,
        }
        Ok(())
    }

    /// Set the API key, enforcing the `sk-` prefix; `None` clears it.
    pub fn set_api_key(&mut self, key: Option<String>) -> Result<(), PrefsError> {
        if let Some(key) = &key {
            if !key.starts_with("sk-") {
                return Err(PrefsError::InvalidApiKey);
            }
        }
        self.api_key = key;
        Ok(())
    }
}
