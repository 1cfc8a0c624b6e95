//! Persisted language preference.

use super::dictionary::{LanguageUpdate, Translations};
use super::language::Language;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Storage key of the language preference
pub const LANGUAGE_KEY: &str = "language";

/// String key/value storage (`localStorage` in the browser)
pub trait PreferenceStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value; returns `false` when the store refused it
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one entry already present
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }
}

/// The page's current language and its toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSwitch {
    current: Language,
}

impl LanguageSwitch {
    /// Read the stored preference; missing or unknown values mean English
    pub fn load(store: &impl PreferenceStore) -> Self {
        let current = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();
        debug!(language = %current, "language preference loaded");
        Self { current }
    }

    /// Start from a known language
    #[must_use]
    pub const fn new(current: Language) -> Self {
        Self { current }
    }

    /// Language currently shown
    #[must_use]
    pub const fn current(&self) -> Language {
        self.current
    }

    /// Plan for showing the current language
    #[must_use]
    pub fn apply(&self, translations: &Translations) -> LanguageUpdate {
        translations.update_for(self.current)
    }

    /// Switch to the other language, persist it and plan the page update
    pub fn toggle(
        &mut self,
        store: &mut impl PreferenceStore,
        translations: &Translations,
    ) -> LanguageUpdate {
        self.current = self.current.toggled();
        if !store.set(LANGUAGE_KEY, self.current.code()) {
            warn!(language = %self.current, "language preference not persisted");
        }
        debug!(language = %self.current, "language toggled");
        self.apply(translations)
    }
}
