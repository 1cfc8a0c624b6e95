//! Translation tables and language-switch plans.

use super::language::Language;
use crate::error::{SiteError, SiteResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reserved key holding the document title; never injected into elements
pub const PAGE_TITLE_KEY: &str = "page-title";

const EN_JSON: &str = include_str!("../../locales/en.json");
const AR_JSON: &str = include_str!("../../locales/ar.json");

/// Key → markup table of one language
pub type Table = BTreeMap<String, String>;

/// Translation tables for every language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    tables: BTreeMap<Language, Table>,
}

impl Translations {
    /// Build from explicit tables; English is mandatory as the fallback
    pub fn new(tables: BTreeMap<Language, Table>) -> SiteResult<Self> {
        if !tables.contains_key(&Language::En) {
            return Err(SiteError::MissingTranslations {
                language: Language::En.code().to_string(),
            });
        }
        Ok(Self { tables })
    }

    /// Parse one JSON object per language
    pub fn from_json<'a>(
        tables: impl IntoIterator<Item = (Language, &'a str)>,
    ) -> SiteResult<Self> {
        let mut parsed = BTreeMap::new();
        for (language, json) in tables {
            let table: Table = serde_json::from_str(json)?;
            parsed.insert(language, table);
        }
        Self::new(parsed)
    }

    /// The tables compiled into the crate
    pub fn builtin() -> SiteResult<Self> {
        Self::from_json([(Language::En, EN_JSON), (Language::Ar, AR_JSON)])
    }

    /// Whether `language` has its own table
    #[must_use]
    pub fn has(&self, language: Language) -> bool {
        self.tables.contains_key(&language)
    }

    /// Table for `language`, or English when it has none
    #[must_use]
    pub fn table(&self, language: Language) -> &Table {
        self.tables
            .get(&language)
            .or_else(|| self.tables.get(&Language::En))
            .unwrap_or(&EMPTY)
    }

    /// Markup for `key`
    #[must_use]
    pub fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.table(language).get(key).map(String::as_str)
    }

    /// Keys of `language`'s table, sorted
    pub fn keys(&self, language: Language) -> impl Iterator<Item = &str> {
        self.table(language).keys().map(String::as_str)
    }

    /// Everything the page must change to show `language`
    #[must_use]
    pub fn update_for(&self, language: Language) -> LanguageUpdate {
        let table = self.table(language);
        let entries = table
            .iter()
            .filter(|(key, _)| key.as_str() != PAGE_TITLE_KEY)
            .map(|(key, markup)| (key.clone(), markup.clone()))
            .collect();
        LanguageUpdate {
            language,
            title: table.get(PAGE_TITLE_KEY).cloned(),
            entries,
            html_lang: language.html_lang(),
            dir: language.dir(),
            toggle_label: language.toggle_label(),
        }
    }
}

static EMPTY: Table = BTreeMap::new();

/// Plan for switching the page to one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageUpdate {
    /// Language being applied
    pub language: Language,
    /// New `document.title`, when the table has one
    pub title: Option<String>,
    /// `(key, markup)` pairs for every `[data-i18n="key"]` element
    pub entries: Vec<(String, String)>,
    /// `<html lang>`
    pub html_lang: &'static str,
    /// `<html dir>`
    pub dir: &'static str,
    /// Toggle button text
    pub toggle_label: &'static str,
}

impl LanguageUpdate {
    /// Markup for one key
    #[must_use]
    pub fn markup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, markup)| markup.as_str())
    }
}
