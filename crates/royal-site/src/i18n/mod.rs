//! English/Arabic text switching
//!
//! Elements opt in with `data-i18n="key"`; switching languages replaces their
//! markup from the active table, sets the document title from the reserved
//! `page-title` key, and updates `<html lang>` and the toggle label. The
//! choice persists under the `language` storage key.

pub mod dictionary;
pub mod language;
pub mod preference;

pub use dictionary::{LanguageUpdate, Translations, PAGE_TITLE_KEY};
pub use language::Language;
pub use preference::{LanguageSwitch, MemoryStore, PreferenceStore, LANGUAGE_KEY};
