//! Supported page languages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the page can be shown in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

impl Language {
    /// Every supported language
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// Storage and dictionary code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Parse a stored code; unsupported codes yield `None`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    /// The other language
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Value for `<html lang>`
    #[must_use]
    pub const fn html_lang(self) -> &'static str {
        self.code()
    }

    /// Value for `<html dir>`
    ///
    /// The layout is mirrored by the stylesheet, not by the document
    /// direction, so this stays `ltr` for Arabic too.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        "ltr"
    }

    /// Text of the toggle button: the language it switches *to*
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::En => "ع",
            Self::Ar => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code("EN"), None);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Language::En.toggled(), Language::Ar);
        assert_eq!(Language::Ar.toggled().toggled(), Language::Ar);
    }

    #[test]
    fn test_document_attributes() {
        assert_eq!(Language::Ar.html_lang(), "ar");
        assert_eq!(Language::Ar.dir(), "ltr");
        assert_eq!(Language::En.dir(), "ltr");
        assert_eq!(Language::En.toggle_label(), "ع");
        assert_eq!(Language::Ar.toggle_label(), "EN");
        assert_eq!(Language::Ar.to_string(), "ar");
    }
}
