//! Result and error types for the site components.

use thiserror::Error;

/// Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;

/// Errors that can occur while configuring or mounting site components
#[derive(Debug, Error)]
pub enum SiteError {
    /// A required DOM element is absent; the component disables itself
    #[error("{component}: required element `{selector}` not found")]
    MissingElement {
        /// Component that failed to mount
        component: &'static str,
        /// Selector or id that was looked up
        selector: String,
    },

    /// A carousel was mounted without any items
    #[error("{component}: carousel has no items")]
    EmptyCarousel {
        /// Component that failed to mount
        component: &'static str,
    },

    /// Configuration value out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Malformed JSON (configuration or translation tables)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The built-in dictionary has no table for a language
    #[error("No translations for language `{language}`")]
    MissingTranslations {
        /// Language code
        language: String,
    },
}

impl SiteError {
    /// Create a missing element error
    #[must_use]
    pub fn missing_element(component: &'static str, selector: impl Into<String>) -> Self {
        Self::MissingElement {
            component,
            selector: selector.into(),
        }
    }

    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error only means "feature absent" on the page.
    ///
    /// Hosts log these and carry on; nothing is shown to the visitor.
    #[must_use]
    pub const fn is_fail_soft(&self) -> bool {
        matches!(
            self,
            Self::MissingElement { .. } | Self::EmptyCarousel { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = SiteError::missing_element("news-slider", ".item-bg");
        assert_eq!(
            err.to_string(),
            "news-slider: required element `.item-bg` not found"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = SiteError::invalid_config("damping must be in (0, 1)");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: damping must be in (0, 1)"
        );
    }

    #[test]
    fn test_json_error_from() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SiteError = parse.into();
        assert!(matches!(err, SiteError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_fail_soft_classification() {
        assert!(SiteError::missing_element("focus-rail", "#focusRailStage").is_fail_soft());
        assert!(SiteError::EmptyCarousel {
            component: "news-slider"
        }
        .is_fail_soft());
        assert!(!SiteError::invalid_config("x").is_fail_soft());
        assert!(!SiteError::MissingTranslations {
            language: "fr".into()
        }
        .is_fail_soft());
    }
}
