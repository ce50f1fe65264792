use serde::Serialize;

use crate::error::ValidationError;

/// Validated translation input.
///
/// Only [`ValidationRules::validate`] builds one, so `text` is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    text: String,
    source_language: String,
    target_language: String,
}

impl TranslationRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}

/// Optional checks on top of the blank-text rule
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    /// Maximum length of the trimmed text, in chars
    pub max_text_chars: Option<usize>,
    pub reject_identical_languages: bool,
}

impl ValidationRules {
    pub fn validate(
        &self,
        raw_text: &str,
        raw_source: &str,
        raw_target: &str,
    ) -> Result<TranslationRequest, ValidationError> {
        let text = raw_text.trim();

        if text.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if let Some(max) = self.max_text_chars {
            let actual = text.chars().count();
            if actual > max {
                return Err(ValidationError::TextTooLong { max, actual });
            }
        }

        if self.reject_identical_languages && raw_source == raw_target {
            return Err(ValidationError::IdenticalLanguages);
        }

        // Language codes go through untouched, the provider decides what it supports
        Ok(TranslationRequest {
            text: text.to_string(),
            source_language: raw_source.to_string(),
            target_language: raw_target.to_string(),
        })
    }
}

/// Blank-text check only
pub fn validate(
    raw_text: &str,
    raw_source: &str,
    raw_target: &str,
) -> Result<TranslationRequest, ValidationError> {
    ValidationRules::default().validate(raw_text, raw_source, raw_target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        for raw in ["", "  ", "\t\n", " \r\n "] {
            assert_eq!(validate(raw, "en", "es"), Err(ValidationError::EmptyInput));
        }
    }

    #[test]
    fn trims_text_and_keeps_codes() {
        let request = validate("  Hello world \n", " EN", "es-MX ").unwrap();

        assert_eq!(request.text(), "Hello world");
        assert_eq!(request.source_language(), " EN");
        assert_eq!(request.target_language(), "es-MX ");
    }

    #[test]
    fn unknown_codes_are_accepted() {
        let request = validate("Hello", "xx", "").unwrap();
        assert_eq!(request.source_language(), "xx");
        assert_eq!(request.target_language(), "");
    }

    #[test]
    fn identical_languages_pass_by_default() {
        assert!(validate("Hello", "en", "en").is_ok());
    }

    #[test]
    fn length_limit_counts_trimmed_chars() {
        let rules = ValidationRules {
            max_text_chars: Some(5),
            ..Default::default()
        };

        assert!(rules.validate("  héllo  ", "en", "es").is_ok());
        assert_eq!(
            rules.validate("hello!", "en", "es"),
            Err(ValidationError::TextTooLong { max: 5, actual: 6 })
        );
    }

    #[test]
    fn identical_languages_rejected_when_enabled() {
        let rules = ValidationRules {
            reject_identical_languages: true,
            ..Default::default()
        };

        let err = rules.validate("Hello", "en", "en").unwrap_err();
        assert_eq!(err, ValidationError::IdenticalLanguages);
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn empty_wins_over_other_rules() {
        let rules = ValidationRules {
            max_text_chars: Some(0),
            reject_identical_languages: true,
        };

        let err = rules.validate("   ", "en", "en").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EmptyInput);
    }
}
