use serde::Serialize;

/// Raw, unvalidated form fields as edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationForm {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationForm {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.target_language);
    }
}
