use crate::types::ErrorKind;

/// Input rejected before any provider call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter some text to translate.")]
    EmptyInput,

    #[error("Text exceeds maximum length of {max} characters")]
    TextTooLong { max: usize, actual: usize },

    #[error("Source and target languages must be different")]
    IdenticalLanguages,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyInput => ErrorKind::EmptyInput,
            ValidationError::TextTooLong { .. } | ValidationError::IdenticalLanguages => {
                ErrorKind::InvalidInput
            }
        }
    }
}
