mod http;

pub use http::HttpTranslator;

use std::time::Duration;

use tolk_core::ErrorKind;

pub type LanguageCode = String;

/// Shown for failures that carry no provider message, including network errors
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during translation. Please try again.";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// `None` when the provider answered without a translated text
    pub text: Option<String>,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Provider returned HTTP {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Provider {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::Provider { .. } => ErrorKind::ProviderError,
            TranslateError::NetworkError(_) | TranslateError::Timeout(_) => {
                ErrorKind::NetworkFailure
            }
        }
    }

    /// Text for the user: the provider's own message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            TranslateError::Provider {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
