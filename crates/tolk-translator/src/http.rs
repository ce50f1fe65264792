use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Client for a provider exposing `POST /translate`
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[derive(Deserialize, Default)]
struct TranslateResponse {
    translated_text: Option<String>,
    source_language: Option<String>,
    target_language: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    /// Older providers report failures under `error`
    error: Option<String>,
}

impl HttpTranslator {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/translate", api_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, endpoint = %self.endpoint, "POST translate {from} -> {to}");

        let body = TranslateBody {
            text,
            source_language: &from,
            target_language: &to,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Request-Id", request_id.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        // Only 200 carries a translation, other 2xx codes are failures without a message
        if status != reqwest::StatusCode::OK {
            let message = serde_json::from_str::<ErrorResponse>(&raw)
                .ok()
                .and_then(|body| body.message.or(body.error))
                .filter(|message| !message.is_empty());

            tracing::warn!(%request_id, status = status.as_u16(), ?message, "Provider rejected request");

            return Err(TranslateError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        // An unreadable success body is treated like one without `translated_text`
        let parsed = serde_json::from_str::<TranslateResponse>(&raw).unwrap_or_else(|e| {
            tracing::warn!(%request_id, "Failed to parse provider response: {e}");
            TranslateResponse::default()
        });

        Ok(Translation {
            text: parsed.translated_text,
            from: parsed.source_language.unwrap_or(from),
            to: parsed.target_language.unwrap_or(to),
            provider: "http".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "http".to_string(),
            endpoint: Some(self.endpoint.clone()),
        }
    }
}
