use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_text_chars() -> Option<usize> {
    Some(1000)
}

/// Translation provider and submission settings
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Provider base URL, `/translate` is appended
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Upper bound on one provider call, including connect
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Trimmed text longer than this is rejected before sending. `None` disables the check
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: Option<usize>,
    #[serde(default)]
    pub reject_identical_languages: bool,
}

impl TranslatorConfig {
    /// Defaults overridden by `TOLK_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` yields for the `TOLK_*` keys.
    /// Values that fail to parse keep the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("TOLK_API_URL") {
            config.api_url = url;
        }

        if let Some(lang) = lookup("TOLK_SOURCE_LANG") {
            config.source_language = lang;
        }

        if let Some(lang) = lookup("TOLK_TARGET_LANG") {
            config.target_language = lang;
        }

        // 0 would fail every request immediately
        if let Some(ms) = lookup("TOLK_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            config.timeout_ms = ms;
        }

        // 0 disables the limit
        if let Some(max) = lookup("TOLK_MAX_TEXT_CHARS").and_then(|v| v.parse::<usize>().ok()) {
            config.max_text_chars = (max > 0).then_some(max);
        }

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            timeout_ms: default_timeout_ms(),
            max_text_chars: default_max_text_chars(),
            reject_identical_languages: false,
        }
    }
}
