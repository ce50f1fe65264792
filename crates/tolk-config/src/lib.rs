use std::env;

use serde::{Deserialize, Serialize};

use self::translator::TranslatorConfig;

pub mod translator;

fn default_log_filter() -> String {
    "tolk=info".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("TOLK_LOG").unwrap_or_else(default_log_filter);

        Config {
            translator: TranslatorConfig::from_lookup(lookup),
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}
