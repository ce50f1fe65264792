use std::fs;
use std::path::Path;

use anyhow::Context;
use tolk_config::Config;

/// Profile file if given, else environment defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    parse_profile(&data).with_context(|| format!("Invalid profile {}", path.display()))
}

/// Missing fields take built-in defaults
pub fn parse_profile(data: &str) -> anyhow::Result<Config> {
    let config: Config = serde_json::from_str(data)?;

    if config.translator.timeout_ms == 0 {
        anyhow::bail!("translator.timeout_ms must be greater than 0");
    }

    Ok(config)
}
