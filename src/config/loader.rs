use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{LogFormat, LoggingConfig, SettingsConfig};
use crate::config::validator;

/// Settings from an optional YAML file; defaults when no path is given.
pub async fn run(config_path: Option<&str>) -> Result<SettingsConfig> {
    match config_path {
        Some(path) => file_to_settings(Path::new(path))
            .await
            .map_err(|e| anyhow!(format!("Invalid config format: {}", e))),
        None => finalize(SettingsConfig::default()),
    }
}

/// Load and validate settings from YAML file
pub async fn file_to_settings(path: &Path) -> Result<SettingsConfig> {
    let content = fs::read_to_string(path)?;
    let expanded = expand_env_vars(&content);
    parse_settings(&expanded)
}

pub fn parse_settings(content: &str) -> Result<SettingsConfig> {
    let settings: SettingsConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;
    finalize(settings)
}

fn finalize(mut settings: SettingsConfig) -> Result<SettingsConfig> {
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::from_env()));
    }
    debug!("validation config ...");
    validator::validate_settings(&settings)
        .map_err(|issues| anyhow!("config validation failed: {}", issues.join("; ")))?;
    Ok(settings)
}

/// `${VAR}` and `${VAR:default}` placeholders
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
