//! Settings validation with aggregated errors.

use regex::Regex;
use tracing::error;

use crate::config::settings::SettingsConfig;

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_settings(settings: &SettingsConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    if settings.server.port == 0 {
        errors.push("server.port must not be 0".to_string());
    }
    if settings.server.host.trim().is_empty() {
        errors.push("server.host is empty".to_string());
    }

    if settings.provider.timeout_ms == 0 {
        errors.push("provider.timeout_ms must be > 0".to_string());
    }
    if let Some(base_url) = &settings.provider.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(format!("provider.base_url '{}' must start with http:// or https://", base_url));
        }
    }

    let currency = Regex::new(r"^[A-Z]{3}$").expect("static regex");
    if !currency.is_match(&settings.order.currency_code) {
        errors.push(format!(
            "order.currency_code '{}' must be three uppercase letters",
            settings.order.currency_code
        ));
    }
    let amount = Regex::new(r"^\d+\.\d{2}$").expect("static regex");
    if !amount.is_match(&settings.order.value) {
        errors.push(format!("order.value '{}' must look like 100.00", settings.order.value));
    }

    if !settings.metrics.path.starts_with('/') {
        errors.push(format!("metrics.path '{}' must start with '/'", settings.metrics.path));
    }

    if let Some(logging) = &settings.logging {
        let allowed = ["trace", "debug", "info", "warn", "error"];
        if !allowed.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!("logging.level '{}' not one of {:?}", logging.level, allowed));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            error!("config: {}", e);
        }
        Err(errors)
    }
}
