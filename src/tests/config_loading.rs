#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use crate::config::loader::{self, expand_env_vars, parse_settings};
    use crate::config::settings::LogFormat;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    #[serial]
    async fn settings_file_expands_environment_placeholders() {
        std::env::set_var("CHECKOUT_TEST_PORT", "9090");
        std::env::remove_var("CHECKOUT_TEST_CURRENCY");
        let file = write_config(
            r#"
server:
  host: 127.0.0.1
  port: ${CHECKOUT_TEST_PORT:8888}
logging:
  level: debug
  format: json
provider:
  timeout_ms: 1500
  base_url: http://127.0.0.1:9999
order:
  currency_code: ${CHECKOUT_TEST_CURRENCY:EUR}
  value: "25.50"
metrics:
  is_enabled: true
"#,
        );

        let settings = loader::run(file.path().to_str()).await.unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.order.currency_code, "EUR");
        assert_eq!(settings.order.value, "25.50");
        assert_eq!(settings.provider.timeout_ms, 1500);
        assert_eq!(settings.provider.base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert!(settings.metrics.is_enabled);
        assert_eq!(settings.metrics.path, "/metrics");
        let logging = settings.logging.unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);

        std::env::remove_var("CHECKOUT_TEST_PORT");
    }

    #[tokio::test]
    #[serial]
    async fn no_file_means_defaults() {
        let settings = loader::run(None).await.unwrap();

        assert_eq!(settings.server.port, 8888);
        assert_eq!(settings.order.currency_code, "USD");
        assert_eq!(settings.order.value, "100.00");
        assert_eq!(settings.provider.timeout_ms, 5000);
        assert!(settings.provider.base_url.is_none());
        assert_eq!(settings.logging.unwrap().level, "info");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        assert!(loader::run(Some("/nonexistent/checkout-proxy.yaml")).await.is_err());
    }

    #[test]
    fn invalid_values_are_reported_together() {
        let err = parse_settings(
            r#"
server:
  port: 0
provider:
  timeout_ms: 0
order:
  currency_code: usd
  value: "100"
"#,
        )
        .unwrap_err()
        .to_string();

        assert!(err.contains("server.port"));
        assert!(err.contains("provider.timeout_ms"));
        assert!(err.contains("order.currency_code"));
        assert!(err.contains("order.value"));
    }

    #[test]
    #[serial]
    fn placeholder_without_default_expands_to_empty() {
        std::env::remove_var("CHECKOUT_TEST_UNSET");
        assert_eq!(expand_env_vars("a=${CHECKOUT_TEST_UNSET};"), "a=;");
        assert_eq!(expand_env_vars("b=${CHECKOUT_TEST_UNSET:x}"), "b=x");
    }
}
