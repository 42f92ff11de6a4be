use std::time::Duration;

use crate::config::credentials::{CheckoutCredentials, Credentials, Environment};
use crate::config::settings::SettingsConfig;

/// Raw values taken from the process environment / command line.
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub paypal_client_id: Option<String>,
    pub paypal_merchant_id: Option<String>,
    pub paypal_client_secret: Option<String>,
    pub node_env: Option<String>,
    pub base_url: Option<String>,
}

/// Values echoed by `/check`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthInfo {
    pub env: Option<String>,
    pub base_url: Option<String>,
}

/// ================================
/// Full service configuration, immutable after startup
/// ================================
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub environment: Environment,
    /// CLIENT_ID / CLIENT_SECRET, behind the simple checkout routes
    pub direct: Option<Credentials>,
    pub checkout: CheckoutCredentials,
    pub health: HealthInfo,
}

impl ServiceConfig {
    pub fn assemble(mut settings: SettingsConfig, inputs: EnvInputs) -> Self {
        let environment = Environment::from_name(inputs.environment.as_deref().unwrap_or("sandbox"));

        if let Some(host) = inputs.host {
            settings.server.host = host;
        }
        if let Some(port) = inputs.port {
            settings.server.port = port;
        }

        let direct = Credentials::from_parts(inputs.client_id.as_deref(), inputs.client_secret.as_deref(), environment);
        let checkout = CheckoutCredentials {
            client_id: inputs.paypal_client_id,
            client_secret: inputs.paypal_client_secret,
            merchant_id: inputs.paypal_merchant_id,
        };

        Self {
            settings,
            environment,
            direct,
            checkout,
            health: HealthInfo { env: inputs.node_env, base_url: inputs.base_url },
        }
    }

    /// provider API root, for logging; each token provider resolves its own
    pub fn endpoint(&self) -> String {
        self.environment.api_root(self.settings.provider.base_url.as_deref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.settings.provider.timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.settings.server.host, self.settings.server.port)
    }
}
