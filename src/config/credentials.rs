use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::utils::constants::{LIVE_API_URL, SANDBOX_API_URL};

/// PayPal environment; anything other than `sandbox` selects live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sandbox" => Environment::Sandbox,
            _ => Environment::Live,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Live => "live",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_API_URL,
            Environment::Live => LIVE_API_URL,
        }
    }

    /// API root without trailing slash; `base_url` replaces the environment default.
    pub fn api_root(&self, base_url: Option<&str>) -> String {
        base_url.unwrap_or(self.endpoint()).trim_end_matches('/').to_string()
    }
}

/// Client-credentials pair for one PayPal REST app
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub environment: Environment,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, environment: Environment) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment,
        }
    }

    /// Both halves must be present and non-empty.
    pub fn from_parts(client_id: Option<&str>, client_secret: Option<&str>, environment: Environment) -> Option<Self> {
        match (non_empty(client_id), non_empty(client_secret)) {
            (Some(id), Some(secret)) => Some(Self::new(id, secret, environment)),
            _ => None,
        }
    }

    /// `Basic base64(client_id:client_secret)`
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

// secrets never reach the logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Credentials behind the rendered checkout page and the `/api/orders` routes.
/// Any of them may be missing; the routes report that per request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CheckoutCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub merchant_id: Option<String>,
}

impl CheckoutCredentials {
    pub fn credentials(&self, environment: Environment) -> Option<Credentials> {
        Credentials::from_parts(self.client_id.as_deref(), self.client_secret.as_deref(), environment)
    }

    /// `(client_id, merchant_id)` when all three values are set
    pub fn page_identity(&self) -> Option<(&str, &str)> {
        match (
            non_empty(self.client_id.as_deref()),
            non_empty(self.merchant_id.as_deref()),
            non_empty(self.client_secret.as_deref()),
        ) {
            (Some(id), Some(merchant), Some(_)) => Some((id, merchant)),
            _ => None,
        }
    }
}

impl fmt::Debug for CheckoutCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("merchant_id", &self.merchant_id)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
