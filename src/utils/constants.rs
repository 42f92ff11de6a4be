//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_PORT: u16 = 8888;

pub const SANDBOX_API_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_API_URL: &str = "https://api-m.paypal.com";

// Provider paths
pub const OAUTH2_TOKEN_PATH: &str = "/v1/oauth2/token";
pub const GENERATE_TOKEN_PATH: &str = "/v1/identity/generate-token";
pub const ORDERS_PATH: &str = "/v2/checkout/orders";

pub const STATUS_COMPLETED: &str = "COMPLETED";

pub const MISSING_CHECKOUT_CREDENTIALS_MSG: &str =
    "Client Id or App Secret or Merchant Id is missing.";
