use std::fmt;

use crate::provider::error::CheckoutError;

/// Order intent as chosen by the browser client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Authorize,
    Capture,
}

impl Intent {
    /// Intent of a new order. The caller's value is uppercased and must name
    /// one of the two flows.
    pub fn for_new_order(value: &str) -> Result<Self, CheckoutError> {
        match value.to_uppercase().as_str() {
            "AUTHORIZE" => Ok(Intent::Authorize),
            "CAPTURE" => Ok(Intent::Capture),
            _ => Err(CheckoutError::InvalidRequest(format!("unsupported intent: {}", value))),
        }
    }

    /// Completion flow: exactly `authorize` selects Authorize, any other value
    /// (or none) selects Capture. The value is not checked against the order.
    pub fn for_completion(value: Option<&str>) -> Self {
        match value {
            Some("authorize") => Intent::Authorize,
            _ => Intent::Capture,
        }
    }

    /// value of the create-order `intent` field
    pub fn order_field(&self) -> &'static str {
        match self {
            Intent::Authorize => "AUTHORIZE",
            Intent::Capture => "CAPTURE",
        }
    }

    /// `/v2/checkout/orders/{id}/<sub_path>`
    pub fn sub_path(&self) -> &'static str {
        match self {
            Intent::Authorize => "authorize",
            Intent::Capture => "capture",
        }
    }

    /// key under `purchase_units[0].payments`
    pub fn payments_key(&self) -> &'static str {
        match self {
            Intent::Authorize => "authorizations",
            Intent::Capture => "captures",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sub_path())
    }
}
