use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::settings::OrderAmountConfig;
use crate::observability::metrics::get_metrics;
use crate::provider::call::{record_failure, send_json};
use crate::provider::error::CheckoutError;
use crate::provider::intent::Intent;
use crate::provider::token::{AccessToken, TokenProvider};
use crate::receipts::{Receipt, ReceiptSender};
use crate::utils::constants::{GENERATE_TOKEN_PATH, ORDERS_PATH, STATUS_COMPLETED};

/// Order lifecycle on top of the provider REST API.
///
/// Every operation fetches a fresh token first and then issues exactly one
/// provider call; the call is never made when the token fetch fails.
#[derive(Clone)]
pub struct OrderFacade {
    tokens: TokenProvider,
    client: Client,
    amount: OrderAmountConfig,
    receipts: Arc<dyn ReceiptSender>,
}

impl OrderFacade {
    pub fn new(
        tokens: TokenProvider,
        client: Client,
        amount: OrderAmountConfig,
        receipts: Arc<dyn ReceiptSender>,
    ) -> Self {
        Self { tokens, client, amount, receipts }
    }

    pub async fn create_order(&self, intent: Intent) -> Result<Value, CheckoutError> {
        let token = self.tokens.get_access_token().await?;
        let body = json!({
            "intent": intent.order_field(),
            "purchase_units": [{
                "amount": {
                    "currency_code": self.amount.currency_code,
                    "value": self.amount.value,
                }
            }]
        });
        let request = self.authorized(Method::POST, ORDERS_PATH.to_string(), &token).json(&body);
        let order = send_json("create_order", request).await?;
        info!("order created: {}", order_id_of(&order).unwrap_or("<none>"));
        Ok(order)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Value, CheckoutError> {
        let path = order_path(order_id, None)?;
        let token = self.tokens.get_access_token().await?;
        send_json("get_order", self.authorized(Method::GET, path, &token)).await
    }

    pub async fn capture_order(&self, order_id: &str) -> Result<Value, CheckoutError> {
        let path = order_path(order_id, Some(Intent::Capture))?;
        let token = self.tokens.get_access_token().await?;
        send_json("capture_order", self.authorized(Method::POST, path, &token)).await
    }

    /// Captures or authorizes the order and sends a receipt when the
    /// payment selected by `intent` reports `COMPLETED`.
    pub async fn complete_order(&self, order_id: &str, intent: Intent, email: &str) -> Result<Value, CheckoutError> {
        let path = order_path(order_id, Some(intent))?;
        let token = self.tokens.get_access_token().await?;
        let order = send_json("complete_order", self.authorized(Method::POST, path, &token)).await?;

        let status = match completion_status(&order, intent) {
            Ok(status) => status,
            Err(e) => {
                record_failure("complete_order", e.reason()).await;
                return Err(e);
            }
        };
        info!("order {} {}: {}", order_id, intent, status);

        if status == STATUS_COMPLETED {
            let receipt = Receipt {
                id: order_id_of(&order).unwrap_or(order_id).to_string(),
                email: email.to_string(),
            };
            self.send_receipt(receipt).await;
        }
        Ok(order)
    }

    /// Only the `client_token` string of the provider reply.
    pub async fn get_client_token(&self, customer_id: Option<&str>) -> Result<String, CheckoutError> {
        let token = self.tokens.get_access_token().await?;
        let mut request = self.authorized(Method::POST, GENERATE_TOKEN_PATH.to_string(), &token);
        if let Some(customer_id) = customer_id.filter(|c| !c.is_empty()) {
            request = request.json(&json!({ "customer_id": customer_id }));
        }

        let reply = send_json("generate_client_token", request).await?;
        match reply.get("client_token").and_then(Value::as_str) {
            Some(client_token) => Ok(client_token.to_owned()),
            None => {
                record_failure("generate_client_token", "malformed").await;
                Err(CheckoutError::malformed("client_token missing from generate-token response"))
            }
        }
    }

    async fn send_receipt(&self, receipt: Receipt) {
        let metrics = get_metrics().await;
        let id = receipt.id.clone();
        match self.receipts.send_receipt(receipt).await {
            Ok(()) => metrics.receipts_sent.inc(),
            Err(e) => {
                metrics.receipt_failures.inc();
                warn!("receipt for order {} not sent: {}", id, e);
            }
        }
    }

    fn authorized(&self, method: Method, path: String, token: &AccessToken) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.tokens.endpoint(), path))
            .header(AUTHORIZATION, token.bearer())
            .header(CONTENT_TYPE, "application/json")
    }
}

/// `purchase_units[0].payments.<authorizations|captures>[0].status`
pub fn completion_status(order: &Value, intent: Intent) -> Result<&str, CheckoutError> {
    let key = intent.payments_key();
    order
        .pointer(&format!("/purchase_units/0/payments/{}/0/status", key))
        .ok_or_else(|| CheckoutError::malformed(format!("order has no purchase_units[0].payments.{}[0].status", key)))?
        .as_str()
        .ok_or_else(|| CheckoutError::malformed(format!("payments.{}[0].status is not a string", key)))
}

fn order_id_of(order: &Value) -> Option<&str> {
    order.get("id").and_then(Value::as_str)
}

/// Order ids are interpolated into the provider path, so only url-safe
/// id characters are let through.
fn order_path(order_id: &str, action: Option<Intent>) -> Result<String, CheckoutError> {
    let valid = !order_id.is_empty()
        && order_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(CheckoutError::InvalidRequest(format!("invalid order id '{}'", order_id)));
    }
    Ok(match action {
        Some(intent) => format!("{}/{}/{}", ORDERS_PATH, order_id, intent.sub_path()),
        None => format!("{}/{}", ORDERS_PATH, order_id),
    })
}
