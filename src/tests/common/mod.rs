// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use reqwest::Client;

use crate::config::credentials::{Credentials, Environment};
use crate::config::service::{EnvInputs, ServiceConfig};
use crate::config::settings::{OrderAmountConfig, SettingsConfig};
use crate::provider::{OrderFacade, TokenProvider};
use crate::receipts::{Receipt, ReceiptSender};
use crate::server::server::{router, AppState};

pub const TOKEN: &str = "A21AAFEpH4PsADK7qSS7pSRsgzfENtu";
/// base64("id:secret")
pub const DIRECT_BASIC_AUTH: &str = "Basic aWQ6c2VjcmV0";
/// base64("cid:csecret")
pub const CHECKOUT_BASIC_AUTH: &str = "Basic Y2lkOmNzZWNyZXQ=";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Receipt sender that keeps everything it was handed.
#[derive(Default, Clone)]
pub struct RecordingReceipts {
    pub sent: Arc<Mutex<Vec<Receipt>>>,
}

impl RecordingReceipts {
    pub fn sent(&self) -> Vec<Receipt> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReceiptSender for RecordingReceipts {
    async fn send_receipt(&self, receipt: Receipt) -> Result<()> {
        self.sent.lock().unwrap().push(receipt);
        Ok(())
    }
}

/// Token endpoint answering with `TOKEN` for the given basic auth header.
pub async fn mock_token<'a>(server: &'a MockServer, basic_auth: &str) -> Mock<'a> {
    let basic_auth = basic_auth.to_string();
    server
        .mock_async(move |when, then| {
            when.method(POST)
                .path("/v1/oauth2/token")
                .header("Authorization", basic_auth)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body("grant_type=client_credentials");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "scope": "https://uri.paypal.com/services/payments/payment",
                    "access_token": TOKEN,
                    "token_type": "Bearer",
                    "app_id": "APP-80W284485P519543T",
                    "expires_in": 31668,
                    "nonce": "2020-04-03T15:35:36ZaYZlGvEkV4yVSz8g6bAKFoGSEzuy3CQcz3ljhibkOHg"
                }));
        })
        .await
}

pub fn direct_facade(endpoint: &str, receipts: Arc<dyn ReceiptSender>) -> OrderFacade {
    let client = build_reqwest_client();
    let tokens = TokenProvider::new(
        Credentials::new("id", "secret", Environment::Sandbox),
        Some(endpoint),
        client.clone(),
    );
    OrderFacade::new(tokens, client, OrderAmountConfig::default(), receipts)
}

pub fn direct_inputs() -> EnvInputs {
    EnvInputs {
        client_id: Some("id".into()),
        client_secret: Some("secret".into()),
        ..Default::default()
    }
}

pub fn checkout_inputs() -> EnvInputs {
    EnvInputs {
        paypal_client_id: Some("cid".into()),
        paypal_client_secret: Some("csecret".into()),
        paypal_merchant_id: Some("MERCHANT42".into()),
        ..Default::default()
    }
}

pub fn test_settings(endpoint: &str) -> SettingsConfig {
    let mut settings = SettingsConfig::default();
    settings.provider.base_url = Some(endpoint.to_string());
    settings.provider.timeout_ms = 2000;
    settings
}

pub fn test_config(endpoint: &str, inputs: EnvInputs) -> ServiceConfig {
    ServiceConfig::assemble(test_settings(endpoint), inputs)
}

/// Full router on an ephemeral port; returns the base url.
pub async fn spawn_app(config: &ServiceConfig, receipts: Arc<dyn ReceiptSender>) -> (JoinHandle<()>, String) {
    let state = AppState::new(config, receipts).await.expect("app state");
    let (handle, addr) = spawn_axum(router(state, config)).await;
    (handle, format!("http://{}", addr))
}
