use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Client;
use tracing::info;

use crate::config::credentials::{CheckoutCredentials, Credentials};
use crate::config::service::{HealthInfo, ServiceConfig};
use crate::config::settings::AssetsConfig;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::provider::{CheckoutError, OrderFacade, TokenProvider};
use crate::receipts::ReceiptSender;
use crate::server::{health, pages, routes};

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    /// CLIENT_ID / CLIENT_SECRET facade behind the simple checkout routes
    pub direct: Option<OrderFacade>,
    /// PAYPAL_* facade behind `/` and `/api/orders`
    pub checkout: Option<OrderFacade>,
    pub checkout_credentials: CheckoutCredentials,
    pub health: HealthInfo,
    pub assets: AssetsConfig,
}

impl AppState {
    pub async fn new(config: &ServiceConfig, receipts: Arc<dyn ReceiptSender>) -> Result<Self> {
        let metrics = get_metrics().await;
        let client = Client::builder().timeout(config.timeout()).build()?;

        let facade = |credentials: Credentials| {
            let tokens = TokenProvider::new(credentials, config.settings.provider.base_url.as_deref(), client.clone());
            OrderFacade::new(tokens, client.clone(), config.settings.order.clone(), receipts.clone())
        };

        Ok(Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            direct: config.direct.clone().map(&facade),
            checkout: config.checkout.credentials(config.environment).map(&facade),
            checkout_credentials: config.checkout.clone(),
            health: config.health.clone(),
            assets: config.settings.assets.clone(),
        })
    }

    pub fn direct(&self) -> Result<&OrderFacade, CheckoutError> {
        self.direct
            .as_ref()
            .ok_or_else(|| CheckoutError::Configuration("CLIENT_ID or CLIENT_SECRET is missing.".to_string()))
    }

    pub fn checkout(&self) -> Result<&OrderFacade, CheckoutError> {
        self.checkout.as_ref().ok_or_else(|| {
            CheckoutError::Configuration("PAYPAL_CLIENT_ID or PAYPAL_CLIENT_SECRET is missing.".to_string())
        })
    }
}

pub fn router(state: AppState, config: &ServiceConfig) -> Router {
    Router::new()
        .route("/create_order", post(routes::create_order))
        .route("/complete_order", post(routes::complete_order))
        .route("/get_client_token", post(routes::get_client_token))
        .route("/api/orders", post(routes::api_create_order))
        .route("/api/orders/{order_id}", post(routes::api_get_order))
        .route("/api/orders/{order_id}/capture", post(routes::api_capture_order))
        .route("/", get(pages::checkout_page))
        .route(
            &format!("/.well-known/{}", pages::APPLE_ASSOCIATION_FILE),
            get(pages::apple_association),
        )
        .route(&format!("/{}", pages::APPLE_PAY_STYLE_FILE), get(pages::apple_pay_style))
        .route("/check", get(health::check))
        .merge(MetricsState::router(&config.settings.metrics))
        .fallback(pages::public_file)
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn start(config: &ServiceConfig, receipts: Arc<dyn ReceiptSender>) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(config, receipts).await?;

    if state.direct.is_none() {
        info!("CLIENT_ID/CLIENT_SECRET not set, /create_order, /complete_order and /get_client_token will answer 500");
    }
    if state.checkout.is_none() {
        info!("PAYPAL_CLIENT_ID/PAYPAL_CLIENT_SECRET not set, / and /api/orders will answer 500");
    }

    let app = router(state, config);
    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server listening at http://{}/ ({} -> {})", bind_addr, config.environment.as_str(), config.endpoint());
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    metrics.up.set(0);
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available, run until the process is killed
        std::future::pending::<()>().await;
    }
}
