use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::provider::{CheckoutError, Intent};
use crate::server::extract::JsonOrForm;
use crate::server::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    pub intent: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteOrderBody {
    pub order_id: Option<String>,
    pub intent: Option<String>,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ClientTokenBody {
    pub customer_id: Option<String>,
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<CreateOrderBody>,
) -> Result<Json<Value>, CheckoutError> {
    let intent = required(body.intent.as_deref(), "intent").and_then(Intent::for_new_order)?;
    info!("POST /create_order intent: {}", intent);
    state.direct()?.create_order(intent).await.map(Json)
}

pub async fn complete_order(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<CompleteOrderBody>,
) -> Result<Json<Value>, CheckoutError> {
    let order_id = required(body.order_id.as_deref(), "order_id")?;
    let intent = Intent::for_completion(body.intent.as_deref());
    info!("POST /complete_order order: {}, intent: {}", order_id, intent);
    state
        .direct()?
        .complete_order(order_id, intent, &body.email)
        .await
        .map(Json)
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, CheckoutError> {
    value.ok_or_else(|| CheckoutError::InvalidRequest(format!("missing field `{}`", field)))
}

/// Responds with the bare client token string.
pub async fn get_client_token(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<ClientTokenBody>,
) -> Result<String, CheckoutError> {
    state.direct()?.get_client_token(body.customer_id.as_deref()).await
}

pub async fn api_create_order(State(state): State<AppState>) -> Result<Json<Value>, CheckoutError> {
    state.checkout()?.create_order(Intent::Capture).await.map(Json)
}

pub async fn api_get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, CheckoutError> {
    state.checkout()?.get_order(&order_id).await.map(Json)
}

pub async fn api_capture_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, CheckoutError> {
    state.checkout()?.capture_order(&order_id).await.map(Json)
}
