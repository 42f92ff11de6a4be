use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::server::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Always 200; the provider is never contacted.
pub async fn check(State(state): State<AppState>) -> Json<CheckResponse> {
    Json(CheckResponse {
        message: "ok",
        env: state.health.env.clone(),
        base_url: state.health.base_url.clone(),
    })
}
