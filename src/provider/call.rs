use http::StatusCode;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::observability::metrics::get_metrics;
use crate::provider::error::CheckoutError;

/// Raw status and body of one provider call
#[derive(Debug)]
pub struct RawReply {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one request and records its status/latency under `operation`.
pub async fn send(operation: &'static str, request: RequestBuilder) -> Result<RawReply, CheckoutError> {
    let metrics = get_metrics().await;
    let start = Instant::now();

    let result = async {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok::<_, reqwest::Error>(RawReply { status, body })
    }
    .await;

    metrics
        .upstream_duration
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());

    match result {
        Ok(reply) => {
            debug!("{} -> {}", operation, reply.status);
            metrics
                .upstream_requests
                .with_label_values(&[operation, reply.status.as_str()])
                .inc();
            Ok(reply)
        }
        Err(e) => {
            let err = CheckoutError::transport(operation, e);
            metrics
                .upstream_failures
                .with_label_values(&[operation, err.reason()])
                .inc();
            Err(err)
        }
    }
}

/// Sends and parses the JSON reply. Non-2xx replies come back as
/// `CheckoutError::Upstream` carrying the provider's own body.
pub async fn send_json(operation: &'static str, request: RequestBuilder) -> Result<Value, CheckoutError> {
    let reply = send(operation, request).await?;
    let parsed: Result<Value, CheckoutError> = parse_json(operation, &reply.body).await;

    if !reply.status.is_success() {
        let body = parsed?;
        record_failure(operation, "upstream").await;
        return Err(CheckoutError::Upstream { status: reply.status, body });
    }
    parsed
}

/// Parses a provider body; a non-JSON body counts as a `malformed` failure.
pub async fn parse_json<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T, CheckoutError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(e) => {
            record_failure(operation, "malformed").await;
            Err(CheckoutError::malformed(format!("{}: response is not JSON ({})", operation, e)))
        }
    }
}

pub async fn record_failure(operation: &'static str, reason: &str) {
    get_metrics()
        .await
        .upstream_failures
        .with_label_values(&[operation, reason])
        .inc();
}
