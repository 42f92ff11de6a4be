use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode, Uri};
use tracing::{debug, warn};

use crate::helpers::template::render_template;
use crate::provider::CheckoutError;
use crate::server::server::AppState;
use crate::utils::constants::MISSING_CHECKOUT_CREDENTIALS_MSG;

pub const APPLE_ASSOCIATION_FILE: &str = "apple-developer-merchantid-domain-association";
pub const APPLE_PAY_STYLE_FILE: &str = "applepaystyle.css";

static DEFAULT_CHECKOUT_TEMPLATE: &str = include_str!("../../views/checkout.html");

/// Checkout page with a fresh client token.
pub async fn checkout_page(State(state): State<AppState>) -> Result<Html<String>, CheckoutError> {
    let (client_id, merchant_id) = state
        .checkout_credentials
        .page_identity()
        .ok_or_else(|| CheckoutError::Configuration(MISSING_CHECKOUT_CREDENTIALS_MSG.to_string()))?;

    let client_token = state.checkout()?.get_client_token(None).await?;
    let template = load_template(Path::new(&state.assets.checkout_template)).await;

    let mut ctx = HashMap::new();
    ctx.insert("clientId", client_id.to_string());
    ctx.insert("clientToken", client_token);
    ctx.insert("merchantId", merchant_id.to_string());

    render_template(&template, &ctx)
        .map(Html)
        .map_err(|e| CheckoutError::Template(e.to_string()))
}

async fn load_template(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            debug!("template {} not readable ({}), using embedded page", path.display(), e);
            DEFAULT_CHECKOUT_TEMPLATE.to_string()
        }
    }
}

pub async fn apple_association(State(state): State<AppState>) -> Response {
    serve_file(&Path::new(&state.assets.root).join(APPLE_ASSOCIATION_FILE)).await
}

pub async fn apple_pay_style(State(state): State<AppState>) -> Response {
    serve_file(&Path::new(&state.assets.root).join(APPLE_PAY_STYLE_FILE)).await
}

/// Fallback: files under the public directory.
pub async fn public_file(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }
    match public_path(Path::new(&state.assets.public_dir), uri.path()) {
        Some(path) => serve_file(&path).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Joins the request path onto `root`; `..` and absolute segments are refused.
fn public_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() { "index.html" } else { relative };

    let mut path = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(CONTENT_TYPE, content_type(path))], bytes).into_response(),
        Err(e) => {
            warn!("static file {} not served: {}", path.display(), e);
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
