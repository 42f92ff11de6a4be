use http::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::credentials::Credentials;
use crate::provider::call::{self, record_failure};
use crate::provider::error::CheckoutError;
use crate::utils::constants::OAUTH2_TOKEN_PATH;

const OPERATION: &str = "oauth2_token";

/// Bearer token for one request; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
}

impl AccessToken {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

/// OAuth2 client-credentials exchange against `{endpoint}/v1/oauth2/token`,
/// the endpoint following the credentials' environment.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    credentials: Credentials,
    endpoint: String,
    client: Client,
}

impl TokenProvider {
    pub fn new(credentials: Credentials, base_url: Option<&str>, client: Client) -> Self {
        let endpoint = credentials.environment.api_root(base_url);
        Self { credentials, endpoint, client }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn get_access_token(&self) -> Result<AccessToken, CheckoutError> {
        let url = format!("{}{}", self.endpoint, OAUTH2_TOKEN_PATH);
        let request = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.credentials.basic_auth_header())
            .form(&[("grant_type", "client_credentials")]);

        let reply = call::send(OPERATION, request).await?;
        if !reply.status.is_success() {
            warn!("token request for client {} rejected: {}", self.credentials.client_id, reply.status);
            record_failure(OPERATION, "token_rejected").await;
            return Err(CheckoutError::TokenRejected { status: reply.status, body: reply.body });
        }

        let parsed: TokenResponse = call::parse_json(OPERATION, &reply.body).await?;

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!(
                    "access token acquired, type: {:?}, expires_in: {:?}",
                    parsed.token_type, parsed.expires_in
                );
                Ok(AccessToken { token })
            }
            None => {
                record_failure(OPERATION, "malformed").await;
                Err(CheckoutError::malformed("access_token missing from token response"))
            }
        }
    }
}
