#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::config::credentials::{Credentials, Environment};
    use crate::observability::metrics::get_metrics;
    use crate::provider::{CheckoutError, TokenProvider};
    use crate::tests::common::{build_reqwest_client, mock_token, DIRECT_BASIC_AUTH, TOKEN};

    fn provider(endpoint: &str) -> TokenProvider {
        TokenProvider::new(
            Credentials::new("id", "secret", Environment::Sandbox),
            Some(endpoint),
            build_reqwest_client(),
        )
    }

    #[test]
    fn endpoint_follows_credentials_environment() {
        let live = TokenProvider::new(
            Credentials::new("id", "secret", Environment::Live),
            None,
            build_reqwest_client(),
        );
        assert_eq!(live.endpoint(), "https://api-m.paypal.com");

        let sandbox = TokenProvider::new(
            Credentials::new("id", "secret", Environment::Sandbox),
            None,
            build_reqwest_client(),
        );
        assert_eq!(sandbox.endpoint(), "https://api-m.sandbox.paypal.com");
    }

    #[tokio::test]
    async fn client_credentials_exchange_returns_access_token() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server, DIRECT_BASIC_AUTH).await;

        let token = provider(&server.base_url()).get_access_token().await.unwrap();

        assert_eq!(token.token, TOKEN);
        assert_eq!(token.bearer(), format!("Bearer {}", TOKEN));
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn every_call_fetches_a_new_token() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server, DIRECT_BASIC_AUTH).await;
        let tokens = provider(&server.base_url());

        tokens.get_access_token().await.unwrap();
        tokens.get_access_token().await.unwrap();

        token_mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn rejected_credentials_are_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/oauth2/token");
                then.status(401).json_body(json!({
                    "error": "invalid_client",
                    "error_description": "Client Authentication failed"
                }));
            })
            .await;

        let err = provider(&server.base_url()).get_access_token().await.unwrap_err();
        match err {
            CheckoutError::TokenRejected { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_outage_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/oauth2/token");
                then.status(503).body("upstream unavailable");
            })
            .await;

        let err = provider(&server.base_url()).get_access_token().await.unwrap_err();
        assert!(matches!(err, CheckoutError::TokenRejected { .. }));
    }

    #[tokio::test]
    async fn missing_or_empty_access_token_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/oauth2/token");
                then.status(200).json_body(json!({ "access_token": "", "token_type": "Bearer" }));
            })
            .await;

        let err = provider(&server.base_url()).get_access_token().await.unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn non_json_token_reply_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/oauth2/token");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let failures = get_metrics()
            .await
            .upstream_failures
            .with_label_values(&["oauth2_token", "malformed"]);
        let before = failures.get();

        let err = provider(&server.base_url()).get_access_token().await.unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
        assert!(failures.get() > before);
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // nothing listens on port 1
        let err = provider("http://127.0.0.1:1").get_access_token().await.unwrap_err();
        assert!(matches!(err, CheckoutError::UpstreamTransport { .. }));
        assert_eq!(err.reason(), "transport");
    }

    #[tokio::test]
    async fn slow_provider_hits_the_call_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/oauth2/token");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(json!({ "access_token": TOKEN }));
            })
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let tokens = TokenProvider::new(
            Credentials::new("id", "secret", Environment::Sandbox),
            Some(&server.base_url()),
            client,
        );

        let err = tokens.get_access_token().await.unwrap_err();
        assert!(matches!(err, CheckoutError::UpstreamTransport { .. }));
        assert_eq!(err.reason(), "timeout");
    }
}
