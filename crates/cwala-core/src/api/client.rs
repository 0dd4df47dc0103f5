//! HTTP client for the Campaignwala API.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::ApiError;
use crate::config::Config;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.campaignwala.com";

/// Resolves the API base URL from env, config, then the default.
///
/// `CWALA_API_URL` always wins so tests and staging can redirect the
/// client without touching config.toml.
pub fn resolve_base_url(config: &Config) -> String {
    if let Ok(url) = std::env::var("CWALA_API_URL") {
        let url = url.trim();
        if !url.is_empty() {
            return url.trim_end_matches('/').to_string();
        }
    }

    config
        .effective_api_url()
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Campaignwala API client.
///
/// Cheap to clone; holds the base URL, an optional bearer token and a
/// shared `reqwest::Client`.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client for the given base URL.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production API.
    /// - At runtime, panics if `CWALA_BLOCK_REAL_API=1` and `base_url` is the production API.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Use the `CWALA_API_URL` env var or config to point to a mock server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        // Compile-time guard for unit tests
        #[cfg(test)]
        if base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production Campaignwala API!\n\
                 Set CWALA_API_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        // Runtime guard for integration tests (set CWALA_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("CWALA_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == DEFAULT_BASE_URL
        {
            panic!(
                "CWALA_BLOCK_REAL_API=1 but trying to use the production Campaignwala API!\n\
                 Set CWALA_API_URL to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            base_url,
            access_token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client using the resolved base URL for this config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(resolve_base_url(config))
    }

    /// Attaches a bearer token for authenticated endpoints.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(ApiError::parse)
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(reqwest::Method::GET, path)).await
    }

    /// POST a JSON body, expecting a JSON response.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    /// PUT a JSON body, expecting a JSON response.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    /// DELETE a resource, expecting a JSON response.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(reqwest::Method::DELETE, path))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::errors::ApiErrorKind;
    use crate::api::types::{MessageResponse, WalletBalance};

    /// GET decodes a typed JSON response.
    #[tokio::test]
    async fn test_get_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/wallet/balance"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"balance": 1240.5, "currency": "INR"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let balance: WalletBalance = client.get("/api/wallet/balance").await.unwrap();

        assert!((balance.balance - 1240.5).abs() < f64::EPSILON);
        assert_eq!(balance.currency, "INR");
    }

    /// Bearer token is attached when present.
    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/profile"))
            .and(header("authorization", "Bearer token-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token(Some("token-abc".to_string()));
        let _: MessageResponse = client.get("/api/users/profile").await.unwrap();
    }

    /// POST sends the JSON body as-is.
    #[tokio::test]
    async fn test_post_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(
                json!({"email": "a@b.com", "password": "secret1"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "sent"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let resp: MessageResponse = client
            .post(
                "/api/auth/login",
                &json!({"email": "a@b.com", "password": "secret1"}),
            )
            .await
            .unwrap();
        assert_eq!(resp.message, "sent");
    }

    /// Non-2xx responses become Rejected with the server's message.
    #[tokio::test]
    async fn test_error_status_maps_to_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/wallet/balance"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client
            .get::<WalletBalance>("/api/wallet/balance")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Rejected);
        assert_eq!(err.message, "Invalid token");
    }

    /// Unreachable server maps to the Network kind.
    #[tokio::test]
    async fn test_connect_failure_maps_to_network() {
        // Port 1 is never listening
        let client = ApiClient::new("http://127.0.0.1:1");
        let err = client
            .get::<WalletBalance>("/api/wallet/balance")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Network);
    }

    /// A 200 with a body that doesn't match the type maps to Parse.
    #[tokio::test]
    async fn test_unexpected_body_maps_to_parse() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/wallet/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client
            .get::<WalletBalance>("/api/wallet/balance")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    /// Trailing slash on the base URL is normalized away.
    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:9/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }

    /// resolve_base_url falls back to the default when config is empty.
    #[test]
    fn test_resolve_base_url_default() {
        // Only valid when CWALA_API_URL is unset in the test environment
        if std::env::var("CWALA_API_URL").is_err() {
            let config = Config::default();
            assert_eq!(resolve_base_url(&config), DEFAULT_BASE_URL);
        }
    }

    /// resolve_base_url prefers the config value over the default.
    #[test]
    fn test_resolve_base_url_from_config() {
        if std::env::var("CWALA_API_URL").is_err() {
            let config = Config {
                api_url: Some("https://staging.campaignwala.com/".to_string()),
                ..Default::default()
            };
            assert_eq!(
                resolve_base_url(&config),
                "https://staging.campaignwala.com"
            );
        }
    }
}
