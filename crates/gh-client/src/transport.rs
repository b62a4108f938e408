//! HTTP transport for the GitHub REST API
//!
//! A [`Transport`] executes exactly one request/response cycle:
//!
//! 1. build the final URL from the base URL, the request path and the query
//!    parameters
//! 2. encode the body according to the content negotiation of the request
//! 3. attach the bearer token and the API version header
//! 4. classify the response status and decode the JSON answer
//!
//! The actual bytes-on-the-wire exchange is delegated to an [`HttpBackend`],
//! which keeps the transport testable without a network.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Value of the `X-GitHub-Api-Version` header sent with every request
pub const API_VERSION: &str = "2022-11-28";

/// Plain JSON media type
pub const JSON: &str = "application/json";

/// GitHub's recommended JSON media type
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Raw media type for file contents
pub const RAW_CONTENT: &str = "application/vnd.github.VERSION.raw";

/// Overall timeout of a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!("gh-workflow-lander/", env!("CARGO_PKG_VERSION"));

/// A request against the API, relative to the transport's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path below the base URL (e.g. `/user/repos`)
    pub path: String,
    /// Query parameters; unique keys, emitted in key order
    pub query: BTreeMap<String, String>,
    /// Optional pre-formatted body, sent verbatim unless JSON is negotiated
    pub body: Option<String>,
    /// Optional `Content-Type`
    pub content_type: Option<String>,
    /// Optional `Accept`
    pub accept: Option<String>,
}

impl ApiRequest {
    /// Create a request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
            content_type: None,
            accept: None,
        }
    }

    /// Shorthand for a `GET` request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a query parameter, replacing an existing one with the same key
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set the `Content-Type` of the request
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the `Accept` media type of the request
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Attach a pre-formatted text body
    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Whether either content negotiation header asks for plain JSON
    pub fn negotiates_json(&self) -> bool {
        self.accept.as_deref() == Some(JSON) || self.content_type.as_deref() == Some(JSON)
    }

    /// Encode the body into the bytes that go on the wire
    ///
    /// The text is passed through untouched unless the request negotiates
    /// JSON, in which case it is serialized as a JSON string.
    pub fn encode_body(&self) -> Result<Option<Vec<u8>>> {
        match &self.body {
            None => Ok(None),
            Some(text) if self.negotiates_json() => Ok(Some(serde_json::to_vec(text)?)),
            Some(text) => Ok(Some(text.as_bytes().to_vec())),
        }
    }
}

/// A fully prepared HTTP request, ready for a backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Encoded body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response as returned by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Undecoded body
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the success range `[200, 299]`
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Performs the network exchange for a prepared request
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send the request and return the raw response
    ///
    /// Only failures to obtain a response at all are errors here; any HTTP
    /// status is a valid response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpBackend`] on top of `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend whose requests are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Error envelope of a rejected request
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

/// Executes authenticated requests against one API endpoint
#[derive(Clone)]
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    base_url: String,
    token: String,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Transport {
    /// Create a transport for `base_url` authenticated with `token`
    pub fn new(
        backend: Arc<dyn HttpBackend>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            backend,
            base_url,
            token: token.into(),
        }
    }

    /// Build the absolute URL of a request
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| ClientError::Transport(format!("invalid url '{}': {}", raw, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    /// Turn an [`ApiRequest`] into the exact request handed to the backend
    pub fn prepare(&self, request: &ApiRequest) -> Result<HttpRequest> {
        let url = self.url_for(request)?;
        let body = request.encode_body()?;

        let mut headers = Vec::with_capacity(4);
        if let Some(content_type) = request.content_type.as_deref().filter(|v| !v.is_empty()) {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        if let Some(accept) = request.accept.as_deref().filter(|v| !v.is_empty()) {
            headers.push(("Accept".to_string(), accept.to_string()));
        }
        headers.push(("Authorization".to_string(), format!("Bearer {}", self.token)));
        headers.push(("X-GitHub-Api-Version".to_string(), API_VERSION.to_string()));

        Ok(HttpRequest {
            method: request.method.clone(),
            url: url.to_string(),
            headers,
            body,
        })
    }

    /// Execute a request and return the raw body of a successful response
    ///
    /// Statuses outside `[200, 299]` fail with [`ClientError::Remote`]
    /// carrying the service-provided message.
    pub async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        let prepared = self.prepare(&request)?;
        debug!("{} {}", prepared.method, prepared.url);

        let response = self.backend.send(prepared).await?;
        if !response.is_success() {
            let envelope: ErrorEnvelope = serde_json::from_slice(&response.body)?;
            debug!(
                "{} {} rejected with {}: {}",
                request.method, request.path, response.status, envelope.message
            );
            return Err(ClientError::remote(response.status, envelope.message));
        }

        Ok(response.body)
    }

    /// Execute a request and decode the JSON response into `T`
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose response body carries no meaning
    ///
    /// The body is never decoded, so empty or non-JSON answers are fine.
    pub async fn execute_unit(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;
    use pretty_assertions::assert_eq;

    fn transport(backend: &Arc<ScriptedBackend>) -> Transport {
        Transport::new(backend.clone(), "https://api.example.test/", "secret")
    }

    #[test]
    fn test_url_appends_query_in_key_order() {
        let backend = ScriptedBackend::new();
        let request = ApiRequest::get("/user/repos")
            .query("visibility", "private")
            .query("per_page", "200");

        let url = transport(&backend).url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.test/user/repos?per_page=200&visibility=private"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let backend = ScriptedBackend::new();
        let url = transport(&backend)
            .url_for(&ApiRequest::get("/repos/acme/widgets"))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.test/repos/acme/widgets");
    }

    #[test]
    fn test_text_body_passes_through_without_json_negotiation() {
        let request = ApiRequest::post("/dispatch")
            .accept(GITHUB_JSON)
            .text_body(r#"{"ref": "main", "inputs": {}}"#);

        let body = request.encode_body().unwrap().unwrap();
        assert_eq!(body, br#"{"ref": "main", "inputs": {}}"#.to_vec());
    }

    #[test]
    fn test_text_body_is_json_encoded_when_negotiated() {
        let request = ApiRequest::post("/x").content_type(JSON).text_body("hi");
        let body = request.encode_body().unwrap().unwrap();
        assert_eq!(body, br#""hi""#.to_vec());
    }

    #[test]
    fn test_prepare_sets_auth_and_version_headers() {
        let backend = ScriptedBackend::new();
        let prepared = transport(&backend)
            .prepare(&ApiRequest::get("/user/repos").content_type(JSON))
            .unwrap();

        assert_eq!(prepared.header("authorization"), Some("Bearer secret"));
        assert_eq!(prepared.header("x-github-api-version"), Some(API_VERSION));
        assert_eq!(prepared.header("content-type"), Some(JSON));
        assert_eq!(prepared.header("accept"), None);
    }

    #[test]
    fn test_prepare_skips_empty_negotiation_headers() {
        let backend = ScriptedBackend::new();
        let prepared = transport(&backend)
            .prepare(&ApiRequest::get("/x").content_type("").accept(""))
            .unwrap();

        assert_eq!(prepared.header("content-type"), None);
        assert_eq!(prepared.header("accept"), None);
    }

    #[tokio::test]
    async fn test_non_success_status_fails_with_service_message() {
        let backend = ScriptedBackend::new();
        backend.respond(404, r#"{"message":"Not Found"}"#);

        let err = transport(&backend)
            .execute(ApiRequest::get("/repos/acme/missing"))
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::remote(404, "Not Found"));
    }

    #[tokio::test]
    async fn test_malformed_error_envelope_is_decode_error() {
        let backend = ScriptedBackend::new();
        backend.respond(502, "<html>bad gateway</html>");

        let err = transport(&backend)
            .execute(ApiRequest::get("/x"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let backend = ScriptedBackend::new();
        backend.respond(200, "{\"id\": ");

        let err = transport(&backend)
            .execute_json::<serde_json::Value>(ApiRequest::get("/x"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unit_execution_does_not_decode_body() {
        let backend = ScriptedBackend::new();
        backend.respond(202, "definitely not json");

        let result = transport(&backend)
            .execute_unit(ApiRequest::post("/repos/acme/widgets/actions/runs/1/cancel"))
            .await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_as_transport_error() {
        let backend = ScriptedBackend::new();
        backend.fail("operation timed out");

        let err = transport(&backend)
            .execute(ApiRequest::get("/x"))
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Transport("operation timed out".to_string()));
    }
}
