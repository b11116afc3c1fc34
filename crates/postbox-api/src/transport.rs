//! Request transport.
//!
//! A [`Transport`] sends one [`ApiRequest`] and hands back the raw status and
//! body. Interpreting the status is left to the caller so that rejected
//! requests and transport faults stay distinguishable.

use crate::error::{Error, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Sends requests to the mail API.
pub trait Transport: Send + Sync {
    /// Executes a single request. No retries.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport faults. An unsuccessful status is
    /// still an `Ok` response.
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path segments below the base URL, unencoded.
    pub segments: Vec<String>,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    #[must_use]
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(ToString::to_string).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Returns the path as `/a/b`, for logging and matching.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Body text.
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Converts an unsuccessful status into [`Error::Status`].
    ///
    /// # Errors
    ///
    /// Returns an error if the status is not 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::status(self.status, self.body))
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Decodes a string-valued body.
    ///
    /// A JSON string literal is unquoted and `null` is the empty string.
    /// Numbers and booleans keep their literal text, as does a body that is
    /// not JSON at all (trimmed). An empty body yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the body is a JSON object or array.
    pub fn text(&self) -> Result<String> {
        let trimmed = self.body.trim();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Null) => Ok(String::new()),
            Ok(Value::String(s)) => Ok(s),
            Ok(Value::Bool(_) | Value::Number(_)) | Err(_) => Ok(trimmed.to_string()),
            Ok(Value::Array(_) | Value::Object(_)) => Err(Error::Malformed(format!(
                "expected a string body, got {trimmed}"
            ))),
        }
    }
}

/// `reqwest`-backed transport rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http_client: Client,
}

impl HttpTransport {
    /// Base URL of the public mail directory server.
    pub const DEFAULT_BASE_URL: &'static str = "https://cmsc106.net/mail/";

    /// Creates a transport with a per-request timeout.
    ///
    /// A trailing slash is added to the base path if missing, so request
    /// paths always land below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http_client)
    }

    /// Creates a transport over a preconfigured `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or cannot carry a path.
    pub fn with_client(base_url: &str, http_client: Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the full URL for a request. Segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidConfig(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, path = %url.path(), "Sending request");

        let mut builder = self.http_client.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::get(&["user"])
            .with_query("user", "alice")
            .with_query("password", "secret");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), "/user");
        assert_eq!(request.query_param("user"), Some("alice"));
        assert_eq!(request.query_param("missing"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_request_json_body() {
        let request = ApiRequest::post(&["recipient"])
            .with_json(&serde_json::json!({"message": "m1", "recipient": "a"}))
            .unwrap();
        assert_eq!(request.body.unwrap()["recipient"], "a");
    }

    #[test]
    fn test_text_unquotes_json_string() {
        assert_eq!(RawResponse::ok("\"abc-123\"").text().unwrap(), "abc-123");
    }

    #[test]
    fn test_text_accepts_raw_body() {
        assert_eq!(RawResponse::ok("  success sent\n").text().unwrap(), "success sent");
        assert_eq!(RawResponse::ok("").text().unwrap(), "");
        assert_eq!(RawResponse::ok("42").text().unwrap(), "42");
    }

    #[test]
    fn test_text_null_is_empty() {
        assert_eq!(RawResponse::ok("null").text().unwrap(), "");
        assert_eq!(RawResponse::ok(" null\n").text().unwrap(), "");
    }

    #[test]
    fn test_text_rejects_structured_body() {
        let err = RawResponse::ok(r#"{"id": "m1"}"#).text().unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
        assert!(RawResponse::ok("[\"m1\"]").text().is_err());
    }

    #[test]
    fn test_error_for_status() {
        let ok = RawResponse::ok("x").error_for_status().unwrap();
        assert_eq!(ok.body, "x");

        let err = RawResponse::new(StatusCode::CONFLICT, "taken")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status_code(), Some(409));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8080/mail", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:8080/mail/");
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let transport =
            HttpTransport::new(HttpTransport::DEFAULT_BASE_URL, Duration::from_secs(1)).unwrap();
        let url = transport
            .url_for(&ApiRequest::delete(&["recipient", "u 1", "message", "a/b"]))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cmsc106.net/mail/recipient/u%201/message/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let err = HttpTransport::new("mailto:someone@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
