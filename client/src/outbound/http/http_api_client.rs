//! Reqwest-backed API client adapter.
//!
//! This adapter owns transport details only: URL resolution below `/api/v1`,
//! request identification, timeout and HTTP error mapping, and JSON decoding
//! of the response body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::config::ClientSettings;
use crate::domain::ports::{ApiClient, ApiClientError, ApiRequest, HttpMethod};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const API_ROOT: &str = "/api/v1";

/// Errors raised while constructing [`HttpApiClient`].
#[derive(Debug, Error)]
pub enum HttpApiClientSetupError {
    /// The configured server URL is unusable.
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The configured server URL cannot carry a path.
    #[error("api url {0} cannot be used as a base")]
    NotABase(String),
    /// The reqwest client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// API client adapter that sends JSON requests below `{api_url}/api/v1`.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build an adapter for `api_url` with an explicit request timeout.
    /// ```rust,ignore
    /// let client = HttpApiClient::new(api_url, Duration::from_secs(30), "tama-client/0.1");
    /// assert!(client.is_ok() || client.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when `api_url` cannot be a base URL or the reqwest
    /// client cannot be constructed.
    pub fn new(
        api_url: Url,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, HttpApiClientSetupError> {
        if api_url.cannot_be_a_base() {
            return Err(HttpApiClientSetupError::NotABase(api_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        let base_url = format!("{}{API_ROOT}", api_url.as_str().trim_end_matches('/'));
        Ok(Self { client, base_url })
    }

    /// Build an adapter from loaded [`ClientSettings`].
    ///
    /// # Errors
    ///
    /// Returns an error when the configured URL is invalid or the reqwest
    /// client cannot be constructed.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, HttpApiClientSetupError> {
        Self::new(
            settings.api_url()?,
            settings.timeout(),
            settings.user_agent(),
        )
    }

    /// Root URL that request paths are appended to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        if !path.starts_with('/') {
            return Err(ApiClientError::invalid_request(format!(
                "path must start with '/': {path}"
            )));
        }
        if path.split('/').any(is_dot_segment) {
            return Err(ApiClientError::invalid_request(format!(
                "path must not contain dot segments: {path}"
            )));
        }
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| ApiClientError::invalid_request(format!("invalid path {path}: {err}")))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiClientError> {
        let url = self.endpoint(&request.path)?;
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "api.request",
            http.method = %request.method,
            path = %request.path,
            request_id = %request_id
        );

        let mut builder = self
            .client
            .request(reqwest_method(request.method), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        async {
            let response = builder.send().await.map_err(map_transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(map_transport_error)?;
            debug!(status = status.as_u16(), bytes = body.len(), "api response received");

            if !status.is_success() {
                return Err(map_status_error(status, &request.path, body.as_ref()));
            }
            parse_body(body.as_ref())
        }
        .instrument(span)
        .await
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ApiClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiClientError::decode(format!("invalid JSON payload: {err}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiClientError {
    if error.is_timeout() {
        ApiClientError::timeout(error.to_string())
    } else if error.is_decode() {
        ApiClientError::decode(error.to_string())
    } else {
        ApiClientError::transport(error.to_string())
    }
}

/// `.` and `..` in any of their percent-encoded spellings.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn map_status_error(status: StatusCode, path: &str, body: &[u8]) -> ApiClientError {
    let detail = error_detail(body);
    let message = if detail.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no detail")
            .to_owned()
    } else {
        detail
    };

    match status {
        StatusCode::NOT_FOUND => ApiClientError::not_found(path),
        StatusCode::UNAUTHORIZED => ApiClientError::unauthorized(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ApiClientError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => ApiClientError::status(status.as_u16(), message),
    }
}

/// Prefer the API's `{"detail": "..."}` message, else a compact body preview.
fn error_detail(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Adapter behaviour against a local HTTP fixture server.

    use super::*;
    use std::net::TcpListener;

    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::domain::ports::QueryParams;

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer, timeout: Duration) -> HttpApiClient {
        let api_url = Url::parse(&server.uri()).expect("mock server uri");
        HttpApiClient::new(api_url, timeout, "tama-client-test/0.1").expect("client builds")
    }

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/api/v1")]
    #[case("http://localhost:8000/", "http://localhost:8000/api/v1")]
    #[case("https://example.test/tama", "https://example.test/tama/api/v1")]
    fn base_url_appends_api_root(#[case] api_url: &str, #[case] expected: &str) {
        let client = HttpApiClient::new(
            Url::parse(api_url).expect("valid url"),
            Duration::from_secs(1),
            "test",
        )
        .expect("client builds");
        assert_eq!(client.base_url(), expected);
    }

    #[test]
    fn rejects_urls_that_cannot_be_a_base() {
        let url = Url::parse("mailto:ops@example.test").expect("valid url");
        let err = HttpApiClient::new(url, Duration::from_secs(1), "test").expect_err("not a base");
        assert!(matches!(err, HttpApiClientSetupError::NotABase(_)));
    }

    #[test]
    fn relative_paths_are_invalid_requests() {
        let client = HttpApiClient::new(
            Url::parse("http://localhost:8000").expect("valid url"),
            Duration::from_secs(1),
            "test",
        )
        .expect("client builds");
        let err = client.endpoint("units").expect_err("relative path");
        assert!(matches!(err, ApiClientError::InvalidRequest { .. }));
    }

    #[rstest]
    #[case("/units/..")]
    #[case("/units/.")]
    #[case("/units/%2e%2E")]
    #[case("/units/.%2E")]
    #[case("/users/../units")]
    fn dot_segments_are_invalid_requests(#[case] dotted: &str) {
        let client = HttpApiClient::new(
            Url::parse("http://localhost:8000").expect("valid url"),
            Duration::from_secs(1),
            "test",
        )
        .expect("client builds");
        let err = client.endpoint(dotted).expect_err("dot segment");
        assert!(matches!(err, ApiClientError::InvalidRequest { .. }), "got {err:?}");
    }

    #[rstest]
    #[case("/units/U1.2", "http://localhost:8000/api/v1/units/U1.2")]
    #[case("/units/...", "http://localhost:8000/api/v1/units/...")]
    fn dotted_identifiers_stay_in_their_segment(#[case] raw: &str, #[case] expected: &str) {
        let client = HttpApiClient::new(
            Url::parse("http://localhost:8000").expect("valid url"),
            Duration::from_secs(1),
            "test",
        )
        .expect("client builds");
        let url = client.endpoint(raw).expect("plain segment");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, ApiClientError::not_found("/units/U1"))]
    #[case(StatusCode::UNAUTHORIZED, ApiClientError::unauthorized("nope"))]
    #[case(StatusCode::REQUEST_TIMEOUT, ApiClientError::timeout("status 408: nope"))]
    #[case(StatusCode::GATEWAY_TIMEOUT, ApiClientError::timeout("status 504: nope"))]
    #[case(StatusCode::FORBIDDEN, ApiClientError::status(403_u16, "nope"))]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, ApiClientError::status(500_u16, "nope"))]
    fn maps_http_statuses_to_port_errors(
        #[case] status: StatusCode,
        #[case] expected: ApiClientError,
    ) {
        let error = map_status_error(status, "/units/U1", br#"{"detail": "nope"}"#);
        assert_eq!(error, expected);
    }

    #[test]
    fn status_error_without_detail_uses_body_preview() {
        let error = map_status_error(
            StatusCode::BAD_GATEWAY,
            "/units",
            b"<html>\n  upstream   down\n</html>",
        );
        assert_eq!(
            error,
            ApiClientError::status(502_u16, "<html> upstream down </html>")
        );
    }

    #[test]
    fn status_error_with_empty_body_uses_reason_phrase() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, "/units", b"");
        assert_eq!(
            error,
            ApiClientError::status(503_u16, "Service Unavailable")
        );
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"  \n".as_slice())]
    fn empty_bodies_decode_to_null(#[case] body: &[u8]) {
        assert_eq!(parse_body(body).expect("empty body"), Value::Null);
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = parse_body(b"{not json").expect_err("invalid json");
        assert!(matches!(err, ApiClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn get_sends_query_and_request_id_below_api_root() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/units"))
            .and(query_param("building_id", "B1"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", "tama-client-test/0.1"))
            .and(header_exists("x-request-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let params = QueryParams::from([("building_id".to_owned(), "B1".to_owned())]);
        let body = client
            .send(ApiRequest::get("/units").with_params(params))
            .await
            .expect("listing");
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/units"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"building_id": "B1", "unit_number": "5"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"unit_id": "U5"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let body = client
            .send(ApiRequest::post(
                "/units",
                json!({"building_id": "B1", "unit_number": "5"}),
            ))
            .await
            .expect("created");
        assert_eq!(body, json!({"unit_id": "U5"}));
    }

    #[tokio::test]
    async fn no_content_response_is_null() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/users/X1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let body = client
            .send(ApiRequest::delete("/users/X1"))
            .await
            .expect("deleted");
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn dot_segment_delete_never_reaches_the_server() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client
            .send(ApiRequest::delete("/units/.."))
            .await
            .expect_err("dot segment");
        assert!(matches!(err, ApiClientError::InvalidRequest { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn not_found_response_maps_to_not_found() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/units/U404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Unit not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client
            .send(ApiRequest::get("/units/U404"))
            .await
            .expect_err("missing unit");
        assert_eq!(err, ApiClientError::not_found("/units/U404"));
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(50));
        let err = client
            .send(ApiRequest::get("/users"))
            .await
            .expect_err("request should time out");
        assert!(matches!(err, ApiClientError::Timeout { .. }), "got {err:?}");
    }
}
