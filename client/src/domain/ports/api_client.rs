//! Driven port for the REST API transport.
//!
//! The port is deliberately untyped: adapters move JSON values in and out,
//! and [`ApiClientExt`] layers the typed `get`/`post`/`put`/`delete` helpers
//! on top so that services can ask for `Vec<Unit>` directly while tests mock a
//! single method.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::define_port_error;

/// Query parameters in a stable order.
pub type QueryParams = BTreeMap<String, String>;

/// HTTP verbs used by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Replace or update.
    Put,
    /// Remove.
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the API, relative to the adapter's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path below the API root, starting with `/`.
    pub path: String,
    /// Query parameters; empty means no query string.
    pub params: QueryParams,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            body: None,
        }
    }

    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST path` with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    /// `PUT path` with a JSON body.
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(body)
    }

    /// `DELETE path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Replace the query parameters.
    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

define_port_error! {
    /// Errors surfaced by the API transport.
    ///
    /// Services return these to their callers unchanged.
    pub enum ApiClientError {
        /// The request never produced a response.
        Transport {
            /// Transport failure description.
            message: String,
        } => "api transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout {
            /// Timeout description.
            message: String,
        } => "api request timed out: {message}",
        /// The requested resource does not exist.
        NotFound {
            /// Path that did not resolve.
            path: String,
        } => "api resource not found: {path}",
        /// The API rejected the caller's credentials.
        Unauthorized {
            /// Server-provided detail.
            message: String,
        } => "api request unauthorized: {message}",
        /// Any other non-success status.
        Status {
            /// HTTP status code.
            status: u16,
            /// Server-provided detail.
            message: String,
        } => "api returned status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode {
            /// Decoder failure description.
            message: String,
        } => "api response decode failed: {message}",
        /// The request could not be built.
        InvalidRequest {
            /// Reason the request was rejected.
            message: String,
        } => "api request invalid: {message}",
    }
}

/// Port for sending one request and returning the decoded JSON body.
///
/// Empty response bodies are reported as [`Value::Null`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send `request` and return the response body.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiClientError>;
}

/// Typed helpers over [`ApiClient`], available on every implementation.
#[async_trait]
pub trait ApiClientExt: ApiClient {
    /// `GET path?params`, decoding the body into `T`.
    async fn get<T>(&self, path: &str, params: QueryParams) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned + Send,
    {
        let body = self.send(ApiRequest::get(path).with_params(params)).await?;
        decode_body(body)
    }

    /// `POST path` with `payload` as JSON, decoding the body into `T`.
    async fn post<T, P>(&self, path: &str, payload: &P) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned + Send,
        P: Serialize + Sync + ?Sized,
    {
        let body = encode_payload(payload)?;
        let response = self.send(ApiRequest::post(path, body)).await?;
        decode_body(response)
    }

    /// `PUT path` with `payload` as JSON, decoding the body into `T`.
    async fn put<T, P>(&self, path: &str, payload: &P) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned + Send,
        P: Serialize + Sync + ?Sized,
    {
        let body = encode_payload(payload)?;
        let response = self.send(ApiRequest::put(path, body)).await?;
        decode_body(response)
    }

    /// `DELETE path`; any response body is discarded.
    async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        self.send(ApiRequest::delete(path)).await.map(drop)
    }
}

impl<C: ApiClient + ?Sized> ApiClientExt for C {}

fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T, ApiClientError> {
    serde_json::from_value(body).map_err(|err| ApiClientError::decode(err.to_string()))
}

fn encode_payload<P: Serialize + ?Sized>(payload: &P) -> Result<Value, ApiClientError> {
    serde_json::to_value(payload)
        .map_err(|err| ApiClientError::invalid_request(format!("payload encoding failed: {err}")))
}
