//! HTTP outbound adapter.
//!
//! This module provides a thin reqwest implementation of the `ApiClient`
//! port.

mod http_api_client;

pub use http_api_client::{HttpApiClient, HttpApiClientSetupError, REQUEST_ID_HEADER};
