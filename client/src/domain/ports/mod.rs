//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_client;

#[cfg(test)]
pub use api_client::MockApiClient;
pub use api_client::{
    ApiClient, ApiClientError, ApiClientExt, ApiRequest, HttpMethod, QueryParams,
};
