//! Typed REST client for the unit and user records of the signature-tracking
//! API.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] owns the read models, the [`domain::ports::ApiClient`] port,
//!   and the `UnitsService`/`UsersService` facades built on top of it.
//! - [`outbound`] provides the reqwest-backed adapter for the port.
//! - [`config`] loads client settings through OrthoConfig.
//!
//! Services never reach for a global client; callers construct one adapter and
//! inject it:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tama_client::config::ClientSettings;
//! use tama_client::domain::UnitsService;
//! use tama_client::outbound::http::HttpApiClient;
//!
//! let settings = ClientSettings::load_from_iter([std::ffi::OsString::from("tama")])?;
//! let client = Arc::new(HttpApiClient::from_settings(&settings)?);
//! let units = UnitsService::new(client).get_units(None).await?;
//! ```

pub mod config;
pub mod domain;
pub mod outbound;
