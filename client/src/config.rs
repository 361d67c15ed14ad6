//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `TAMA_API_*` environment variables or a config file;
//! absent values fall back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP API client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TAMA_API")]
pub struct ClientSettings {
    /// Server origin; the client appends `/api/v1`.
    pub url: Option<String>,
    /// Per-request timeout in seconds; zero selects the default.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
}

impl ClientSettings {
    /// Return the configured server origin, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.url.as_deref().unwrap_or(DEFAULT_API_URL))
    }

    /// Return the request timeout, falling back to the default.
    ///
    /// A zero timeout is treated as unset.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Return the configured user agent, falling back to the crate identity.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
