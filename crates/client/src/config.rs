//! Client configuration and credentials.
//!
//! Configuration can be built programmatically or loaded from the
//! environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MERIDIAN_ENDPOINT` | gateway URL | Service gateway to authenticate against |
//! | `MERIDIAN_USER_AGENT` | `meridian-client/<version>` | User-Agent sent by the HTTP transport |
//! | `MERIDIAN_TIMEOUT_SECS` | 30 | Request timeout in seconds |
//!
//! # Example
//!
//! ```rust
//! use meridian_client::ClientConfig;
//!
//! // From the environment, falling back to defaults.
//! let config = ClientConfig::from_env().unwrap();
//!
//! // Or programmatically.
//! let config = ClientConfig {
//!     request_timeout: std::time::Duration::from_secs(10),
//!     ..Default::default()
//! };
//! ```

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// The public gateway every session-open call goes to. Batch calls then
/// use the endpoint the service returned for the session.
const DEFAULT_GATEWAY: &str = "https://gateway.meridian-software.com/xml/v2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A configuration value could not be interpreted.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: String, message: String },
}

/// Connection settings for a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway URL used for the session-open call.
    pub endpoint: Url,

    /// User-Agent header sent by the HTTP transport.
    pub user_agent: String,

    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: Url::parse(DEFAULT_GATEWAY).expect("default gateway URL is valid"),
            user_agent: format!("meridian-client/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ClientConfig::default();

        if let Ok(endpoint) = std::env::var("MERIDIAN_ENDPOINT") {
            config.endpoint = Url::parse(&endpoint).map_err(|e| ConfigError::Invalid {
                var: "MERIDIAN_ENDPOINT".to_string(),
                message: e.to_string(),
            })?;
        }
        if let Ok(user_agent) = std::env::var("MERIDIAN_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(timeout) = std::env::var("MERIDIAN_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| ConfigError::Invalid {
                var: "MERIDIAN_TIMEOUT_SECS".to_string(),
                message: format!("{timeout:?} is not a number of seconds"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// A configuration pointing at a local test endpoint.
    pub fn for_testing() -> Self {
        ClientConfig {
            endpoint: Url::parse("http://localhost:8080/xml/v2").expect("test URL is valid"),
            ..Default::default()
        }
    }
}

/// Login credentials for opening a session.
///
/// The `Debug` implementation redacts the password so credentials can
/// appear in logs without leaking secrets.
#[derive(Clone)]
pub struct Credential {
    pub user_id: String,
    pub company_id: String,
    password: String,
}

impl Credential {
    pub fn new(
        user_id: impl Into<String>,
        company_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Credential {
            user_id: user_id.into(),
            company_id: company_id.into(),
            password: password.into(),
        }
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field("company_id", &self.company_id)
            .field("password", &"<redacted>")
            .finish()
    }
}
