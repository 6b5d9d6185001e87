//! Client configuration.
//!
//! Configuration is immutable once built; the builder is the only mutation
//! surface. Validation happens in `build()`, so misconfiguration is reported
//! before the first call is made.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::transport::TransportKind;
use crate::{DEFAULT_BASE_PATH, DEFAULT_TIMEOUT_SECS};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base path of the API, e.g. `https://app.corepay.com/api`.
    pub base_path: String,
    /// Per-request timeout. Default 25 seconds.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Optional certificate-authority bundle (PEM file).
    pub ca_bundle: Option<PathBuf>,
    /// Whether to verify server certificates.
    pub verify_certificates: bool,
    /// Explicit transport preference. `None` means auto-detect.
    pub transport: Option<TransportKind>,
    /// Whether to emit request/response debug logging.
    pub debug: bool,
    /// Folder used for file-typed response payloads.
    pub temp_folder: PathBuf,
    /// Headers sent with every request (lowest precedence).
    pub default_headers: HashMap<String, String>,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(10),
            ca_bundle: None,
            verify_certificates: true,
            transport: None,
            debug: false,
            temp_folder: std::env::temp_dir(),
            default_headers: HashMap::new(),
            user_agent: crate::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Override the API base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = base_path.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Reset the per-request timeout to the default (25 seconds).
    pub fn reset_timeout(mut self) -> Self {
        self.config.timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Use a custom certificate-authority bundle (PEM file).
    pub fn with_ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ca_bundle = Some(path.into());
        self
    }

    /// Enable or disable server certificate verification.
    pub fn with_certificate_verification(mut self, verify: bool) -> Self {
        self.config.verify_certificates = verify;
        self
    }

    /// Pin the client to a specific transport. No fallback is attempted when
    /// an explicit preference cannot be satisfied.
    pub fn with_transport(mut self, kind: TransportKind) -> Self {
        self.config.transport = Some(kind);
        self
    }

    /// Enable or disable request/response debug logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the folder used for file-typed response payloads.
    pub fn with_temp_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_folder = path.into();
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config
            .default_headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Config` for an unparsable base path, a zero
    /// timeout, a missing CA bundle file, or malformed default headers.
    pub fn build(self) -> Result<ClientConfig> {
        let config = self.config;

        if config.base_path.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "base path is empty".to_string(),
            )));
        }
        url::Url::parse(&config.base_path)?;

        if config.timeout.is_zero() {
            return Err(Error::new(ErrorKind::Config(
                "timeout must be greater than zero".to_string(),
            )));
        }

        if let Some(ref path) = config.ca_bundle {
            if !path.is_file() {
                return Err(Error::new(ErrorKind::Config(format!(
                    "CA bundle not found: {}",
                    path.display()
                ))));
            }
        }

        for (name, value) in &config.default_headers {
            if name.trim().is_empty() {
                return Err(Error::new(ErrorKind::Config(
                    "header name is empty".to_string(),
                )));
            }
            if value.chars().any(|c| c.is_control()) {
                return Err(Error::new(ErrorKind::Config(format!(
                    "header '{}' contains control characters",
                    name
                ))));
            }
        }

        Ok(config)
    }
}
