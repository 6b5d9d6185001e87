//! Error types for pay-client.

use std::collections::HashMap;

/// Result type alias for pay-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pay-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns true if this is a transport-level connection or timeout error.
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection(_) | ErrorKind::Timeout)
    }

    /// Returns true if this is a version conflict (HTTP 409).
    pub fn is_versioning(&self) -> bool {
        matches!(self.kind, ErrorKind::Versioning { .. })
    }

    /// Returns the HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the decoded-or-raw response body for API errors.
    pub fn api_body(&self) -> Option<&ErrorDetail> {
        match &self.kind {
            ErrorKind::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid configuration. Raised as early as possible, usually at
    /// construction; a transport pinned to an unusable scheme reports it
    /// on first send.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure before any HTTP status is known.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The configured timeout elapsed before the transport returned.
    #[error("Request timeout")]
    Timeout,

    /// Version conflict (HTTP 409). The resource changed since it was last
    /// read; callers may re-read and retry.
    #[error("Version conflict on {path}")]
    Versioning { path: String },

    /// Any other non-2xx response from the API.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        headers: HashMap<String, String>,
        body: ErrorDetail,
    },

    /// JSON serialization error building a request payload.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Error detail carried by API errors: decoded JSON when the body parses,
/// the raw body string otherwise. The API is not guaranteed to return JSON,
/// so decode failures degrade rather than escalate.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Json(serde_json::Value),
    Text(String),
}

impl ErrorDetail {
    /// Decode a response body leniently.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => ErrorDetail::Json(value),
            Err(_) => ErrorDetail::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let err = Error::new(ErrorKind::Config("bad base path".into()));
        assert!(err.is_config());
        assert!(!err.is_connection());

        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_connection());

        let err = Error::new(ErrorKind::Connection("refused".into()));
        assert!(err.is_connection());

        let err = Error::new(ErrorKind::Versioning {
            path: "/transaction/update".into(),
        });
        assert!(err.is_versioning());
        assert_eq!(err.to_string(), "Version conflict on /transaction/update");
    }

    #[test]
    fn test_api_error_accessors() {
        let err = Error::new(ErrorKind::Api {
            status: 500,
            message: "[500] Error calling API at https://example.com/api/x".into(),
            headers: HashMap::new(),
            body: ErrorDetail::Json(serde_json::json!({"error": "bad"})),
        });

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.api_body(),
            Some(&ErrorDetail::Json(serde_json::json!({"error": "bad"})))
        );
        assert!(err.to_string().contains("https://example.com/api/x"));
    }

    #[test]
    fn test_error_detail_lenient_decode() {
        assert_eq!(
            ErrorDetail::from_body(br#"{"error":"bad"}"#),
            ErrorDetail::Json(serde_json::json!({"error": "bad"}))
        );
        assert_eq!(
            ErrorDetail::from_body(b"service unavailable"),
            ErrorDetail::Text("service unavailable".into())
        );
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(err.is_config());
        assert!(err.to_string().contains("Invalid URL"));
    }
}
