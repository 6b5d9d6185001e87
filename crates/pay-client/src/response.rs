//! Response handling and classification.
//!
//! Classification is a pure function of the response: the same status and
//! body always classify the same way. Three terminal outcomes exist per call:
//! success (2xx), version conflict (409), and generic API error (everything
//! else).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorDetail, ErrorKind, Result};

/// A raw HTTP response as produced by a transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are lowercased for case-insensitive lookups.
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response, normalizing header names to lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Build a response from a reqwest response, draining the body.
    pub async fn from_reqwest(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status().as_u16();
        // Header values are not guaranteed to be UTF-8; keep them lossily
        // rather than dropping them, classification may need them.
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp.bytes().await?;
        Ok(Self::new(status, headers, body))
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }
}

/// How the caller wants a successful response body decoded.
///
/// Decided at the call site; there is no inference from content types or
/// string hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Decode as JSON, degrading to the raw string when decoding fails.
    Json,
    /// Return the body as a string without parsing.
    RawString,
    /// Return the body bytes untouched (file downloads).
    RawBytes,
}

/// Decoded payload of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl Payload {
    /// The decoded JSON value, if this payload is JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The payload as text, if it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this payload is binary.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// The client-visible success value of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub data: Payload,
}

impl ApiResult {
    /// Deserialize the JSON payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Json` when the payload is not JSON or does not
    /// match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            Payload::Json(value) => {
                serde_json::from_value(value.clone()).map_err(Into::into)
            }
            Payload::Text(_) | Payload::Bytes(_) => Err(Error::new(ErrorKind::Json(
                "response payload is not JSON".to_string(),
            ))),
        }
    }

    /// Write a file-typed payload into `dir` and return the file path.
    ///
    /// The file name is a fresh UUID; callers pass the configured temp
    /// folder here.
    pub fn persist_to(&self, dir: &Path) -> Result<PathBuf> {
        let bytes: &[u8] = match &self.data {
            Payload::Bytes(bytes) => bytes,
            Payload::Text(text) => text.as_bytes(),
            Payload::Json(_) => {
                return Err(Error::new(ErrorKind::Other(
                    "JSON payloads are not persisted to disk".to_string(),
                )))
            }
        };

        let path = dir.join(uuid::Uuid::new_v4().to_string());
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Classify a raw response into a typed result or typed error.
///
/// `url` is the full request URL (embedded in generic error messages) and
/// `path` the resource path (carried by version-conflict errors).
pub fn classify(
    response: RawResponse,
    kind: ResponseKind,
    url: &str,
    path: &str,
) -> Result<ApiResult> {
    if response.is_success() {
        let data = match kind {
            ResponseKind::RawBytes => Payload::Bytes(response.body),
            ResponseKind::RawString => {
                Payload::Text(String::from_utf8_lossy(&response.body).into_owned())
            }
            // The API sometimes returns plain-text bodies even on success;
            // a decode failure degrades to the raw string rather than erroring.
            ResponseKind::Json => match serde_json::from_slice(&response.body) {
                Ok(value) => Payload::Json(value),
                Err(_) => Payload::Text(String::from_utf8_lossy(&response.body).into_owned()),
            },
        };

        return Ok(ApiResult {
            status: response.status,
            headers: response.headers,
            data,
        });
    }

    if response.status == 409 {
        return Err(Error::new(ErrorKind::Versioning {
            path: path.to_string(),
        }));
    }

    let body = ErrorDetail::from_body(&response.body);
    Err(Error::new(ErrorKind::Api {
        status: response.status,
        message: format!("[{}] Error calling API at {}", response.status, url),
        headers: response.headers,
        body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(status, HashMap::new(), Bytes::from(body.to_string()))
    }

    const URL: &str = "https://app.corepay.com/api/transaction/read";
    const PATH: &str = "/transaction/read";

    #[test]
    fn test_success_json() {
        let result = classify(response(200, r#"{"x":1}"#), ResponseKind::Json, URL, PATH).unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(result.data, Payload::Json(serde_json::json!({"x": 1})));
    }

    #[test]
    fn test_success_non_json_degrades_to_text() {
        let result = classify(response(200, "not-json"), ResponseKind::Json, URL, PATH).unwrap();
        assert_eq!(result.data, Payload::Text("not-json".into()));
    }

    #[test]
    fn test_success_raw_kinds() {
        let result =
            classify(response(200, r#"{"x":1}"#), ResponseKind::RawString, URL, PATH).unwrap();
        assert_eq!(result.data, Payload::Text(r#"{"x":1}"#.into()));

        let result =
            classify(response(200, "binary"), ResponseKind::RawBytes, URL, PATH).unwrap();
        assert_eq!(result.data, Payload::Bytes(Bytes::from("binary")));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let resp = response(200, r#"{"x":1}"#);
        let a = classify(resp.clone(), ResponseKind::Json, URL, PATH).unwrap();
        let b = classify(resp, ResponseKind::Json, URL, PATH).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_status_boundaries() {
        assert!(classify(response(299, "ok"), ResponseKind::RawString, URL, PATH).is_ok());

        let err = classify(response(300, "moved"), ResponseKind::Json, URL, PATH).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Api { status: 300, .. }));

        let err = classify(response(409, r#"{"x":1}"#), ResponseKind::Json, URL, PATH).unwrap_err();
        assert!(err.is_versioning());
    }

    #[test]
    fn test_conflict_carries_resource_path() {
        let err = classify(response(409, ""), ResponseKind::Json, URL, PATH).unwrap_err();
        match err.kind {
            ErrorKind::Versioning { path } => assert_eq!(path, PATH),
            other => panic!("expected Versioning, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_error_with_json_detail() {
        let err =
            classify(response(500, r#"{"error":"bad"}"#), ResponseKind::Json, URL, PATH)
                .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.api_body(),
            Some(&ErrorDetail::Json(serde_json::json!({"error": "bad"})))
        );
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_generic_error_with_text_detail() {
        let err = classify(response(502, "bad gateway"), ResponseKind::Json, URL, PATH)
            .unwrap_err();
        assert_eq!(err.api_body(), Some(&ErrorDetail::Text("bad gateway".into())));
    }

    #[test]
    fn test_data_as_typed() {
        #[derive(serde::Deserialize)]
        struct Out {
            x: u32,
        }

        let result = classify(response(200, r#"{"x":1}"#), ResponseKind::Json, URL, PATH).unwrap();
        let out: Out = result.data_as().unwrap();
        assert_eq!(out.x, 1);

        let result = classify(response(200, "not-json"), ResponseKind::Json, URL, PATH).unwrap();
        assert!(result.data_as::<Out>().is_err());
    }

    #[test]
    fn test_persist_to() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            classify(response(200, "file-content"), ResponseKind::RawBytes, URL, PATH).unwrap();

        let path = result.persist_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "file-content");
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        let resp = RawResponse::new(200, headers, Bytes::new());
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("text/plain"));
    }
}
