//! Outbound request model.
//!
//! A request is created fresh per call and never reused: the constructor
//! generates a new idempotency token each time, so a retried call can never
//! accidentally replay an earlier token.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
}

impl RequestMethod {
    /// The method name as it appears on the request line (and in the signing
    /// payload).
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Head => "HEAD",
        }
    }

    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Request body content.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

/// An outbound API request.
///
/// Header keys are case-insensitive with last-write-wins semantics; query
/// parameters preserve insertion order.
#[derive(Debug)]
pub struct ApiRequest {
    pub method: RequestMethod,
    /// Resource path relative to the base path, e.g. `/transaction/read`.
    pub path: String,
    /// Base path + resource path, without the query string.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query_params: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    /// Fresh per-request token letting the server deduplicate retries.
    pub idempotency_token: String,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Create a new request for `path` under `base_path`.
    pub fn new(
        method: RequestMethod,
        base_path: &str,
        path: &str,
        timeout: Duration,
    ) -> Self {
        let url = format!(
            "{}/{}",
            base_path.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        Self {
            method,
            path: path.to_string(),
            url,
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            idempotency_token: uuid::Uuid::new_v4().to_string(),
            timeout,
        }
    }

    /// Set a header. Keys are lowercased; setting the same key twice keeps
    /// the last value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Append a query parameter. Order is preserved.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: RequestBody) -> Self {
        if matches!(body, RequestBody::Json(_)) {
            self.headers
                .insert("content-type".to_string(), "application/json".to_string());
        }
        self.body = Some(body);
        self
    }

    /// The full URL including the encoded query string, if any.
    pub fn full_url(&self) -> String {
        if self.query_params.is_empty() {
            return self.url.clone();
        }

        let query = self
            .query_params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://app.corepay.com/api";

    #[test]
    fn test_url_building() {
        let req = ApiRequest::new(
            RequestMethod::Get,
            BASE,
            "/transaction/read",
            Duration::from_secs(25),
        );
        assert_eq!(req.url, "https://app.corepay.com/api/transaction/read");
        assert_eq!(req.full_url(), req.url);

        // Trailing/leading slashes collapse
        let req = ApiRequest::new(
            RequestMethod::Get,
            "https://app.corepay.com/api/",
            "transaction/read",
            Duration::from_secs(25),
        );
        assert_eq!(req.url, "https://app.corepay.com/api/transaction/read");
    }

    #[test]
    fn test_query_string_encoding_preserves_order() {
        let req = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25))
            .query("a", "1")
            .query("b", "2");
        assert_eq!(req.full_url(), format!("{}/x?a=1&b=2", BASE));

        let req = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25))
            .query("b", "2")
            .query("a", "1");
        assert_eq!(req.full_url(), format!("{}/x?b=2&a=1", BASE));
    }

    #[test]
    fn test_query_values_are_encoded() {
        let req = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25))
            .query("name", "a b&c");
        assert_eq!(req.full_url(), format!("{}/x?name=a%20b%26c", BASE));
    }

    #[test]
    fn test_headers_case_insensitive_last_write_wins() {
        let req = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25))
            .header("X-Custom", "first")
            .header("x-custom", "second");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("x-custom"), Some(&"second".to_string()));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = ApiRequest::new(RequestMethod::Post, BASE, "/x", Duration::from_secs(25))
            .body(RequestBody::Json(serde_json::json!({"a": 1})));
        assert_eq!(
            req.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_fresh_idempotency_token_per_request() {
        let a = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25));
        let b = ApiRequest::new(RequestMethod::Get, BASE, "/x", Duration::from_secs(25));
        assert_ne!(a.idempotency_token, b.idempotency_token);
        assert!(!a.idempotency_token.is_empty());
    }
}
