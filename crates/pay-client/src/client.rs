//! The API client core: signed request dispatch.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, instrument};

use corepay_auth::{ApplicationCredentials, RequestSigner};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{ApiRequest, RequestBody, RequestMethod};
use crate::response::{classify, ApiResult, ResponseKind};
use crate::transport::Transport;

/// Client for the Corepay API.
///
/// Holds the configuration, the request signer, and the transport bound at
/// construction. The client carries no mutable state across calls: every
/// call builds a fresh request with a fresh idempotency token and a freshly
/// computed signature, so instances can be shared freely behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    signer: RequestSigner,
    transport: Transport,
}

impl ApiClient {
    /// Create a client with default configuration.
    pub fn new(credentials: ApplicationCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    ///
    /// The transport is selected here, once; it is not re-evaluated per call.
    pub fn with_config(
        credentials: ApplicationCredentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let transport = Transport::select(&config)?;
        Ok(Self {
            config,
            signer: RequestSigner::new(credentials),
            transport,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Call an API operation.
    ///
    /// Builds a signed request for `path`, dispatches it through the bound
    /// transport, and classifies the response. Header precedence, lowest to
    /// highest: client default headers, SDK identification headers, caller
    /// header params, idempotency token, authentication headers.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::Connection` / `ErrorKind::Timeout` for transport failures
    /// - `ErrorKind::Versioning` for HTTP 409
    /// - `ErrorKind::Api` for any other non-2xx response
    #[instrument(skip(self, body, header_params), fields(path = %path, method = ?method))]
    #[allow(clippy::too_many_arguments)]
    pub async fn call_api(
        &self,
        path: &str,
        method: RequestMethod,
        query_params: &[(String, String)],
        body: Option<RequestBody>,
        header_params: &HashMap<String, String>,
        response_kind: ResponseKind,
        timeout: Option<Duration>,
    ) -> Result<ApiResult> {
        let timeout = timeout.unwrap_or(self.config.timeout);

        let mut request = ApiRequest::new(method, &self.config.base_path, path, timeout);

        for (name, value) in query_params {
            request = request.query(name.clone(), value.clone());
        }

        for (name, value) in &self.config.default_headers {
            request = request.header(name.clone(), value.clone());
        }

        request = request
            .header("x-meta-sdk-version", crate::SDK_VERSION)
            .header("x-meta-sdk-language", crate::SDK_LANGUAGE)
            .header("x-meta-sdk-provider", crate::SDK_PROVIDER)
            .header("x-meta-sdk-language-version", crate::SDK_LANGUAGE_VERSION);

        for (name, value) in header_params {
            request = request.header(name.clone(), value.clone());
        }

        let token = request.idempotency_token.clone();
        request = request.header("x-idempotency-key", token);

        if let Some(body) = body {
            request = request.body(body);
        }

        // Auth headers are computed last and merged last; they always take
        // final precedence on key collision. The signature covers method and
        // path only, never the query string or body.
        for (name, value) in self.signer.auth_headers(method.as_str(), path) {
            request = request.header(name, value);
        }

        let url = request.full_url();

        if self.config.debug {
            debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "sending request");
        }

        let response = self.transport.send(&request).await?;

        if self.config.debug {
            debug!(status = response.status, "response received");
        }

        classify(response, response_kind, &url, path)
    }

    /// Call an API operation and deserialize the JSON payload.
    pub async fn call_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        method: RequestMethod,
        query_params: &[(String, String)],
        body: Option<RequestBody>,
    ) -> Result<T> {
        let result = self
            .call_api(
                path,
                method,
                query_params,
                body,
                &HashMap::new(),
                ResponseKind::Json,
                None,
            )
            .await?;
        result.data_as()
    }
}
