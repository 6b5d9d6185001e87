//! # pay-client
//!
//! Core HTTP dispatch for the Corepay API.
//!
//! This crate provides the layer every resource service shares:
//! - Signed request construction (MAC headers via `corepay-auth`)
//! - Pluggable transport selection with deterministic fallback
//! - Response classification into typed results and typed errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource services                        │
//! │  (corepay-rest: transactions, refunds, ...)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ApiClient                             │
//! │  - Builds the request with a fresh idempotency token        │
//! │  - Merges default / caller / auth headers                   │
//! │  - Signs and dispatches, then classifies the response       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Transport                             │
//! │  - Http: reqwest (TLS, pooling)                             │
//! │  - Socket: minimal HTTP/1.1 over TcpStream                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use corepay_auth::ApplicationCredentials;
//! use corepay_client::{ApiClient, ClientConfig, RequestMethod, ResponseKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), corepay_client::Error> {
//!     let creds = ApplicationCredentials::from_env()?;
//!     let client = ApiClient::with_config(creds, ClientConfig::default())?;
//!
//!     let result = client
//!         .call_api(
//!             "/transaction/read",
//!             RequestMethod::Get,
//!             &[("spaceId".into(), "405".into()), ("id".into(), "1".into())],
//!             None,
//!             &Default::default(),
//!             ResponseKind::Json,
//!             None,
//!         )
//!         .await?;
//!
//!     println!("{:?}", result.data);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorDetail, ErrorKind, Result};
pub use request::{ApiRequest, RequestBody, RequestMethod};
pub use response::{ApiResult, Payload, RawResponse, ResponseKind};
pub use transport::{Transport, TransportKind};

/// Default base path of the production API.
pub const DEFAULT_BASE_PATH: &str = "https://app.corepay.com/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("corepay-rust/", env!("CARGO_PKG_VERSION"));

/// SDK identification headers sent with every request.
pub(crate) const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const SDK_LANGUAGE: &str = "rust";
pub(crate) const SDK_PROVIDER: &str = "corepay";
pub(crate) const SDK_LANGUAGE_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");
