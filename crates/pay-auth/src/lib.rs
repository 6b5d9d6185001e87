//! # pay-auth
//!
//! Corepay authentication: application credentials and HMAC request signing.
//!
//! Every API call carries a MAC header set derived from the caller's
//! application user id and application key. The key is a base64-encoded
//! shared secret; it is decoded once at construction and the raw bytes are
//! used as the HMAC-SHA-512 key for a pipe-delimited signing payload:
//!
//! ```text
//! {version}|{user_id}|{timestamp}|{method}|{path}
//! ```
//!
//! The resulting digest is base64-encoded and sent as `x-mac-value` alongside
//! the plaintext version, user id, and timestamp headers. Query strings and
//! request bodies are not covered by the signature; that is a scope decision
//! of the remote API, not of this crate.
//!
//! ## Example
//!
//! ```rust
//! use corepay_auth::{ApplicationCredentials, RequestSigner};
//!
//! let creds = ApplicationCredentials::new(512, "dGVzdC1hcHBsaWNhdGlvbi1rZXk=")?;
//! let signer = RequestSigner::new(creds);
//! let headers = signer.auth_headers("GET", "/transaction/read");
//! assert_eq!(headers.len(), 4);
//! # Ok::<(), corepay_auth::Error>(())
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::ApplicationCredentials;
pub use error::{Error, ErrorKind, Result};
pub use signer::{RequestSigner, MAC_VERSION};
