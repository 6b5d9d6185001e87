//! # corepay-api
//!
//! A Corepay payment API client library for Rust.
//!
//! This library provides type-safe access to the Corepay API with built-in
//! HMAC request signing, transport selection, and error handling.
//!
//! ## Security
//!
//! - The application key is redacted in Debug output
//! - Tracing/logging never emits key material
//! - Every request carries a fresh, timestamp-bound signature
//!
//! ## Crates
//!
//! - **corepay-auth** - Application credentials and HMAC-SHA-512 request signing
//! - **corepay-client** - Core dispatch: request building, transport selection, response classification
//! - **corepay-rest** - Resource services: transactions, refunds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use corepay_api::auth::ApplicationCredentials;
//! use corepay_api::rest::{Corepay, TransactionCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = ApplicationCredentials::from_env()?;
//!     let api = Corepay::new(creds, 405)?;
//!
//!     let tx = api
//!         .transactions()
//!         .create(&TransactionCreate {
//!             currency: "EUR".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("transaction {} is {:?}", tx.id, tx.state);
//!     Ok(())
//! }
//! ```

#[cfg(feature = "auth")]
pub use corepay_auth as auth;

#[cfg(feature = "client")]
pub use corepay_client as client;

#[cfg(feature = "rest")]
pub use corepay_rest as rest;
