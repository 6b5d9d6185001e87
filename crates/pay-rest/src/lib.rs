//! # pay-rest
//!
//! Corepay resource services: thin, typed proxies over the dispatch core in
//! `corepay-client`. Each service translates a resource operation into a
//! `call_api` invocation and deserializes the result; errors from the
//! dispatch layer propagate unchanged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use corepay_auth::ApplicationCredentials;
//! use corepay_rest::{Corepay, TransactionCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), corepay_rest::Error> {
//!     let creds = ApplicationCredentials::from_env().unwrap();
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
//!     println!("created transaction {} in state {:?}", tx.id, tx.state);
//!     Ok(())
//! }
//! ```

mod client;
mod refund;
mod transaction;
mod types;

pub use client::Corepay;
pub use refund::RefundService;
pub use transaction::TransactionService;
pub use types::{
    LineItem, LineItemType, Refund, RefundCreate, RefundState, RefundType, Transaction,
    TransactionCreate, TransactionState,
};

// Re-export dispatch-layer types users need at the call boundary.
pub use corepay_client::{ApiResult, ClientConfig, Error, ErrorKind, Result};
