//! The top-level API facade.

use std::sync::Arc;

use corepay_auth::ApplicationCredentials;
use corepay_client::{ApiClient, ClientConfig, Result};

use crate::refund::RefundService;
use crate::transaction::TransactionService;

/// Entry point to the Corepay API for one space.
///
/// All services are constructed eagerly at init; there is no lazy-init
/// mutable state, so a `Corepay` instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Corepay {
    client: Arc<ApiClient>,
    transactions: TransactionService,
    refunds: RefundService,
}

impl Corepay {
    /// Create a facade with default configuration.
    pub fn new(credentials: ApplicationCredentials, space_id: u64) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default(), space_id)
    }

    /// Create a facade with custom configuration.
    pub fn with_config(
        credentials: ApplicationCredentials,
        config: ClientConfig,
        space_id: u64,
    ) -> Result<Self> {
        let client = Arc::new(ApiClient::with_config(credentials, config)?);

        Ok(Self {
            transactions: TransactionService::new(Arc::clone(&client), space_id),
            refunds: RefundService::new(Arc::clone(&client), space_id),
            client,
        })
    }

    /// The transaction service.
    pub fn transactions(&self) -> &TransactionService {
        &self.transactions
    }

    /// The refund service.
    pub fn refunds(&self) -> &RefundService {
        &self.refunds
    }

    /// The underlying dispatch client, for operations without a service.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
