//! Refund service.

use std::sync::Arc;

use corepay_client::{ApiClient, RequestBody, RequestMethod, Result};
use tracing::instrument;

use crate::types::{Refund, RefundCreate};

/// Thin proxy over the refund operations of the API.
#[derive(Debug, Clone)]
pub struct RefundService {
    client: Arc<ApiClient>,
    space_id: u64,
}

impl RefundService {
    pub(crate) fn new(client: Arc<ApiClient>, space_id: u64) -> Self {
        Self { client, space_id }
    }

    fn space_param(&self) -> (String, String) {
        ("spaceId".to_string(), self.space_id.to_string())
    }

    /// Submit a refund for a transaction.
    #[instrument(skip(self, refund))]
    pub async fn refund(&self, refund: &RefundCreate) -> Result<Refund> {
        self.client
            .call_json(
                "/refund/refund",
                RequestMethod::Post,
                &[self.space_param()],
                Some(RequestBody::Json(serde_json::to_value(refund)?)),
            )
            .await
    }

    /// Read a refund by id.
    #[instrument(skip(self))]
    pub async fn read(&self, id: u64) -> Result<Refund> {
        self.client
            .call_json(
                "/refund/read",
                RequestMethod::Get,
                &[self.space_param(), ("id".to_string(), id.to_string())],
                None,
            )
            .await
    }
}
