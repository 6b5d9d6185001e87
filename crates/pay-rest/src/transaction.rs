//! Transaction service.

use std::sync::Arc;

use corepay_client::{ApiClient, RequestBody, RequestMethod, Result};
use tracing::instrument;

use crate::types::{Transaction, TransactionCreate};

/// Thin proxy over the transaction operations of the API.
///
/// All errors from the dispatch layer propagate unchanged; a 409 in
/// particular surfaces as a versioning error, telling the caller to re-read
/// the transaction and retry with the fresh version.
#[derive(Debug, Clone)]
pub struct TransactionService {
    client: Arc<ApiClient>,
    space_id: u64,
}

impl TransactionService {
    pub(crate) fn new(client: Arc<ApiClient>, space_id: u64) -> Self {
        Self { client, space_id }
    }

    fn space_param(&self) -> (String, String) {
        ("spaceId".to_string(), self.space_id.to_string())
    }

    /// Create a transaction.
    #[instrument(skip(self, transaction))]
    pub async fn create(&self, transaction: &TransactionCreate) -> Result<Transaction> {
        self.client
            .call_json(
                "/transaction/create",
                RequestMethod::Post,
                &[self.space_param()],
                Some(RequestBody::Json(serde_json::to_value(transaction)?)),
            )
            .await
    }

    /// Read a transaction by id.
    #[instrument(skip(self))]
    pub async fn read(&self, id: u64) -> Result<Transaction> {
        self.client
            .call_json(
                "/transaction/read",
                RequestMethod::Get,
                &[self.space_param(), ("id".to_string(), id.to_string())],
                None,
            )
            .await
    }

    /// Count the transactions in the space.
    pub async fn count(&self) -> Result<u64> {
        self.client
            .call_json(
                "/transaction/count",
                RequestMethod::Post,
                &[self.space_param()],
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Corepay;
    use corepay_auth::ApplicationCredentials;
    use corepay_client::ClientConfig;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "dGVzdC1hcHBsaWNhdGlvbi1rZXk=";

    async fn api(server: &MockServer) -> Corepay {
        let config = ClientConfig::builder()
            .with_base_path(format!("{}/api", server.uri()))
            .build()
            .unwrap();
        Corepay::with_config(
            ApplicationCredentials::new(1234, TEST_KEY).unwrap(),
            config,
            405,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_transaction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transaction/create"))
            .and(query_param("spaceId", "405"))
            .and(body_partial_json(serde_json::json!({"currency": "EUR"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7355,
                "version": 1,
                "state": "PENDING",
                "currency": "EUR"
            })))
            .mount(&server)
            .await;

        let api = api(&server).await;
        let tx = api
            .transactions()
            .create(&TransactionCreate {
                currency: "EUR".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(tx.id, 7355);
        assert_eq!(tx.state, crate::types::TransactionState::Pending);
    }

    #[tokio::test]
    async fn test_read_transaction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transaction/read"))
            .and(query_param("spaceId", "405"))
            .and(query_param("id", "7355"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7355,
                "version": 2,
                "state": "AUTHORIZED",
                "currency": "EUR"
            })))
            .mount(&server)
            .await;

        let api = api(&server).await;
        let tx = api.transactions().read(7355).await.unwrap();
        assert_eq!(tx.version, 2);
    }

    #[tokio::test]
    async fn test_count_transactions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transaction/count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("42"))
            .mount(&server)
            .await;

        let api = api(&server).await;
        assert_eq!(api.transactions().count().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_versioning_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transaction/create"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let api = api(&server).await;
        let err = api
            .transactions()
            .create(&TransactionCreate {
                currency: "EUR".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_versioning());
    }
}
