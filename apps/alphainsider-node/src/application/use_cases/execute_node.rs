//! Execute Node Use Case
//!
//! Runs one operation per input item, in input order.

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::{CustomCall, ExecuteRequest, NodeParameters, Operation, OutputRecord};
use crate::application::errors::{ItemError, NodeError};
use crate::application::ports::{AlphaInsiderPort, CredentialsPort};
use crate::domain::order::{AllocationOrder, WebhookOrder};

/// Use case for executing the node over a batch of items.
pub struct ExecuteNodeUseCase<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    api: Arc<A>,
    credentials: Arc<C>,
}

impl<A, C> ExecuteNodeUseCase<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    /// Create a new ExecuteNodeUseCase.
    pub const fn new(api: Arc<A>, credentials: Arc<C>) -> Self {
        Self { api, credentials }
    }

    /// Execute the use case.
    ///
    /// Without continue-on-fail the first failing item aborts the batch.
    /// With it, every item yields exactly one record.
    pub async fn execute(&self, request: ExecuteRequest) -> Result<Vec<OutputRecord>, ItemError> {
        let mut records = Vec::with_capacity(request.items.len());

        for (item_index, parameters) in request.items.iter().enumerate() {
            match self.execute_item(item_index, parameters).await {
                Ok(response) => records.push(OutputRecord::success(item_index, response)),
                Err(error) if request.continue_on_fail => {
                    tracing::warn!(
                        item_index,
                        error = %error,
                        validation = error.is_validation(),
                        "Item failed, continuing"
                    );
                    records.push(OutputRecord::failure(item_index, &error));
                }
                Err(error) => {
                    tracing::error!(
                        item_index,
                        error = %error,
                        validation = error.is_validation(),
                        "Item failed, aborting batch"
                    );
                    return Err(ItemError {
                        item_index,
                        source: error,
                    });
                }
            }
        }

        Ok(records)
    }

    async fn execute_item(
        &self,
        item_index: usize,
        parameters: &NodeParameters,
    ) -> Result<Value, NodeError> {
        let operation = Operation::from_parameters(parameters)?;

        tracing::debug!(item_index, operation = %operation.kind(), "Executing item");

        match operation {
            Operation::NewOrderWebhook(order) => self.new_order_webhook(&order).await,
            Operation::NewOrderAllocations(order) => self.new_order_allocations(&order).await,
            Operation::CustomApiCall(call) => self.custom_api_call(&call).await,
        }
    }

    async fn new_order_webhook(&self, order: &WebhookOrder) -> Result<Value, NodeError> {
        let credentials = self.credentials.credentials().await?;

        tracing::info!(
            strategy_id = %order.strategy_id,
            stock_id = %order.stock_id,
            action = %order.action,
            leverage = %order.leverage,
            "Placing webhook order"
        );

        Ok(self.api.new_order_webhook(&credentials, order).await?)
    }

    async fn new_order_allocations(&self, order: &AllocationOrder) -> Result<Value, NodeError> {
        let credentials = self.credentials.credentials().await?;

        tracing::info!(
            strategy_id = %order.strategy_id,
            leverage = %order.leverage,
            allocations = order.allocations.len(),
            "Placing allocation order"
        );

        Ok(self.api.new_order_allocations(&credentials, order).await?)
    }

    async fn custom_api_call(&self, call: &CustomCall) -> Result<Value, NodeError> {
        let credentials = if call.authenticate {
            Some(self.credentials.credentials().await?)
        } else {
            None
        };

        tracing::info!(
            method = %call.request.method,
            endpoint = %call.request.endpoint,
            authenticate = call.authenticate,
            "Sending custom API call"
        );

        Ok(self
            .api
            .custom_call(&call.request, credentials.as_ref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CredentialsError, HttpMethod, StaticCredentials};
    use crate::application::use_cases::testing::{MockAlphaInsider, RecordedCall};
    use crate::domain::shared::ApiCredentials;
    use serde_json::json;

    fn params(value: Value) -> NodeParameters {
        NodeParameters::from_value(value).unwrap()
    }

    fn webhook(stock_id: &str) -> NodeParameters {
        params(json!({
            "operation": "newOrderWebhook",
            "strategy_id": "s1",
            "stock_id": stock_id,
            "action": "buy",
            "leverage": 1.5
        }))
    }

    fn use_case(
        api: MockAlphaInsider,
    ) -> (
        ExecuteNodeUseCase<MockAlphaInsider, StaticCredentials>,
        Arc<MockAlphaInsider>,
    ) {
        let api = Arc::new(api);
        let credentials = Arc::new(StaticCredentials::new(ApiCredentials::new("key").unwrap()));
        (ExecuteNodeUseCase::new(Arc::clone(&api), credentials), api)
    }

    #[tokio::test]
    async fn webhook_order_is_sent_per_item() {
        let (use_case, api) = use_case(MockAlphaInsider::default());

        let records = use_case
            .execute(ExecuteRequest::new(vec![webhook("AAPL:NASDAQ"), webhook("MSFT:NASDAQ")]))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].json, json!({"success": true}));
        assert_eq!(records[1].paired_item, 1);

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        let RecordedCall::Webhook(order) = &calls[1] else {
            panic!("expected webhook call");
        };
        assert_eq!(order.stock_id.as_str(), "MSFT:NASDAQ");
        assert_eq!(order.leverage.as_f64(), 1.5);
    }

    #[tokio::test]
    async fn continue_on_fail_keeps_one_record_per_item() {
        let (use_case, api) = use_case(MockAlphaInsider {
            failing_stock: Some("BAD:NASDAQ".to_string()),
            ..MockAlphaInsider::default()
        });

        let request = ExecuteRequest::new(vec![
            webhook("AAPL:NASDAQ"),
            webhook("BAD:NASDAQ"),
            webhook("MSFT:NASDAQ"),
        ])
        .with_continue_on_fail(true);

        let records = use_case.execute(request).await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].error().is_none());
        assert!(records[1].error().unwrap().contains("Unknown stock BAD:NASDAQ"));
        assert!(records[2].error().is_none());
        assert_eq!(
            records.iter().map(|r| r.paired_item).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn first_failure_aborts_without_continue_on_fail() {
        let (use_case, api) = use_case(MockAlphaInsider {
            failing_stock: Some("BAD:NASDAQ".to_string()),
            ..MockAlphaInsider::default()
        });

        let err = use_case
            .execute(ExecuteRequest::new(vec![
                webhook("BAD:NASDAQ"),
                webhook("AAPL:NASDAQ"),
            ]))
            .await
            .unwrap_err();

        assert_eq!(err.item_index, 0);
        assert!(matches!(err.source, NodeError::Api(_)));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn invalid_allocations_make_no_network_call() {
        let (use_case, api) = use_case(MockAlphaInsider::default());

        let request = ExecuteRequest::new(vec![params(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1",
            "allocations": "{\"not\": \"an array\"}"
        }))]);

        let err = use_case.execute(request).await.unwrap_err();
        assert_eq!(err.source.to_string(), "allocations must be a JSON array");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn allocation_order_forwards_values() {
        let (use_case, api) = use_case(MockAlphaInsider::default());
        let allocations = json!([{"stock_id": "AAPL:NASDAQ", "action": "long", "percent": 1}]);

        use_case
            .execute(ExecuteRequest::new(vec![params(json!({
                "operation": "newOrderAllocations",
                "strategy_id": "s1",
                "leverage": 1,
                "allocations": allocations
            }))]))
            .await
            .unwrap();

        let calls = api.calls();
        let RecordedCall::Allocations(order) = &calls[0] else {
            panic!("expected allocation call");
        };
        assert_eq!(json!(order.allocations.values()), allocations);
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_request() {
        let api = Arc::new(MockAlphaInsider::default());
        let use_case = ExecuteNodeUseCase::new(Arc::clone(&api), Arc::new(StaticCredentials::empty()));

        let err = use_case
            .execute(ExecuteRequest::new(vec![webhook("AAPL:NASDAQ")]))
            .await
            .unwrap_err();

        assert_eq!(err.source, NodeError::Credentials(CredentialsError::Missing));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn unauthenticated_custom_call_skips_credentials() {
        let api = Arc::new(MockAlphaInsider::default());
        let use_case = ExecuteNodeUseCase::new(Arc::clone(&api), Arc::new(StaticCredentials::empty()));

        let records = use_case
            .execute(ExecuteRequest::new(vec![params(json!({
                "operation": "customApiCall",
                "method": "GET",
                "endpoint": "/getPublicStrategies",
                "authenticate": false
            }))]))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            api.calls(),
            vec![RecordedCall::Custom {
                request: crate::application::ports::CustomRequest::new(
                    HttpMethod::Get,
                    "/getPublicStrategies"
                ),
                authenticated: false,
            }]
        );
    }

    #[tokio::test]
    async fn empty_batch_yields_no_records() {
        let (use_case, api) = use_case(MockAlphaInsider::default());
        let records = use_case.execute(ExecuteRequest::default()).await.unwrap();
        assert!(records.is_empty());
        assert!(api.calls().is_empty());
    }
}
