//! AlphaInsider adapter implementing AlphaInsiderPort.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::ports::{AlphaInsiderPort, ApiError, CustomRequest, HttpMethod};
use crate::domain::order::{AllocationOrder, WebhookOrder};
use crate::domain::shared::{ApiCredentials, UserId};

use super::api_types::{NewOrderAllocationsRequest, NewOrderWebhookRequest, endpoints};
use super::config::AlphaInsiderConfig;
use super::error::AlphaInsiderError;
use super::http_client::AlphaInsiderHttpClient;

/// AlphaInsider REST adapter.
#[derive(Debug, Clone)]
pub struct AlphaInsiderAdapter {
    client: AlphaInsiderHttpClient,
}

impl AlphaInsiderAdapter {
    /// Create a new adapter.
    pub fn new(config: &AlphaInsiderConfig) -> Result<Self, AlphaInsiderError> {
        Ok(Self {
            client: AlphaInsiderHttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl AlphaInsiderPort for AlphaInsiderAdapter {
    async fn get_user_info(&self, credentials: &ApiCredentials) -> Result<Value, ApiError> {
        self.client
            .get(endpoints::GET_USER_INFO, None, Some(credentials))
            .await
            .map_err(ApiError::from)
    }

    async fn get_user_strategies(
        &self,
        credentials: &ApiCredentials,
        user_id: &UserId,
    ) -> Result<Value, ApiError> {
        let mut query = Map::new();
        query.insert("user_id".to_string(), Value::String(user_id.to_string()));

        self.client
            .get(endpoints::GET_USER_STRATEGIES, Some(&query), Some(credentials))
            .await
            .map_err(ApiError::from)
    }

    async fn new_order_webhook(
        &self,
        credentials: &ApiCredentials,
        order: &WebhookOrder,
    ) -> Result<Value, ApiError> {
        let body = NewOrderWebhookRequest::from(order);

        let response = self
            .client
            .post(endpoints::NEW_ORDER_WEBHOOK, None, Some(&body), Some(credentials))
            .await
            .map_err(ApiError::from)?;

        tracing::info!(
            strategy_id = %order.strategy_id,
            stock_id = %order.stock_id,
            "Webhook order accepted"
        );

        Ok(response)
    }

    async fn new_order_allocations(
        &self,
        credentials: &ApiCredentials,
        order: &AllocationOrder,
    ) -> Result<Value, ApiError> {
        let body = NewOrderAllocationsRequest::from(order);

        let response = self
            .client
            .post(
                endpoints::NEW_ORDER_ALLOCATIONS,
                None,
                Some(&body),
                Some(credentials),
            )
            .await
            .map_err(ApiError::from)?;

        tracing::info!(
            strategy_id = %order.strategy_id,
            allocations = order.allocations.len(),
            "Allocation order accepted"
        );

        Ok(response)
    }

    async fn custom_call(
        &self,
        request: &CustomRequest,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, ApiError> {
        let query = request.query.as_ref();

        let result = match request.method {
            HttpMethod::Get => self.client.get(&request.endpoint, query, credentials).await,
            HttpMethod::Post => {
                self.client
                    .post(&request.endpoint, query, request.body.as_ref(), credentials)
                    .await
            }
        };

        result.map_err(ApiError::from)
    }
}
