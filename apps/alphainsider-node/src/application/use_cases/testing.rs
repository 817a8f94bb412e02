//! Recording port doubles shared by use case tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{AlphaInsiderPort, ApiError, CustomRequest};
use crate::domain::order::{AllocationOrder, WebhookOrder};
use crate::domain::shared::{ApiCredentials, UserId};

/// Call observed by [`MockAlphaInsider`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    UserInfo,
    Strategies(String),
    Webhook(WebhookOrder),
    Allocations(AllocationOrder),
    Custom {
        request: CustomRequest,
        authenticated: bool,
    },
}

pub struct MockAlphaInsider {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub user_info: Result<Value, ApiError>,
    pub strategies: Result<Value, ApiError>,
    pub order_response: Value,
    /// Webhook orders for this stock fail with a 400.
    pub failing_stock: Option<String>,
}

impl Default for MockAlphaInsider {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            user_info: Ok(json!({"user_id": "u1"})),
            strategies: Ok(json!([])),
            order_response: json!({"success": true}),
            failing_stock: None,
        }
    }
}

impl MockAlphaInsider {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl AlphaInsiderPort for MockAlphaInsider {
    async fn get_user_info(&self, _credentials: &ApiCredentials) -> Result<Value, ApiError> {
        self.record(RecordedCall::UserInfo);
        self.user_info.clone()
    }

    async fn get_user_strategies(
        &self,
        _credentials: &ApiCredentials,
        user_id: &UserId,
    ) -> Result<Value, ApiError> {
        self.record(RecordedCall::Strategies(user_id.to_string()));
        self.strategies.clone()
    }

    async fn new_order_webhook(
        &self,
        _credentials: &ApiCredentials,
        order: &WebhookOrder,
    ) -> Result<Value, ApiError> {
        self.record(RecordedCall::Webhook(order.clone()));
        if self.failing_stock.as_deref() == Some(order.stock_id.as_str()) {
            return Err(ApiError::Http {
                status: 400,
                message: format!("Unknown stock {}", order.stock_id),
            });
        }
        Ok(self.order_response.clone())
    }

    async fn new_order_allocations(
        &self,
        _credentials: &ApiCredentials,
        order: &AllocationOrder,
    ) -> Result<Value, ApiError> {
        self.record(RecordedCall::Allocations(order.clone()));
        Ok(self.order_response.clone())
    }

    async fn custom_call(
        &self,
        request: &CustomRequest,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, ApiError> {
        self.record(RecordedCall::Custom {
            request: request.clone(),
            authenticated: credentials.is_some(),
        });
        Ok(self.order_response.clone())
    }
}
