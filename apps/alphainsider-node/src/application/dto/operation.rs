//! Operation selection.
//!
//! The host sends a string `operation` discriminant; it is resolved once into
//! a tagged union so every later step works on typed, validated input.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::items::{NodeParameters, json_type};
use crate::application::errors::NodeError;
use crate::application::ports::{CustomRequest, HttpMethod};
use crate::domain::order::{AllocationOrder, Allocations, Leverage, OrderAction, WebhookOrder};
use crate::domain::shared::{StockId, StrategyId};

/// Parameter names understood by the node.
pub mod params {
    /// Operation discriminant.
    pub const OPERATION: &str = "operation";
    /// Strategy ID.
    pub const STRATEGY_ID: &str = "strategy_id";
    /// Stock ID.
    pub const STOCK_ID: &str = "stock_id";
    /// Order action.
    pub const ACTION: &str = "action";
    /// Leverage.
    pub const LEVERAGE: &str = "leverage";
    /// Allocation list.
    pub const ALLOCATIONS: &str = "allocations";
    /// Key of the repeating group inside `allocations`.
    pub const ALLOCATION_VALUES: &str = "allocationValues";
    /// Custom call HTTP method.
    pub const METHOD: &str = "method";
    /// Custom call endpoint.
    pub const ENDPOINT: &str = "endpoint";
    /// Custom call query parameters (JSON).
    pub const QUERY_PARAMETERS: &str = "queryParameters";
    /// Custom call body (JSON).
    pub const BODY: &str = "body";
    /// Custom call auth toggle.
    pub const AUTHENTICATE: &str = "authenticate";
}

/// Operation discriminant values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationKind {
    /// Single order through `newOrderWebhook`.
    #[default]
    NewOrderWebhook,
    /// Target allocations through `newOrderAllocations`.
    NewOrderAllocations,
    /// Pass-through call.
    CustomApiCall,
}

impl OperationKind {
    /// All operations in display order.
    pub const ALL: [Self; 3] = [
        Self::NewOrderWebhook,
        Self::NewOrderAllocations,
        Self::CustomApiCall,
    ];

    /// Discriminant value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewOrderWebhook => "newOrderWebhook",
            Self::NewOrderAllocations => "newOrderAllocations",
            Self::CustomApiCall => "customApiCall",
        }
    }

    /// Label shown in the operation picker.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NewOrderWebhook => "New Order Webhook",
            Self::NewOrderAllocations => "New Order Allocations",
            Self::CustomApiCall => "Custom API Call",
        }
    }

    /// Short description of the operation.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::NewOrderWebhook => "Create a new webhook order",
            Self::NewOrderAllocations => "Rebalance a strategy to target allocations",
            Self::CustomApiCall => "Make a custom API call",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| NodeError::UnknownOperation(s.to_string()))
    }
}

/// Custom call with its auth toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCall {
    /// Request to send.
    pub request: CustomRequest,
    /// Attach the `Authorization` header.
    pub authenticate: bool,
}

/// Fully validated operation for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Single order.
    NewOrderWebhook(WebhookOrder),
    /// Allocation rebalance.
    NewOrderAllocations(AllocationOrder),
    /// Pass-through call.
    CustomApiCall(CustomCall),
}

impl Operation {
    /// Discriminant of this operation.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::NewOrderWebhook(_) => OperationKind::NewOrderWebhook,
            Self::NewOrderAllocations(_) => OperationKind::NewOrderAllocations,
            Self::CustomApiCall(_) => OperationKind::CustomApiCall,
        }
    }

    /// Resolve and validate an item's parameters.
    ///
    /// A missing discriminant selects `newOrderWebhook`.
    pub fn from_parameters(parameters: &NodeParameters) -> Result<Self, NodeError> {
        let kind = match parameters.optional_string(params::OPERATION)? {
            Some(value) => value.parse()?,
            None => OperationKind::default(),
        };

        match kind {
            OperationKind::NewOrderWebhook => Self::webhook(parameters),
            OperationKind::NewOrderAllocations => Self::allocations(parameters),
            OperationKind::CustomApiCall => Self::custom(parameters),
        }
    }

    fn webhook(parameters: &NodeParameters) -> Result<Self, NodeError> {
        let strategy_id = StrategyId::parse(parameters.string(params::STRATEGY_ID)?)?;
        let stock_id = StockId::parse(parameters.string(params::STOCK_ID)?)?;
        let action: OrderAction = parameters.string(params::ACTION)?.parse()?;
        let leverage = leverage(parameters)?;

        Ok(Self::NewOrderWebhook(WebhookOrder::new(
            strategy_id,
            stock_id,
            action,
            leverage,
        )))
    }

    fn allocations(parameters: &NodeParameters) -> Result<Self, NodeError> {
        let strategy_id = StrategyId::parse(parameters.string(params::STRATEGY_ID)?)?;
        let leverage = leverage(parameters)?;
        let values = resolve_allocations(parameters.get(params::ALLOCATIONS))?;
        let allocations = Allocations::from_values(values)?;

        Ok(Self::NewOrderAllocations(AllocationOrder::new(
            strategy_id,
            leverage,
            allocations,
        )))
    }

    fn custom(parameters: &NodeParameters) -> Result<Self, NodeError> {
        let method = match parameters.optional_string(params::METHOD)? {
            None => HttpMethod::default(),
            Some(m) => match m.trim().to_ascii_uppercase().as_str() {
                "GET" => HttpMethod::Get,
                "POST" => HttpMethod::Post,
                _ => {
                    return Err(NodeError::invalid_parameter(
                        params::METHOD,
                        format!("unsupported method '{m}', expected GET or POST"),
                    ));
                }
            },
        };

        let endpoint = parameters.string(params::ENDPOINT)?;
        if endpoint.trim().is_empty() {
            return Err(NodeError::invalid_parameter(
                params::ENDPOINT,
                "parameter is required",
            ));
        }
        // The API key must never leave the AlphaInsider origin.
        if endpoint.contains("://") {
            return Err(NodeError::invalid_parameter(
                params::ENDPOINT,
                format!("expected a path relative to the API base URL, got '{}'", endpoint.trim()),
            ));
        }

        let query = parse_query(parameters.get(params::QUERY_PARAMETERS))?;
        let body = parse_body(parameters.get(params::BODY))?;
        let authenticate = parameters.bool_or(params::AUTHENTICATE, true)?;

        let mut request = CustomRequest::new(method, endpoint.trim());
        if let Some(query) = query {
            request = request.with_query(query);
        }
        if let (HttpMethod::Post, Some(body)) = (method, body) {
            request = request.with_body(body);
        }

        Ok(Self::CustomApiCall(CustomCall {
            request,
            authenticate,
        }))
    }
}

fn leverage(parameters: &NodeParameters) -> Result<Leverage, NodeError> {
    let value = parameters.number_or(params::LEVERAGE, Leverage::DEFAULT)?;
    Ok(Leverage::from_f64(value)?)
}

/// Accepts a repeating group (`{"allocationValues": [...]}`), a bare array,
/// or a JSON string holding an array.
fn resolve_allocations(value: Option<&Value>) -> Result<Vec<Value>, NodeError> {
    let not_an_array = || NodeError::NotAnArray {
        parameter: params::ALLOCATIONS.to_string(),
    };

    match value {
        Some(Value::String(raw)) => {
            let parsed: Value = serde_json::from_str(raw)
                .map_err(|e| NodeError::json_parse(params::ALLOCATIONS, &e))?;
            match parsed {
                Value::Array(values) => Ok(values),
                _ => Err(not_an_array()),
            }
        }
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(Value::Object(group)) if group.is_empty() => Ok(Vec::new()),
        Some(Value::Object(group)) => match group.get(params::ALLOCATION_VALUES) {
            Some(Value::Array(values)) => Ok(values.clone()),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(_) => Err(not_an_array()),
        },
        _ => Err(not_an_array()),
    }
}

fn parse_query(value: Option<&Value>) -> Result<Option<Map<String, Value>>, NodeError> {
    let parsed = match value {
        None => return Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(None),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map_err(|e| NodeError::json_parse(params::QUERY_PARAMETERS, &e))?,
        Some(other) => other.clone(),
    };

    match parsed {
        Value::Object(map) => Ok(Some(map)),
        other => Err(NodeError::invalid_parameter(
            params::QUERY_PARAMETERS,
            format!("expected a JSON object, got {}", json_type(&other)),
        )),
    }
}

fn parse_body(value: Option<&Value>) -> Result<Option<Value>, NodeError> {
    match value {
        None => Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| NodeError::json_parse(params::BODY, &e)),
        Some(other) => Ok(Some(other.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::AllocationAction;
    use crate::domain::shared::DomainError;
    use serde_json::json;
    use test_case::test_case;

    fn parse(value: Value) -> Result<Operation, NodeError> {
        Operation::from_parameters(&NodeParameters::from_value(value).unwrap())
    }

    #[test]
    fn webhook_operation_is_default() {
        let op = parse(json!({
            "strategy_id": "s1",
            "stock_id": "AAPL:NASDAQ",
            "action": "buy",
            "leverage": 1.5
        }))
        .unwrap();

        let Operation::NewOrderWebhook(order) = op else {
            panic!("expected webhook order");
        };
        assert_eq!(order.strategy_id.as_str(), "s1");
        assert_eq!(order.stock_id.as_str(), "AAPL:NASDAQ");
        assert_eq!(order.action, OrderAction::Buy);
        assert_eq!(order.leverage.as_f64(), 1.5);
    }

    #[test]
    fn webhook_leverage_defaults() {
        let op = parse(json!({
            "operation": "newOrderWebhook",
            "strategy_id": "s1",
            "stock_id": "AAPL:NASDAQ",
            "action": "flat"
        }))
        .unwrap();
        let Operation::NewOrderWebhook(order) = op else {
            panic!("expected webhook order");
        };
        assert_eq!(order.leverage, Leverage::default());
    }

    #[test]
    fn webhook_rejects_out_of_range_leverage() {
        let err = parse(json!({
            "strategy_id": "s1",
            "stock_id": "AAPL:NASDAQ",
            "action": "buy",
            "leverage": 3
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::Domain(DomainError::OutOfRange { .. })));
    }

    #[test]
    fn webhook_rejects_unknown_action() {
        let err = parse(json!({
            "strategy_id": "s1",
            "stock_id": "AAPL:NASDAQ",
            "action": "hold"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("hold"));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = parse(json!({"operation": "cancelOrder"})).unwrap_err();
        assert_eq!(err, NodeError::UnknownOperation("cancelOrder".to_string()));
    }

    #[test]
    fn allocations_from_repeating_group() {
        let op = parse(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1",
            "leverage": 1.009,
            "allocations": {
                "allocationValues": [
                    {"stock_id": "AAPL:NASDAQ", "action": "long", "percent": 0.6},
                    {"stock_id": "TSLA:NASDAQ", "action": "short", "percent": 0.4}
                ]
            }
        }))
        .unwrap();

        let Operation::NewOrderAllocations(order) = op else {
            panic!("expected allocation order");
        };
        assert_eq!(order.leverage.as_f64(), 1.0);
        assert_eq!(order.allocations.len(), 2);
        assert_eq!(order.allocations.entries()[1].action, AllocationAction::Short);
    }

    #[test]
    fn allocations_from_json_string_are_unmodified() {
        let op = parse(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1",
            "allocations": "[{\"stock_id\":\"AAPL:NASDAQ\",\"action\":\"long\",\"percent\":1}]"
        }))
        .unwrap();

        let Operation::NewOrderAllocations(order) = op else {
            panic!("expected allocation order");
        };
        assert_eq!(
            order.allocations.values(),
            &[json!({"stock_id": "AAPL:NASDAQ", "action": "long", "percent": 1})]
        );
    }

    #[test]
    fn allocations_json_must_be_an_array() {
        let err = parse(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1",
            "allocations": "{\"stock_id\":\"AAPL:NASDAQ\"}"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "allocations must be a JSON array");
    }

    #[test]
    fn malformed_allocations_json_reports_parse_error() {
        let err = parse(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1",
            "allocations": "[{\"stock_id\":"
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::JsonParse { ref parameter, .. } if parameter == "allocations"));
    }

    #[test]
    fn missing_allocations_is_not_an_array() {
        let err = parse(json!({
            "operation": "newOrderAllocations",
            "strategy_id": "s1"
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::NotAnArray { .. }));
    }

    #[test]
    fn custom_call_defaults() {
        let op = parse(json!({
            "operation": "customApiCall",
            "endpoint": "/getUserInfo"
        }))
        .unwrap();

        let Operation::CustomApiCall(call) = op else {
            panic!("expected custom call");
        };
        assert!(call.authenticate);
        assert_eq!(call.request.method, HttpMethod::Get);
        assert_eq!(call.request.endpoint, "/getUserInfo");
        assert!(call.request.query.is_none());
        assert!(call.request.body.is_none());
    }

    #[test]
    fn custom_call_parses_query_and_body() {
        let op = parse(json!({
            "operation": "customApiCall",
            "method": "post",
            "endpoint": "/searchStocks",
            "queryParameters": "{\"limit\": 5}",
            "body": "{\"search\": \"AAPL\"}",
            "authenticate": false
        }))
        .unwrap();

        assert_eq!(op.kind(), OperationKind::CustomApiCall);
        let Operation::CustomApiCall(call) = op else {
            panic!("expected custom call");
        };
        assert!(!call.authenticate);
        assert_eq!(call.request.method, HttpMethod::Post);
        assert_eq!(call.request.query.unwrap()["limit"], json!(5));
        assert_eq!(call.request.body, Some(json!({"search": "AAPL"})));
    }

    #[test]
    fn custom_get_drops_body() {
        let op = parse(json!({
            "operation": "customApiCall",
            "method": "GET",
            "endpoint": "/getUserInfo",
            "body": "{\"ignored\": true}"
        }))
        .unwrap();
        let Operation::CustomApiCall(call) = op else {
            panic!("expected custom call");
        };
        assert!(call.request.body.is_none());
    }

    #[test]
    fn custom_call_malformed_query_fails_fast() {
        let err = parse(json!({
            "operation": "customApiCall",
            "endpoint": "/getUserInfo",
            "queryParameters": "{limit: 5}"
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::JsonParse { ref parameter, .. } if parameter == "queryParameters"));
    }

    #[test]
    fn custom_call_malformed_body_fails_fast() {
        let err = parse(json!({
            "operation": "customApiCall",
            "method": "POST",
            "endpoint": "/newOrderWebhook",
            "body": "{\"a\": }"
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in 'body'"));
    }

    #[test]
    fn custom_call_query_must_be_object() {
        let err = parse(json!({
            "operation": "customApiCall",
            "endpoint": "/x",
            "queryParameters": "[1]"
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameter { .. }));
    }

    #[test_case("https://evil.example/steal")]
    #[test_case("http://127.0.0.1:8080/getUserInfo")]
    #[test_case(" HTTPS://alphainsider.com/api/getUserInfo")]
    fn custom_call_rejects_absolute_endpoint(endpoint: &str) {
        let err = parse(json!({
            "operation": "customApiCall",
            "endpoint": endpoint
        }))
        .unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameter { ref name, .. } if name == "endpoint"));
    }

    #[test]
    fn custom_call_rejects_unsupported_method() {
        let err = parse(json!({
            "operation": "customApiCall",
            "method": "DELETE",
            "endpoint": "/x"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("DELETE"));
    }
}
