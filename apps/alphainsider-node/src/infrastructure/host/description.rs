//! Declarative node description.
//!
//! Serialises to the property schema a workflow host renders as the node's
//! configuration form.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use super::credentials::AlphaInsiderApiCredential;
use super::node::LOAD_STRATEGIES;
use crate::application::dto::{OperationKind, params};
use crate::application::ports::HttpMethod;
use crate::domain::order::{AllocationAction, Leverage, OrderAction};

const NODE_DESCRIPTION: &str = "Open Marketplace for Trading Strategies. Follow top crypto & \
stock strategies in real-time. Automate trades by connecting your broker or exchange. Split \
capital across multiple strategies.";

/// Node type description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    /// Display name.
    pub display_name: String,
    /// Type name.
    pub name: String,
    /// Icon reference.
    pub icon: String,
    /// Palette groups.
    pub group: Vec<String>,
    /// Node version.
    pub version: u32,
    /// Subtitle expression.
    pub subtitle: String,
    /// Long description.
    pub description: String,
    /// Defaults for new instances.
    pub defaults: NodeDefaults,
    /// Input connections.
    pub inputs: Vec<String>,
    /// Output connections.
    pub outputs: Vec<String>,
    /// Credentials the node needs.
    pub credentials: Vec<CredentialReference>,
    /// Defaults applied to routed requests.
    pub request_defaults: RequestDefaults,
    /// Configuration properties.
    pub properties: Vec<PropertyDescription>,
}

/// Defaults for a new node instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDefaults {
    /// Instance name.
    pub name: String,
}

/// Credential requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialReference {
    /// Credential type name.
    pub name: String,
    /// Whether the node cannot run without it.
    pub required: bool,
}

/// Request defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDefaults {
    /// Base URL.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Default headers.
    pub headers: BTreeMap<String, String>,
}

/// A single configuration property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescription {
    /// Label.
    pub display_name: String,
    /// Parameter name.
    pub name: String,
    /// Property type (`string`, `options`, `number`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value.
    pub default: Value,
    /// Whether the value is required.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Disallow expressions.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Type-specific options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<Value>,
    /// Visibility rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    /// Choices for option and collection properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<PropertyOption>>,
}

impl PropertyDescription {
    /// Create a property.
    pub fn new(display_name: &str, name: &str, kind: &str, default: Value) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            default,
            required: false,
            no_data_expression: false,
            description: None,
            placeholder: None,
            type_options: None,
            display_options: None,
            options: None,
        }
    }

    /// Mark the property required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disallow expressions.
    #[must_use]
    pub const fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Set type options.
    #[must_use]
    pub fn with_type_options(mut self, type_options: Value) -> Self {
        self.type_options = Some(type_options);
        self
    }

    /// Show only when `parameter` has one of `values`.
    #[must_use]
    pub fn shown_when(mut self, parameter: &str, values: &[&str]) -> Self {
        self.display_options
            .get_or_insert_with(DisplayOptions::default)
            .show
            .insert(
                parameter.to_string(),
                values.iter().map(ToString::to_string).collect(),
            );
        self
    }

    /// Set the choices.
    #[must_use]
    pub fn with_options(mut self, options: Vec<PropertyOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// Visibility rules keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    /// Parameter values that make the property visible.
    pub show: BTreeMap<String, Vec<String>>,
}

/// Choice entry of an options or fixed-collection property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyOption {
    /// A selectable value.
    Value(OptionValue),
    /// A named group of sub-properties.
    Collection(CollectionOption),
}

/// Selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue {
    /// Label.
    pub name: String,
    /// Value stored in the parameter.
    pub value: String,
    /// Action text shown in the host's picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl OptionValue {
    /// Create a choice.
    pub fn new(name: &str, value: &str) -> PropertyOption {
        PropertyOption::Value(Self {
            name: name.to_string(),
            value: value.to_string(),
            action: None,
        })
    }
}

/// Fixed-collection group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOption {
    /// Group name (the key in the parameter object).
    pub name: String,
    /// Label.
    pub display_name: String,
    /// Fields of each entry.
    pub values: Vec<PropertyDescription>,
}

impl NodeDescription {
    /// Display name and default instance name.
    pub const DISPLAY_NAME: &'static str = "AlphaInsider";
    /// Node type name.
    pub const NAME: &'static str = "alphaInsider";

    /// Build the AlphaInsider node description.
    #[must_use]
    pub fn alpha_insider(base_url: &str) -> Self {
        Self {
            display_name: Self::DISPLAY_NAME.to_string(),
            name: Self::NAME.to_string(),
            icon: "file:alphaLogo.svg".to_string(),
            group: vec!["transform".to_string()],
            version: 1,
            subtitle: format!("={{{{$parameter[\"{}\"]}}}}", params::OPERATION),
            description: NODE_DESCRIPTION.to_string(),
            defaults: NodeDefaults {
                name: Self::DISPLAY_NAME.to_string(),
            },
            inputs: vec!["main".to_string()],
            outputs: vec!["main".to_string()],
            credentials: vec![CredentialReference {
                name: AlphaInsiderApiCredential::NAME.to_string(),
                required: true,
            }],
            request_defaults: RequestDefaults {
                base_url: base_url.to_string(),
                headers: BTreeMap::from([(
                    "Content-Type".to_string(),
                    "application/json".to_string(),
                )]),
            },
            properties: properties(),
        }
    }

    /// Look up a property by parameter name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescription> {
        self.properties.iter().find(|p| p.name == name)
    }
}

fn properties() -> Vec<PropertyDescription> {
    let webhook = OperationKind::NewOrderWebhook.as_str();
    let allocations = OperationKind::NewOrderAllocations.as_str();
    let custom = OperationKind::CustomApiCall.as_str();

    vec![
        PropertyDescription::new(
            "Operation",
            params::OPERATION,
            "options",
            json!(OperationKind::default().as_str()),
        )
        .no_data_expression()
        .with_options(
            OperationKind::ALL
                .iter()
                .map(|kind| {
                    PropertyOption::Value(OptionValue {
                        name: kind.label().to_string(),
                        value: kind.as_str().to_string(),
                        action: Some(kind.action().to_string()),
                    })
                })
                .collect(),
        ),
        PropertyDescription::new("Strategy", params::STRATEGY_ID, "options", json!(""))
            .required()
            .with_type_options(json!({ "loadOptionsMethod": LOAD_STRATEGIES }))
            .with_description("The strategy to place the order on")
            .shown_when(params::OPERATION, &[webhook, allocations]),
        PropertyDescription::new("Stock ID", params::STOCK_ID, "string", json!(""))
            .required()
            .with_placeholder("AAPL:NASDAQ")
            .with_description(
                "The id of the stock: \"stock:exchange\" or \"stock_id\". Ex: AAPL:NASDAQ.",
            )
            .shown_when(params::OPERATION, &[webhook]),
        PropertyDescription::new("Action", params::ACTION, "options", json!(""))
            .required()
            .with_description("Order action")
            .with_options(
                OrderAction::ALL
                    .iter()
                    .map(|action| OptionValue::new(action.label(), action.as_str()))
                    .collect(),
            )
            .shown_when(params::OPERATION, &[webhook]),
        PropertyDescription::new(
            "Leverage",
            params::LEVERAGE,
            "number",
            json!(Leverage::DEFAULT),
        )
        .with_description("Leverage to trade at, truncated to two decimals")
        .with_type_options(json!({
            "minValue": 0,
            "maxValue": 2,
            "numberPrecision": 2,
        }))
        .shown_when(params::OPERATION, &[webhook, allocations]),
        PropertyDescription::new("Allocations", params::ALLOCATIONS, "fixedCollection", json!({}))
            .with_type_options(json!({ "multipleValues": true }))
            .with_description("Target allocations for the strategy")
            .with_options(vec![PropertyOption::Collection(CollectionOption {
                name: params::ALLOCATION_VALUES.to_string(),
                display_name: "Allocation".to_string(),
                values: allocation_fields(),
            })])
            .shown_when(params::OPERATION, &[allocations]),
        PropertyDescription::new(
            "Method",
            params::METHOD,
            "options",
            json!(HttpMethod::default().as_str()),
        )
        .with_options(
            [HttpMethod::Get, HttpMethod::Post]
                .iter()
                .map(|method| OptionValue::new(method.as_str(), method.as_str()))
                .collect(),
        )
        .shown_when(params::OPERATION, &[custom]),
        PropertyDescription::new("Endpoint", params::ENDPOINT, "string", json!(""))
            .required()
            .with_placeholder("/getUserInfo")
            .with_description("Path relative to the API base URL")
            .shown_when(params::OPERATION, &[custom]),
        PropertyDescription::new(
            "Query Parameters",
            params::QUERY_PARAMETERS,
            "json",
            json!(""),
        )
        .with_description("Query parameters as a JSON object")
        .shown_when(params::OPERATION, &[custom]),
        PropertyDescription::new("Body", params::BODY, "json", json!(""))
            .with_description("Request body as JSON")
            .shown_when(params::OPERATION, &[custom])
            .shown_when(params::METHOD, &[HttpMethod::Post.as_str()]),
        PropertyDescription::new("Authenticate", params::AUTHENTICATE, "boolean", json!(true))
            .with_description("Send the API key with the request")
            .shown_when(params::OPERATION, &[custom]),
    ]
}

fn allocation_fields() -> Vec<PropertyDescription> {
    vec![
        PropertyDescription::new("Stock ID", "stock_id", "string", json!(""))
            .required()
            .with_placeholder("AAPL:NASDAQ"),
        PropertyDescription::new("Action", "action", "options", json!("long"))
            .required()
            .with_options(
                AllocationAction::ALL
                    .iter()
                    .map(|action| OptionValue::new(action.label(), action.as_str()))
                    .collect(),
            ),
        PropertyDescription::new("Percent", "percent", "number", json!(0))
            .required()
            .with_description("Fraction of the strategy, from 0 to 1")
            .with_type_options(json!({ "minValue": 0, "maxValue": 1, "numberPrecision": 4 })),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::alphainsider::DEFAULT_BASE_URL;

    fn description() -> NodeDescription {
        NodeDescription::alpha_insider(DEFAULT_BASE_URL)
    }

    #[test]
    fn top_level_fields() {
        let value = serde_json::to_value(description()).unwrap();

        assert_eq!(value["displayName"], "AlphaInsider");
        assert_eq!(value["name"], "alphaInsider");
        assert_eq!(value["icon"], "file:alphaLogo.svg");
        assert_eq!(value["group"], json!(["transform"]));
        assert_eq!(value["version"], 1);
        assert_eq!(value["subtitle"], "={{$parameter[\"operation\"]}}");
        assert_eq!(value["credentials"][0]["name"], "AlphaInsiderApi");
        assert_eq!(value["credentials"][0]["required"], true);
        assert_eq!(value["requestDefaults"]["baseURL"], DEFAULT_BASE_URL);
    }

    #[test]
    fn operation_options_cover_every_kind() {
        let description = description();
        let operation = description.property("operation").unwrap();
        let value = serde_json::to_value(operation).unwrap();

        assert_eq!(value["default"], "newOrderWebhook");
        assert_eq!(value["noDataExpression"], true);
        let values: Vec<&str> = value["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["value"].as_str().unwrap())
            .collect();
        assert_eq!(
            values,
            vec!["newOrderWebhook", "newOrderAllocations", "customApiCall"]
        );
    }

    #[test]
    fn leverage_bounds() {
        let description = description();
        let value = serde_json::to_value(description.property("leverage").unwrap()).unwrap();

        assert_eq!(value["type"], "number");
        assert_eq!(value["default"], 1.5);
        assert_eq!(value["typeOptions"]["minValue"], 0);
        assert_eq!(value["typeOptions"]["maxValue"], 2);
    }

    #[test]
    fn strategy_uses_load_options() {
        let description = description();
        let value = serde_json::to_value(description.property("strategy_id").unwrap()).unwrap();

        assert_eq!(value["typeOptions"]["loadOptionsMethod"], "getStrategies");
        assert_eq!(
            value["displayOptions"]["show"]["operation"],
            json!(["newOrderWebhook", "newOrderAllocations"])
        );
    }

    #[test]
    fn action_options_in_order() {
        let description = description();
        let value = serde_json::to_value(description.property("action").unwrap()).unwrap();
        let actions: Vec<&str> = value["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["value"].as_str().unwrap())
            .collect();

        assert_eq!(actions, vec!["buy", "long", "sell", "short", "close", "flat"]);
    }

    #[test]
    fn allocations_collection_shape() {
        let description = description();
        let value = serde_json::to_value(description.property("allocations").unwrap()).unwrap();

        assert_eq!(value["type"], "fixedCollection");
        assert_eq!(value["options"][0]["name"], "allocationValues");
        let fields: Vec<&str> = value["options"][0]["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["stock_id", "action", "percent"]);
    }

    #[test]
    fn body_only_shown_for_post() {
        let description = description();
        let body = description.property("body").unwrap();
        let show = &body.display_options.as_ref().unwrap().show;

        assert_eq!(show["operation"], vec!["customApiCall".to_string()]);
        assert_eq!(show["method"], vec!["POST".to_string()]);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let value = serde_json::to_value(description().property("endpoint").unwrap()).unwrap();
        assert!(value.get("options").is_none());
        assert!(value.get("noDataExpression").is_none());
    }
}
