//! AlphaInsider Node Binary
//!
//! Drives the node from the command line, standing in for a workflow host.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p alphainsider-node -- describe
//! cargo run -p alphainsider-node -- test-credentials
//! cargo run -p alphainsider-node -- load-strategies
//! echo '{"items": [{"operation": "newOrderWebhook", ...}]}' \
//!     | cargo run -p alphainsider-node -- execute --continue-on-fail
//! ```
//!
//! # Environment Variables
//!
//! - `ALPHAINSIDER_API_KEY`: API key (needed by authenticated operations)
//! - `ALPHAINSIDER_BASE_URL`: API base URL (default: https://alphainsider.com/api)
//! - `ALPHAINSIDER_TIMEOUT_SECS`: request timeout (default: 30)
//! - `RUST_LOG`: log filter (default: alphainsider_node=info)

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alphainsider_node::infrastructure::host::LOAD_STRATEGIES;
use alphainsider_node::infrastructure::telemetry;
use alphainsider_node::{
    AlphaInsiderAdapter, AlphaInsiderNode, ExecuteRequest, NodeSettings, StaticCredentials,
};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

/// Command-line host for the AlphaInsider node.
#[derive(Debug, Parser)]
#[command(name = "alphainsider-node", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the node and credential descriptions as JSON.
    Describe,
    /// Check the configured API key against the API.
    TestCredentials,
    /// Print the caller's strategies as picker options.
    LoadStrategies,
    /// Execute the node over a batch of items.
    Execute {
        /// Record failed items instead of aborting.
        #[arg(long)]
        continue_on_fail: bool,
        /// Read items from this file instead of stdin.
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    telemetry::init();

    let cli = Cli::parse();
    let settings = NodeSettings::from_env().context("invalid configuration")?;

    tracing::debug!(
        base_url = %settings.api.base_url,
        timeout_secs = settings.api.timeout.as_secs(),
        has_credentials = settings.credentials.is_some(),
        "Configuration loaded"
    );

    let node = build_node(&settings)?;
    let output = run(&node, cli.command).await?;
    print_json(&output.json)?;

    if !output.ok {
        bail!("credential test failed");
    }
    Ok(())
}

type Node = AlphaInsiderNode<AlphaInsiderAdapter, StaticCredentials>;

/// JSON to print and whether the command succeeded.
struct CommandOutput {
    json: Value,
    ok: bool,
}

impl CommandOutput {
    const fn success(json: Value) -> Self {
        Self { json, ok: true }
    }
}

/// Wire the node. A missing API key is reported by the operation that needs it.
fn build_node(settings: &NodeSettings) -> Result<Node> {
    let adapter = AlphaInsiderAdapter::new(&settings.api)?;
    let credentials = StaticCredentials::from_option(settings.credentials.clone());

    Ok(AlphaInsiderNode::new(
        Arc::new(adapter),
        Arc::new(credentials),
        settings.api.base_url.clone(),
    ))
}

async fn run(node: &Node, command: Command) -> Result<CommandOutput> {
    let output = match command {
        Command::Describe => CommandOutput::success(json!({
            "node": node.description(),
            "credential": node.credential(),
        })),
        Command::TestCredentials => {
            let outcome = node.test_credentials().await;
            CommandOutput {
                ok: outcome.is_ok(),
                json: serde_json::to_value(outcome)?,
            }
        }
        Command::LoadStrategies => {
            CommandOutput::success(serde_json::to_value(node.load_options(LOAD_STRATEGIES).await)?)
        }
        Command::Execute {
            continue_on_fail,
            input,
        } => {
            let raw = read_input(input.as_deref())?;
            let request = parse_request(&raw)?;
            let request = if continue_on_fail {
                request.with_continue_on_fail(true)
            } else {
                request
            };
            CommandOutput::success(serde_json::to_value(node.execute(request).await?)?)
        }
    };

    Ok(output)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read stdin")?;
    Ok(raw)
}

/// Accept `{"items": [...], "continueOnFail": bool}` or a bare array of items.
fn parse_request(raw: &str) -> Result<ExecuteRequest> {
    let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;

    match value {
        Value::Array(_) => Ok(ExecuteRequest::new(
            serde_json::from_value(value).context("items must be JSON objects")?,
        )),
        Value::Object(_) => {
            serde_json::from_value(value).context("input must contain an \"items\" array")
        }
        _ => bail!("input must be an object with \"items\" or an array of items"),
    }
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
