//! CLI command handlers.

use std::path::Path;
use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use serde_json::{json, Value};

use super::{CallArgs, ToolsArgs, ValidateArgs};
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::graphql::{load_schema, HttpGraphQLClient, QueryValidator};
use crate::tools::{ToolArguments, ToolExecutionContext, ToolIntegration, ToolIntegrationConfig};
use crate::util::context::TurnContext;

/// Endpoint used when only metadata is needed and none is configured.
const PLACEHOLDER_ENDPOINT: &str = "http://localhost/graphql";

fn read_schema(path: &Path) -> Result<Arc<Valid<Schema>>, AgentError> {
    let sdl = std::fs::read_to_string(path)?;
    load_schema(&sdl)
}

fn integration(
    config: &AgentConfig,
    schema_path: &Path,
    require_endpoint: bool,
) -> Result<ToolIntegration, AgentError> {
    let endpoint = match (&config.graphql_url, require_endpoint) {
        (Some(url), _) => url.clone(),
        (None, false) => PLACEHOLDER_ENDPOINT.to_string(),
        (None, true) => {
            return Err(AgentError::configuration(
                "graphql_url is required (set NAIS_AGENT_GRAPHQL_URL or graphql_url in the config file)",
            ))
        }
    };
    let mut client = HttpGraphQLClient::new(endpoint);
    if let Some(token) = &config.graphql_token {
        client = client.with_token(token);
    }

    ToolIntegration::new(ToolIntegrationConfig {
        graphql_client: Some(Arc::new(client)),
        schema: Some(read_schema(schema_path)?),
        tenant: config.tenant.clone(),
    })
}

/// Handle `nais-agent tools`.
pub fn handle_tools(config: &AgentConfig, args: &ToolsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tools = integration(config, &args.schema.schema, false)?;
    let output = if args.json_schema {
        let schemas: Vec<Value> = tools
            .input_schemas()
            .into_iter()
            .map(|(name, description, input_schema)| {
                json!({ "name": name, "description": description, "inputSchema": input_schema })
            })
            .collect();
        serde_json::to_string_pretty(&schemas)?
    } else {
        serde_json::to_string_pretty(&tools.tool_definitions())?
    };
    println!("{output}");
    Ok(())
}

/// Handle `nais-agent validate`. Returns whether the query is valid.
pub fn handle_validate(args: &ValidateArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let query = match (&args.query, &args.file) {
        (Some(query), _) => query.clone(),
        (None, Some(file)) => std::fs::read_to_string(file)?,
        (None, None) => return Err("either --query or --file is required".into()),
    };
    let validator = QueryValidator::new(read_schema(&args.schema.schema)?);
    let result = validator.validate(&query);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.valid)
}

/// Handle `nais-agent call`.
pub async fn handle_call(config: &AgentConfig, args: &CallArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tools = integration(config, &args.schema.schema, true)?;
    let raw: Value = serde_json::from_str(&args.args)
        .map_err(|e| AgentError::invalid_argument(format!("invalid --args JSON: {e}")))?;
    if !raw.is_object() {
        return Err(AgentError::invalid_argument("--args must be a JSON object").into());
    }

    let ctx = ToolExecutionContext::new(TurnContext::default().with_timeout(config.turn_timeout));
    let output = tools
        .execute_tool(&ctx, &args.tool, &ToolArguments::from_value(raw))
        .await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
