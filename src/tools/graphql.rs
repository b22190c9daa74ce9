//! Tools that talk to the platform API.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tool::AgentTool;
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::graphql::{GraphQLClient, QueryValidationResult, QueryValidator, NAIS_API_GUIDANCE};
use crate::util::context::TurnContext;

pub const GET_NAIS_CONTEXT_TOOL: &str = "get_nais_context";
pub const EXECUTE_GRAPHQL_TOOL: &str = "execute_graphql";
pub const VALIDATE_GRAPHQL_TOOL: &str = "validate_graphql";

/// Console base URL for a tenant.
pub fn console_base_url(tenant: &str) -> String {
    format!("https://console.{tenant}.cloud.nais.io")
}

/// Link templates relative to the console base URL.
pub fn console_url_patterns() -> BTreeMap<String, String> {
    [
        ("team", "/team/{team}"),
        ("app", "/team/{team}/{env}/app/{app}"),
        ("job", "/team/{team}/{env}/job/{job}"),
        ("deployment", "/team/{team}/deployments"),
        ("cost", "/team/{team}/cost"),
        ("utilization", "/team/{team}/utilization"),
        ("secrets", "/team/{team}/{env}/secret/{secret}"),
        ("postgres", "/team/{team}/{env}/postgres/{instance}"),
        ("bucket", "/team/{team}/{env}/bucket/{bucket}"),
        ("redis", "/team/{team}/{env}/redis/{instance}"),
        ("opensearch", "/team/{team}/{env}/opensearch/{instance}"),
        ("kafka", "/team/{team}/{env}/kafka/{topic}"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContextUser {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContextTeam {
    pub slug: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub purpose: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NaisContext {
    pub user: ContextUser,
    pub teams: Vec<ContextTeam>,
    pub console_base_url: String,
    pub console_url_patterns: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteInput {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateInput {
    pub query: String,
}

/// Accepts an object, a JSON-encoded object, or nothing.
fn parse_variables(raw: Option<Value>) -> Result<Map<String, Value>, AgentError> {
    match raw {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Map::new()),
        Some(Value::String(s)) => serde_json::from_str::<Map<String, Value>>(&s)
            .map_err(|e| AgentError::invalid_argument(format!("invalid variables JSON: {e}"))),
        Some(other) => Err(AgentError::invalid_argument(format!(
            "invalid variables JSON: expected an object, got {other}"
        ))),
    }
}

/// Context lookup, validated execution and dry-run validation.
pub struct GraphQLTools {
    client: Arc<dyn GraphQLClient>,
    validator: QueryValidator,
    console_base_url: String,
}

impl GraphQLTools {
    pub fn new(client: Arc<dyn GraphQLClient>, validator: QueryValidator, tenant: &str) -> Self {
        Self {
            client,
            validator,
            console_base_url: console_base_url(tenant),
        }
    }

    pub async fn nais_context(&self, ctx: &TurnContext) -> Result<NaisContext, AgentError> {
        let user = self
            .client
            .current_user(ctx)
            .await
            .map_err(|e| AgentError::GraphQL(format!("failed to get current user: {e}")))?;
        let teams = self
            .client
            .user_teams(ctx)
            .await
            .map_err(|e| AgentError::GraphQL(format!("failed to get user teams: {e}")))?;

        Ok(NaisContext {
            user: ContextUser { name: user.name },
            teams: teams
                .into_iter()
                .map(|t| ContextTeam {
                    slug: t.slug,
                    purpose: t.purpose,
                    role: t.role,
                })
                .collect(),
            console_base_url: self.console_base_url.clone(),
            console_url_patterns: console_url_patterns(),
        })
    }

    pub async fn execute(&self, ctx: &TurnContext, input: ExecuteInput) -> Result<Value, AgentError> {
        let variables = parse_variables(input.variables)?;

        let validation = self.validator.validate(&input.query);
        if let Some(err) = validation.to_error() {
            tracing::info!(error = %err, "rejected GraphQL query");
            return Err(err);
        }

        let data = self
            .client
            .execute(ctx, &input.query, variables)
            .await
            .map_err(|e| match e {
                AgentError::Canceled | AgentError::Timeout(_) => e,
                other => AgentError::GraphQL(format!("query execution failed: {other}")),
            })?;
        Ok(Value::Object(data))
    }

    pub fn validate(&self, input: &ValidateInput) -> QueryValidationResult {
        self.validator.validate(&input.query)
    }

    /// The API tools in registration order.
    pub fn into_tools(self: Arc<Self>) -> Vec<AgentTool> {
        let context_tools = self.clone();
        let execute_tools = self.clone();
        let validate_tools = self;

        vec![
            AgentTool::new(
                ToolSpec::builder(
                    GET_NAIS_CONTEXT_TOOL,
                    "Get the current Nais context including authenticated user, their teams, and console URL. Call this first to understand what the user has access to and to get the correct console URL for links.",
                )
                .build(),
                move |_args, ctx| {
                    let tools = context_tools.clone();
                    async move {
                        let context = tools.nais_context(&ctx.turn).await?;
                        Ok(serde_json::to_value(context)?)
                    }
                },
            ),
            AgentTool::typed(
                ToolSpec::builder(EXECUTE_GRAPHQL_TOOL, execute_description())
                    .string(
                        "query",
                        "The GraphQL query to execute. Must be a query operation (not mutation or subscription).",
                        true,
                    )
                    .string(
                        "variables",
                        "JSON object containing variables for the query. Example: {\"slug\": \"my-team\", \"first\": 10}",
                        false,
                    )
                    .build(),
                move |input: ExecuteInput, ctx| {
                    let tools = execute_tools.clone();
                    async move { tools.execute(&ctx.turn, input).await }
                },
            ),
            AgentTool::typed(
                ToolSpec::builder(
                    VALIDATE_GRAPHQL_TOOL,
                    "Validate a GraphQL query against the schema without executing it. Use this to check if your query is valid before executing.",
                )
                .string("query", "The GraphQL query to validate.", true)
                .build(),
                move |input: ValidateInput, _ctx| {
                    let result = validate_tools.validate(&input);
                    async move { Ok(result) }
                },
            ),
        ]
    }
}

fn execute_description() -> String {
    format!(
        "Execute a GraphQL query against the Nais API.\n\n\
         IMPORTANT: Before using this tool, use the schema exploration tools (schema_list_queries, schema_get_type, schema_get_field) to understand the available types and fields.\n\n\
         This tool only supports queries (read operations). Mutations are not allowed.\n\n{NAIS_API_GUIDANCE}"
    )
}

impl std::fmt::Debug for GraphQLTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLTools")
            .field("console_base_url", &self.console_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variables_accept_object_string_and_empty() {
        assert!(parse_variables(None).unwrap().is_empty());
        assert!(parse_variables(Some(json!(""))).unwrap().is_empty());
        let from_string = parse_variables(Some(json!("{\"slug\": \"t\"}"))).unwrap();
        assert_eq!(from_string.get("slug"), Some(&json!("t")));
        let from_object = parse_variables(Some(json!({"first": 10}))).unwrap();
        assert_eq!(from_object.get("first"), Some(&json!(10)));
    }

    #[test]
    fn malformed_variables_are_rejected() {
        let err = parse_variables(Some(json!("{not json"))).unwrap_err();
        assert!(err.to_string().starts_with("invalid variables JSON: "));
    }

    #[test]
    fn console_urls_follow_tenant() {
        assert_eq!(console_base_url("nav"), "https://console.nav.cloud.nais.io");
        let patterns = console_url_patterns();
        assert_eq!(patterns.len(), 12);
        assert_eq!(patterns["app"], "/team/{team}/{env}/app/{app}");
    }
}
