//! Single entry point from the conversation loop into the tool set.

use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use serde_json::Value;

use super::arguments::ToolArguments;
use super::chart::{parse_chart_arguments, render_chart_spec, RENDER_CHART_TOOL};
use super::registry::{register_all_tools, Registry, RegistryConfig};
use super::tool::ToolExecutionContext;
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::graphql::{GraphQLClient, QueryValidator};
use crate::provider::ToolDefinition;

/// Dependencies for [`ToolIntegration::new`].
#[derive(Clone, Default)]
pub struct ToolIntegrationConfig {
    pub graphql_client: Option<Arc<dyn GraphQLClient>>,
    pub schema: Option<Arc<Valid<Schema>>>,
    /// Tenant used to derive console links.
    pub tenant: String,
}

/// Registry tools plus the chart tool, exposed as LLM definitions and a
/// single execute call.
#[derive(Debug)]
pub struct ToolIntegration {
    registry: Registry,
    chart: ToolSpec,
}

impl ToolIntegration {
    pub fn new(config: ToolIntegrationConfig) -> Result<Self, AgentError> {
        let client = config
            .graphql_client
            .ok_or_else(|| AgentError::configuration("GraphQL client is required"))?;
        let schema = config
            .schema
            .ok_or_else(|| AgentError::configuration("GraphQL schema is required"))?;
        if config.tenant.trim().is_empty() {
            return Err(AgentError::configuration("tenant is required"));
        }

        let registry = Registry::new();
        register_all_tools(
            &registry,
            RegistryConfig {
                client,
                validator: QueryValidator::new(schema),
                tenant: config.tenant,
            },
        );
        Ok(Self::from_registry(registry))
    }

    /// Wrap an already populated registry.
    pub fn from_registry(registry: Registry) -> Self {
        Self {
            registry,
            chart: render_chart_spec(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry tools in registration order followed by the chart tool.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs = self.registry.specs();
        specs.push(self.chart.clone());
        specs
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.specs().iter().map(ToolSpec::definition).collect()
    }

    /// `(name, description, input_schema)` for JSON-schema based protocols.
    pub fn input_schemas(&self) -> Vec<(String, String, Value)> {
        self.specs()
            .into_iter()
            .map(|spec| {
                let schema = spec.input_schema();
                (spec.name, spec.description, schema)
            })
            .collect()
    }

    pub async fn execute_tool(
        &self,
        ctx: &ToolExecutionContext,
        name: &str,
        args: &ToolArguments,
    ) -> Result<Value, AgentError> {
        tracing::debug!(tool = name, "executing tool");
        if name == RENDER_CHART_TOOL {
            let chart = parse_chart_arguments(args)?;
            return Ok(serde_json::to_value(chart)?);
        }
        self.registry.execute(ctx, name, args).await
    }
}
