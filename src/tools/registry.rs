//! Name-keyed tool lookup that keeps registration order.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::arguments::ToolArguments;
use super::graphql::GraphQLTools;
use super::schema::SchemaTools;
use super::tool::{Tool, ToolExecutionContext};
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::graphql::{GraphQLClient, QueryValidator};
use crate::provider::ToolDefinition;

#[derive(Default)]
struct Inner {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

/// Registered tools, listed in the order they were added.
///
/// Registering a name twice replaces the handler and keeps the original
/// position.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.tools.insert(name.clone(), tool).is_none() {
            inner.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tools
            .get(name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the named tool.
    pub async fn execute(
        &self,
        ctx: &ToolExecutionContext,
        name: &str,
        args: &ToolArguments,
    ) -> Result<serde_json::Value, AgentError> {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;
        tool.execute(args, ctx).await
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .filter_map(|name| inner.tools.get(name))
            .map(|tool| tool.spec().clone())
            .collect()
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.specs().iter().map(ToolSpec::definition).collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Registry").field("tools", &inner.order).finish()
    }
}

/// Dependencies of the built-in tool set.
#[derive(Clone)]
pub struct RegistryConfig {
    pub client: Arc<dyn GraphQLClient>,
    pub validator: QueryValidator,
    pub tenant: String,
}

/// Register the schema tools followed by the API tools.
pub fn register_all_tools(registry: &Registry, config: RegistryConfig) {
    let schema_tools = Arc::new(SchemaTools::new(config.validator.schema_arc()));
    for tool in schema_tools.into_tools() {
        registry.register(Arc::new(tool));
    }

    let graphql_tools = Arc::new(GraphQLTools::new(
        config.client,
        config.validator,
        &config.tenant,
    ));
    for tool in graphql_tools.into_tools() {
        registry.register(Arc::new(tool));
    }
    tracing::debug!(tool_count = registry.len(), "registered tools");
}
