//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::arguments::ToolArguments;
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::util::context::TurnContext;

/// Context available during tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Cancellation and deadline of the surrounding turn. Handlers observe it
    /// cooperatively; the loop never aborts a running handler.
    pub turn: TurnContext,
    /// Id of the model's tool call, when invoked from a conversation.
    pub tool_call_id: Option<String>,
}

impl ToolExecutionContext {
    pub fn new(turn: TurnContext) -> Self {
        Self {
            turn,
            tool_call_id: None,
        }
    }

    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }
}

/// Core tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and parameters.
    fn spec(&self) -> &ToolSpec;

    fn name(&self) -> &str {
        &self.spec().name
    }

    /// Execute the tool with the model's arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, AgentError>;
}

/// Type alias for the tool handler function.
type ToolHandler = dyn Fn(
        ToolArguments,
        ToolExecutionContext,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, AgentError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool.
pub struct AgentTool {
    spec: ToolSpec,
    handler: Arc<ToolHandler>,
}

impl AgentTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(spec: ToolSpec, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, AgentError>> + Send + 'static,
    {
        Self {
            spec,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }

    /// Create a tool whose arguments are decoded into `I` before `handler`
    /// runs and whose output `O` is returned as JSON.
    pub fn typed<I, O, F, Fut>(spec: ToolSpec, handler: F) -> Self
    where
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(I, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, AgentError>> + Send + 'static,
    {
        let tool_name = spec.name.clone();
        Self::new(spec, move |args, ctx| {
            let pending = args
                .deserialize::<I>(&tool_name)
                .map(|input| handler(input, ctx));
            async move {
                let output = pending?.await?;
                Ok(serde_json::to_value(output)?)
            }
        })
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, AgentError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.spec.name)
            .field("description", &self.spec.description)
            .finish()
    }
}
