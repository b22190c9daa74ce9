//! Convenience re-exports for common use.

pub use crate::agent::{Orchestrator, OrchestratorResult, StreamEvent, TranscriptBuilder, TurnRequest};
pub use crate::config::AgentConfig;
pub use crate::error::{AgentError, ErrorCategory, Result};
pub use crate::graphql::{GraphQLClient, HttpGraphQLClient, QueryValidator};
pub use crate::observer::{AgentObserver, NoopObserver, TracingObserver};
pub use crate::provider::{ChatClient, ChatRequest, ChatResponse, ToolDefinition};
pub use crate::tools::{AgentTool, Tool, ToolArguments, ToolIntegration, ToolIntegrationConfig, ToolSpec};
pub use crate::types::{
    ChartData, ChatContext, ContentBlock, Document, Message, Role, StreamChunk, ToolCall, UsageStats,
};
