//! LLM client boundary.
//!
//! The wire protocol of the model provider lives outside this crate; the
//! conversation loop only needs a buffered call and a chunk stream.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::types::{Document, Message, StreamChunk, ToolCall, UsageStats};

/// A request sent to the LLM once per round.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub documents: Vec<Document>,
}

/// A buffered model response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    pub content: String,
    pub thinking: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: Option<UsageStats>,
}

impl ChatResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: UsageStats) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// LLM-facing description of a callable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterDefinition>,
}

/// One ordered parameter of a [`ToolDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub required: bool,
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

/// Stream of chunks produced by [`ChatClient::chat_stream`].
pub type ChunkStream = BoxStream<'static, Result<StreamChunk, AgentError>>;

/// Core trait implemented by LLM clients.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Model label used in logs and observer records.
    fn model_id(&self) -> &str {
        "unknown"
    }

    /// Generate a complete response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError>;

    /// Generate a response incrementally. The stream ends after a chunk with
    /// `done` set or when the provider closes it.
    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream, AgentError>;
}
