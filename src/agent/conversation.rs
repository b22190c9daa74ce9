//! Per-turn conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::provider::{ChatRequest, ChatResponse, ToolDefinition};
use crate::types::{ChartData, ContentBlock, Document, Message, ToolCall, UsageStats};

/// What executing one tool call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// Text fed back to the model.
    pub content: String,
    pub success: bool,
    pub chart: Option<ChartData>,
}

impl ToolOutcome {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
            chart: None,
        }
    }

    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
            chart: None,
        }
    }
}

/// The result of a buffered turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorResult {
    /// Transcript of the assistant turn in order.
    pub blocks: Vec<ContentBlock>,
    /// Usage summed over every round.
    pub usage: UsageStats,
    /// Rounds that requested tools.
    pub rounds: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<Uuid>,
    pub finished_at: DateTime<Utc>,
}

impl OrchestratorResult {
    /// Text blocks joined by a space.
    pub fn text(&self) -> String {
        super::transcript::text_from_blocks(&self.blocks)
    }
}

/// Messages, blocks and usage of one turn. Created per user message and
/// dropped once the turn ends.
#[derive(Debug, Clone)]
pub struct ConversationLoop {
    system_prompt: String,
    messages: Vec<Message>,
    tools: Vec<ToolDefinition>,
    documents: Vec<Document>,
    usage: UsageStats,
    blocks: Vec<ContentBlock>,
    rounds: usize,
}

impl ConversationLoop {
    pub fn new(
        system_prompt: String,
        history: Vec<Message>,
        user_message: String,
        tools: Vec<ToolDefinition>,
        documents: Vec<Document>,
    ) -> Self {
        let mut messages = history;
        messages.push(Message::user(user_message));
        Self {
            system_prompt,
            messages,
            tools,
            documents,
            usage: UsageStats::default(),
            blocks: Vec::new(),
            rounds: 0,
        }
    }

    /// Request for the next round.
    pub fn request(&self) -> ChatRequest {
        ChatRequest {
            system_prompt: self.system_prompt.clone(),
            messages: self.messages.clone(),
            tools: self.tools.clone(),
            documents: self.documents.clone(),
        }
    }

    pub fn record_usage(&mut self, usage: &UsageStats) {
        self.usage.merge(usage);
    }

    pub fn usage(&self) -> UsageStats {
        self.usage
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    fn push_reply_blocks(&mut self, thinking: &str, content: &str) {
        if !thinking.is_empty() {
            self.blocks.push(ContentBlock::thinking(thinking));
        }
        if !content.is_empty() {
            self.blocks.push(ContentBlock::text(content));
        }
    }

    /// Record the model's final reply.
    pub fn finish(&mut self, response: &ChatResponse) {
        self.push_reply_blocks(&response.thinking, &response.content);
    }

    /// Record a reply that requested tools; its calls are replayed verbatim
    /// in the next request.
    pub fn begin_tool_round(&mut self, response: &ChatResponse) {
        self.rounds += 1;
        self.push_reply_blocks(&response.thinking, &response.content);
        self.messages.push(Message::assistant_tool_calls(
            response.content.clone(),
            response.tool_calls.clone(),
        ));
    }

    /// Record one executed call as a block and as a tool message.
    pub fn record_tool_result(&mut self, call: &ToolCall, outcome: ToolOutcome) {
        self.blocks.push(ContentBlock::tool_use(
            &call.id,
            &call.name,
            outcome.success,
            outcome.content.clone(),
        ));
        if let Some(chart) = outcome.chart {
            self.blocks.push(ContentBlock::Chart { chart });
        }
        self.messages
            .push(Message::tool_result(&call.id, outcome.content));
    }

    pub fn into_result(self, conversation_id: Option<Uuid>) -> OrchestratorResult {
        OrchestratorResult {
            blocks: self.blocks,
            usage: self.usage,
            rounds: self.rounds,
            conversation_id,
            finished_at: Utc::now(),
        }
    }
}
