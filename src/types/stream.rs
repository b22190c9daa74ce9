//! Streaming types.

use serde::{Deserialize, Serialize};

use super::message::ToolCall;
use super::usage::UsageStats;

/// An incremental piece of a streamed model response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamChunk {
    /// Incremental answer text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// Incremental reasoning text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thinking: String,
    /// Tool calls completed in this chunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Usage (typically only on the final chunk).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageStats>,
    /// Set on the last chunk of a response.
    #[serde(default)]
    pub done: bool,
}

impl StreamChunk {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            ..Self::default()
        }
    }

    pub fn thinking(text: impl Into<String>) -> Self {
        Self {
            thinking: text.into(),
            ..Self::default()
        }
    }

    pub fn done(usage: Option<UsageStats>) -> Self {
        Self {
            usage,
            done: true,
            ..Self::default()
        }
    }
}
