//! Transcript blocks of one assistant turn.

use serde::{Deserialize, Serialize};

use super::usage::UsageStats;

/// Discriminant of a [`ContentBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ContentBlockType {
    Thinking,
    Text,
    ToolUse,
    Chart,
    Usage,
}

/// One ordered unit of an assistant turn.
///
/// Serialized with a `type` tag, e.g.
/// `{"type":"tool_use","tool_call_id":"call_1","tool_name":"schema_search",...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Thinking {
        thinking: String,
    },
    Text {
        text: String,
    },
    ToolUse {
        tool_call_id: String,
        tool_name: String,
        tool_success: bool,
        #[serde(default)]
        tool_result: String,
    },
    Chart {
        chart: ChartData,
    },
    Usage {
        usage: UsageStats,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn thinking(thinking: impl Into<String>) -> Self {
        Self::Thinking {
            thinking: thinking.into(),
        }
    }

    pub fn tool_use(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        tool_success: bool,
        tool_result: impl Into<String>,
    ) -> Self {
        Self::ToolUse {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            tool_success,
            tool_result: tool_result.into(),
        }
    }

    pub fn block_type(&self) -> ContentBlockType {
        match self {
            Self::Thinking { .. } => ContentBlockType::Thinking,
            Self::Text { .. } => ContentBlockType::Text,
            Self::ToolUse { .. } => ContentBlockType::ToolUse,
            Self::Chart { .. } => ContentBlockType::Chart,
            Self::Usage { .. } => ContentBlockType::Usage,
        }
    }
}

/// A chart the client renders from a metrics query.
///
/// Values are kept verbatim as strings; the accepted sets for `chart_type`,
/// `interval` and `y_format` are enforced when the chart tool arguments are
/// parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartData {
    pub chart_type: String,
    pub title: String,
    pub environment: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_template: Option<String>,
}
