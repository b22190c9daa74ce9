//! Helpers for persisting and replaying turns.

use crate::types::{ContentBlock, Message, Source, ToolCall, UsageStats};

use super::events::StreamEvent;

const DEFAULT_TITLE: &str = "New conversation";
const MAX_TITLE_CHARS: usize = 100;
const GENERIC_TITLE_WORDS: [&str; 3] = ["guide", "documentation", "nais"];

/// Folds a stream into the block list a buffered turn would have produced,
/// plus a trailing usage block.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    blocks: Vec<ContentBlock>,
    text: String,
    thinking: String,
    usage: UsageStats,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&mut self) {
        if !self.thinking.is_empty() {
            self.blocks
                .push(ContentBlock::thinking(std::mem::take(&mut self.thinking)));
        }
        if !self.text.is_empty() {
            self.blocks
                .push(ContentBlock::text(std::mem::take(&mut self.text)));
        }
    }

    pub fn push(&mut self, event: &StreamEvent) {
        match event {
            StreamEvent::Thinking { thinking } => {
                if !self.text.is_empty() {
                    self.flush();
                }
                self.thinking.push_str(thinking);
            }
            StreamEvent::Content { content } => self.text.push_str(content),
            StreamEvent::ToolStart { .. } => self.flush(),
            StreamEvent::ToolEnd {
                tool_call_id,
                tool_name,
                success,
                result,
                ..
            } => {
                self.flush();
                self.blocks.push(ContentBlock::tool_use(
                    tool_call_id,
                    tool_name,
                    *success,
                    result,
                ));
            }
            StreamEvent::Chart { chart } => {
                self.flush();
                self.blocks.push(ContentBlock::Chart {
                    chart: chart.clone(),
                });
            }
            StreamEvent::Usage { usage } => self.usage.merge(usage),
            StreamEvent::Done { .. } | StreamEvent::Error { .. } => self.flush(),
        }
    }

    pub fn finish(mut self) -> Vec<ContentBlock> {
        self.flush();
        if !self.usage.is_empty() {
            self.blocks.push(ContentBlock::Usage { usage: self.usage });
        }
        self.blocks
    }
}

/// Text blocks joined by a space.
pub fn text_from_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn count_tool_blocks(blocks: &[ContentBlock]) -> usize {
    blocks
        .iter()
        .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
        .count()
}

/// A stored turn of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredTurn {
    User(String),
    Assistant(Vec<ContentBlock>),
}

/// Rebuild model history from stored turns.
///
/// An assistant turn that used tools becomes an assistant message carrying
/// the calls, one tool message per recorded result and the final text.
pub fn history_from_blocks(turns: &[StoredTurn]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(turns.len() * 2);
    for turn in turns {
        let blocks = match turn {
            StoredTurn::User(text) => {
                messages.push(Message::user(text.clone()));
                continue;
            }
            StoredTurn::Assistant(blocks) => blocks,
        };

        let text = text_from_blocks(blocks);
        let calls: Vec<_> = blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse {
                    tool_call_id,
                    tool_name,
                    ..
                } => Some(ToolCall::new(tool_call_id, tool_name, Default::default())),
                _ => None,
            })
            .collect();

        if calls.is_empty() {
            messages.push(Message::assistant(text));
            continue;
        }

        messages.push(Message::assistant_tool_calls("", calls));
        for block in blocks {
            if let ContentBlock::ToolUse {
                tool_call_id,
                tool_result,
                ..
            } = block
            {
                if !tool_result.is_empty() {
                    messages.push(Message::tool_result(tool_call_id, tool_result.clone()));
                }
            }
        }
        if !text.is_empty() {
            messages.push(Message::assistant(text));
        }
    }
    messages
}

/// Title from the first line of the opening message.
pub fn conversation_title(message: &str) -> String {
    let trimmed = message.trim();
    let first_line = trimmed.lines().next().unwrap_or_default();
    if first_line.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    if first_line.chars().count() > MAX_TITLE_CHARS {
        let cut: String = first_line.chars().take(MAX_TITLE_CHARS - 3).collect();
        return format!("{cut}...");
    }
    first_line.to_string()
}

/// Keep the sources the answer actually refers to.
///
/// A source counts when its title, its URL or a distinctive word of its
/// title (longer than four characters, not a generic word) appears in the
/// answer, ignoring case.
pub fn filter_used_sources(answer: &str, sources: &[Source]) -> Vec<Source> {
    let answer = answer.to_lowercase();
    sources
        .iter()
        .filter(|source| {
            let title = source.title.to_lowercase();
            if (!title.is_empty() && answer.contains(&title))
                || (!source.url.is_empty() && answer.contains(&source.url.to_lowercase()))
            {
                return true;
            }
            title
                .split_whitespace()
                .filter(|word| word.chars().count() > 4 && !GENERIC_TITLE_WORDS.contains(word))
                .any(|word| answer.contains(word))
        })
        .cloned()
        .collect()
}
