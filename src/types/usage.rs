//! Token usage tracking.

use serde::{Deserialize, Serialize};

/// Token usage reported by the model, accumulated across the rounds of a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UsageStats {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    /// Context window of the model, when the provider reports it.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_tokens: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl UsageStats {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            max_tokens: 0,
        }
    }

    /// Merge another usage into this one.
    ///
    /// Token counts are summed; `max_tokens` takes the latest non-zero value.
    pub fn merge(&mut self, other: &UsageStats) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
        if other.max_tokens > 0 {
            self.max_tokens = other.max_tokens;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_tokens == 0 && self.output_tokens == 0 && self.total_tokens == 0
    }
}
