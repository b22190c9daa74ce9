//! Instrumentation hooks for the conversation loop.

use std::time::Duration;

use crate::types::UsageStats;

/// Outcome label of a recorded request.
pub const STATUS_SUCCESS: &str = "success";

/// Receives measurements from the orchestrator. Every method defaults to a
/// no-op so implementations pick what they care about.
pub trait AgentObserver: Send + Sync {
    /// One completed turn; `status` is `success` or an error category.
    fn record_chat_request(&self, _status: &str, _streaming: bool, _duration: Duration) {}

    /// One LLM call, including all retry attempts.
    fn record_llm_request(&self, _status: &str, _duration: Duration, _usage: Option<&UsageStats>) {}

    fn record_tool_call(&self, _tool_name: &str, _success: bool, _duration: Duration) {}

    /// Rounds that requested tools in a finished turn.
    fn record_tool_rounds(&self, _rounds: usize) {}

    fn record_time_to_first_token(&self, _duration: Duration) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AgentObserver for NoopObserver {}

/// Emits each measurement as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AgentObserver for TracingObserver {
    fn record_chat_request(&self, status: &str, streaming: bool, duration: Duration) {
        tracing::info!(
            status,
            streaming,
            duration_ms = duration.as_millis() as u64,
            "chat request finished"
        );
    }

    fn record_llm_request(&self, status: &str, duration: Duration, usage: Option<&UsageStats>) {
        let usage = usage.copied().unwrap_or_default();
        tracing::debug!(
            status,
            duration_ms = duration.as_millis() as u64,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "LLM request finished"
        );
    }

    fn record_tool_call(&self, tool_name: &str, success: bool, duration: Duration) {
        tracing::debug!(
            tool = tool_name,
            success,
            duration_ms = duration.as_millis() as u64,
            "tool call finished"
        );
    }

    fn record_tool_rounds(&self, rounds: usize) {
        tracing::debug!(rounds, "tool rounds");
    }

    fn record_time_to_first_token(&self, duration: Duration) {
        tracing::debug!(duration_ms = duration.as_millis() as u64, "time to first token");
    }
}
