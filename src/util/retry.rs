//! Retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::context::TurnContext;
use crate::error::AgentError;

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Wait after the first failed attempt.
    #[serde(with = "millis")]
    pub initial_backoff: Duration,
    /// Upper bound for a single wait.
    #[serde(with = "millis")]
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait after the given zero-based failed attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        Duration::from_secs_f64(
            (self.initial_backoff.as_secs_f64() * factor).min(self.max_backoff.as_secs_f64()),
        )
    }

    /// Execute an async operation with retry.
    ///
    /// Every failed attempt is followed by a backoff wait; the wait and the
    /// attempt itself end early when `ctx` is canceled or past its deadline.
    pub async fn execute<F, Fut, T>(&self, ctx: &TurnContext, mut operation: F) -> Result<T, AgentError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AgentError>>,
    {
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            match ctx.run(operation(attempt)).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    let wait = self.backoff(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        backoff_ms = wait.as_millis() as u64,
                        error = %e,
                        "LLM call failed, retrying"
                    );
                    last_error = Some(e);
                    ctx.sleep(wait).await?;
                }
            }
        }

        Err(AgentError::RetriesExhausted {
            attempts: self.max_attempts,
            source: Box::new(last_error.unwrap_or(AgentError::Canceled)),
        })
    }
}

pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
