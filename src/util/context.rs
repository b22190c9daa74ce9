//! Cancellation and deadline scope of one turn.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;

/// Carries the caller's cancellation token and the turn deadline down to the
/// LLM client, the retry backoff and every tool handler.
#[derive(Debug, Clone)]
pub struct TurnContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
    timeout: Duration,
}

impl Default for TurnContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl TurnContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
            timeout: Duration::ZERO,
        }
    }

    /// Bound the scope to `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self.timeout = timeout;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The reason this scope is over, if it is.
    pub fn error(&self) -> Option<AgentError> {
        if self.cancel.is_cancelled() {
            return Some(AgentError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(self.timeout_error()),
            _ => None,
        }
    }

    /// Resolves once the scope is canceled or its deadline passes.
    pub async fn done(&self) -> AgentError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.cancel.cancelled() => AgentError::Canceled,
                _ = tokio::time::sleep_until(deadline) => self.timeout_error(),
            },
            None => {
                self.cancel.cancelled().await;
                AgentError::Canceled
            }
        }
    }

    /// Drive `future` unless the scope ends first.
    pub async fn run<T>(
        &self,
        future: impl Future<Output = Result<T, AgentError>>,
    ) -> Result<T, AgentError> {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            result = future => result,
        }
    }

    /// Sleep for `duration`, returning early with an error if the scope ends.
    pub async fn sleep(&self, duration: Duration) -> Result<(), AgentError> {
        self.run(async {
            tokio::time::sleep(duration).await;
            Ok(())
        })
        .await
    }

    fn timeout_error(&self) -> AgentError {
        AgentError::Timeout(self.timeout.as_millis() as u64)
    }
}
