//! Error classification shared by stream events and observers.

use serde::{Deserialize, Serialize};

/// Broad error category for routing recovery logic.
///
/// The snake_case form is used as the `code` of `error` stream events and as
/// the status label handed to observers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    Validation,
    SecurityPolicy,
    UnknownTool,
    ToolExecution,
    Provider,
    IterationLimit,
    Timeout,
    Canceled,
    Network,
    Serialization,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether errors of this category end the current turn.
    ///
    /// Validation and tool failures are folded back into the conversation as
    /// tool results; everything else unwinds to the caller.
    pub fn is_fatal_to_turn(self) -> bool {
        !matches!(
            self,
            Self::Validation | Self::SecurityPolicy | Self::UnknownTool | Self::ToolExecution
        )
    }
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryWithBackoff,
    RefineQuery,
    CheckConfiguration,
    IncreaseTimeout,
    StartNewTurn,
    ContactSupport,
}
