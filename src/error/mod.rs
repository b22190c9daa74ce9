//! Error types for the conversation engine.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    SecurityPolicy(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool {tool_name} failed: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("LLM call failed: {0}")]
    Provider(String),

    #[error("LLM call failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<AgentError>,
    },

    #[error("max tool iterations ({0}) exceeded")]
    MaxToolIterations(usize),

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("operation canceled")]
    Canceled,

    #[error("{0}")]
    GraphQL(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

impl AgentError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn tool_execution(tool_name: impl Into<String>, message: impl ToString) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.to_string(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::ConfigFile(_) => ErrorCategory::Configuration,
            Self::InvalidArgument(_) => ErrorCategory::Validation,
            Self::SecurityPolicy(_) => ErrorCategory::SecurityPolicy,
            Self::UnknownTool(_) => ErrorCategory::UnknownTool,
            Self::ToolExecution { .. } | Self::GraphQL(_) => ErrorCategory::ToolExecution,
            Self::Provider(_) | Self::RetriesExhausted { .. } | Self::Stream(_) => {
                ErrorCategory::Provider
            }
            Self::MaxToolIterations(_) => ErrorCategory::IterationLimit,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Canceled => ErrorCategory::Canceled,
            Self::Network(_) => ErrorCategory::Network,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether another LLM attempt may succeed.
    ///
    /// Every provider-side failure is retried; only the turn's own
    /// cancellation and deadline stop the retry loop early.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Canceled | Self::Timeout(_))
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Provider | ErrorCategory::Network => RecoverySuggestion::RetryWithBackoff,
            ErrorCategory::Validation | ErrorCategory::SecurityPolicy => {
                RecoverySuggestion::RefineQuery
            }
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::IterationLimit | ErrorCategory::Canceled => {
                RecoverySuggestion::StartNewTurn
            }
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;
