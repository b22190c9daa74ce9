//! Configuration system (layered: defaults < config file < env).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::util::retry::{millis, RetryPolicy};

const ENV_PREFIX: &str = "NAIS_AGENT_";

/// Limits of a turn and the platform the tools talk to.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Tool-call rounds allowed per turn.
    pub max_tool_iterations: usize,
    /// Wall-clock budget of a whole turn.
    #[serde(rename = "turn_timeout_ms", with = "millis")]
    pub turn_timeout: Duration,
    /// LLM retry policy of buffered turns.
    pub retry: RetryPolicy,
    /// Tool output longer than this many characters is truncated.
    pub max_tool_output_chars: usize,
    /// Capacity of the streaming event channel.
    pub stream_buffer: usize,
    /// Tenant used for console links.
    pub tenant: String,
    pub graphql_url: Option<String>,
    pub graphql_token: Option<String>,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("max_tool_iterations", &self.max_tool_iterations)
            .field("turn_timeout", &self.turn_timeout)
            .field("retry", &self.retry)
            .field("max_tool_output_chars", &self.max_tool_output_chars)
            .field("stream_buffer", &self.stream_buffer)
            .field("tenant", &self.tenant)
            .field("graphql_url", &self.graphql_url)
            .field("graphql_token", &self.graphql_token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tool_iterations: 5,
            turn_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            max_tool_output_chars: 50_000,
            stream_buffer: 100,
            tenant: "nav".to_string(),
            graphql_url: None,
            graphql_token: None,
        }
    }
}

impl AgentConfig {
    /// `~/.nais-agent/config.toml`.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".nais-agent"))
            .unwrap_or_else(|| PathBuf::from(".nais-agent"))
            .join("config.toml")
    }

    /// Read a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AgentError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Defaults overlaid with `NAIS_AGENT_*` variables (and `.env`).
    pub fn from_env() -> Result<Self, AgentError> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Resolve all layers and validate the result.
    ///
    /// An explicit `path` must exist; the default path is used only when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self, AgentError> {
        let _ = dotenvy::dotenv();
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Self::default_path();
                if default.is_file() {
                    Self::from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values found through `lookup`, keyed by the full variable
    /// name.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), AgentError> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());

        if let Some(v) = var("MAX_TOOL_ITERATIONS") {
            self.max_tool_iterations = parse_env("MAX_TOOL_ITERATIONS", &v)?;
        }
        if let Some(v) = var("TURN_TIMEOUT_MS") {
            self.turn_timeout = Duration::from_millis(parse_env("TURN_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = var("MAX_ATTEMPTS") {
            self.retry.max_attempts = parse_env("MAX_ATTEMPTS", &v)?;
        }
        if let Some(v) = var("INITIAL_BACKOFF_MS") {
            self.retry.initial_backoff = Duration::from_millis(parse_env("INITIAL_BACKOFF_MS", &v)?);
        }
        if let Some(v) = var("MAX_TOOL_OUTPUT_CHARS") {
            self.max_tool_output_chars = parse_env("MAX_TOOL_OUTPUT_CHARS", &v)?;
        }
        if let Some(v) = var("STREAM_BUFFER") {
            self.stream_buffer = parse_env("STREAM_BUFFER", &v)?;
        }
        if let Some(v) = var("TENANT") {
            self.tenant = v;
        }
        if let Some(v) = var("GRAPHQL_URL") {
            self.graphql_url = Some(v);
        }
        if let Some(v) = var("GRAPHQL_TOKEN") {
            self.graphql_token = Some(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.max_tool_iterations == 0 {
            return Err(AgentError::configuration("max_tool_iterations must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(AgentError::configuration("retry.max_attempts must be at least 1"));
        }
        if self.max_tool_output_chars == 0 {
            return Err(AgentError::configuration("max_tool_output_chars must be at least 1"));
        }
        if self.stream_buffer == 0 {
            return Err(AgentError::configuration("stream_buffer must be at least 1"));
        }
        if self.turn_timeout.is_zero() {
            return Err(AgentError::configuration("turn_timeout_ms must be at least 1"));
        }
        if self.tenant.trim().is_empty() {
            return Err(AgentError::configuration("tenant must not be empty"));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, AgentError>
where
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e| {
        AgentError::configuration(format!("invalid {ENV_PREFIX}{name} value {value:?}: {e}"))
    })
}
