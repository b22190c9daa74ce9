//! Typed access to tool call arguments.

use serde_json::{Map, Value};

use crate::error::AgentError;

/// Wrapper around the argument map of a tool call providing typed extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Build from any JSON value; non-objects yield empty arguments.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    /// Get the raw argument map.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Get an optional string argument; non-string values read as absent.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Get a required, non-empty string argument.
    pub fn get_non_empty_str(&self, key: &str) -> Result<&str, AgentError> {
        self.get_str_opt(key)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AgentError::invalid_argument(format!("{key} is required")))
    }

    /// Deserialize the entire arguments into a typed input struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self, tool: &str) -> Result<T, AgentError> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(|e| {
            AgentError::invalid_argument(format!("invalid arguments for {tool}: {e}"))
        })
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}
