//! Tool metadata and its per-transport renderings.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::provider::{ParameterDefinition, ToolDefinition};

/// JSON type of a tool parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

/// One named parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub kind: ParameterType,
    pub description: String,
    pub required: bool,
    /// Closed set of accepted values, empty when free-form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

/// The single description of a tool, rendered for the LLM via
/// [`ToolSpec::definition`] and for JSON-schema based protocols via
/// [`ToolSpec::input_schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolSpec {
    /// Start building a spec.
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            spec: ToolSpec {
                name: name.into(),
                description: description.into(),
                parameters: Vec::new(),
            },
        }
    }

    /// LLM-facing definition with parameters in declaration order.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|p| ParameterDefinition {
                    name: p.name.clone(),
                    kind: p.kind.to_string(),
                    description: p.description.clone(),
                    required: p.required,
                    allowed_values: p.allowed_values.clone(),
                })
                .collect(),
        }
    }

    /// JSON Schema object describing the parameters.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in &self.parameters {
            let mut property = json!({
                "type": p.kind.as_ref(),
                "description": p.description,
            });
            if !p.allowed_values.is_empty() {
                property["enum"] = json!(p.allowed_values);
            }
            properties.insert(p.name.clone(), property);
            if p.required {
                required.push(p.name.clone());
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Builder for [`ToolSpec`] parameters.
pub struct ToolSpecBuilder {
    spec: ToolSpec,
}

impl ToolSpecBuilder {
    fn push(
        mut self,
        name: impl Into<String>,
        kind: ParameterType,
        description: impl Into<String>,
        required: bool,
        allowed_values: Vec<String>,
    ) -> Self {
        self.spec.parameters.push(ToolParameter {
            name: name.into(),
            kind,
            description: description.into(),
            required,
            allowed_values,
        });
        self
    }

    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, ParameterType::String, description, required, Vec::new())
    }

    /// Add an integer property.
    pub fn integer(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, ParameterType::Integer, description, required, Vec::new())
    }

    /// Add a boolean property.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, ParameterType::Boolean, description, required, Vec::new())
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.push(name, ParameterType::String, description, required, values)
    }

    pub fn build(self) -> ToolSpec {
        self.spec
    }
}
