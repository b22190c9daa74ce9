//! Tool system for function calling.

pub mod arguments;
pub mod chart;
pub mod graphql;
pub mod integration;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use chart::{parse_chart_arguments, render_chart_spec, CHART_RENDERED, RENDER_CHART_TOOL};
pub use graphql::{console_base_url, console_url_patterns, GraphQLTools};
pub use integration::{ToolIntegration, ToolIntegrationConfig};
pub use registry::{register_all_tools, Registry, RegistryConfig};
pub use schema::SchemaTools;
pub use tool::{AgentTool, Tool, ToolExecutionContext};
pub use types::{ParameterType, ToolParameter, ToolSpec, ToolSpecBuilder};
