//! The `render_chart` tool: validated chart arguments for the client UI.

use std::str::FromStr;

use strum::VariantNames;

use super::arguments::ToolArguments;
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::types::ChartData;

/// Name of the chart tool as seen by the model.
pub const RENDER_CHART_TOOL: &str = "render_chart";

/// Text returned to the model after a chart was accepted.
pub const CHART_RENDERED: &str =
    "Chart rendered successfully. The user can now see the visualization.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum ChartType {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::VariantNames)]
pub enum ChartInterval {
    #[strum(serialize = "1h")]
    OneHour,
    #[strum(serialize = "6h")]
    SixHours,
    #[strum(serialize = "1d")]
    OneDay,
    #[strum(serialize = "7d")]
    SevenDays,
    #[strum(serialize = "30d")]
    ThirtyDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum YFormat {
    Number,
    Percentage,
    Bytes,
    CpuCores,
    Duration,
}

const DESCRIPTION: &str = "Render a Prometheus metrics chart in the chat. Use this tool when the user asks about metrics, resource usage, trends, or any data that would be better visualized as a chart rather than described in text.

Currently only line charts are supported. The chart will be rendered by the client using the provided Prometheus query.

Guidelines for when to use this tool:
- CPU, memory, or network usage over time
- Request rates, error rates, or latency trends
- Any time-series metrics the user wants to visualize
- When comparing metrics across pods or containers

Do NOT use this tool for:
- Simple numeric values that don't need visualization
- Non-metrics questions
- When the user explicitly asks for text/numbers only";

/// Parameter contract of the chart tool. The system prompt guidance depends on
/// these seven parameters keeping their names, types and accepted values.
pub fn render_chart_spec() -> ToolSpec {
    ToolSpec::builder(RENDER_CHART_TOOL, DESCRIPTION)
        .string(
            "chart_type",
            "The type of chart to render. Currently only 'line' is supported.",
            true,
        )
        .string(
            "title",
            "A human-readable title for the chart, e.g., 'CPU Usage for my-app'",
            true,
        )
        .string(
            "environment",
            "The environment to query metrics from (e.g., 'dev', 'prod'). Use the environment from the current context if available.",
            true,
        )
        .string(
            "query",
            "The Prometheus query to execute. Must be a valid PromQL query.",
            true,
        )
        .string_enum(
            "interval",
            "Time interval for the query. Valid values: '1h' (1 hour), '6h' (6 hours), '1d' (1 day), '7d' (7 days), '30d' (30 days). Defaults to '1h'.",
            ChartInterval::VARIANTS,
            false,
        )
        .string_enum(
            "y_format",
            "Format type for Y-axis values. Valid values: 'number', 'percentage', 'bytes', 'cpu_cores', 'duration'. Helps the client format the values appropriately.",
            YFormat::VARIANTS,
            false,
        )
        .string(
            "label_template",
            "Template string for formatting series labels. Use {label_name} syntax, e.g., '{pod}' or '{pod}/{container}'. If not provided, default label formatting is used.",
            false,
        )
        .build()
}

/// Validate chart tool arguments into a [`ChartData`].
///
/// Enumerated values are checked but stored verbatim; `label_template` is
/// passed through untouched.
pub fn parse_chart_arguments(args: &ToolArguments) -> Result<ChartData, AgentError> {
    let chart_type = args.get_non_empty_str("chart_type")?;
    if ChartType::from_str(chart_type).is_err() {
        return Err(AgentError::invalid_argument(format!(
            "unsupported chart_type: {chart_type} (only 'line' is supported)"
        )));
    }

    let title = args.get_non_empty_str("title")?;
    let environment = args.get_non_empty_str("environment")?;
    let query = args.get_non_empty_str("query")?;

    let interval = optional_enum::<ChartInterval>(args, "interval")?;
    let y_format = optional_enum::<YFormat>(args, "y_format")?;

    Ok(ChartData {
        chart_type: chart_type.to_string(),
        title: title.to_string(),
        environment: environment.to_string(),
        query: query.to_string(),
        interval,
        y_format,
        label_template: args.get_str_opt("label_template").map(str::to_string),
    })
}

fn optional_enum<E>(args: &ToolArguments, key: &str) -> Result<Option<String>, AgentError>
where
    E: FromStr + VariantNames,
{
    match args.get_str_opt(key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) if E::from_str(value).is_ok() => Ok(Some(value.to_string())),
        Some(value) => Err(AgentError::invalid_argument(format!(
            "invalid {key}: {value} (valid values: {})",
            E::VARIANTS.join(", ")
        ))),
    }
}
