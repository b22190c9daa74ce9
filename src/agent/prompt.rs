//! System prompt assembly.

use std::fmt::Write;

use crate::provider::ToolDefinition;
use crate::types::{ChatContext, Document};
use crate::util::text::tool_summary;

const PERSONA: &str = "You are a helpful assistant for the Nais platform, a Kubernetes-based application platform. You help users understand and troubleshoot their applications.";

const TOOLS_INTRO: &str = "You have access to the following tools to help answer user questions:";

const GUIDELINES: &str = "## Guidelines
1. **Start with context**: Use get_nais_context first to understand the user and their teams.
2. **Explore before querying**: Use schema exploration tools to understand the API structure before executing queries.
3. **Use specific queries**: Construct targeted GraphQL queries based on what the user needs.
4. **Provide actionable advice**: When possible, include links to relevant console pages using the URL patterns from get_nais_context.
5. **Handle errors gracefully**: If a tool returns an error, explain it clearly to the user and suggest alternatives.
6. **Use documentation**: For general questions about Nais features, refer to the documentation provided below.

## Source Citation Guidelines
When documentation is provided below, you MUST follow these rules:
1. **Use the documentation**: Base your answers on the documentation provided when it is relevant to the user's question.
2. **Cite your sources**: When you use information from the documentation, naturally reference it in your response (e.g., \"According to the Nais documentation on X...\" or \"The documentation explains that...\").
3. **Only cite what you use**: Do NOT reference sources that you did not actually use to formulate your answer. If the documentation provided is not relevant to the question, simply answer without citing it.
4. **Be specific**: When citing, be specific about which documentation you're referencing so users can find more details.
5. **Combine sources**: If multiple documentation sources contribute to your answer, reference each one appropriately.
";

/// Build the system prompt for one turn.
///
/// Tools are listed in the order given, which is the registration order.
pub fn build_system_prompt(
    context: Option<&ChatContext>,
    tools: &[ToolDefinition],
    documents: &[Document],
) -> String {
    let mut prompt = String::new();
    prompt.push_str(PERSONA);
    prompt.push_str("\n\n## Current Context\n");

    if let Some(context) = context {
        let lines = [
            ("User is viewing", &context.path),
            ("Team", &context.team),
            ("Application", &context.app),
            ("Environment", &context.env),
        ];
        for (label, value) in lines {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                let _ = writeln!(prompt, "- {label}: {value}");
            }
        }
    }

    let _ = write!(prompt, "\n## Available Tools\n\n{TOOLS_INTRO}\n\n");
    for tool in tools {
        let _ = writeln!(prompt, "- **{}**: {}", tool.name, tool_summary(&tool.description));
    }

    prompt.push('\n');
    prompt.push_str(GUIDELINES);

    if !documents.is_empty() {
        prompt.push_str("\n## Documentation\n");
        for doc in documents {
            let _ = write!(prompt, "\n### {}\n{}\nSource: {}\n", doc.title, doc.content, doc.url);
        }
    }

    prompt
}
