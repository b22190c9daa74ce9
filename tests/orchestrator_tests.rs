//! Buffered turns against a scripted LLM.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use common::{
    fast_config, integration_with, observed_orchestrator, orchestrator, orchestrator_with,
    tool_call, usage, Observation, RecordingObserver, ScriptedChatClient, StaticGraphQLClient,
};
use nais_agent::agent::{Orchestrator, TurnRequest};
use nais_agent::config::AgentConfig;
use nais_agent::error::{AgentError, ErrorCategory};
use nais_agent::provider::{ChatClient, ChatRequest, ChatResponse, ChunkStream};
use nais_agent::tools::CHART_RENDERED;
use nais_agent::types::{ChatContext, ContentBlock, Message, Role, UsageStats};
use nais_agent::util::text::TRUNCATION_NOTICE;

fn ask(message: &str) -> TurnRequest {
    TurnRequest::builder().user_message(message).build()
}

#[tokio::test]
async fn plain_answer_without_tools() {
    let client = Arc::new(ScriptedChatClient::new());
    client.queue(ChatResponse::text("You have two apps.").with_usage(usage(12, 4)));

    let result = orchestrator(client.clone(), fast_config())
        .run(ask("How many apps?"))
        .await
        .unwrap();

    assert_eq!(result.blocks, vec![ContentBlock::text("You have two apps.")]);
    assert_eq!(result.rounds, 0);
    assert_eq!(result.usage, UsageStats::new(12, 4));
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn tool_round_feeds_results_back() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "call_1",
            "schema_get_type",
            json!({"name": "Team"}),
        )])
        .queue(ChatResponse::text("Teams have a slug.").with_usage(usage(20, 6)));

    let result = orchestrator(client.clone(), fast_config())
        .run(ask("What is a team?"))
        .await
        .unwrap();

    assert_eq!(result.rounds, 1);
    assert_eq!(result.usage, UsageStats::new(30, 11));
    assert_eq!(result.blocks.len(), 2);
    match &result.blocks[0] {
        ContentBlock::ToolUse {
            tool_call_id,
            tool_name,
            tool_success,
            tool_result,
        } => {
            assert_eq!(tool_call_id, "call_1");
            assert_eq!(tool_name, "schema_get_type");
            assert!(tool_success);
            assert!(tool_result.contains("\"name\":\"Team\""));
        }
        other => panic!("expected tool_use block, got {other:?}"),
    }
    assert_eq!(result.blocks[1], ContentBlock::text("Teams have a slug."));

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    let second = &requests[1].messages;
    let roles: Vec<_> = second.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant, Role::Tool]);
    assert_eq!(second[1].tool_calls[0].id, "call_1");
    assert_eq!(second[2].tool_call_id.as_deref(), Some("call_1"));
}

#[tokio::test]
async fn every_call_in_a_round_is_answered_in_order() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![
            tool_call("a", "schema_list_queries", json!({})),
            tool_call("b", "schema_get_enum", json!({"name": "ApplicationState"})),
        ])
        .queue(ChatResponse::text("done"));

    orchestrator(client.clone(), fast_config())
        .run(ask("explore"))
        .await
        .unwrap();

    let messages = &client.requests()[1].messages;
    let ids: Vec<_> = messages
        .iter()
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn four_tool_rounds_then_answer_succeeds() {
    let client = Arc::new(ScriptedChatClient::new());
    for i in 0..4 {
        client.queue_tool_calls(vec![tool_call(
            &format!("call_{i}"),
            "schema_list_types",
            json!({}),
        )]);
    }
    client.queue(ChatResponse::text("Finally."));

    let result = orchestrator(client.clone(), fast_config())
        .run(ask("go"))
        .await
        .unwrap();

    assert_eq!(result.rounds, 4);
    assert_eq!(result.text(), "Finally.");
    assert_eq!(client.request_count(), 5);
}

#[tokio::test]
async fn fifth_tool_round_exceeds_the_limit() {
    let client = Arc::new(ScriptedChatClient::new());
    for i in 0..5 {
        client.queue_tool_calls(vec![tool_call(
            &format!("call_{i}"),
            "schema_list_types",
            json!({}),
        )]);
    }

    let observer = Arc::new(RecordingObserver::new());

    let err = observed_orchestrator(client.clone(), observer.clone(), fast_config())
        .run(ask("loop forever"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::MaxToolIterations(5)));
    assert!(err.to_string().contains("max tool iterations"));
    assert_eq!(err.category(), ErrorCategory::IterationLimit);
    assert_eq!(client.request_count(), 5);

    let observations = observer.observations();
    assert_eq!(
        observations[observations.len() - 2..],
        [
            Observation::ChatRequest {
                status: "iteration_limit".into(),
                streaming: false,
            },
            Observation::ToolRounds(5),
        ]
    );
    assert_eq!(
        observer.count(|o| matches!(o, Observation::ToolCall { success: true, .. })),
        5
    );
}

#[tokio::test]
async fn unknown_tool_is_reported_to_the_model() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call("x", "delete_everything", json!({}))])
        .queue(ChatResponse::text("I cannot do that."));

    let observer = Arc::new(RecordingObserver::new());

    let result = observed_orchestrator(client.clone(), observer.clone(), fast_config())
        .run(ask("delete"))
        .await
        .unwrap();

    let ContentBlock::ToolUse {
        tool_success,
        tool_result,
        ..
    } = &result.blocks[0]
    else {
        panic!("expected tool_use block");
    };
    assert!(!tool_success);
    assert!(tool_result.starts_with("Error executing tool:"));
    assert!(tool_result.contains("unknown tool: delete_everything"));

    let fed_back = &client.requests()[1].messages[2];
    assert_eq!(&fed_back.content, tool_result);

    assert_eq!(
        observer.observations(),
        vec![
            Observation::LlmRequest {
                status: "success".into()
            },
            Observation::ToolCall {
                name: "delete_everything".into(),
                success: false,
            },
            Observation::LlmRequest {
                status: "success".into()
            },
            Observation::ChatRequest {
                status: "success".into(),
                streaming: false,
            },
            Observation::ToolRounds(1),
        ]
    );
}

#[tokio::test]
async fn rejected_mutation_never_reaches_the_api() {
    let graphql = Arc::new(StaticGraphQLClient::default());
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "m",
            "execute_graphql",
            json!({"query": "mutation { deleteApplication(team: \"t\", name: \"a\") }"}),
        )])
        .queue(ChatResponse::text("Mutations are not allowed."));

    let result = orchestrator_with(client, integration_with(graphql.clone()), fast_config())
        .run(ask("delete my app"))
        .await
        .unwrap();

    let ContentBlock::ToolUse {
        tool_success,
        tool_result,
        ..
    } = &result.blocks[0]
    else {
        panic!("expected tool_use block");
    };
    assert!(!tool_success);
    assert!(tool_result.contains("only query operations are allowed, got: mutation"));
    assert!(graphql.executed().is_empty());
}

#[tokio::test]
async fn valid_query_runs_with_variables() {
    let graphql = Arc::new(StaticGraphQLClient::default());
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "q",
            "execute_graphql",
            json!({
                "query": "query($slug: String!) { team(slug: $slug) { slug } }",
                "variables": "{\"slug\": \"devteam\"}",
            }),
        )])
        .queue(ChatResponse::text("Found devteam."));

    let result = orchestrator_with(client, integration_with(graphql.clone()), fast_config())
        .run(ask("show devteam"))
        .await
        .unwrap();

    assert_eq!(
        result.blocks[0],
        ContentBlock::tool_use("q", "execute_graphql", true, r#"{"team":{"slug":"devteam"}}"#)
    );
    let executed = graphql.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].1.get("slug"), Some(&json!("devteam")));
}

#[tokio::test]
async fn chart_call_adds_chart_block() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "c",
            "render_chart",
            json!({
                "chart_type": "line",
                "title": "CPU usage",
                "environment": "dev",
                "query": "rate(container_cpu_usage_seconds_total[5m])",
                "interval": "6h",
                "y_format": "cpu_cores",
            }),
        )])
        .queue(ChatResponse::text("Here is the chart."));

    let result = orchestrator(client, fast_config())
        .run(ask("plot cpu"))
        .await
        .unwrap();

    assert_eq!(result.blocks.len(), 3);
    assert_eq!(
        result.blocks[0],
        ContentBlock::tool_use("c", "render_chart", true, CHART_RENDERED)
    );
    let ContentBlock::Chart { chart } = &result.blocks[1] else {
        panic!("expected chart block");
    };
    assert_eq!(chart.title, "CPU usage");
    assert_eq!(chart.interval.as_deref(), Some("6h"));
    assert_eq!(chart.y_format.as_deref(), Some("cpu_cores"));
}

#[tokio::test]
async fn invalid_chart_is_a_failed_call() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "c",
            "render_chart",
            json!({"title": "CPU", "environment": "dev", "query": "up"}),
        )])
        .queue(ChatResponse::text("Sorry."));

    let result = orchestrator(client, fast_config())
        .run(ask("plot"))
        .await
        .unwrap();

    assert_eq!(
        result.blocks[0],
        ContentBlock::tool_use(
            "c",
            "render_chart",
            false,
            "Error executing tool: invalid chart parameters: chart_type is required"
        )
    );
    assert_eq!(result.blocks.len(), 2);
}

#[tokio::test]
async fn large_tool_output_is_truncated() {
    let graphql = Arc::new(StaticGraphQLClient {
        data: match json!({ "logs": "x".repeat(60_000) }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        },
        ..StaticGraphQLClient::default()
    });
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call(
            "big",
            "execute_graphql",
            json!({"query": "query { me { name } }"}),
        )])
        .queue(ChatResponse::text("That is a lot of output."));

    orchestrator_with(client.clone(), integration_with(graphql), fast_config())
        .run(ask("dump"))
        .await
        .unwrap();

    let fed_back = &client.requests()[1].messages[2].content;
    assert_eq!(fed_back.len(), 50_000 + TRUNCATION_NOTICE.len());
    assert!(fed_back.ends_with(TRUNCATION_NOTICE));
    assert!(fed_back.starts_with("{\"logs\":\"xxx"));
}

#[tokio::test]
async fn failed_context_lookup_is_fed_back() {
    let graphql = Arc::new(StaticGraphQLClient {
        fail_with: Some("unauthorized".into()),
        ..StaticGraphQLClient::default()
    });
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_tool_calls(vec![tool_call("ctx", "get_nais_context", json!({}))])
        .queue(ChatResponse::text("I could not look you up."));

    let result = orchestrator_with(client, integration_with(graphql), fast_config())
        .run(ask("who am I"))
        .await
        .unwrap();

    let ContentBlock::ToolUse {
        tool_success,
        tool_result,
        ..
    } = &result.blocks[0]
    else {
        panic!("expected tool_use block");
    };
    assert!(!tool_success);
    assert!(tool_result.contains("failed to get current user: unauthorized"));
}

#[tokio::test(start_paused = true)]
async fn transient_llm_failure_is_retried() {
    let client = Arc::new(ScriptedChatClient::new());
    client
        .queue_error(AgentError::Provider("503 overloaded".into()))
        .queue(ChatResponse::text("Recovered."));

    let result = orchestrator(client.clone(), AgentConfig::default())
        .run(ask("hi"))
        .await
        .unwrap();

    assert_eq!(result.text(), "Recovered.");
    assert_eq!(client.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn retries_are_exhausted_after_max_attempts() {
    let client = Arc::new(ScriptedChatClient::new());
    for _ in 0..3 {
        client.queue_error(AgentError::Provider("503 overloaded".into()));
    }

    let started = tokio::time::Instant::now();
    let err = orchestrator(client.clone(), AgentConfig::default())
        .run(ask("hi"))
        .await
        .unwrap_err();
    // 100ms + 200ms + 400ms of backoff on the paused clock.
    assert_eq!(started.elapsed(), Duration::from_millis(700));

    match &err {
        AgentError::RetriesExhausted { attempts, source } => {
            assert_eq!(*attempts, 3);
            assert!(source.to_string().contains("503 overloaded"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert!(err.to_string().contains("after 3 attempts"));
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn canceled_turn_stops_before_calling_the_model() {
    let client = Arc::new(ScriptedChatClient::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = orchestrator(client, fast_config())
        .run(TurnRequest::builder().user_message("hi").cancel(cancel).build())
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Canceled));
}

/// Never answers.
struct HangingChatClient;

#[async_trait]
impl ChatClient for HangingChatClient {
    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        std::future::pending().await
    }

    async fn chat_stream(&self, _request: &ChatRequest) -> Result<ChunkStream, AgentError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn turn_deadline_interrupts_a_hanging_model() {
    let config = AgentConfig {
        turn_timeout: Duration::from_secs(2),
        ..AgentConfig::default()
    };
    let orchestrator = Orchestrator::builder()
        .chat_client(Arc::new(HangingChatClient))
        .tools(Arc::new(common::integration()))
        .config(config)
        .build()
        .unwrap();

    let err = orchestrator.run(ask("hi")).await.unwrap_err();
    assert!(matches!(err, AgentError::Timeout(2000)), "{err:?}");
    assert_eq!(err.category(), ErrorCategory::Timeout);
}

#[tokio::test]
async fn history_and_context_shape_the_request() {
    let client = Arc::new(ScriptedChatClient::new());
    let request = TurnRequest::builder()
        .user_message("and now?")
        .history(vec![
            Message::user("hello"),
            Message::assistant("hi, how can I help?"),
        ])
        .context(ChatContext {
            team: Some("devteam".into()),
            env: Some("prod".into()),
            ..ChatContext::default()
        })
        .build();

    orchestrator(client.clone(), fast_config())
        .run(request)
        .await
        .unwrap();

    let sent = &client.requests()[0];
    assert_eq!(sent.messages.len(), 3);
    assert_eq!(sent.messages[2], Message::user("and now?"));
    assert!(sent.system_prompt.contains("devteam"));
    assert!(sent.system_prompt.contains("prod"));
    assert_eq!(sent.tools.len(), 13);
    assert_eq!(sent.tools.last().map(|t| t.name.as_str()), Some("render_chart"));
}

#[test]
fn builder_requires_a_chat_client() {
    let err = Orchestrator::builder()
        .tools(Arc::new(common::integration()))
        .build()
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}
