//! Shared test helpers: scripted LLM client, static GraphQL client and a
//! small platform schema.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use nais_agent::agent::Orchestrator;
use nais_agent::config::AgentConfig;
use nais_agent::error::AgentError;
use nais_agent::graphql::{load_schema, GraphQLClient, TeamInfo, UserInfo};
use nais_agent::observer::AgentObserver;
use nais_agent::provider::{ChatClient, ChatRequest, ChatResponse, ChunkStream};
use nais_agent::tools::{ToolIntegration, ToolIntegrationConfig};
use nais_agent::types::{StreamChunk, ToolCall, UsageStats};
use nais_agent::util::context::TurnContext;
use nais_agent::util::retry::RetryPolicy;

pub const SDL: &str = r#"
"""
Root query.
"""
type Query {
  me: User
  team(slug: String!): Team
  node: Node
  search(query: String!, first: Int = 10): [SearchResult!]!
}

type Mutation {
  deleteApplication(team: String!, name: String!): Boolean
}

type Subscription {
  log(team: String!): String
}

"""
A user of the platform.
"""
type User {
  name: String!
  isAdmin: Boolean!
}

"""
A team owns workloads.
"""
type Team {
  slug: String!
  purpose: String
  applications: [Application!]!
  secrets: SecretConnection
  oldField: String @deprecated(reason: "Use purpose")
}

interface Workload {
  name: String!
  state: ApplicationState!
}

"""
An application running on the platform.
"""
type Application implements Workload {
  name: String!
  state: ApplicationState!
  team: Team!
}

type Job implements Workload {
  name: String!
  state: ApplicationState!
}

union SearchResult = Application | Team

"""
The state of an application.
"""
enum ApplicationState {
  RUNNING
  FAILING
  UNKNOWN @deprecated
}

type SecretConnection {
  nodes: [Secret!]!
}

type Secret {
  name: String!
}

type Node {
  id: ID!
  child: Node
}

input TeamFilter {
  slug: String
}
"#;

/// A query exactly `depth` levels deep: `node`, then `depth - 2` nested
/// `child` fields, then `id`.
pub fn nested_query(depth: usize) -> String {
    let mut query = String::from("id");
    for _ in 2..depth {
        query = format!("child {{ {query} }}");
    }
    format!("query {{ node {{ {query} }} }}")
}

pub fn usage(input: u64, output: u64) -> UsageStats {
    UsageStats::new(input, output)
}

pub fn tool_call(id: &str, name: &str, args: Value) -> ToolCall {
    let arguments = match args {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ToolCall::new(id, name, arguments)
}

/// A scripted streamed reply.
pub enum StreamScript {
    Chunks(Vec<Result<StreamChunk, AgentError>>),
    Fail(AgentError),
}

/// LLM client that replays queued replies in order and records requests.
#[derive(Default)]
pub struct ScriptedChatClient {
    responses: Mutex<VecDeque<Result<ChatResponse, AgentError>>>,
    streams: Mutex<VecDeque<StreamScript>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, response: ChatResponse) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn queue_error(&self, error: AgentError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn queue_tool_calls(&self, calls: Vec<ToolCall>) -> &Self {
        self.queue(ChatResponse::with_tool_calls(calls).with_usage(usage(10, 5)))
    }

    pub fn queue_stream(&self, script: StreamScript) -> &Self {
        self.streams.lock().unwrap().push_back(script);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(ChatResponse::text("Mock response")))
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        let script = self.streams.lock().unwrap().pop_front();
        let chunks = match script {
            Some(StreamScript::Fail(error)) => return Err(error),
            Some(StreamScript::Chunks(chunks)) => chunks,
            None => vec![
                Ok(StreamChunk::content("Mock streamed response")),
                Ok(StreamChunk::done(None)),
            ],
        };

        let stream = async_stream::stream! {
            for chunk in chunks {
                yield chunk;
            }
        };
        Ok(Box::pin(stream))
    }
}

/// GraphQL client with fixed answers that records executed queries.
pub struct StaticGraphQLClient {
    pub data: Map<String, Value>,
    pub user: UserInfo,
    pub teams: Vec<TeamInfo>,
    pub fail_with: Option<String>,
    pub executed: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl Default for StaticGraphQLClient {
    fn default() -> Self {
        let data = match json!({ "team": { "slug": "devteam" } }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            data,
            user: UserInfo {
                name: "Ada Lovelace".into(),
                is_admin: false,
            },
            teams: vec![TeamInfo {
                slug: "devteam".into(),
                purpose: "Builds things".into(),
                role: "owner".into(),
            }],
            fail_with: None,
            executed: Mutex::new(Vec::new()),
        }
    }
}

impl StaticGraphQLClient {
    pub fn executed(&self) -> Vec<(String, Map<String, Value>)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQLClient for StaticGraphQLClient {
    async fn execute(
        &self,
        _ctx: &TurnContext,
        query: &str,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>, AgentError> {
        self.executed
            .lock()
            .unwrap()
            .push((query.to_string(), variables));
        match &self.fail_with {
            Some(message) => Err(AgentError::GraphQL(message.clone())),
            None => Ok(self.data.clone()),
        }
    }

    async fn current_user(&self, _ctx: &TurnContext) -> Result<UserInfo, AgentError> {
        match &self.fail_with {
            Some(message) => Err(AgentError::GraphQL(message.clone())),
            None => Ok(self.user.clone()),
        }
    }

    async fn user_teams(&self, _ctx: &TurnContext) -> Result<Vec<TeamInfo>, AgentError> {
        Ok(self.teams.clone())
    }
}

pub fn integration_with(client: Arc<StaticGraphQLClient>) -> ToolIntegration {
    ToolIntegration::new(ToolIntegrationConfig {
        graphql_client: Some(client),
        schema: Some(load_schema(SDL).unwrap()),
        tenant: "nav".into(),
    })
    .unwrap()
}

pub fn integration() -> ToolIntegration {
    integration_with(Arc::new(StaticGraphQLClient::default()))
}

pub fn orchestrator(client: Arc<ScriptedChatClient>, config: AgentConfig) -> Orchestrator {
    orchestrator_with(client, integration(), config)
}

pub fn orchestrator_with(
    client: Arc<ScriptedChatClient>,
    tools: ToolIntegration,
    config: AgentConfig,
) -> Orchestrator {
    Orchestrator::builder()
        .chat_client(client)
        .tools(Arc::new(tools))
        .config(config)
        .build()
        .unwrap()
}

pub fn observed_orchestrator(
    client: Arc<ScriptedChatClient>,
    observer: Arc<RecordingObserver>,
    config: AgentConfig,
) -> Orchestrator {
    Orchestrator::builder()
        .chat_client(client)
        .tools(Arc::new(integration()))
        .observer(observer)
        .config(config)
        .build()
        .unwrap()
}

/// One measurement seen by [`RecordingObserver`]; durations are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    ChatRequest { status: String, streaming: bool },
    LlmRequest { status: String },
    ToolCall { name: String, success: bool },
    ToolRounds(usize),
    FirstToken,
}

/// Observer that keeps every measurement in call order.
#[derive(Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<Observation>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Observation) -> bool) -> usize {
        self.observations().iter().filter(|o| matches(o)).count()
    }

    fn push(&self, observation: Observation) {
        self.seen.lock().unwrap().push(observation);
    }
}

impl AgentObserver for RecordingObserver {
    fn record_chat_request(&self, status: &str, streaming: bool, _duration: Duration) {
        self.push(Observation::ChatRequest {
            status: status.to_string(),
            streaming,
        });
    }

    fn record_llm_request(&self, status: &str, _duration: Duration, _usage: Option<&UsageStats>) {
        self.push(Observation::LlmRequest {
            status: status.to_string(),
        });
    }

    fn record_tool_call(&self, tool_name: &str, success: bool, _duration: Duration) {
        self.push(Observation::ToolCall {
            name: tool_name.to_string(),
            success,
        });
    }

    fn record_tool_rounds(&self, rounds: usize) {
        self.push(Observation::ToolRounds(rounds));
    }

    fn record_time_to_first_token(&self, _duration: Duration) {
        self.push(Observation::FirstToken);
    }
}

/// Config with millisecond backoff so retry tests stay fast.
pub fn fast_config() -> AgentConfig {
    AgentConfig {
        retry: RetryPolicy {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(4),
            ..RetryPolicy::default()
        },
        ..AgentConfig::default()
    }
}
