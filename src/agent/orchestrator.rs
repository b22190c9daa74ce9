//! The tool-calling loop between the user, the model and the tools.

use std::sync::Arc;
use std::time::Instant;

use bon::Builder;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::conversation::{ConversationLoop, OrchestratorResult, ToolOutcome};
use super::events::StreamEvent;
use super::prompt::build_system_prompt;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::observer::{AgentObserver, NoopObserver, STATUS_SUCCESS};
use crate::provider::{ChatClient, ChatRequest, ChatResponse};
use crate::tools::{
    parse_chart_arguments, ToolArguments, ToolExecutionContext, ToolIntegration, CHART_RENDERED,
    RENDER_CHART_TOOL,
};
use crate::types::{ChatContext, Document, Message, ToolCall, UsageStats};
use crate::util::context::TurnContext;
use crate::util::text::truncate_with_notice;

/// Input of one turn.
#[derive(Debug, Clone, Builder)]
pub struct TurnRequest {
    #[builder(into)]
    pub user_message: String,
    pub context: Option<ChatContext>,
    /// Retrieved documentation added to the system prompt.
    #[builder(default)]
    pub documents: Vec<Document>,
    /// Earlier messages of the conversation, oldest first.
    #[builder(default)]
    pub history: Vec<Message>,
    pub conversation_id: Option<Uuid>,
    /// Canceling this token ends the turn.
    #[builder(default)]
    pub cancel: CancellationToken,
}

/// Drives turns. Cheap to clone; every turn is independent.
#[derive(Clone)]
pub struct Orchestrator {
    chat_client: Arc<dyn ChatClient>,
    tools: Arc<ToolIntegration>,
    observer: Arc<dyn AgentObserver>,
    config: AgentConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("model", &self.chat_client.model_id())
            .field("tools", &self.tools)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Orchestrator`].
#[derive(Default)]
pub struct OrchestratorBuilder {
    chat_client: Option<Arc<dyn ChatClient>>,
    tools: Option<Arc<ToolIntegration>>,
    observer: Option<Arc<dyn AgentObserver>>,
    config: Option<AgentConfig>,
}

impl OrchestratorBuilder {
    pub fn chat_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.chat_client = Some(client);
        self
    }

    pub fn tools(mut self, tools: Arc<ToolIntegration>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Orchestrator, AgentError> {
        let chat_client = self
            .chat_client
            .ok_or_else(|| AgentError::configuration("chat client is required"))?;
        let tools = self
            .tools
            .ok_or_else(|| AgentError::configuration("tool integration is required"))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Orchestrator {
            chat_client,
            tools,
            observer: self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
            config,
        })
    }
}

/// Producer side of a streamed turn.
struct EventSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl EventSink {
    /// Fails with `Canceled` once the consumer is gone.
    async fn emit(&self, event: StreamEvent) -> Result<(), AgentError> {
        self.tx.send(event).await.map_err(|_| AgentError::Canceled)
    }
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolIntegration {
        &self.tools
    }

    /// Run a turn to completion.
    pub async fn run(&self, request: TurnRequest) -> Result<OrchestratorResult, AgentError> {
        let started = Instant::now();
        let ctx = TurnContext::new(request.cancel.clone()).with_timeout(self.config.turn_timeout);
        let conversation_id = request.conversation_id;
        let mut conversation = self.start(request);

        let outcome = self.drive(&ctx, &mut conversation, None).await;
        self.finish_turn(outcome.as_ref().err(), &conversation, false, started);
        outcome.map(|()| conversation.into_result(conversation_id))
    }

    /// Run a turn on a spawned task, streaming its events.
    ///
    /// The channel is closed after a final `done` or `error` event. Dropping
    /// the receiver cancels the turn at its next event.
    pub fn run_stream(&self, request: TurnRequest) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(self.config.stream_buffer);
        let this = self.clone();

        tokio::spawn(async move {
            let started = Instant::now();
            let ctx =
                TurnContext::new(request.cancel.clone()).with_timeout(this.config.turn_timeout);
            let mut conversation = this.start(request);
            let sink = EventSink { tx };

            let outcome = this.drive(&ctx, &mut conversation, Some(&sink)).await;
            this.finish_turn(outcome.as_ref().err(), &conversation, true, started);

            let last = match &outcome {
                Ok(()) => StreamEvent::Done {
                    usage: conversation.usage(),
                },
                Err(err) => StreamEvent::error(err),
            };
            if sink.emit(last).await.is_err() {
                tracing::debug!("stream consumer gone before the final event");
            }
        });

        rx
    }

    fn start(&self, request: TurnRequest) -> ConversationLoop {
        let tools = self.tools.tool_definitions();
        let system_prompt =
            build_system_prompt(request.context.as_ref(), &tools, &request.documents);
        tracing::debug!(
            conversation_id = ?request.conversation_id,
            message_length = request.user_message.len(),
            doc_count = request.documents.len(),
            history_length = request.history.len(),
            prompt_length = system_prompt.len(),
            "starting turn"
        );
        ConversationLoop::new(
            system_prompt,
            request.history,
            request.user_message,
            tools,
            request.documents,
        )
    }

    fn finish_turn(
        &self,
        error: Option<&AgentError>,
        conversation: &ConversationLoop,
        streaming: bool,
        started: Instant,
    ) {
        let status = match error {
            None => STATUS_SUCCESS,
            Some(err) => {
                tracing::error!(error = %err, category = %err.category(), streaming, "turn failed");
                err.category().as_str()
            }
        };
        self.observer
            .record_chat_request(status, streaming, started.elapsed());
        self.observer.record_tool_rounds(conversation.rounds());
    }

    /// Round loop shared by both modes.
    async fn drive(
        &self,
        ctx: &TurnContext,
        conversation: &mut ConversationLoop,
        sink: Option<&EventSink>,
    ) -> Result<(), AgentError> {
        let max_rounds = self.config.max_tool_iterations;
        let started = Instant::now();
        let mut first_token_seen = false;

        for round in 0..max_rounds {
            tracing::debug!(round, "starting tool round");
            let request = conversation.request();
            let response = match sink {
                None => self.call_llm(ctx, &request).await?,
                Some(sink) => {
                    self.stream_llm(ctx, &request, sink, started, &mut first_token_seen)
                        .await?
                }
            };

            if let Some(usage) = &response.usage {
                conversation.record_usage(usage);
            }
            tracing::debug!(
                round,
                content_length = response.content.len(),
                tool_calls = response.tool_calls.len(),
                "LLM response received"
            );

            if response.tool_calls.is_empty() {
                conversation.finish(&response);
                return Ok(());
            }

            conversation.begin_tool_round(&response);
            for call in &response.tool_calls {
                if let Some(err) = ctx.error() {
                    return Err(err);
                }
                if let Some(sink) = sink {
                    sink.emit(StreamEvent::ToolStart {
                        tool_call_id: call.id.clone(),
                        tool_name: call.name.clone(),
                        description: format!("Executing {}...", call.name),
                    })
                    .await?;
                }

                let outcome = self.execute_tool_call(ctx, call).await;

                if let Some(sink) = sink {
                    sink.emit(StreamEvent::ToolEnd {
                        tool_call_id: call.id.clone(),
                        tool_name: call.name.clone(),
                        description: format!("Executed {}", call.name),
                        success: outcome.success,
                        result: outcome.content.clone(),
                    })
                    .await?;
                    if let Some(chart) = &outcome.chart {
                        sink.emit(StreamEvent::Chart {
                            chart: chart.clone(),
                        })
                        .await?;
                    }
                }
                conversation.record_tool_result(call, outcome);
            }
        }

        tracing::error!(max_iterations = max_rounds, "max tool iterations exceeded");
        Err(AgentError::MaxToolIterations(max_rounds))
    }

    /// Buffered call with retry.
    async fn call_llm(
        &self,
        ctx: &TurnContext,
        request: &ChatRequest,
    ) -> Result<ChatResponse, AgentError> {
        let client = self.chat_client.as_ref();
        let started = Instant::now();
        let result = self
            .config
            .retry
            .execute(ctx, move |attempt| {
                tracing::debug!(attempt = attempt + 1, model = client.model_id(), "calling LLM");
                client.chat(request)
            })
            .await;

        let status = match &result {
            Ok(_) => STATUS_SUCCESS,
            Err(err) => err.category().as_str(),
        };
        self.observer.record_llm_request(
            status,
            started.elapsed(),
            result.as_ref().ok().and_then(|r| r.usage.as_ref()),
        );
        result
    }

    /// Single streamed call. Text and reasoning are forwarded as they
    /// arrive; tool calls and usage are collected into one response.
    async fn stream_llm(
        &self,
        ctx: &TurnContext,
        request: &ChatRequest,
        sink: &EventSink,
        turn_started: Instant,
        first_token_seen: &mut bool,
    ) -> Result<ChatResponse, AgentError> {
        let started = Instant::now();
        let result = self
            .consume_stream(ctx, request, sink, turn_started, first_token_seen)
            .await;

        let status = match &result {
            Ok(_) => STATUS_SUCCESS,
            Err(err) => err.category().as_str(),
        };
        self.observer.record_llm_request(
            status,
            started.elapsed(),
            result.as_ref().ok().and_then(|r| r.usage.as_ref()),
        );
        result
    }

    async fn consume_stream(
        &self,
        ctx: &TurnContext,
        request: &ChatRequest,
        sink: &EventSink,
        turn_started: Instant,
        first_token_seen: &mut bool,
    ) -> Result<ChatResponse, AgentError> {
        let mut stream = ctx.run(self.chat_client.chat_stream(request)).await?;
        let mut response = ChatResponse::default();
        let mut usage: Option<UsageStats> = None;
        let mut chunk_count = 0usize;

        loop {
            let next = ctx
                .run(async { Ok::<_, AgentError>(stream.next().await) })
                .await?;
            let Some(chunk) = next else { break };
            let chunk = chunk?;
            chunk_count += 1;

            if !*first_token_seen && !(chunk.content.is_empty() && chunk.thinking.is_empty()) {
                *first_token_seen = true;
                self.observer
                    .record_time_to_first_token(turn_started.elapsed());
            }
            if !chunk.thinking.is_empty() {
                response.thinking.push_str(&chunk.thinking);
                sink.emit(StreamEvent::Thinking {
                    thinking: chunk.thinking,
                })
                .await?;
            }
            if !chunk.content.is_empty() {
                response.content.push_str(&chunk.content);
                sink.emit(StreamEvent::Content {
                    content: chunk.content,
                })
                .await?;
            }
            response.tool_calls.extend(chunk.tool_calls);
            if let Some(chunk_usage) = chunk.usage {
                usage.get_or_insert_with(UsageStats::default).merge(&chunk_usage);
                sink.emit(StreamEvent::Usage { usage: chunk_usage }).await?;
            }
            if chunk.done {
                break;
            }
        }

        tracing::debug!(
            chunk_count,
            content_length = response.content.len(),
            tool_calls = response.tool_calls.len(),
            "finished processing stream chunks"
        );
        response.usage = usage;
        Ok(response)
    }

    /// Execute one call. Failures become error text for the model; this
    /// never ends the turn.
    async fn execute_tool_call(&self, ctx: &TurnContext, call: &ToolCall) -> ToolOutcome {
        let started = Instant::now();
        let args = ToolArguments::new(call.arguments.clone());
        tracing::debug!(tool = %call.name, tool_call_id = %call.id, "executing tool call");

        let outcome = if call.name == RENDER_CHART_TOOL {
            match parse_chart_arguments(&args) {
                Ok(chart) => ToolOutcome {
                    content: CHART_RENDERED.to_string(),
                    success: true,
                    chart: Some(chart),
                },
                Err(err) => ToolOutcome::failure(format!(
                    "Error executing tool: invalid chart parameters: {err}"
                )),
            }
        } else {
            let tool_ctx = ToolExecutionContext::new(ctx.clone()).with_tool_call_id(&call.id);
            let result = self
                .tools
                .execute_tool(&tool_ctx, &call.name, &args)
                .await
                .and_then(|value| Ok(serde_json::to_string(&value)?));
            match result {
                Ok(output) => ToolOutcome::success(self.limit_output(&call.name, output)),
                Err(err) => ToolOutcome::failure(format!(
                    "Error executing tool: {}",
                    AgentError::tool_execution(&call.name, err)
                )),
            }
        };

        if outcome.success {
            tracing::debug!(
                tool = %call.name,
                result_length = outcome.content.len(),
                "tool execution succeeded"
            );
        } else {
            tracing::warn!(tool = %call.name, result = %outcome.content, "tool execution failed");
        }
        self.observer
            .record_tool_call(&call.name, outcome.success, started.elapsed());
        outcome
    }

    fn limit_output(&self, tool: &str, output: String) -> String {
        let max_chars = self.config.max_tool_output_chars;
        let length = output.chars().count();
        if length <= max_chars {
            return output;
        }
        tracing::warn!(
            tool,
            original_length = length,
            truncated_to = max_chars,
            "truncating large tool output"
        );
        truncate_with_notice(output, max_chars)
    }
}
