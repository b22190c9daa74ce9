//! nais-agent — tool-calling conversation engine for the Nais platform
//! assistant.
//!
//! An [`agent::Orchestrator`] runs one user turn against an LLM, letting the
//! model explore the platform's GraphQL schema, run validated read-only
//! queries and render metric charts, either to completion or as a stream of
//! [`agent::StreamEvent`]s.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use nais_agent::prelude::*;
//!
//! # async fn example(chat: Arc<dyn ChatClient>, sdl: &str) -> nais_agent::error::Result<()> {
//! let config = AgentConfig::load(None)?;
//! let graphql = HttpGraphQLClient::new("https://console.example.cloud.nais.io/graphql");
//! let tools = ToolIntegration::new(ToolIntegrationConfig {
//!     graphql_client: Some(Arc::new(graphql)),
//!     schema: Some(nais_agent::graphql::load_schema(sdl)?),
//!     tenant: config.tenant.clone(),
//! })?;
//! let orchestrator = Orchestrator::builder()
//!     .chat_client(chat)
//!     .tools(Arc::new(tools))
//!     .config(config)
//!     .build()?;
//!
//! let result = orchestrator
//!     .run(TurnRequest::builder().user_message("Which apps does my team run?").build())
//!     .await?;
//! println!("{}", result.text());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod graphql;
pub mod observer;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
