//! GraphQL client boundary used by the execution tools.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AgentError;
use crate::util::context::TurnContext;

/// The authenticated user on whose behalf queries run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// A team membership of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub slug: String,
    #[serde(default)]
    pub purpose: String,
    pub role: String,
}

/// Executes queries against the platform API.
///
/// Implementations should stop work when `ctx` is canceled or past its
/// deadline; the conversation loop only waits.
#[async_trait]
pub trait GraphQLClient: Send + Sync {
    async fn execute(
        &self,
        ctx: &TurnContext,
        query: &str,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>, AgentError>;

    async fn current_user(&self, ctx: &TurnContext) -> Result<UserInfo, AgentError>;

    async fn user_teams(&self, ctx: &TurnContext) -> Result<Vec<TeamInfo>, AgentError>;
}
