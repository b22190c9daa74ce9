//! GraphQL client over HTTP.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::client::{GraphQLClient, TeamInfo, UserInfo};
use crate::error::AgentError;
use crate::util::context::TurnContext;

const CURRENT_USER_QUERY: &str = "query { me { ... on User { name isAdmin } } }";

const USER_TEAMS_QUERY: &str =
    "query { me { ... on User { teams(first: 100) { nodes { role team { slug purpose } } } } } }";

/// Posts queries to a GraphQL endpoint with an optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpGraphQLClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Vec<GraphQLErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct MeTeams {
    teams: TeamConnection,
}

#[derive(Debug, Deserialize)]
struct TeamConnection {
    nodes: Vec<TeamMembership>,
}

#[derive(Debug, Deserialize)]
struct TeamMembership {
    role: String,
    team: TeamNode,
}

#[derive(Debug, Deserialize)]
struct TeamNode {
    slug: String,
    #[serde(default)]
    purpose: Option<String>,
}

impl HttpGraphQLClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, val);
            }
        }
        headers
    }

    async fn post(
        &self,
        query: &str,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>, AgentError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            query_length = query.len(),
            variable_count = variables.len(),
            "executing GraphQL query"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), response_length = body.len(), "GraphQL response received");

        if !status.is_success() {
            return Err(AgentError::GraphQL(format!(
                "GraphQL request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: GraphQLResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::GraphQL(format!("failed to parse GraphQL response: {e}")))?;

        if !parsed.errors.is_empty() {
            let messages: Vec<_> = parsed.errors.into_iter().map(|e| e.message).collect();
            tracing::warn!(errors = ?messages, "GraphQL query returned errors");
            if parsed.data.is_none() {
                return Err(AgentError::GraphQL(format!(
                    "GraphQL errors: [{}]",
                    messages.join(", ")
                )));
            }
        }

        Ok(parsed.data.unwrap_or_default())
    }

    async fn me<T: serde::de::DeserializeOwned>(
        &self,
        ctx: &TurnContext,
        query: &str,
    ) -> Result<T, AgentError> {
        let mut data = ctx.run(self.post(query, Map::new())).await?;
        let me = data
            .remove("me")
            .filter(|v| !v.is_null())
            .ok_or_else(|| AgentError::GraphQL("no authenticated user".into()))?;
        serde_json::from_value(me)
            .map_err(|e| AgentError::GraphQL(format!("unexpected response for current user: {e}")))
    }
}

#[async_trait]
impl GraphQLClient for HttpGraphQLClient {
    async fn execute(
        &self,
        ctx: &TurnContext,
        query: &str,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>, AgentError> {
        ctx.run(self.post(query, variables)).await
    }

    async fn current_user(&self, ctx: &TurnContext) -> Result<UserInfo, AgentError> {
        let me: MeUser = self.me(ctx, CURRENT_USER_QUERY).await?;
        Ok(UserInfo {
            name: me.name,
            is_admin: me.is_admin,
        })
    }

    async fn user_teams(&self, ctx: &TurnContext) -> Result<Vec<TeamInfo>, AgentError> {
        let me: MeTeams = self.me(ctx, USER_TEAMS_QUERY).await?;
        let teams: Vec<_> = me
            .teams
            .nodes
            .into_iter()
            .map(|membership| TeamInfo {
                slug: membership.team.slug,
                purpose: membership.team.purpose.unwrap_or_default(),
                role: membership.role.to_lowercase(),
            })
            .collect();
        tracing::debug!(team_count = teams.len(), "retrieved user teams");
        Ok(teams)
    }
}
