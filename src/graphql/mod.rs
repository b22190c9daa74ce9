//! GraphQL access: client boundary, HTTP client, query validation and policy.

pub mod client;
pub mod guidance;
pub mod http;
pub mod security;
pub mod validation;

pub use client::{GraphQLClient, TeamInfo, UserInfo};
pub use guidance::NAIS_API_GUIDANCE;
pub use http::HttpGraphQLClient;
pub use security::{is_forbidden_type, FORBIDDEN_TYPES, MAX_QUERY_DEPTH};
pub use validation::{QueryValidationResult, QueryValidator, Rejection};

use std::sync::Arc;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

use crate::error::AgentError;

/// Parse and validate schema SDL.
pub fn load_schema(sdl: &str) -> Result<Arc<Valid<Schema>>, AgentError> {
    Schema::parse_and_validate(sdl, "schema.graphql")
        .map(Arc::new)
        .map_err(|with_errors| {
            AgentError::configuration(format!("invalid GraphQL schema: {}", with_errors.errors))
        })
}
