//! Validation of model-authored queries before execution.

use std::sync::Arc;

use apollo_compiler::ast::{self, OperationType};
use apollo_compiler::validation::Valid;
use apollo_compiler::{ExecutableDocument, Name, Schema};
use serde::Serialize;

use super::security::{find_forbidden_access, selection_depth, MAX_QUERY_DEPTH};
use crate::error::AgentError;

const QUERY_PATH: &str = "query.graphql";

/// Why a query was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    Syntax,
    NoOperation,
    MultipleOperations,
    Schema,
    OperationType,
    Depth,
    ForbiddenType,
}

impl Rejection {
    /// Rejections imposed by the security policy rather than by GraphQL itself.
    pub fn is_policy_violation(self) -> bool {
        matches!(self, Self::OperationType | Self::Depth | Self::ForbiddenType)
    }
}

/// Outcome of validating one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(skip)]
    pub rejection: Option<Rejection>,
}

impl QueryValidationResult {
    fn rejected(rejection: Rejection, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            rejection: Some(rejection),
            ..Self::default()
        }
    }

    fn with_operation(mut self, operation_type: &str, name: Option<&Name>) -> Self {
        self.operation_type = Some(operation_type.to_string());
        self.operation_name = name.map(|n| n.to_string());
        self
    }

    /// Error for a rejected query, `None` when valid.
    pub fn to_error(&self) -> Option<AgentError> {
        if self.valid {
            return None;
        }
        let message = format!("invalid query: {}", self.error.as_deref().unwrap_or_default());
        Some(match self.rejection {
            Some(rejection) if rejection.is_policy_violation() => AgentError::SecurityPolicy(message),
            _ => AgentError::InvalidArgument(message),
        })
    }
}

/// Decides whether a query may be sent to the API.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    schema: Arc<Valid<Schema>>,
}

impl QueryValidator {
    pub fn new(schema: Arc<Valid<Schema>>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    pub fn schema_arc(&self) -> Arc<Valid<Schema>> {
        Arc::clone(&self.schema)
    }

    /// Run the validation pipeline, stopping at the first failure.
    ///
    /// The operation type is checked on the syntax tree before the query is
    /// resolved against the schema, so mutations and subscriptions are
    /// refused whatever the schema declares.
    pub fn validate(&self, query: &str) -> QueryValidationResult {
        let document = match ast::Document::parse(query, QUERY_PATH) {
            Ok(document) => document,
            Err(with_errors) => {
                return QueryValidationResult::rejected(
                    Rejection::Syntax,
                    with_errors.errors.to_string().trim(),
                )
            }
        };

        let operations: Vec<_> = document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::Definition::OperationDefinition(op) => Some(op),
                _ => None,
            })
            .collect();

        let operation = match operations.as_slice() {
            [] => {
                return QueryValidationResult::rejected(
                    Rejection::NoOperation,
                    "no operations found in query",
                )
            }
            [operation] => operation,
            many => {
                return QueryValidationResult::rejected(
                    Rejection::MultipleOperations,
                    format!("only a single operation is allowed, got: {}", many.len()),
                )
            }
        };

        let operation_type = operation_type_name(operation.operation_type);
        if operation.operation_type != OperationType::Query {
            return QueryValidationResult::rejected(
                Rejection::OperationType,
                format!("only query operations are allowed, got: {operation_type}"),
            )
            .with_operation(operation_type, operation.name.as_ref());
        }

        let executable = match ExecutableDocument::parse_and_validate(&self.schema, query, QUERY_PATH)
        {
            Ok(executable) => executable,
            Err(with_errors) => {
                return QueryValidationResult::rejected(
                    Rejection::Schema,
                    with_errors.errors.to_string().trim(),
                )
                .with_operation(operation_type, operation.name.as_ref())
            }
        };

        let Some(resolved) = executable.operations.iter().next() else {
            return QueryValidationResult::rejected(Rejection::NoOperation, "no operations found in query");
        };

        let depth = selection_depth(&resolved.selection_set);
        if depth > MAX_QUERY_DEPTH {
            let mut result = QueryValidationResult::rejected(
                Rejection::Depth,
                format!("query depth {depth} exceeds maximum allowed depth of {MAX_QUERY_DEPTH}"),
            )
            .with_operation(operation_type, resolved.name.as_ref());
            result.depth = Some(depth);
            return result;
        }

        if let Some(reason) = find_forbidden_access(&resolved.selection_set) {
            let mut result = QueryValidationResult::rejected(Rejection::ForbiddenType, reason)
                .with_operation(operation_type, resolved.name.as_ref());
            result.depth = Some(depth);
            return result;
        }

        QueryValidationResult {
            valid: true,
            depth: Some(depth),
            ..QueryValidationResult::default()
        }
        .with_operation(operation_type, resolved.name.as_ref())
    }
}

fn operation_type_name(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}
