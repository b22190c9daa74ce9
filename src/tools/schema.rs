//! Read-only exploration of the API schema for the model.

use std::sync::Arc;

use apollo_compiler::ast::{DirectiveList, FieldDefinition, InputValueDefinition};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use apollo_compiler::{Name, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::AgentTool;
use super::types::ToolSpec;
use crate::error::AgentError;
use crate::util::text::summarize;

const MAX_SEARCH_RESULTS: usize = 50;
const FIELD_SUMMARY_CHARS: usize = 150;
const MATCH_SUMMARY_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListTypesInput {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ListTypesOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_objects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scalars: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameInput {
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EnumValueInfo {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TypeDetails {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EnumValueInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(rename = "implementedBy", skip_serializing_if = "Vec::is_empty")]
    pub implemented_by: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchFilterInput {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub name: String,
    pub return_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub arg_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct GetFieldInput {
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ArgumentInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgumentInfo>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EnumDetails {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub values: Vec<EnumValueInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub kind: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub parent_enum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    pub total_matches: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct InterfaceInput {
    pub interface: String,
}

#[derive(Debug, Deserialize)]
pub struct UnionInput {
    pub union: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TypeSummary {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ImplementorsOutput {
    pub interface: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub implementors: Vec<TypeSummary>,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct UnionMembersOutput {
    pub union: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub types: Vec<TypeSummary>,
    pub count: usize,
}

/// Introspection helpers over a validated schema.
#[derive(Debug, Clone)]
pub struct SchemaTools {
    schema: Arc<Valid<Schema>>,
}

impl SchemaTools {
    pub fn new(schema: Arc<Valid<Schema>>) -> Self {
        Self { schema }
    }

    /// Named types, skipping introspection types.
    fn named_types(&self) -> impl Iterator<Item = (&Name, &ExtendedType)> {
        self.schema
            .types
            .iter()
            .filter(|(name, _)| !name.as_str().starts_with("__"))
    }

    fn lookup(&self, name: &str) -> Option<&ExtendedType> {
        self.schema.types.get(name)
    }

    pub fn list_types(&self, input: &ListTypesInput) -> ListTypesOutput {
        let kind = input
            .kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "ALL".to_string());
        let search = input.search.as_deref().unwrap_or_default().to_lowercase();

        let mut output = ListTypesOutput::default();
        for (name, ty) in self.named_types() {
            if kind != "ALL" && kind_name(ty) != kind {
                continue;
            }
            if !search.is_empty() && !name.as_str().to_lowercase().contains(&search) {
                continue;
            }
            let bucket = match ty {
                ExtendedType::Object(_) => &mut output.objects,
                ExtendedType::Interface(_) => &mut output.interfaces,
                ExtendedType::Enum(_) => &mut output.enums,
                ExtendedType::Union(_) => &mut output.unions,
                ExtendedType::InputObject(_) => &mut output.input_objects,
                ExtendedType::Scalar(_) => &mut output.scalars,
            };
            bucket.push(name.to_string());
        }

        for list in [
            &mut output.objects,
            &mut output.interfaces,
            &mut output.enums,
            &mut output.unions,
            &mut output.input_objects,
            &mut output.scalars,
        ] {
            list.sort();
        }
        output
    }

    pub fn get_type(&self, input: &NameInput) -> Result<TypeDetails, AgentError> {
        let ty = self
            .lookup(&input.name)
            .ok_or_else(|| AgentError::invalid_argument(format!("type {:?} not found", input.name)))?;

        let mut details = TypeDetails {
            name: input.name.clone(),
            kind: kind_name(ty).to_string(),
            description: description_of(ty),
            implements: interfaces_of(ty),
            fields: field_infos(ty),
            values: Vec::new(),
            types: Vec::new(),
            implemented_by: Vec::new(),
        };

        match ty {
            ExtendedType::Enum(en) => {
                details.values = en
                    .values
                    .values()
                    .map(|v| EnumValueInfo {
                        name: v.value.to_string(),
                        description: text(v.description.as_deref()),
                        deprecated: deprecation(&v.directives),
                    })
                    .collect();
            }
            ExtendedType::Union(union) => {
                details.types = union.members.iter().map(|m| m.name.to_string()).collect();
            }
            ExtendedType::Interface(_) => {
                details.implemented_by = self
                    .implementors(&input.name)
                    .map(|(name, _)| name.to_string())
                    .collect();
                details.implemented_by.sort();
            }
            _ => {}
        }

        Ok(details)
    }

    pub fn list_queries(&self, input: &SearchFilterInput) -> Vec<OperationInfo> {
        let root = self.schema.schema_definition.query.as_ref().map(|n| n.name.clone());
        self.root_operations(root, input)
    }

    pub fn list_mutations(&self, input: &SearchFilterInput) -> Vec<OperationInfo> {
        let root = self.schema.schema_definition.mutation.as_ref().map(|n| n.name.clone());
        self.root_operations(root, input)
    }

    fn root_operations(&self, root: Option<Name>, input: &SearchFilterInput) -> Vec<OperationInfo> {
        let Some(ExtendedType::Object(object)) = root.as_ref().and_then(|n| self.lookup(n.as_str()))
        else {
            return Vec::new();
        };
        let search = input.search.as_deref().unwrap_or_default().to_lowercase();

        let mut operations: Vec<_> = object
            .fields
            .values()
            .filter(|field| {
                search.is_empty()
                    || field.name.as_str().to_lowercase().contains(&search)
                    || text(field.description.as_deref()).to_lowercase().contains(&search)
            })
            .map(|field| OperationInfo {
                name: field.name.to_string(),
                return_type: field.ty.to_string(),
                description: summarize(&text(field.description.as_deref()), FIELD_SUMMARY_CHARS),
                arg_count: field.arguments.len(),
            })
            .collect();
        operations.sort_by(|a, b| a.name.cmp(&b.name));
        operations
    }

    pub fn get_field(&self, input: &GetFieldInput) -> Result<FieldDetails, AgentError> {
        let ty = self.lookup(&input.type_name).ok_or_else(|| {
            AgentError::invalid_argument(format!("type {:?} not found", input.type_name))
        })?;
        let not_found = || {
            AgentError::invalid_argument(format!(
                "field {:?} not found on type {:?}",
                input.field, input.type_name
            ))
        };

        let details = match ty {
            ExtendedType::Object(object) => object.fields.get(input.field.as_str()).map(|f| field_details(f)),
            ExtendedType::Interface(iface) => iface.fields.get(input.field.as_str()).map(|f| field_details(f)),
            ExtendedType::InputObject(input_object) => input_object
                .fields
                .get(input.field.as_str())
                .map(|f| input_field_details(f)),
            _ => None,
        };
        details.ok_or_else(not_found)
    }

    pub fn get_enum(&self, input: &NameInput) -> Result<EnumDetails, AgentError> {
        let Some(ExtendedType::Enum(en)) = self.lookup(&input.name) else {
            return Err(AgentError::invalid_argument(format!("enum {:?} not found", input.name)));
        };
        Ok(EnumDetails {
            name: input.name.clone(),
            description: text(en.description.as_deref()),
            values: en
                .values
                .values()
                .map(|v| EnumValueInfo {
                    name: v.value.to_string(),
                    description: text(v.description.as_deref()),
                    deprecated: deprecation(&v.directives),
                })
                .collect(),
        })
    }

    /// Case-insensitive match over type names, field names and enum values
    /// and their descriptions.
    pub fn search(&self, input: &SearchInput) -> SearchOutput {
        let query = input.query.to_lowercase();
        let matches = |name: &str, description: &str| {
            name.to_lowercase().contains(&query) || description.to_lowercase().contains(&query)
        };

        let mut results = Vec::new();
        for (name, ty) in self.named_types() {
            let description = description_of(ty);
            if matches(name.as_str(), &description) {
                results.push(SearchHit {
                    kind: kind_name(ty).to_lowercase(),
                    name: name.to_string(),
                    parent_type: None,
                    parent_enum: None,
                    field_type: None,
                    description: summarize(&description, MATCH_SUMMARY_CHARS),
                });
            }

            for field in field_infos_full(ty) {
                if matches(&field.name, &field.description) {
                    results.push(SearchHit {
                        kind: "field".to_string(),
                        name: field.name,
                        parent_type: Some(name.to_string()),
                        parent_enum: None,
                        field_type: Some(field.ty),
                        description: summarize(&field.description, MATCH_SUMMARY_CHARS),
                    });
                }
            }

            if let ExtendedType::Enum(en) = ty {
                for value in en.values.values() {
                    let value_description = text(value.description.as_deref());
                    if matches(value.value.as_str(), &value_description) {
                        results.push(SearchHit {
                            kind: "enum_value".to_string(),
                            name: value.value.to_string(),
                            parent_type: None,
                            parent_enum: Some(name.to_string()),
                            field_type: None,
                            description: summarize(&value_description, MATCH_SUMMARY_CHARS),
                        });
                    }
                }
            }
        }

        results.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        results.truncate(MAX_SEARCH_RESULTS);
        SearchOutput {
            total_matches: results.len(),
            results,
        }
    }

    fn implementors<'a>(&'a self, interface: &'a str) -> impl Iterator<Item = (&'a Name, &'a ExtendedType)> {
        self.named_types()
            .filter(move |(_, ty)| interfaces_of(ty).iter().any(|i| i == interface))
    }

    pub fn get_implementors(&self, input: &InterfaceInput) -> Result<ImplementorsOutput, AgentError> {
        let Some(ExtendedType::Interface(iface)) = self.lookup(&input.interface) else {
            return Err(AgentError::invalid_argument(format!(
                "interface {:?} not found",
                input.interface
            )));
        };

        let mut implementors: Vec<_> = self
            .implementors(&input.interface)
            .map(|(name, ty)| TypeSummary {
                name: name.to_string(),
                description: summarize(&description_of(ty), MATCH_SUMMARY_CHARS),
            })
            .collect();
        implementors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ImplementorsOutput {
            interface: input.interface.clone(),
            description: text(iface.description.as_deref()),
            count: implementors.len(),
            implementors,
        })
    }

    pub fn get_union_types(&self, input: &UnionInput) -> Result<UnionMembersOutput, AgentError> {
        let Some(ExtendedType::Union(union)) = self.lookup(&input.union) else {
            return Err(AgentError::invalid_argument(format!("union {:?} not found", input.union)));
        };

        let types: Vec<_> = union
            .members
            .iter()
            .map(|member| TypeSummary {
                name: member.name.to_string(),
                description: self
                    .lookup(member.name.as_str())
                    .map(|ty| summarize(&description_of(ty), MATCH_SUMMARY_CHARS))
                    .unwrap_or_default(),
            })
            .collect();

        Ok(UnionMembersOutput {
            union: input.union.clone(),
            description: text(union.description.as_deref()),
            count: types.len(),
            types,
        })
    }

    /// The exploration tools in registration order.
    pub fn into_tools(self: Arc<Self>) -> Vec<AgentTool> {
        let s = self;
        vec![
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_list_types",
                        "List all types in the Nais GraphQL API schema, grouped by kind. Use this to explore available data types before querying specific type details. Useful for understanding the API structure.",
                    )
                    .string_enum(
                        "kind",
                        "Filter by kind: 'OBJECT', 'INTERFACE', 'ENUM', 'UNION', 'INPUT_OBJECT', 'SCALAR', or 'all' (default: 'all')",
                        &["OBJECT", "INTERFACE", "ENUM", "UNION", "INPUT_OBJECT", "SCALAR", "all"],
                        false,
                    )
                    .string("search", "Filter type names containing this string (case-insensitive)", false)
                    .build(),
                    move |input: ListTypesInput, _ctx| {
                        let output = s.list_types(&input);
                        async move { Ok(output) }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_get_type",
                        "Get complete details about a GraphQL type: fields with their types, interfaces it implements, types that implement it (for interfaces), enum values, or union member types. Use this to understand the shape of data returned by queries.",
                    )
                    .string("name", "The exact type name (e.g., 'Application', 'Team', 'DeploymentState')", true)
                    .build(),
                    move |input: NameInput, _ctx| {
                        let output = s.get_type(&input);
                        async move { output }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_list_queries",
                        "List all available GraphQL query operations with their return types and number of arguments. These are the entry points for reading data from the Nais API.",
                    )
                    .string("search", "Filter query names or descriptions containing this string (case-insensitive)", false)
                    .build(),
                    move |input: SearchFilterInput, _ctx| {
                        let output = s.list_queries(&input);
                        async move { Ok(output) }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_list_mutations",
                        "List all available GraphQL mutation operations with their return types and number of arguments. Mutations are used to modify data (note: only read operations can be executed).",
                    )
                    .string("search", "Filter mutation names or descriptions containing this string (case-insensitive)", false)
                    .build(),
                    move |input: SearchFilterInput, _ctx| {
                        let output = s.list_mutations(&input);
                        async move { Ok(output) }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_get_field",
                        "Get detailed information about a specific field including its arguments with types and defaults, return type, description, and deprecation status. Use 'Query' as the type to inspect query operations, or 'Mutation' for mutations.",
                    )
                    .string("type", "The type name containing the field (use 'Query' for root queries, 'Mutation' for root mutations, or any object type name)", true)
                    .string("field", "The field name to inspect", true)
                    .build(),
                    move |input: GetFieldInput, _ctx| {
                        let output = s.get_field(&input);
                        async move { output }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_get_enum",
                        "Get all possible values for an enum type with their descriptions and deprecation status. Use this to understand valid values for enum fields (e.g., ApplicationState, DeploymentState).",
                    )
                    .string("name", "The enum type name (e.g., 'ApplicationState', 'TeamRole')", true)
                    .build(),
                    move |input: NameInput, _ctx| {
                        let output = s.get_enum(&input);
                        async move { output }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_search",
                        "Search across all schema types, fields, and enum values by name or description. Returns up to 50 matches. Use this to discover relevant types when you're not sure of exact names.",
                    )
                    .string("query", "Search term to match against names and descriptions (case-insensitive)", true)
                    .build(),
                    move |input: SearchInput, _ctx| {
                        let output = s.search(&input);
                        async move { Ok(output) }
                    },
                )
            },
            {
                let s = s.clone();
                AgentTool::typed(
                    ToolSpec::builder(
                        "schema_get_implementors",
                        "Get all concrete types that implement a GraphQL interface. Use this to find all possible types when a query returns an interface type.",
                    )
                    .string("interface", "The interface name (e.g., 'Workload', 'Issue')", true)
                    .build(),
                    move |input: InterfaceInput, _ctx| {
                        let output = s.get_implementors(&input);
                        async move { output }
                    },
                )
            },
            AgentTool::typed(
                ToolSpec::builder(
                    "schema_get_union_types",
                    "Get all member types of a GraphQL union. Use this to understand what concrete types can be returned when a query returns a union type.",
                )
                .string("union", "The union type name", true)
                .build(),
                move |input: UnionInput, _ctx| {
                    let output = s.get_union_types(&input);
                    async move { output }
                },
            ),
        ]
    }
}

fn kind_name(ty: &ExtendedType) -> &'static str {
    match ty {
        ExtendedType::Scalar(_) => "SCALAR",
        ExtendedType::Object(_) => "OBJECT",
        ExtendedType::Interface(_) => "INTERFACE",
        ExtendedType::Union(_) => "UNION",
        ExtendedType::Enum(_) => "ENUM",
        ExtendedType::InputObject(_) => "INPUT_OBJECT",
    }
}

fn text(description: Option<&str>) -> String {
    description.unwrap_or_default().to_string()
}

fn description_of(ty: &ExtendedType) -> String {
    let description = match ty {
        ExtendedType::Scalar(t) => t.description.as_deref(),
        ExtendedType::Object(t) => t.description.as_deref(),
        ExtendedType::Interface(t) => t.description.as_deref(),
        ExtendedType::Union(t) => t.description.as_deref(),
        ExtendedType::Enum(t) => t.description.as_deref(),
        ExtendedType::InputObject(t) => t.description.as_deref(),
    };
    text(description)
}

fn interfaces_of(ty: &ExtendedType) -> Vec<String> {
    let interfaces = match ty {
        ExtendedType::Object(t) => &t.implements_interfaces,
        ExtendedType::Interface(t) => &t.implements_interfaces,
        _ => return Vec::new(),
    };
    interfaces.iter().map(|i| i.name.to_string()).collect()
}

/// Reason string when given, `true` when deprecated without one.
fn deprecation(directives: &DirectiveList) -> Option<Value> {
    let directive = directives.get("deprecated")?;
    let reason = directive
        .arguments
        .iter()
        .find(|arg| arg.name.as_str() == "reason")
        .and_then(|arg| arg.value.as_str());
    Some(match reason {
        Some(reason) => Value::String(reason.to_string()),
        None => Value::Bool(true),
    })
}

/// Fields with full descriptions.
fn field_infos_full(ty: &ExtendedType) -> Vec<FieldInfo> {
    let from_field = |f: &FieldDefinition| FieldInfo {
        name: f.name.to_string(),
        ty: f.ty.to_string(),
        description: text(f.description.as_deref()),
        deprecated: deprecation(&f.directives),
    };
    let from_input = |f: &InputValueDefinition| FieldInfo {
        name: f.name.to_string(),
        ty: f.ty.to_string(),
        description: text(f.description.as_deref()),
        deprecated: deprecation(&f.directives),
    };
    match ty {
        ExtendedType::Object(t) => t.fields.values().map(|f| from_field(f)).collect(),
        ExtendedType::Interface(t) => t.fields.values().map(|f| from_field(f)).collect(),
        ExtendedType::InputObject(t) => t.fields.values().map(|f| from_input(f)).collect(),
        _ => Vec::new(),
    }
}

/// Fields with descriptions shortened for listings.
fn field_infos(ty: &ExtendedType) -> Vec<FieldInfo> {
    field_infos_full(ty)
        .into_iter()
        .map(|mut field| {
            field.description = summarize(&field.description, FIELD_SUMMARY_CHARS);
            field
        })
        .collect()
}

fn field_details(field: &FieldDefinition) -> FieldDetails {
    FieldDetails {
        name: field.name.to_string(),
        ty: field.ty.to_string(),
        description: text(field.description.as_deref()),
        deprecated: deprecation(&field.directives),
        args: field
            .arguments
            .iter()
            .map(|arg| ArgumentInfo {
                name: arg.name.to_string(),
                ty: arg.ty.to_string(),
                description: text(arg.description.as_deref()),
                default: arg.default_value.as_ref().map(|v| v.to_string()),
            })
            .collect(),
    }
}

fn input_field_details(field: &InputValueDefinition) -> FieldDetails {
    FieldDetails {
        name: field.name.to_string(),
        ty: field.ty.to_string(),
        description: text(field.description.as_deref()),
        deprecated: deprecation(&field.directives),
        args: Vec::new(),
    }
}
