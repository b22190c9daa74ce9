mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use nais_agent::graphql::load_schema;
use nais_agent::tools::schema::{
    GetFieldInput, InterfaceInput, ListTypesInput, NameInput, SearchFilterInput, SearchInput,
    UnionInput,
};
use nais_agent::tools::{SchemaTools, ToolArguments, ToolExecutionContext};

fn tools() -> SchemaTools {
    SchemaTools::new(load_schema(common::SDL).unwrap())
}

fn name(value: &str) -> NameInput {
    NameInput {
        name: value.to_string(),
    }
}

#[test]
fn list_types_groups_by_kind_and_sorts() {
    let output = tools().list_types(&ListTypesInput::default());
    assert_eq!(
        output.objects,
        vec![
            "Application",
            "Job",
            "Mutation",
            "Node",
            "Query",
            "Secret",
            "SecretConnection",
            "Subscription",
            "Team",
            "User",
        ]
    );
    assert_eq!(output.interfaces, vec!["Workload"]);
    assert_eq!(output.enums, vec!["ApplicationState"]);
    assert_eq!(output.unions, vec!["SearchResult"]);
    assert_eq!(output.input_objects, vec!["TeamFilter"]);
    assert!(output.objects.iter().all(|n| !n.starts_with("__")));
}

#[test]
fn list_types_filters_by_kind_and_search() {
    let output = tools().list_types(&ListTypesInput {
        kind: Some("object".into()),
        search: Some("SECRET".into()),
    });
    assert_eq!(output.objects, vec!["Secret", "SecretConnection"]);
    assert!(output.enums.is_empty());
    assert!(output.interfaces.is_empty());

    let enums = tools().list_types(&ListTypesInput {
        kind: Some("ENUM".into()),
        search: None,
    });
    assert_eq!(enums.enums, vec!["ApplicationState"]);
    assert!(enums.objects.is_empty());
}

#[test]
fn get_type_reports_fields_and_deprecation() {
    let team = tools().get_type(&name("Team")).unwrap();
    assert_eq!(team.kind, "OBJECT");
    assert_eq!(team.description, "A team owns workloads.");

    let old = team.fields.iter().find(|f| f.name == "oldField").unwrap();
    assert_eq!(old.deprecated, Some(json!("Use purpose")));
    let apps = team.fields.iter().find(|f| f.name == "applications").unwrap();
    assert_eq!(apps.ty, "[Application!]!");
    assert_eq!(apps.deprecated, None);
}

#[test]
fn get_type_on_interface_lists_implementors() {
    let workload = tools().get_type(&name("Workload")).unwrap();
    assert_eq!(workload.kind, "INTERFACE");
    assert_eq!(workload.implemented_by, vec!["Application", "Job"]);

    let app = tools().get_type(&name("Application")).unwrap();
    assert_eq!(app.implements, vec!["Workload"]);
}

#[test]
fn get_type_on_union_and_enum() {
    let union = tools().get_type(&name("SearchResult")).unwrap();
    assert_eq!(union.kind, "UNION");
    assert_eq!(union.types, vec!["Application", "Team"]);

    let state = tools().get_type(&name("ApplicationState")).unwrap();
    let names: Vec<_> = state.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["RUNNING", "FAILING", "UNKNOWN"]);
    assert_eq!(state.values[2].deprecated, Some(json!(true)));
}

#[test]
fn unknown_type_is_an_error() {
    let err = tools().get_type(&name("Nope")).unwrap_err();
    assert_eq!(err.to_string(), "type \"Nope\" not found");
}

#[test]
fn queries_and_mutations_are_sorted_with_argument_counts() {
    let queries = tools().list_queries(&SearchFilterInput::default());
    let names: Vec<_> = queries.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, vec!["me", "node", "search", "team"]);
    let search = queries.iter().find(|q| q.name == "search").unwrap();
    assert_eq!(search.arg_count, 2);
    assert_eq!(search.return_type, "[SearchResult!]!");

    let filtered = tools().list_queries(&SearchFilterInput {
        search: Some("TEAM".into()),
    });
    assert_eq!(filtered.len(), 1);

    let mutations = tools().list_mutations(&SearchFilterInput::default());
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].name, "deleteApplication");
}

#[test]
fn get_field_includes_arguments_and_defaults() {
    let field = tools()
        .get_field(&GetFieldInput {
            type_name: "Query".into(),
            field: "search".into(),
        })
        .unwrap();
    assert_eq!(field.ty, "[SearchResult!]!");
    assert_eq!(field.args.len(), 2);
    assert_eq!(field.args[0].name, "query");
    assert_eq!(field.args[0].ty, "String!");
    assert_eq!(field.args[1].default.as_deref(), Some("10"));

    let err = tools()
        .get_field(&GetFieldInput {
            type_name: "Team".into(),
            field: "missing".into(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "field \"missing\" not found on type \"Team\"");
}

#[test]
fn get_enum_rejects_non_enums() {
    let state = tools().get_enum(&name("ApplicationState")).unwrap();
    assert_eq!(state.description, "The state of an application.");
    assert_eq!(state.values.len(), 3);

    let err = tools().get_enum(&name("Team")).unwrap_err();
    assert_eq!(err.to_string(), "enum \"Team\" not found");
}

#[test]
fn search_covers_types_fields_and_enum_values() {
    let output = tools().search(&SearchInput {
        query: "failing".into(),
    });
    assert_eq!(output.total_matches, 1);
    assert_eq!(output.results[0].name, "FAILING");
    assert_eq!(output.results[0].kind, "enum_value");
    assert_eq!(output.results[0].parent_enum.as_deref(), Some("ApplicationState"));

    let output = tools().search(&SearchInput {
        query: "purpose".into(),
    });
    let kinds: Vec<_> = output
        .results
        .iter()
        .map(|hit| (hit.kind.as_str(), hit.name.as_str(), hit.parent_type.as_deref()))
        .collect();
    assert_eq!(kinds, vec![("field", "purpose", Some("Team"))]);
    assert_eq!(output.results[0].field_type.as_deref(), Some("String"));

    let output = tools().search(&SearchInput {
        query: "RUNNING".into(),
    });
    let kinds: Vec<_> = output.results.iter().map(|hit| hit.kind.as_str()).collect();
    assert_eq!(kinds, vec!["enum_value", "object"]);
}

#[test]
fn search_results_are_capped() {
    let output = tools().search(&SearchInput { query: "e".into() });
    assert!(output.results.len() <= 50);
    assert_eq!(output.total_matches, output.results.len());
}

#[test]
fn implementors_and_union_members() {
    let implementors = tools()
        .get_implementors(&InterfaceInput {
            interface: "Workload".into(),
        })
        .unwrap();
    assert_eq!(implementors.count, 2);
    assert_eq!(implementors.implementors[0].name, "Application");
    assert_eq!(
        implementors.implementors[0].description,
        "An application running on the platform."
    );

    let err = tools()
        .get_implementors(&InterfaceInput {
            interface: "Team".into(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "interface \"Team\" not found");

    let members = tools()
        .get_union_types(&UnionInput {
            union: "SearchResult".into(),
        })
        .unwrap();
    assert_eq!(members.count, 2);
    let names: Vec<_> = members.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Application", "Team"]);
}

#[tokio::test]
async fn tools_are_registered_in_order_and_callable() {
    let integration = common::integration();
    let names: Vec<_> = integration
        .tool_definitions()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "schema_list_types",
            "schema_get_type",
            "schema_list_queries",
            "schema_list_mutations",
            "schema_get_field",
            "schema_get_enum",
            "schema_search",
            "schema_get_implementors",
            "schema_get_union_types",
            "get_nais_context",
            "execute_graphql",
            "validate_graphql",
            "render_chart",
        ]
    );

    let ctx = ToolExecutionContext::default();
    let output = integration
        .execute_tool(
            &ctx,
            "schema_get_field",
            &ToolArguments::from_value(json!({"type": "Team", "field": "slug"})),
        )
        .await
        .unwrap();
    assert_eq!(output, json!({"name": "slug", "type": "String!"}));

    let err = integration
        .execute_tool(&ctx, "schema_get_type", &ToolArguments::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid arguments for schema_get_type"));
}

#[tokio::test]
async fn nais_context_includes_console_links() {
    let integration = common::integration_with(Arc::new(common::StaticGraphQLClient::default()));
    let output = integration
        .execute_tool(
            &ToolExecutionContext::default(),
            "get_nais_context",
            &ToolArguments::default(),
        )
        .await
        .unwrap();

    assert_eq!(output["user"]["name"], "Ada Lovelace");
    assert_eq!(output["teams"][0]["slug"], "devteam");
    assert_eq!(output["teams"][0]["role"], "owner");
    assert_eq!(output["console_base_url"], "https://console.nav.cloud.nais.io");
    assert_eq!(output["console_url_patterns"]["app"], "/team/{team}/{env}/app/{app}");
}
