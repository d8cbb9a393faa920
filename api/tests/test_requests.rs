use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use std::{net::TcpListener, time::Duration};
use url::Url;
use workbench_client::{
    normalize, Client, Config, ControlKind, ControlLayout, Created, DashboardTabId,
    DiscoveryQuery, FolderId, Namespace, NamespaceId, NewDashboardControl, NewFolder,
    NewNamespace, NewProject, PageQuery, PatchOperation, ProjectId, ResourceKind, Service, Token,
    UpdateNamespace,
};

fn client_for(server: &ServerGuard) -> Client {
    Client::new(Config {
        endpoint: Url::parse(&server.url()).unwrap(),
        token: Some(Token("s3cret".to_owned())),
        ..Default::default()
    })
    .unwrap()
}

fn project_id() -> ProjectId {
    ProjectId::from("5b7c1a52-93f4-4c51-9d0a-52f1b1cc0f10")
}

#[test]
fn test_create_namespace_posts_json_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/project-explorer/api/Namespace")
        .match_header("authorization", "Bearer s3cret")
        .match_header("content-type", "application/json")
        .match_header("projectid", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "name": "Finance",
            "description": "Quarterly reporting",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"0f8fad5b-d9cb-469f-a165-70867728950e"}"#)
        .create();

    let response = client_for(&server)
        .create_namespace(&NewNamespace {
            name: Some("Finance".to_owned()),
            description: Some("Quarterly reporting".to_owned()),
        })
        .unwrap();

    mock.assert();
    assert_eq!(response.status_code, StatusCode::CREATED);
    let created: Created<NamespaceId> = response.json().unwrap();
    assert_eq!(
        created.id,
        NamespaceId::from("0f8fad5b-d9cb-469f-a165-70867728950e")
    );
}

#[test]
fn test_omitted_fields_are_not_sent() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/project-explorer/api/Project")
        .match_body(Matcher::Json(json!({ "description": "no name here" })))
        .with_status(400)
        .with_body(
            r#"{"title":"One or more validation errors occurred.","status":400,
                "errors":{"Name":["The Name field is required."]}}"#,
        )
        .create();

    let response = client_for(&server)
        .create_project(&NewProject {
            description: Some("no name here".to_owned()),
            ..Default::default()
        })
        .unwrap();

    mock.assert();
    assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_messages("name"),
        vec!["The Name field is required.".to_owned()]
    );
}

#[test]
fn test_get_namespace_decodes_entity() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/project-explorer/api/Namespace/ns-1")
        .with_status(200)
        .with_body(r#"{"id":"ns-1","name":"Finance","description":null}"#)
        .create();

    let namespace: Namespace = client_for(&server)
        .get_namespace(&NamespaceId::from("ns-1"))
        .unwrap()
        .into_success()
        .unwrap();

    mock.assert();
    assert_eq!(namespace.name, "Finance");
    assert_eq!(namespace.description, None);
}

#[test]
fn test_update_and_delete_namespace() {
    let mut server = Server::new();
    let update = server
        .mock("PUT", "/project-explorer/api/Namespace/ns-1")
        .match_body(Matcher::Json(json!({ "id": "ns-1", "name": "Treasury" })))
        .with_status(204)
        .create();
    let delete = server
        .mock("DELETE", "/project-explorer/api/Namespace/ns-1")
        .with_status(204)
        .create();

    let client = client_for(&server);
    let id = NamespaceId::from("ns-1");
    let response = client
        .update_namespace(
            &id,
            &UpdateNamespace {
                id: Some(id.clone()),
                name: Some("Treasury".to_owned()),
                description: None,
            },
        )
        .unwrap();
    assert_eq!(response.status_code, StatusCode::NO_CONTENT);
    assert_eq!(response.body, serde_json::Value::Null);

    let response = client.delete_namespace(&id).unwrap();
    assert_eq!(response.status_code, StatusCode::NO_CONTENT);

    update.assert();
    delete.assert();
}

#[test]
fn test_list_passes_paging_through() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/project-explorer/api/Project")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("NamespaceId".into(), "ns-1".into()),
            Matcher::UrlEncoded("PageNumber".into(), "2".into()),
            Matcher::UrlEncoded("PageSize".into(), "5".into()),
            Matcher::UrlEncoded("SearchTerm".into(), "sales q3".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"items":[],"pageNumber":2,"pageSize":5,"totalCount":5,
                "totalPages":1,"hasNextPage":false,"hasPreviousPage":true}"#,
        )
        .create();

    let page = PageQuery {
        page_number: Some(2),
        page_size: Some(5),
        search_term: Some("sales q3".to_owned()),
    };
    let response = client_for(&server)
        .get_projects(Some(&NamespaceId::from("ns-1")), &page)
        .unwrap();

    mock.assert();
    let page = response.page::<serde_json::Value>().unwrap();
    assert!(page.items.is_empty());
    assert!(page.has_previous_page);
}

#[test]
fn test_folder_calls_carry_project_header() {
    let mut server = Server::new();
    let create = server
        .mock("POST", "/project-explorer/api/Folder")
        .match_header("projectid", project_id().0.as_str())
        .match_body(Matcher::Json(json!({ "name": "Reports", "parentId": "f-root" })))
        .with_status(201)
        .with_body(r#"{"id":"f-2"}"#)
        .create();
    let list = server
        .mock("GET", "/project-explorer/api/Folder")
        .match_header("projectid", project_id().0.as_str())
        .match_query(Matcher::UrlEncoded("ParentId".into(), "f-root".into()))
        .with_status(200)
        .with_body(
            r#"{"items":[{"id":"f-2","name":"Reports","parentId":"f-root"}],"pageNumber":1,
                "pageSize":10,"totalCount":1,"totalPages":1,"hasNextPage":false,
                "hasPreviousPage":false}"#,
        )
        .create();

    let client = client_for(&server);
    let root = FolderId::from("f-root");
    let response = client
        .create_folder(
            &project_id(),
            &NewFolder {
                name: Some("Reports".to_owned()),
                description: None,
                parent_id: Some(root.clone()),
            },
        )
        .unwrap();
    assert_eq!(response.status_code, StatusCode::CREATED);

    let response = client
        .get_folders(&project_id(), Some(&root), &PageQuery::default())
        .unwrap();
    let page = response.page::<workbench_client::Folder>().unwrap();
    assert_eq!(page.items[0].parent_id, Some(root));

    create.assert();
    list.assert();
}

#[test]
fn test_patch_object_type_uses_json_patch_content_type() {
    let mut server = Server::new();
    let mock = server
        .mock("PATCH", "/ontology/api/ObjectType/ot-1")
        .match_header("content-type", "application/json-patch+json")
        .match_body(Matcher::Json(json!([
            { "op": "replace", "path": "/description", "value": "Customers of record" }
        ])))
        .with_status(204)
        .create();

    let response = client_for(&server)
        .patch_object_type(
            &project_id(),
            &"ot-1".into(),
            &[PatchOperation::replace("/description", "Customers of record")],
        )
        .unwrap();

    mock.assert();
    assert!(response.is_success());
}

#[test]
fn test_discovery_serializes_kind() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/ontology/api/Discovery")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("Kind".into(), "objectType".into()),
            Matcher::UrlEncoded("SearchTerm".into(), "cust".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"items":[{"id":"ot-1","name":"Customer","kind":"objectType"}],"pageNumber":1,
                "pageSize":10,"totalCount":1,"totalPages":1,"hasNextPage":false,
                "hasPreviousPage":false}"#,
        )
        .create();

    let response = client_for(&server)
        .discover(
            &project_id(),
            &DiscoveryQuery {
                kind: Some(ResourceKind::ObjectType),
                page: PageQuery::search("cust"),
            },
        )
        .unwrap();

    mock.assert();
    let page = response
        .page::<workbench_client::DiscoveredItem>()
        .unwrap();
    assert_eq!(page.items[0].kind, ResourceKind::ObjectType);
}

#[test]
fn test_dashboard_control_round_trip_shapes() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/bi/api/DashboardControl")
        .match_body(Matcher::Json(json!({
            "dashboardTabId": "tab-1",
            "kind": "barChart",
            "title": "Revenue by region",
            "layout": { "x": 0, "y": 0, "width": 6, "height": 4 },
        })))
        .with_status(201)
        .with_body(r#"{"id":"ctl-1"}"#)
        .create();

    let response = client_for(&server)
        .create_dashboard_control(
            &project_id(),
            &NewDashboardControl {
                dashboard_tab_id: Some(DashboardTabId::from("tab-1")),
                kind: Some(ControlKind::BarChart),
                title: Some("Revenue by region".to_owned()),
                layout: Some(ControlLayout {
                    x: 0,
                    y: 0,
                    width: 6,
                    height: 4,
                }),
                query: None,
            },
        )
        .unwrap();

    mock.assert();
    assert_eq!(response.status_code, StatusCode::CREATED);
}

#[test]
fn test_raw_request_reaches_service_path() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/smd/api/SemanticModel")
        .match_header("projectid", project_id().0.as_str())
        .match_body(Matcher::Json(json!({ "name": 42 })))
        .with_status(400)
        .with_body(r#"{"title":"Bad Request","status":400,"errors":{"$.name":["The JSON value could not be converted to System.String."]}}"#)
        .create();

    let response = client_for(&server)
        .raw(
            reqwest::Method::POST,
            Service::SemanticModelDesigner,
            &["SemanticModel"],
            Some(&project_id()),
            Some(&json!({ "name": 42 })),
        )
        .unwrap();

    mock.assert();
    assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
    assert!(response.problem().unwrap().mentions("could not be converted"));
}

#[test]
fn test_server_errors_are_responses_not_errors() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/bi/api/Analysis")
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let response = client_for(&server)
        .get_analyses(&project_id(), &PageQuery::default())
        .unwrap();

    mock.assert();
    assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!("upstream exploded"));
}

#[test]
fn test_transport_failure_normalizes_to_report() {
    // Nothing listens on the discard port.
    let client = Client::new(Config {
        endpoint: Url::parse("http://127.0.0.1:9").unwrap(),
        ..Default::default()
    })
    .unwrap();

    let report = normalize(client.get_namespaces(&PageQuery::default())).unwrap_err();
    assert!(report.error);
    assert_eq!(report.message, "HTTP request error: GET operation failed.");
    assert!(report.details.is_some());
}

#[test]
fn test_unanswered_request_is_a_timeout() {
    // Connections land in the backlog but nothing ever answers them.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let client = Client::new(Config {
        endpoint: Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap(),
        timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();

    let error = client.get_namespaces(&PageQuery::default()).unwrap_err();
    assert!(error.is_timeout());
    assert_eq!(error.report().message, "HTTP request error: GET operation failed.");
    drop(listener);
}

#[test]
fn test_refused_connection_is_not_a_timeout() {
    let client = Client::new(Config {
        endpoint: Url::parse("http://127.0.0.1:9").unwrap(),
        ..Default::default()
    })
    .unwrap();

    let error = client.get_namespaces(&PageQuery::default()).unwrap_err();
    assert!(!error.is_timeout());
}

#[test]
fn test_dashboard_tabs_filter_by_dashboard() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/bi/api/DashboardTab")
        .match_query(Matcher::UrlEncoded("DashboardId".into(), "d-1".into()))
        .with_status(200)
        .with_body("[]")
        .create();

    let response = client_for(&server)
        .get_dashboard_tabs(&project_id(), &"d-1".into())
        .unwrap();

    mock.assert();
    assert_eq!(response.body, json!([]));
}
