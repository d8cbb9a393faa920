use crate::{common::client, test_ontology::create_object_type, TestScope};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use workbench_client::{
    Client, NewSemanticModel, ObjectType, PageQuery, ProjectId, SemanticModel, SemanticModelId,
    UpdateSemanticModel,
};
use workbench_suite::{
    assertions::{
        assert_not_found, assert_problem_mentions, assert_round_trip, assert_status,
        assert_success, assert_validation_error,
    },
    context::{TestContext, TestResource},
    fixtures::{self, MAX_NAME_LENGTH, MIN_NAME_LENGTH},
};

pub type TestSemanticModel = TestResource<SemanticModelId>;

pub fn create_semantic_model(
    project_id: &ProjectId,
    payload: &NewSemanticModel,
) -> TestSemanticModel {
    let response = client().create_semantic_model(project_id, payload).unwrap();
    TestResource::adopt(
        "semantic model",
        project_id,
        response,
        Client::delete_semantic_model,
    )
    .unwrap()
}

fn fetch(model: &TestSemanticModel) -> SemanticModel {
    client()
        .get_semantic_model(model.project_id(), model.id())
        .unwrap()
        .into_success()
        .unwrap()
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_create_get_round_trip() {
    let scope = TestScope::new();
    let payload = fixtures::new_semantic_model(&[]);
    let model = create_semantic_model(scope.project_id(), &payload);

    let fetched = fetch(&model);
    assert_eq!(&fetched.id, model.id());
    assert_eq!(Some(&fetched.layout), payload.layout.as_ref());
    assert_round_trip(&payload, &fetched);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_update_replaces_layout() {
    let scope = TestScope::new();
    let model = create_semantic_model(scope.project_id(), &fixtures::new_semantic_model(&[]));
    let layout = json!({ "nodes": [{ "x": 10, "y": 20 }], "zoom": 0.5 });
    let update = UpdateSemanticModel {
        layout: Some(layout.clone()),
        ..fixtures::update_semantic_model(model.id())
    };

    let response = client()
        .update_semantic_model(scope.project_id(), model.id(), &update)
        .unwrap();
    assert_success(&response);

    let fetched = fetch(&model);
    assert_round_trip(&update, &fetched);
    assert_eq!(fetched.layout, layout);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_list_semantic_models() {
    let scope = TestScope::new();
    let first = create_semantic_model(scope.project_id(), &fixtures::new_semantic_model(&[]));
    let second = create_semantic_model(scope.project_id(), &fixtures::new_semantic_model(&[]));

    let response = client()
        .get_semantic_models(scope.project_id(), &PageQuery::default())
        .unwrap();
    assert_status(&response, StatusCode::OK);

    let page = response.page::<SemanticModel>().unwrap();
    let ids: Vec<_> = page.items.iter().map(|model| &model.id).collect();
    assert!(ids.contains(&first.id()));
    assert!(ids.contains(&second.id()));
    assert!(page.total_count >= 2);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_duplicate_name_in_same_project_is_rejected() {
    let scope = TestScope::new();
    let payload = fixtures::new_semantic_model(&[]);
    let _model = create_semantic_model(scope.project_id(), &payload);

    let response = client()
        .create_semantic_model(scope.project_id(), &payload)
        .unwrap();
    assert_problem_mentions(&response, "already exists");
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_duplicate_name_in_other_project_is_accepted() {
    let first = TestScope::new();
    let second = TestScope::new();
    let payload = fixtures::new_semantic_model(&[]);
    let _model = create_semantic_model(first.project_id(), &payload);

    let twin = create_semantic_model(second.project_id(), &payload);
    assert_eq!(Some(fetch(&twin).name.as_str()), payload.name.as_deref());
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_name_validation() {
    let scope = TestScope::new();
    let create = |name: Option<String>| {
        client()
            .create_semantic_model(
                scope.project_id(),
                &NewSemanticModel {
                    name,
                    ..fixtures::new_semantic_model(&[])
                },
            )
            .unwrap()
    };

    assert_validation_error(&create(None), "name", "required");
    for length in [MIN_NAME_LENGTH - 1, MAX_NAME_LENGTH + 1] {
        assert_validation_error(
            &create(Some(fixtures::name_of_length(length))),
            "name",
            "characters",
        );
    }
    assert_validation_error(
        &create(Some(fixtures::name_starting_with_digit())),
        "name",
        "letter",
    );
    assert_validation_error(
        &create(Some(fixtures::name_with_special_characters())),
        "name",
        "special characters",
    );
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_delete_then_get_is_not_found() {
    let scope = TestScope::new();
    let model = create_semantic_model(scope.project_id(), &fixtures::new_semantic_model(&[]));

    let response = client()
        .delete_semantic_model(scope.project_id(), model.id())
        .unwrap();
    assert_status(&response, StatusCode::NO_CONTENT);
    assert_not_found(
        &client()
            .get_semantic_model(scope.project_id(), model.id())
            .unwrap(),
    );

    std::mem::forget(model);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_model_lists_its_object_types() {
    let Some((project_id, data_set_id)) = TestContext::get().seeded_data_set() else {
        return;
    };
    let object_type = create_object_type(project_id, &fixtures::new_object_type(data_set_id));
    let model = create_semantic_model(
        project_id,
        &fixtures::new_semantic_model(&[object_type.id().clone()]),
    );

    let response = client()
        .get_model_object_types(project_id, model.id(), &PageQuery::default())
        .unwrap();
    assert_status(&response, StatusCode::OK);
    let listed = response.page::<ObjectType>().unwrap().items;
    assert_eq!(
        listed.iter().map(|listed| &listed.id).collect::<Vec<_>>(),
        vec![object_type.id()]
    );

    let response = client()
        .get_model_object_type_groups(project_id, model.id(), &PageQuery::default())
        .unwrap();
    assert_status(&response, StatusCode::OK);

    // The model goes before the object type it references.
    drop(model);
}
