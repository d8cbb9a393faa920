use crate::{
    common::{client, created},
    TestScope,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use workbench_client::{Folder, FolderId, NewFolder, PageQuery};
use workbench_suite::{
    assertions::{
        assert_not_found, assert_problem_mentions, assert_round_trip, assert_status,
        assert_success, assert_validation_error,
    },
    context::TestFolder,
    fixtures::{self, MAX_NAME_LENGTH, MIN_NAME_LENGTH},
};

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_create_get_round_trip() {
    let scope = TestScope::new();
    let payload = fixtures::new_folder(None);
    let folder = TestFolder::with(scope.project_id(), payload.clone()).unwrap();

    let fetched = folder.fetch().unwrap();
    assert_eq!(&fetched.id, folder.id());
    assert_eq!(fetched.parent_id, None);
    assert_round_trip(&payload, &fetched);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_nested_folder_keeps_parent() {
    let scope = TestScope::new();
    let parent = TestFolder::new(&scope.project, None).unwrap();
    let child = TestFolder::new(&scope.project, Some(parent.id())).unwrap();

    assert_eq!(child.fetch().unwrap().parent_id.as_ref(), Some(parent.id()));

    let response = client()
        .get_folders(scope.project_id(), Some(parent.id()), &PageQuery::default())
        .unwrap();
    assert_status(&response, StatusCode::OK);
    let children: Vec<_> = response
        .page::<Folder>()
        .unwrap()
        .items
        .into_iter()
        .map(|folder| folder.id)
        .collect();
    assert_eq!(children, vec![child.id().clone()]);
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_update_round_trip() {
    let scope = TestScope::new();
    let folder = TestFolder::new(&scope.project, None).unwrap();
    let update = fixtures::update_folder(folder.id());

    let response = client()
        .update_folder(scope.project_id(), folder.id(), &update)
        .unwrap();
    assert_success(&response);

    assert_round_trip(&update, &folder.fetch().unwrap());
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_duplicate_name_under_same_parent_is_rejected() {
    let scope = TestScope::new();
    let folder = TestFolder::new(&scope.project, None).unwrap();

    let response = client()
        .create_folder(
            scope.project_id(),
            &NewFolder {
                name: Some(folder.name().to_owned()),
                ..fixtures::new_folder(None)
            },
        )
        .unwrap();
    assert_problem_mentions(&response, "already exists");
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_duplicate_name_in_other_project_is_accepted() {
    let first = TestScope::new();
    let second = TestScope::new();
    let folder = TestFolder::new(&first.project, None).unwrap();

    let twin = TestFolder::with(
        second.project_id(),
        NewFolder {
            name: Some(folder.name().to_owned()),
            ..fixtures::new_folder(None)
        },
    )
    .unwrap();
    assert_eq!(twin.fetch().unwrap().name, folder.name());
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_name_validation() {
    let scope = TestScope::new();
    let create = |name: Option<String>| {
        client()
            .create_folder(
                scope.project_id(),
                &NewFolder {
                    name,
                    ..fixtures::new_folder(None)
                },
            )
            .unwrap()
    };

    assert_validation_error(&create(None), "name", "required");
    assert_validation_error(
        &create(Some(fixtures::name_of_length(MIN_NAME_LENGTH - 1))),
        "name",
        "characters",
    );
    assert_validation_error(
        &create(Some(fixtures::name_of_length(MAX_NAME_LENGTH + 1))),
        "name",
        "characters",
    );
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

    for length in [MIN_NAME_LENGTH, MAX_NAME_LENGTH] {
        let folder = TestFolder::with(
            scope.project_id(),
            NewFolder {
                name: Some(fixtures::name_of_length(length)),
                ..fixtures::new_folder(None)
            },
        )
        .unwrap();
        assert_eq!(folder.fetch().unwrap().name.len(), length);
    }
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_delete_then_get_is_not_found() {
    let scope = TestScope::new();
    let id: FolderId = created(
        &client()
            .create_folder(scope.project_id(), &fixtures::new_folder(None))
            .unwrap(),
    );

    let response = client().delete_folder(scope.project_id(), &id).unwrap();
    assert_status(&response, StatusCode::NO_CONTENT);

    assert_not_found(&client().get_folder(scope.project_id(), &id).unwrap());
}

#[test]
#[ignore = "requires a live workbench deployment"]
fn test_folder_requires_project_header() {
    let scope = TestScope::new();
    let folder = TestFolder::new(&scope.project, None).unwrap();
    let other = TestScope::new();

    // Folders are only visible through the project that owns them.
    assert_not_found(&client().get_folder(other.project_id(), folder.id()).unwrap());
}
