//! Randomised names and canonical request payloads for create and update flows.
//!
//! Every generated name satisfies the backend's naming rules (starts with a
//! letter, ASCII alphanumerics only, 3 to 50 characters) unless the generator
//! exists precisely to break one of them.

use rand::{distributions::Alphanumeric, seq::SliceRandom, thread_rng, Rng};
use serde_json::json;
use std::{thread::sleep, time::Duration};
use workbench_client::{
    AnalysisId, ControlKind, ControlLayout, DashboardId, DashboardTabId, DataSetId, FolderId,
    NamespaceId, NewAnalysis, NewDashboard, NewDashboardControl, NewDashboardTab, NewFolder,
    NewNamespace, NewObjectType, NewObjectTypeGroup, NewProject, NewSemanticModel, ObjectTypeId,
    Property, SemanticModelId, UpdateAnalysis, UpdateDashboard, UpdateDashboardControl,
    UpdateDashboardTab, UpdateFolder, UpdateNamespace, UpdateObjectType, UpdateObjectTypeGroup,
    UpdateProject, UpdateSemanticModel,
};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 50;

/// Characters the backend refuses inside names.
pub const SPECIAL_CHARACTERS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*', '?', '/'];

const SUFFIX_LENGTH: usize = 12;

fn alphanumeric(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn letter() -> char {
    let letters = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    char::from(letters[thread_rng().gen_range(0..letters.len())])
}

/// A unique, valid name. `prefix` is stripped of anything but alphanumerics,
/// and is replaced by a random letter if that leaves it not starting with one.
pub fn random_name(prefix: &str) -> String {
    let mut prefix: String = prefix
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if !prefix.starts_with(|c: char| c.is_ascii_alphabetic()) {
        prefix.insert(0, letter());
    }
    prefix.truncate(MAX_NAME_LENGTH - SUFFIX_LENGTH);
    prefix + &alphanumeric(SUFFIX_LENGTH)
}

pub fn random_description() -> String {
    let subjects = ["Quarterly", "Regional", "Customer", "Inventory", "Pipeline"];
    let topics = ["revenue", "churn", "forecast", "headcount", "margin"];
    let mut rng = thread_rng();
    format!(
        "{} {} fixture {}",
        subjects.choose(&mut rng).unwrap_or(&"Generated"),
        topics.choose(&mut rng).unwrap_or(&"data"),
        uuid::Uuid::new_v4()
    )
}

/// A valid name of exactly `length` characters. Lengths outside the accepted
/// range are allowed so boundary tests can step just past it.
pub fn name_of_length(length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let mut name = String::with_capacity(length);
    name.push(letter());
    name.push_str(&alphanumeric(length - 1));
    name
}

pub fn name_starting_with_digit() -> String {
    let digit = char::from(b'0' + thread_rng().gen_range(0..10u8));
    format!("{digit}{}", random_name("Fixture"))
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect()
}

pub fn name_with_special_characters() -> String {
    let special = SPECIAL_CHARACTERS
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or('!');
    let mut name = random_name("Fixture");
    name.truncate(MAX_NAME_LENGTH - 1);
    let position = thread_rng().gen_range(1..=name.len());
    name.insert(position, special);
    name
}

/// Give eventually consistent services time to catch up with a write.
pub fn settle(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay);
    }
}

pub fn new_namespace() -> NewNamespace {
    NewNamespace {
        name: Some(random_name("Namespace")),
        description: Some(random_description()),
    }
}

pub fn update_namespace(id: &NamespaceId) -> UpdateNamespace {
    UpdateNamespace {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
    }
}

pub fn new_project(namespace_id: &NamespaceId) -> NewProject {
    NewProject {
        name: Some(random_name("Project")),
        description: Some(random_description()),
        namespace_id: Some(namespace_id.clone()),
    }
}

pub fn update_project(id: &workbench_client::ProjectId, namespace_id: &NamespaceId) -> UpdateProject {
    UpdateProject {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
        namespace_id: Some(namespace_id.clone()),
    }
}

pub fn new_folder(parent_id: Option<&FolderId>) -> NewFolder {
    NewFolder {
        name: Some(random_name("Folder")),
        description: Some(random_description()),
        parent_id: parent_id.cloned(),
    }
}

pub fn update_folder(id: &FolderId) -> UpdateFolder {
    UpdateFolder {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
        parent_id: None,
    }
}

pub fn new_object_type(data_set_id: &DataSetId) -> NewObjectType {
    NewObjectType {
        name: Some(random_name("ObjectType")),
        description: Some(random_description()),
        data_set_id: Some(data_set_id.clone()),
        primary_key: Some("id".to_owned()),
        properties: vec![Property {
            name: "Identifier".to_owned(),
            column_name: "id".to_owned(),
            data_type: "string".to_owned(),
        }],
        group_ids: Vec::new(),
    }
}

pub fn update_object_type(id: &ObjectTypeId) -> UpdateObjectType {
    UpdateObjectType {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
        ..Default::default()
    }
}

pub fn new_object_type_group() -> NewObjectTypeGroup {
    NewObjectTypeGroup {
        name: Some(random_name("Group")),
        description: Some(random_description()),
        object_type_ids: Vec::new(),
    }
}

pub fn update_object_type_group(id: &workbench_client::ObjectTypeGroupId) -> UpdateObjectTypeGroup {
    UpdateObjectTypeGroup {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
        object_type_ids: None,
    }
}

pub fn new_semantic_model(object_type_ids: &[ObjectTypeId]) -> NewSemanticModel {
    NewSemanticModel {
        name: Some(random_name("Model")),
        description: Some(random_description()),
        object_type_ids: object_type_ids.to_vec(),
        layout: Some(json!({ "nodes": [], "zoom": 1.0 })),
    }
}

pub fn update_semantic_model(id: &SemanticModelId) -> UpdateSemanticModel {
    UpdateSemanticModel {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
        ..Default::default()
    }
}

pub fn new_analysis(semantic_model_id: &SemanticModelId) -> NewAnalysis {
    NewAnalysis {
        name: Some(random_name("Analysis")),
        description: Some(random_description()),
        semantic_model_id: Some(semantic_model_id.clone()),
    }
}

pub fn update_analysis(id: &AnalysisId) -> UpdateAnalysis {
    UpdateAnalysis {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
    }
}

pub fn new_dashboard(analysis_id: &AnalysisId) -> NewDashboard {
    NewDashboard {
        name: Some(random_name("Dashboard")),
        description: Some(random_description()),
        analysis_id: Some(analysis_id.clone()),
    }
}

pub fn update_dashboard(id: &DashboardId) -> UpdateDashboard {
    UpdateDashboard {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        description: Some(random_description()),
    }
}

pub fn new_dashboard_tab(dashboard_id: &DashboardId, order: u32) -> NewDashboardTab {
    NewDashboardTab {
        dashboard_id: Some(dashboard_id.clone()),
        name: Some(random_name("Tab")),
        order: Some(order),
    }
}

pub fn update_dashboard_tab(id: &DashboardTabId, order: u32) -> UpdateDashboardTab {
    UpdateDashboardTab {
        id: Some(id.clone()),
        name: Some(random_name("Renamed")),
        order: Some(order),
    }
}

pub fn new_dashboard_control(tab_id: &DashboardTabId) -> NewDashboardControl {
    NewDashboardControl {
        dashboard_tab_id: Some(tab_id.clone()),
        kind: Some(ControlKind::Table),
        title: Some(random_name("Control")),
        layout: Some(ControlLayout {
            x: 0,
            y: 0,
            width: 6,
            height: 4,
        }),
        query: None,
    }
}

pub fn update_dashboard_control(id: &workbench_client::DashboardControlId) -> UpdateDashboardControl {
    UpdateDashboardControl {
        id: Some(id.clone()),
        kind: Some(ControlKind::BarChart),
        title: Some(random_name("Renamed")),
        layout: Some(ControlLayout {
            x: 6,
            y: 0,
            width: 6,
            height: 4,
        }),
        query: None,
    }
}
