//! A short create → read → update → delete pass over the project-explorer
//! hierarchy, used to check a deployment is wired up before running the
//! full suites.

use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::StatusCode;
use std::time::Duration;
use workbench_client::{
    ApiResponse, Client, Created, FolderId, NamespaceId, PageQuery, ProjectId,
};

use crate::fixtures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub status_code: Option<StatusCode>,
    pub passed: bool,
    pub message: Option<String>,
}

impl Step {
    fn from_response(name: &str, response: &ApiResponse, expected: &[StatusCode]) -> Self {
        let passed = expected.contains(&response.status_code);
        Self {
            name: name.to_owned(),
            status_code: Some(response.status_code),
            passed,
            message: (!passed).then(|| response.body.to_string()),
        }
    }

    fn from_error(name: &str, error: &workbench_client::Error) -> Self {
        let report = error.report();
        Self {
            name: name.to_owned(),
            status_code: None,
            passed: false,
            message: Some(match report.details {
                Some(details) => format!("{}: {}", report.message, details),
                None => report.message,
            }),
        }
    }
}

/// Collects steps; stops the run at the first failure that later steps
/// depend on.
struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    fn check(
        &mut self,
        name: &str,
        expected: &[StatusCode],
        result: workbench_client::Result<ApiResponse>,
    ) -> Option<ApiResponse> {
        let step = match &result {
            Ok(response) => Step::from_response(name, response, expected),
            Err(error) => Step::from_error(name, error),
        };
        debug!("{name}: {:?}", step.status_code);
        let passed = step.passed;
        self.steps.push(step);
        match result {
            Ok(response) if passed => Some(response),
            _ => None,
        }
    }
}

const CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const FETCHED: &[StatusCode] = &[StatusCode::OK];
const MODIFIED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// One request against the namespace list; succeeds if anything answered.
pub fn ping(client: &Client) -> Step {
    let name = "list namespaces";
    match client.get_namespaces(&PageQuery::page(1, 1)) {
        Ok(response) => Step::from_response(name, &response, FETCHED),
        Err(error) => Step::from_error(name, &error),
    }
}

pub fn run(client: &Client, settle: Duration) -> Result<Vec<Step>> {
    let mut recorder = Recorder { steps: Vec::new() };
    info!("Running smoke lifecycle against {}", client.base_url());

    if let Some(namespace_id) = create_namespace(client, &mut recorder)? {
        fixtures::settle(settle);
        if let Some(project_id) = create_project(client, &mut recorder, &namespace_id)? {
            fixtures::settle(settle);
            folder_lifecycle(client, &mut recorder, &project_id)?;
            recorder.check(
                "delete project",
                MODIFIED,
                client.delete_project(&project_id),
            );
        }
        recorder.check(
            "delete namespace",
            MODIFIED,
            client.delete_namespace(&namespace_id),
        );
        recorder.check(
            "namespace gone",
            &[StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND],
            client.get_namespace(&namespace_id),
        );
    }

    Ok(recorder.steps)
}

fn created<IdT: serde::de::DeserializeOwned>(response: ApiResponse, what: &str) -> Result<IdT> {
    response
        .json::<Created<IdT>>()
        .map(|created| created.id)
        .with_context(|| format!("{what} create response carried no id"))
}

fn create_namespace(client: &Client, recorder: &mut Recorder) -> Result<Option<NamespaceId>> {
    let payload = fixtures::new_namespace();
    let Some(response) = recorder.check(
        "create namespace",
        CREATED,
        client.create_namespace(&payload),
    ) else {
        return Ok(None);
    };
    let id: NamespaceId = created(response, "namespace")?;
    recorder.check("get namespace", FETCHED, client.get_namespace(&id));
    recorder.check(
        "update namespace",
        MODIFIED,
        client.update_namespace(&id, &fixtures::update_namespace(&id)),
    );
    Ok(Some(id))
}

fn create_project(
    client: &Client,
    recorder: &mut Recorder,
    namespace_id: &NamespaceId,
) -> Result<Option<ProjectId>> {
    let payload = fixtures::new_project(namespace_id);
    let Some(response) = recorder.check("create project", CREATED, client.create_project(&payload))
    else {
        return Ok(None);
    };
    let id: ProjectId = created(response, "project")?;
    let fetched = recorder.check("get project", FETCHED, client.get_project(&id));
    if let Some(fetched) = fetched {
        let project: workbench_client::Project = fetched.json()?;
        let passed = &project.namespace_id == namespace_id;
        recorder.steps.push(Step {
            name: "project namespace round trip".to_owned(),
            status_code: None,
            passed,
            message: (!passed).then(|| {
                format!(
                    "project {} reports namespace {} instead of {}",
                    id, project.namespace_id, namespace_id
                )
            }),
        });
    }
    Ok(Some(id))
}

fn folder_lifecycle(client: &Client, recorder: &mut Recorder, project_id: &ProjectId) -> Result<()> {
    let Some(response) = recorder.check(
        "create folder",
        CREATED,
        client.create_folder(project_id, &fixtures::new_folder(None)),
    ) else {
        return Ok(());
    };
    let id: FolderId = created(response, "folder")?;
    recorder.check("get folder", FETCHED, client.get_folder(project_id, &id));
    recorder.check(
        "update folder",
        MODIFIED,
        client.update_folder(project_id, &id, &fixtures::update_folder(&id)),
    );
    recorder.check(
        "list explorer",
        FETCHED,
        client.get_explorer_items(project_id, None, &PageQuery::default()),
    );
    recorder.check(
        "delete folder",
        MODIFIED,
        client.delete_folder(project_id, &id),
    );
    Ok(())
}
