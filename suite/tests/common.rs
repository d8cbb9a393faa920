use serde::de::DeserializeOwned;
use workbench_client::{ApiResponse, Client, Created, ProjectId};
use workbench_suite::{
    assertions::assert_success,
    context::{TestContext, TestNamespace, TestProject},
};

pub fn client() -> &'static Client {
    TestContext::get().client()
}

/// The id out of a successful create response.
pub fn created<IdT: DeserializeOwned>(response: &ApiResponse) -> IdT {
    assert_success(response);
    response
        .json::<Created<IdT>>()
        .unwrap_or_else(|error| panic!("no id in {}: {}", response.body, error))
        .id
}

/// A fresh namespace holding a fresh project. Fields drop in declaration
/// order, so the project goes before its namespace.
pub struct TestScope {
    pub project: TestProject,
    pub namespace: TestNamespace,
}

impl TestScope {
    pub fn new() -> Self {
        let namespace = TestNamespace::new().unwrap();
        let project = TestProject::new(&namespace).unwrap();
        Self { project, namespace }
    }

    pub fn project_id(&self) -> &ProjectId {
        self.project.id()
    }
}
