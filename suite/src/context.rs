//! Process-wide client plus RAII guards for throwaway resources. Guards
//! create and delete through `TestContext::get()`.

use anyhow::{anyhow, Context as _, Result};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::time::Duration;
use workbench_client::{
    ApiResponse, Client, Created, DataSetId, Folder, FolderId, Namespace, NamespaceId, NewFolder,
    NewNamespace, NewProject, Project, ProjectId,
};

use crate::{
    config::{self, SuiteConfig},
    fixtures,
};

pub struct TestContext {
    client: Client,
    config: SuiteConfig,
}

impl TestContext {
    /// Build the client once per process. Panics with the load error so a
    /// misconfigured run fails loudly on its first test.
    pub fn get() -> &'static Self {
        static CONTEXT: OnceCell<TestContext> = OnceCell::new();
        CONTEXT.get_or_init(|| match TestContext::from_env() {
            Ok(context) => context,
            Err(error) => panic!("could not set up the workbench test context: {error:#}"),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(config::load(None)?)
    }

    pub fn new(config: SuiteConfig) -> Result<Self> {
        let client = Client::new(config.client_config())
            .context("Failed to build the workbench API client")?;
        Ok(Self { client, config })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn settle(&self) {
        fixtures::settle(self.config.settle_delay());
    }

    pub fn settle_delay(&self) -> Duration {
        self.config.settle_delay()
    }

    /// The seeded project and the data set inside it, if this environment
    /// has them. Callers skip their checks when either is absent.
    pub fn seeded_data_set(&self) -> Option<(&ProjectId, &DataSetId)> {
        let seeded = &self.config.seeded;
        match (seeded.project_id.as_ref(), seeded.data_set_id.as_ref()) {
            (Some(project_id), Some(data_set_id)) => Some((project_id, data_set_id)),
            _ => {
                warn!("No seeded project and data set configured; skipping dependent checks");
                None
            }
        }
    }
}

fn created_id<IdT>(response: ApiResponse, what: &str) -> Result<IdT>
where
    IdT: serde::de::DeserializeOwned,
{
    if !response.is_success() {
        return Err(anyhow!(
            "creating {} failed with {}: {}",
            what,
            response.status_code,
            response.body
        ));
    }
    let created: Created<IdT> = response
        .json()
        .with_context(|| format!("{what} create response carried no id"))?;
    Ok(created.id)
}

/// A namespace that lives as long as the guard.
pub struct TestNamespace {
    id: NamespaceId,
    name: String,
}

impl TestNamespace {
    pub fn new() -> Result<Self> {
        Self::with(fixtures::new_namespace())
    }

    pub fn with(payload: NewNamespace) -> Result<Self> {
        let context = TestContext::get();
        let response = context.client().create_namespace(&payload)?;
        let id = created_id(response, "namespace")?;
        context.settle();
        info!("Created namespace {id}");
        Ok(Self {
            id,
            name: payload.name.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> &NamespaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fetch(&self) -> Result<Namespace> {
        Ok(TestContext::get()
            .client()
            .get_namespace(&self.id)?
            .into_success()?)
    }
}

impl Drop for TestNamespace {
    fn drop(&mut self) {
        delete_on_drop("namespace", &self.id.0, |client| {
            client.delete_namespace(&self.id)
        });
    }
}

/// A project that lives as long as the guard.
pub struct TestProject {
    id: ProjectId,
    name: String,
    namespace_id: NamespaceId,
}

impl TestProject {
    pub fn new(namespace: &TestNamespace) -> Result<Self> {
        Self::with(fixtures::new_project(namespace.id()))
    }

    pub fn with(payload: NewProject) -> Result<Self> {
        let context = TestContext::get();
        let namespace_id = payload
            .namespace_id
            .clone()
            .ok_or_else(|| anyhow!("project fixtures need a namespace id"))?;
        let response = context.client().create_project(&payload)?;
        let id = created_id(response, "project")?;
        // Creating projects fans out to every service; give them a moment.
        context.settle();
        info!("Created project {id}");
        Ok(Self {
            id,
            name: payload.name.unwrap_or_default(),
            namespace_id,
        })
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    pub fn fetch(&self) -> Result<Project> {
        Ok(TestContext::get()
            .client()
            .get_project(&self.id)?
            .into_success()?)
    }
}

impl Drop for TestProject {
    fn drop(&mut self) {
        delete_on_drop("project", &self.id.0, |client| {
            client.delete_project(&self.id)
        });
    }
}

pub struct TestFolder {
    id: FolderId,
    name: String,
    project_id: ProjectId,
}

impl TestFolder {
    pub fn new(project: &TestProject, parent_id: Option<&FolderId>) -> Result<Self> {
        Self::with(project.id(), fixtures::new_folder(parent_id))
    }

    pub fn with(project_id: &ProjectId, payload: NewFolder) -> Result<Self> {
        let response = TestContext::get()
            .client()
            .create_folder(project_id, &payload)?;
        let id = created_id(response, "folder")?;
        info!("Created folder {id}");
        Ok(Self {
            id,
            name: payload.name.unwrap_or_default(),
            project_id: project_id.clone(),
        })
    }

    pub fn id(&self) -> &FolderId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn fetch(&self) -> Result<Folder> {
        Ok(TestContext::get()
            .client()
            .get_folder(&self.project_id, &self.id)?
            .into_success()?)
    }
}

impl Drop for TestFolder {
    fn drop(&mut self) {
        delete_on_drop("folder", &self.id.0, |client| {
            client.delete_folder(&self.project_id, &self.id)
        });
    }
}

type DeleteFn<IdT> = fn(&Client, &ProjectId, &IdT) -> workbench_client::Result<ApiResponse>;

/// Any project scoped resource, deleted with `delete` when the guard drops.
pub struct TestResource<IdT: AsRef<str>> {
    id: IdT,
    project_id: ProjectId,
    what: &'static str,
    delete: DeleteFn<IdT>,
}

impl<IdT: AsRef<str>> TestResource<IdT> {
    /// Take ownership of whatever `response` created.
    pub fn adopt(
        what: &'static str,
        project_id: &ProjectId,
        response: ApiResponse,
        delete: DeleteFn<IdT>,
    ) -> Result<Self>
    where
        IdT: serde::de::DeserializeOwned,
    {
        let id: IdT = created_id(response, what)?;
        info!("Created {} {}", what, id.as_ref());
        Ok(Self {
            id,
            project_id: project_id.clone(),
            what,
            delete,
        })
    }

    pub fn id(&self) -> &IdT {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }
}

impl<IdT: AsRef<str>> Drop for TestResource<IdT> {
    fn drop(&mut self) {
        let delete = self.delete;
        delete_on_drop(self.what, self.id.as_ref(), |client| {
            delete(client, &self.project_id, &self.id)
        });
    }
}

/// Cleanup must not mask the failure that is already unwinding the test.
fn delete_on_drop(
    what: &str,
    id: &str,
    delete: impl FnOnce(&Client) -> workbench_client::Result<ApiResponse>,
) {
    let context = TestContext::get();
    match delete(context.client()) {
        Ok(response) if response.is_success() => info!("Deleted {what} {id}"),
        Ok(response) => {
            let message = format!(
                "deleting {what} {id} returned {}: {}",
                response.status_code, response.body
            );
            if std::thread::panicking() {
                warn!("{message}");
            } else {
                panic!("{message}");
            }
        }
        Err(error) => {
            if std::thread::panicking() {
                warn!("deleting {what} {id} failed: {error}");
            } else {
                panic!("deleting {what} {id} failed: {error}");
            }
        }
    }
}
