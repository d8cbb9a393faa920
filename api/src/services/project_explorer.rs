use url::Url;

use crate::{
    error::Result,
    resources::{
        explorer::{MoveResource, ResourceId},
        folder::{Id as FolderId, NewFolder, UpdateFolder},
        namespace::{Id as NamespaceId, NewNamespace, UpdateNamespace},
        project::{Id as ProjectId, NewProject, UpdateProject},
        PageQuery, ScopedPageQuery,
    },
    ApiResponse, Client, Service,
};

impl Client {
    fn project_explorer(&self, segments: &[&str]) -> Result<Url> {
        self.endpoints.service(Service::ProjectExplorer, segments)
    }

    /// Create a namespace.
    pub fn create_namespace(&self, namespace: &NewNamespace) -> Result<ApiResponse> {
        self.post(self.project_explorer(&["Namespace"])?, None, namespace)
    }

    /// Get a namespace by id.
    pub fn get_namespace(&self, id: &NamespaceId) -> Result<ApiResponse> {
        self.get(
            self.project_explorer(&["Namespace", &id.0])?,
            None,
            None::<&()>,
        )
    }

    /// List namespaces, one page at a time.
    pub fn get_namespaces(&self, page: &PageQuery) -> Result<ApiResponse> {
        self.get(self.project_explorer(&["Namespace"])?, None, Some(page))
    }

    pub fn update_namespace(
        &self,
        id: &NamespaceId,
        namespace: &UpdateNamespace,
    ) -> Result<ApiResponse> {
        self.put(self.project_explorer(&["Namespace", &id.0])?, None, namespace)
    }

    pub fn delete_namespace(&self, id: &NamespaceId) -> Result<ApiResponse> {
        self.delete(self.project_explorer(&["Namespace", &id.0])?, None)
    }

    /// Create a project. The owning namespace travels in the body.
    pub fn create_project(&self, project: &NewProject) -> Result<ApiResponse> {
        self.post(self.project_explorer(&["Project"])?, None, project)
    }

    pub fn get_project(&self, id: &ProjectId) -> Result<ApiResponse> {
        self.get(
            self.project_explorer(&["Project", &id.0])?,
            None,
            None::<&()>,
        )
    }

    /// List projects, optionally only those in one namespace.
    pub fn get_projects(
        &self,
        namespace_id: Option<&NamespaceId>,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new(
            "NamespaceId",
            namespace_id.map(|id| id.0.as_str()),
            page,
        );
        self.get(self.project_explorer(&["Project"])?, None, Some(&query))
    }

    pub fn update_project(&self, id: &ProjectId, project: &UpdateProject) -> Result<ApiResponse> {
        self.put(self.project_explorer(&["Project", &id.0])?, None, project)
    }

    pub fn delete_project(&self, id: &ProjectId) -> Result<ApiResponse> {
        self.delete(self.project_explorer(&["Project", &id.0])?, None)
    }

    pub fn create_folder(&self, project_id: &ProjectId, folder: &NewFolder) -> Result<ApiResponse> {
        self.post(self.project_explorer(&["Folder"])?, Some(project_id), folder)
    }

    pub fn get_folder(&self, project_id: &ProjectId, id: &FolderId) -> Result<ApiResponse> {
        self.get(
            self.project_explorer(&["Folder", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    /// List folders directly under `parent_id`, or at the project root.
    pub fn get_folders(
        &self,
        project_id: &ProjectId,
        parent_id: Option<&FolderId>,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new("ParentId", parent_id.map(|id| id.0.as_str()), page);
        self.get(
            self.project_explorer(&["Folder"])?,
            Some(project_id),
            Some(&query),
        )
    }

    pub fn update_folder(
        &self,
        project_id: &ProjectId,
        id: &FolderId,
        folder: &UpdateFolder,
    ) -> Result<ApiResponse> {
        self.put(
            self.project_explorer(&["Folder", &id.0])?,
            Some(project_id),
            folder,
        )
    }

    pub fn delete_folder(&self, project_id: &ProjectId, id: &FolderId) -> Result<ApiResponse> {
        self.delete(self.project_explorer(&["Folder", &id.0])?, Some(project_id))
    }

    /// List the explorer tree one level at a time.
    pub fn get_explorer_items(
        &self,
        project_id: &ProjectId,
        folder_id: Option<&FolderId>,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new("FolderId", folder_id.map(|id| id.0.as_str()), page);
        self.get(
            self.project_explorer(&["ProjectExplorer"])?,
            Some(project_id),
            Some(&query),
        )
    }

    pub fn get_resource(&self, project_id: &ProjectId, id: &ResourceId) -> Result<ApiResponse> {
        self.get(
            self.project_explorer(&["Resource", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    /// Move any explorer item into another folder.
    pub fn move_resource(
        &self,
        project_id: &ProjectId,
        id: &ResourceId,
        target: &MoveResource,
    ) -> Result<ApiResponse> {
        self.put(
            self.project_explorer(&["Resource", &id.0, "move"])?,
            Some(project_id),
            target,
        )
    }
}
