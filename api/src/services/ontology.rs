use url::Url;

use crate::{
    error::Result,
    resources::{
        data_set::Id as DataSetId,
        discovery::{DiscoveryQuery, DiscoveryQueryParams},
        object_type::{Id as ObjectTypeId, NewObjectType, PatchOperation, UpdateObjectType},
        object_type_group::{Id as GroupId, NewObjectTypeGroup, UpdateObjectTypeGroup},
        project::Id as ProjectId,
        PageQuery,
    },
    ApiResponse, Client, Service,
};

impl Client {
    fn ontology(&self, segments: &[&str]) -> Result<Url> {
        self.endpoints.service(Service::Ontology, segments)
    }

    pub fn get_data_sets(&self, project_id: &ProjectId, page: &PageQuery) -> Result<ApiResponse> {
        self.get(self.ontology(&["DataSet"])?, Some(project_id), Some(page))
    }

    pub fn get_data_set(&self, project_id: &ProjectId, id: &DataSetId) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["DataSet", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn create_object_type(
        &self,
        project_id: &ProjectId,
        object_type: &NewObjectType,
    ) -> Result<ApiResponse> {
        self.post(self.ontology(&["ObjectType"])?, Some(project_id), object_type)
    }

    pub fn get_object_type(&self, project_id: &ProjectId, id: &ObjectTypeId) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["ObjectType", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_object_types(&self, project_id: &ProjectId, page: &PageQuery) -> Result<ApiResponse> {
        self.get(self.ontology(&["ObjectType"])?, Some(project_id), Some(page))
    }

    /// Replace an object type wholesale.
    pub fn update_object_type(
        &self,
        project_id: &ProjectId,
        id: &ObjectTypeId,
        object_type: &UpdateObjectType,
    ) -> Result<ApiResponse> {
        self.put(
            self.ontology(&["ObjectType", &id.0])?,
            Some(project_id),
            object_type,
        )
    }

    /// Apply a JSON Patch document to an object type.
    pub fn patch_object_type(
        &self,
        project_id: &ProjectId,
        id: &ObjectTypeId,
        operations: &[PatchOperation],
    ) -> Result<ApiResponse> {
        self.patch(
            self.ontology(&["ObjectType", &id.0])?,
            Some(project_id),
            &operations,
        )
    }

    pub fn delete_object_type(
        &self,
        project_id: &ProjectId,
        id: &ObjectTypeId,
    ) -> Result<ApiResponse> {
        self.delete(self.ontology(&["ObjectType", &id.0])?, Some(project_id))
    }

    pub fn create_object_type_group(
        &self,
        project_id: &ProjectId,
        group: &NewObjectTypeGroup,
    ) -> Result<ApiResponse> {
        self.post(self.ontology(&["ObjectTypeGroup"])?, Some(project_id), group)
    }

    pub fn get_object_type_group(&self, project_id: &ProjectId, id: &GroupId) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["ObjectTypeGroup", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_object_type_groups(
        &self,
        project_id: &ProjectId,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["ObjectTypeGroup"])?,
            Some(project_id),
            Some(page),
        )
    }

    pub fn update_object_type_group(
        &self,
        project_id: &ProjectId,
        id: &GroupId,
        group: &UpdateObjectTypeGroup,
    ) -> Result<ApiResponse> {
        self.put(
            self.ontology(&["ObjectTypeGroup", &id.0])?,
            Some(project_id),
            group,
        )
    }

    pub fn delete_object_type_group(
        &self,
        project_id: &ProjectId,
        id: &GroupId,
    ) -> Result<ApiResponse> {
        self.delete(self.ontology(&["ObjectTypeGroup", &id.0])?, Some(project_id))
    }

    /// Search the project's ontology for anything matching the query.
    pub fn discover(&self, project_id: &ProjectId, query: &DiscoveryQuery) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["Discovery"])?,
            Some(project_id),
            Some(&DiscoveryQueryParams::from(query)),
        )
    }

    /// Column layout of the table backing a data set.
    pub fn get_schema(&self, project_id: &ProjectId, data_set_id: &DataSetId) -> Result<ApiResponse> {
        self.get(
            self.ontology(&["Schema", &data_set_id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }
}
