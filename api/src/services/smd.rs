use url::Url;

use crate::{
    error::Result,
    resources::{
        project::Id as ProjectId,
        semantic_model::{Id as SemanticModelId, NewSemanticModel, UpdateSemanticModel},
        PageQuery, ScopedPageQuery,
    },
    ApiResponse, Client, Service,
};

impl Client {
    fn smd(&self, segments: &[&str]) -> Result<Url> {
        self.endpoints
            .service(Service::SemanticModelDesigner, segments)
    }

    pub fn create_semantic_model(
        &self,
        project_id: &ProjectId,
        model: &NewSemanticModel,
    ) -> Result<ApiResponse> {
        self.post(self.smd(&["SemanticModel"])?, Some(project_id), model)
    }

    pub fn get_semantic_model(
        &self,
        project_id: &ProjectId,
        id: &SemanticModelId,
    ) -> Result<ApiResponse> {
        self.get(
            self.smd(&["SemanticModel", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_semantic_models(
        &self,
        project_id: &ProjectId,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        self.get(self.smd(&["SemanticModel"])?, Some(project_id), Some(page))
    }

    pub fn update_semantic_model(
        &self,
        project_id: &ProjectId,
        id: &SemanticModelId,
        model: &UpdateSemanticModel,
    ) -> Result<ApiResponse> {
        self.put(
            self.smd(&["SemanticModel", &id.0])?,
            Some(project_id),
            model,
        )
    }

    pub fn delete_semantic_model(
        &self,
        project_id: &ProjectId,
        id: &SemanticModelId,
    ) -> Result<ApiResponse> {
        self.delete(self.smd(&["SemanticModel", &id.0])?, Some(project_id))
    }

    /// Object types as the designer sees them inside one model.
    pub fn get_model_object_types(
        &self,
        project_id: &ProjectId,
        model_id: &SemanticModelId,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new("SemanticModelId", Some(model_id.0.as_str()), page);
        self.get(self.smd(&["ObjectType"])?, Some(project_id), Some(&query))
    }

    pub fn get_model_object_type_groups(
        &self,
        project_id: &ProjectId,
        model_id: &SemanticModelId,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new("SemanticModelId", Some(model_id.0.as_str()), page);
        self.get(
            self.smd(&["ObjectTypeGroup"])?,
            Some(project_id),
            Some(&query),
        )
    }
}
