use url::Url;

use crate::{
    error::Result,
    resources::{
        analysis::{Id as AnalysisId, NewAnalysis, UpdateAnalysis},
        dashboard::{Id as DashboardId, NewDashboard, UpdateDashboard},
        dashboard_control::{Id as ControlId, NewDashboardControl, UpdateDashboardControl},
        dashboard_tab::{Id as TabId, NewDashboardTab, UpdateDashboardTab},
        project::Id as ProjectId,
        query::QueryRequest,
        PageQuery, ScopedPageQuery,
    },
    ApiResponse, Client, Service,
};

impl Client {
    fn bi(&self, segments: &[&str]) -> Result<Url> {
        self.endpoints.service(Service::Bi, segments)
    }

    pub fn create_analysis(
        &self,
        project_id: &ProjectId,
        analysis: &NewAnalysis,
    ) -> Result<ApiResponse> {
        self.post(self.bi(&["Analysis"])?, Some(project_id), analysis)
    }

    pub fn get_analysis(&self, project_id: &ProjectId, id: &AnalysisId) -> Result<ApiResponse> {
        self.get(
            self.bi(&["Analysis", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_analyses(&self, project_id: &ProjectId, page: &PageQuery) -> Result<ApiResponse> {
        self.get(self.bi(&["Analysis"])?, Some(project_id), Some(page))
    }

    pub fn update_analysis(
        &self,
        project_id: &ProjectId,
        id: &AnalysisId,
        analysis: &UpdateAnalysis,
    ) -> Result<ApiResponse> {
        self.put(self.bi(&["Analysis", &id.0])?, Some(project_id), analysis)
    }

    pub fn delete_analysis(&self, project_id: &ProjectId, id: &AnalysisId) -> Result<ApiResponse> {
        self.delete(self.bi(&["Analysis", &id.0])?, Some(project_id))
    }

    pub fn create_dashboard(
        &self,
        project_id: &ProjectId,
        dashboard: &NewDashboard,
    ) -> Result<ApiResponse> {
        self.post(self.bi(&["Dashboard"])?, Some(project_id), dashboard)
    }

    pub fn get_dashboard(&self, project_id: &ProjectId, id: &DashboardId) -> Result<ApiResponse> {
        self.get(
            self.bi(&["Dashboard", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    /// List dashboards, optionally only those built on one analysis.
    pub fn get_dashboards(
        &self,
        project_id: &ProjectId,
        analysis_id: Option<&AnalysisId>,
        page: &PageQuery,
    ) -> Result<ApiResponse> {
        let query = ScopedPageQuery::new("AnalysisId", analysis_id.map(|id| id.0.as_str()), page);
        self.get(self.bi(&["Dashboard"])?, Some(project_id), Some(&query))
    }

    pub fn update_dashboard(
        &self,
        project_id: &ProjectId,
        id: &DashboardId,
        dashboard: &UpdateDashboard,
    ) -> Result<ApiResponse> {
        self.put(self.bi(&["Dashboard", &id.0])?, Some(project_id), dashboard)
    }

    pub fn delete_dashboard(&self, project_id: &ProjectId, id: &DashboardId) -> Result<ApiResponse> {
        self.delete(self.bi(&["Dashboard", &id.0])?, Some(project_id))
    }

    pub fn create_dashboard_tab(
        &self,
        project_id: &ProjectId,
        tab: &NewDashboardTab,
    ) -> Result<ApiResponse> {
        self.post(self.bi(&["DashboardTab"])?, Some(project_id), tab)
    }

    pub fn get_dashboard_tab(&self, project_id: &ProjectId, id: &TabId) -> Result<ApiResponse> {
        self.get(
            self.bi(&["DashboardTab", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_dashboard_tabs(
        &self,
        project_id: &ProjectId,
        dashboard_id: &DashboardId,
    ) -> Result<ApiResponse> {
        self.get(
            self.bi(&["DashboardTab"])?,
            Some(project_id),
            Some(&[("DashboardId", dashboard_id.0.as_str())]),
        )
    }

    pub fn update_dashboard_tab(
        &self,
        project_id: &ProjectId,
        id: &TabId,
        tab: &UpdateDashboardTab,
    ) -> Result<ApiResponse> {
        self.put(self.bi(&["DashboardTab", &id.0])?, Some(project_id), tab)
    }

    pub fn delete_dashboard_tab(&self, project_id: &ProjectId, id: &TabId) -> Result<ApiResponse> {
        self.delete(self.bi(&["DashboardTab", &id.0])?, Some(project_id))
    }

    pub fn create_dashboard_control(
        &self,
        project_id: &ProjectId,
        control: &NewDashboardControl,
    ) -> Result<ApiResponse> {
        self.post(self.bi(&["DashboardControl"])?, Some(project_id), control)
    }

    pub fn get_dashboard_control(
        &self,
        project_id: &ProjectId,
        id: &ControlId,
    ) -> Result<ApiResponse> {
        self.get(
            self.bi(&["DashboardControl", &id.0])?,
            Some(project_id),
            None::<&()>,
        )
    }

    pub fn get_dashboard_controls(
        &self,
        project_id: &ProjectId,
        tab_id: &TabId,
    ) -> Result<ApiResponse> {
        self.get(
            self.bi(&["DashboardControl"])?,
            Some(project_id),
            Some(&[("DashboardTabId", tab_id.0.as_str())]),
        )
    }

    pub fn update_dashboard_control(
        &self,
        project_id: &ProjectId,
        id: &ControlId,
        control: &UpdateDashboardControl,
    ) -> Result<ApiResponse> {
        self.put(
            self.bi(&["DashboardControl", &id.0])?,
            Some(project_id),
            control,
        )
    }

    pub fn delete_dashboard_control(
        &self,
        project_id: &ProjectId,
        id: &ControlId,
    ) -> Result<ApiResponse> {
        self.delete(self.bi(&["DashboardControl", &id.0])?, Some(project_id))
    }

    /// Run an ad-hoc query against a semantic model.
    pub fn run_query(&self, project_id: &ProjectId, query: &QueryRequest) -> Result<ApiResponse> {
        self.post(self.bi(&["Query"])?, Some(project_id), query)
    }
}
