#![deny(clippy::all)]
mod error;
pub mod resources;
mod response;
mod services;

use log::debug;
use once_cell::sync::Lazy;
use reqwest::{
    blocking::{Client as HttpClient, RequestBuilder},
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Method, Proxy,
};
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub use crate::{
    error::{normalize, Error, ErrorReport, Outcome, Result},
    resources::{
        analysis::{Analysis, Id as AnalysisId, NewAnalysis, UpdateAnalysis},
        dashboard::{Dashboard, Id as DashboardId, NewDashboard, UpdateDashboard},
        dashboard_control::{
            ControlKind, DashboardControl, Id as DashboardControlId, Layout as ControlLayout,
            NewDashboardControl, UpdateDashboardControl,
        },
        dashboard_tab::{DashboardTab, Id as DashboardTabId, NewDashboardTab, UpdateDashboardTab},
        data_set::{Column, DataSet, Id as DataSetId, Schema},
        discovery::{DiscoveredItem, DiscoveryQuery},
        explorer::{ExplorerItem, MoveResource, ResourceId, ResourceKind},
        folder::{Folder, Id as FolderId, NewFolder, UpdateFolder},
        namespace::{Id as NamespaceId, Namespace, NewNamespace, UpdateNamespace},
        object_type::{
            Id as ObjectTypeId, NewObjectType, ObjectType, PatchOp, PatchOperation, Property,
            UpdateObjectType,
        },
        object_type_group::{
            Id as ObjectTypeGroupId, NewObjectTypeGroup, ObjectTypeGroup, UpdateObjectTypeGroup,
        },
        project::{Id as ProjectId, NewProject, Project, UpdateProject},
        query::{QueryRequest, QueryResult},
        semantic_model::{
            Id as SemanticModelId, NewSemanticModel, SemanticModel, UpdateSemanticModel,
        },
        Created, PageQuery,
    },
    response::{ApiResponse, Page, ProblemDetails},
};

/// Header carrying the tenant project every scoped call runs against.
pub const PROJECT_ID_HEADER: &str = "ProjectId";

pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

pub static DEFAULT_ENDPOINT: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost:8080").expect("Default URL is well-formed"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token(pub String);

#[derive(Clone, Debug)]
pub struct Config {
    pub endpoint: Url,
    pub token: Option<Token>,
    pub timeout: Duration,
    pub accept_invalid_certificates: bool,
    pub proxy: Option<Url>,
    /// Extra headers sent with every request.
    pub default_headers: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.clone(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
            accept_invalid_certificates: false,
            proxy: None,
            default_headers: Vec::new(),
        }
    }
}

/// The backend services, each mounted under its own path prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Service {
    ProjectExplorer,
    Ontology,
    SemanticModelDesigner,
    Bi,
}

impl Service {
    fn prefix(self) -> &'static str {
        match self {
            Service::ProjectExplorer => "project-explorer",
            Service::Ontology => "ontology",
            Service::SemanticModelDesigner => "smd",
            Service::Bi => "bi",
        }
    }
}

#[derive(Debug)]
pub struct Client {
    endpoints: Endpoints,
    http_client: HttpClient,
    headers: HeaderMap,
}

/// Request body, tagged with the content type it goes out as.
pub(crate) enum Payload<'a, T> {
    Json(&'a T),
    JsonPatch(&'a T),
}

impl Client {
    /// Create a new API client.
    pub fn new(config: Config) -> Result<Client> {
        let http_client = build_http_client(&config)?;
        let headers = build_headers(&config)?;
        let endpoints = Endpoints::new(config.endpoint)?;
        Ok(Client {
            endpoints,
            http_client,
            headers,
        })
    }

    /// Get the base url for the client
    pub fn base_url(&self) -> &Url {
        &self.endpoints.base
    }

    /// Send an arbitrary JSON value to a service path. Lets tests submit
    /// payloads the typed request structs cannot express.
    pub fn raw(
        &self,
        method: Method,
        service: Service,
        segments: &[&str],
        project_id: Option<&ProjectId>,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.endpoints.service(service, segments)?;
        self.send(
            method,
            url,
            project_id,
            None::<&()>,
            body.map(Payload::Json),
        )
    }

    pub(crate) fn get<QueryT>(
        &self,
        url: Url,
        project_id: Option<&ProjectId>,
        query: Option<&QueryT>,
    ) -> Result<ApiResponse>
    where
        QueryT: Serialize + ?Sized,
    {
        self.send(Method::GET, url, project_id, query, None::<Payload<'_, ()>>)
    }

    pub(crate) fn post<RequestT: Serialize>(
        &self,
        url: Url,
        project_id: Option<&ProjectId>,
        request: &RequestT,
    ) -> Result<ApiResponse> {
        self.send(
            Method::POST,
            url,
            project_id,
            None::<&()>,
            Some(Payload::Json(request)),
        )
    }

    pub(crate) fn put<RequestT: Serialize>(
        &self,
        url: Url,
        project_id: Option<&ProjectId>,
        request: &RequestT,
    ) -> Result<ApiResponse> {
        self.send(
            Method::PUT,
            url,
            project_id,
            None::<&()>,
            Some(Payload::Json(request)),
        )
    }

    pub(crate) fn patch<RequestT: Serialize>(
        &self,
        url: Url,
        project_id: Option<&ProjectId>,
        request: &RequestT,
    ) -> Result<ApiResponse> {
        self.send(
            Method::PATCH,
            url,
            project_id,
            None::<&()>,
            Some(Payload::JsonPatch(request)),
        )
    }

    pub(crate) fn delete(&self, url: Url, project_id: Option<&ProjectId>) -> Result<ApiResponse> {
        self.send(
            Method::DELETE,
            url,
            project_id,
            None::<&()>,
            None::<Payload<'_, ()>>,
        )
    }

    fn send<QueryT, RequestT>(
        &self,
        method: Method,
        url: Url,
        project_id: Option<&ProjectId>,
        query: Option<&QueryT>,
        payload: Option<Payload<'_, RequestT>>,
    ) -> Result<ApiResponse>
    where
        QueryT: Serialize + ?Sized,
        RequestT: Serialize,
    {
        debug!("Attempting {} `{}`", method, url);

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(self.headers.clone());
        if let Some(project_id) = project_id {
            request = request.header(PROJECT_ID_HEADER, project_header_value(project_id)?);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = attach_payload(request, payload)?;
        }

        let http_response = request.send().map_err(|source| Error::Http {
            source,
            message: format!("{method} operation failed."),
        })?;

        let status_code = http_response.status();
        let raw = http_response.text().map_err(|source| Error::Http {
            source,
            message: format!("Could not read {method} response body."),
        })?;
        debug!("{} `{}` returned {}", method, url, status_code);

        Ok(ApiResponse::from_parts(status_code, &raw))
    }
}

fn attach_payload<RequestT: Serialize>(
    request: RequestBuilder,
    payload: Payload<'_, RequestT>,
) -> Result<RequestBuilder> {
    Ok(match payload {
        Payload::Json(body) => request.json(body),
        Payload::JsonPatch(body) => {
            let bytes = serde_json::to_vec(body).map_err(|source| Error::BadJsonRequest {
                message: "JSON patch document".to_owned(),
                source,
            })?;
            request
                .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
                .body(bytes)
        }
    })
}

fn project_header_value(project_id: &ProjectId) -> Result<HeaderValue> {
    HeaderValue::from_str(&project_id.0).map_err(|_| Error::BadHeader {
        name: PROJECT_ID_HEADER.to_owned(),
        value: project_id.0.clone(),
    })
}

#[derive(Debug)]
pub(crate) struct Endpoints {
    base: Url,
}

pub(crate) fn construct_endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut endpoint = base.clone();

    let mut endpoint_segments = endpoint
        .path_segments_mut()
        .map_err(|_| Error::BadEndpoint {
            endpoint: base.to_string(),
        })?;

    endpoint_segments.pop_if_empty();
    for segment in segments {
        endpoint_segments.push(segment);
    }

    drop(endpoint_segments);

    Ok(endpoint)
}

impl Endpoints {
    pub fn new(base: Url) -> Result<Self> {
        // Fail at construction rather than on the first request.
        construct_endpoint(&base, &[])?;
        Ok(Endpoints { base })
    }

    pub fn service(&self, service: Service, segments: &[&str]) -> Result<Url> {
        let mut full = Vec::with_capacity(segments.len() + 2);
        full.push(service.prefix());
        full.push("api");
        full.extend_from_slice(segments);
        construct_endpoint(&self.base, &full)
    }
}

fn build_http_client(config: &Config) -> Result<HttpClient> {
    let mut builder = HttpClient::builder()
        .gzip(true)
        .danger_accept_invalid_certs(config.accept_invalid_certificates)
        .timeout(Some(config.timeout));

    if let Some(proxy) = config.proxy.clone() {
        builder = builder.proxy(Proxy::all(proxy).map_err(Error::BuildHttpClient)?);
    }
    builder.build().map_err(Error::BuildHttpClient)
}

fn build_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    if let Some(token) = &config.token {
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", &token.0)).map_err(|_| {
                Error::BadToken {
                    token: token.0.clone(),
                }
            })?,
        );
    }
    for (name, value) in &config.default_headers {
        let bad_header = || Error::BadHeader {
            name: name.clone(),
            value: value.clone(),
        };
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| bad_header())?,
            HeaderValue::from_str(value).map_err(|_| bad_header())?,
        );
    }
    Ok(headers)
}
