use serde::{Deserialize, Serialize};

use crate::resources::{explorer::ResourceKind, PageQuery};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub kind: Option<ResourceKind>,
    pub page: PageQuery,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DiscoveryQueryParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,

    #[serde(flatten)]
    pub page: &'a PageQuery,
}

impl<'a> From<&'a DiscoveryQuery> for DiscoveryQueryParams<'a> {
    fn from(query: &'a DiscoveryQuery) -> Self {
        Self {
            kind: query.kind,
            page: &query.page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredItem {
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub description: Option<String>,
}
