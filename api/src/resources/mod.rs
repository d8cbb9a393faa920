/// Declare a server-assigned GUID newtype for one resource.
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Deserialize, serde::Serialize, PartialEq, Eq, Hash)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

pub mod analysis;
pub mod dashboard;
pub mod dashboard_control;
pub mod dashboard_tab;
pub mod data_set;
pub mod discovery;
pub mod explorer;
pub mod folder;
pub mod namespace;
pub mod object_type;
pub mod object_type_group;
pub mod project;
pub mod query;
pub mod semantic_model;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// Paging parameters passed straight through to list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

impl PageQuery {
    pub fn page(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
            search_term: None,
        }
    }

    pub fn search(search_term: impl Into<String>) -> Self {
        Self {
            search_term: Some(search_term.into()),
            ..Default::default()
        }
    }
}

/// Body returned by create endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Created<IdT> {
    pub id: IdT,
}

/// A list query that narrows a page to the children of some parent.
#[derive(Debug, Clone)]
pub(crate) struct ScopedPageQuery<'a> {
    pub scope: Option<(&'static str, &'a str)>,
    pub page: &'a PageQuery,
}

impl<'a> ScopedPageQuery<'a> {
    pub fn new(key: &'static str, value: Option<&'a str>, page: &'a PageQuery) -> Self {
        Self {
            scope: value.map(|value| (key, value)),
            page,
        }
    }
}

impl Serialize for ScopedPageQuery<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some((key, value)) = self.scope {
            map.serialize_entry(key, value)?;
        }
        if let Some(page_number) = self.page.page_number {
            map.serialize_entry("PageNumber", &page_number)?;
        }
        if let Some(page_size) = self.page.page_size {
            map.serialize_entry("PageSize", &page_size)?;
        }
        if let Some(search_term) = &self.page.search_term {
            map.serialize_entry("SearchTerm", search_term)?;
        }
        map.end()
    }
}
