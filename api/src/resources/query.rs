use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::{object_type::Id as ObjectTypeId, semantic_model::Id as SemanticModelId};

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_model_id: Option<SemanticModelId>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub object_type_ids: Vec<ObjectTypeId>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}
