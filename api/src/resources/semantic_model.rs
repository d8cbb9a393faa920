use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::object_type::Id as ObjectTypeId;

resource_id!(Id);

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SemanticModel {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub object_type_ids: Vec<ObjectTypeId>,
    /// Designer canvas state; opaque to everything but the designer.
    #[serde(default)]
    pub layout: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSemanticModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub object_type_ids: Vec<ObjectTypeId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSemanticModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type_ids: Option<Vec<ObjectTypeId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}
