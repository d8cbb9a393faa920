use serde::{Deserialize, Serialize};

use crate::resources::folder::Id as FolderId;

resource_id!(
    /// Any item shown in the project explorer tree, regardless of kind.
    ResourceId
);

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Folder,
    ObjectType,
    SemanticModel,
    Analysis,
    Dashboard,
    DataSet,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerItem {
    pub id: ResourceId,
    pub name: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoveResource {
    /// Moves to the project root when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_folder_id: Option<FolderId>,
}
