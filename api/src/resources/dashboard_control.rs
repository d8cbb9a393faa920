use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::dashboard_tab::Id as DashboardTabId;

resource_id!(Id);

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    Table,
    BarChart,
    LineChart,
    PieChart,
    Kpi,
    Filter,
    Text,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardControl {
    pub id: Id,
    pub dashboard_tab_id: DashboardTabId,
    pub kind: ControlKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub query: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewDashboardControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_tab_id: Option<DashboardTabId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ControlKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDashboardControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ControlKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}
