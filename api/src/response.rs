use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

const PROBLEM_KEYS: &[&str] = &["title", "status", "errors"];

/// Status and decoded body of any response the API sent back, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(with = "status_code_serde")]
    pub status_code: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub(crate) fn from_parts(status_code: StatusCode, raw: &str) -> Self {
        let body = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
        };
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(|source| Error::BadJsonResponse {
            message: format!("body does not match the expected shape: {}", self.body),
            source,
        })
    }

    pub fn page<T: DeserializeOwned>(&self) -> Result<Page<T>> {
        self.json()
    }

    /// Decode the body into `T`, or fail if the status was not a 2xx.
    pub fn into_success<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(Error::UnexpectedStatus {
                status_code: self.status_code,
                body: self.body,
            });
        }
        self.json()
    }

    /// Problem details, if the body is one. Any JSON object would decode, so
    /// at least one of `title`, `status` or `errors` must be present.
    pub fn problem(&self) -> Option<ProblemDetails> {
        let object = self.body.as_object()?;
        if !PROBLEM_KEYS.iter().any(|key| object.contains_key(*key)) {
            return None;
        }
        serde_json::from_value(self.body.clone()).ok()
    }

    /// Validation messages reported against `field`, matched case-insensitively.
    pub fn error_messages(&self, field: &str) -> Vec<String> {
        self.problem()
            .map(|problem| problem.field_messages(field).to_vec())
            .unwrap_or_default()
    }

    /// Whether `fragment` occurs anywhere in the body, ignoring case.
    pub fn body_mentions(&self, fragment: &str) -> bool {
        let haystack = match &self.body {
            Value::String(text) => text.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        haystack.contains(&fragment.to_lowercase())
    }
}

/// ASP.NET style problem details returned on validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ProblemDetails {
    pub fn field_messages(&self, field: &str) -> &[String] {
        let wanted = normalize_field(field);
        self.errors
            .iter()
            .find(|(key, _)| normalize_field(key) == wanted)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.title
            .iter()
            .chain(self.detail.iter())
            .chain(self.errors.values().flatten())
            .map(String::as_str)
    }

    pub fn mentions(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.messages()
            .any(|message| message.to_lowercase().contains(&fragment))
    }
}

fn normalize_field(field: &str) -> String {
    field.trim_start_matches("$.").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

mod status_code_serde {
    use reqwest::StatusCode;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }
}
