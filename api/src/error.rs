use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

use crate::ApiResponse;

pub type Result<T> = std::result::Result<T, Error>;

/// What a caller sees instead of a response when a request never produced one.
pub type Outcome = std::result::Result<ApiResponse, ErrorReport>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid endpoint `{}`", endpoint)]
    BadEndpoint { endpoint: String },

    #[error("Bad token: {}", token)]
    BadToken { token: String },

    #[error("Invalid value for header `{}`: {}", name, value)]
    BadHeader { name: String, value: String },

    #[error("Could not serialise JSON request: {}", message)]
    BadJsonRequest {
        message: String,
        source: serde_json::Error,
    },

    #[error("Could not parse JSON response: {}", message)]
    BadJsonResponse {
        message: String,
        source: serde_json::Error,
    },

    #[error("Unexpected status {} from the API", status_code)]
    UnexpectedStatus {
        status_code: StatusCode,
        body: serde_json::Value,
    },

    #[error("Failed to initialise the HTTP client")]
    BuildHttpClient(#[source] reqwest::Error),

    #[error("HTTP request error: {}", message)]
    Http {
        message: String,
        source: reqwest::Error,
    },
}

impl Error {
    /// Flatten the error into the same plain shape tests inspect for server
    /// side failures.
    pub fn report(&self) -> ErrorReport {
        let details = match self {
            Error::UnexpectedStatus { body, .. } => Some(body.to_string()),
            _ => {
                let mut chain = Vec::new();
                let mut source = self.source();
                while let Some(cause) = source {
                    chain.push(cause.to_string());
                    source = cause.source();
                }
                if chain.is_empty() {
                    None
                } else {
                    Some(chain.join(": "))
                }
            }
        };

        ErrorReport {
            error: true,
            message: self.to_string(),
            details,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http { source, .. } if source.is_timeout())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: bool,
    pub message: String,
    pub details: Option<String>,
}

/// Collapse a request result into one response contract.
pub fn normalize(result: Result<ApiResponse>) -> Outcome {
    result.map_err(|error| error.report())
}
