use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::Response;

/// Inbound platform event, in the shape serverless function runtimes deliver
/// it (camelCase on the wire).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: HashMap<String, String>,
    /// Raw request body; parsed as JSON by the adapter, falling back to the
    /// raw string for non-JSON payloads.
    #[serde(default)]
    pub body: Option<String>,
}

impl FunctionEvent {
    /// Minimal event for a given method and path; useful in tests and
    /// harnesses.
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            http_method: method.to_string(),
            path: path.to_string(),
            headers: HashMap::new(),
            query_string_parameters: HashMap::new(),
            body: None,
        }
    }
}

/// Outbound response in the platform's expected shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl FunctionResponse {
    pub(crate) fn not_found() -> Self {
        Self {
            status_code: 404,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Serialize a chain response onto the wire: JSON bodies through
    /// serde_json, plain-text string bodies raw.
    pub(crate) fn from_response(res: Response) -> Self {
        let is_json = res
            .headers
            .get("content-type")
            .map(|ct| ct.contains("json"))
            .unwrap_or(true);
        let body = match res.body {
            Value::Null => None,
            Value::String(s) if !is_json => Some(s),
            other => serde_json::to_string(&other).ok(),
        };
        Self {
            status_code: res.status,
            headers: res.headers,
            body,
        }
    }

    /// Parse the body back as JSON. Convenience for tests and harnesses.
    #[must_use]
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Split a query string off a path and decode it, merging nothing: callers
/// decide precedence against the event's own query map.
pub(crate) fn split_query(path: &str) -> (&str, HashMap<String, String>) {
    match path.split_once('?') {
        Some((path, query)) => {
            let params = url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (path, params)
        }
        None => (path, HashMap::new()),
    }
}
