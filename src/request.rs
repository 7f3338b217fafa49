use std::collections::HashMap;

use http::Method;
use serde_json::Value;

use crate::router::ParamVec;

/// Claims attached to a request by [`AuthMiddleware`](crate::middleware::AuthMiddleware)
/// after a bearer token was verified.
pub type AuthClaims = HashMap<String, String>;

/// A decoded request handed to every handler in a matched chain.
///
/// Built by the platform adapter from a [`FunctionEvent`](crate::FunctionEvent):
/// header keys are lowercased, the query string is already parsed, the body is
/// parsed JSON (falling back to a raw string value for non-JSON payloads), and
/// `params` carries the path parameters extracted by the router.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// Headers with lowercase keys.
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    /// Path parameters extracted from the matched route template.
    pub params: ParamVec,
    pub body: Option<Value>,
    /// Set by auth middleware; `None` until a token has been verified.
    pub claims: Option<AuthClaims>,
}

impl Request {
    /// Look up a path parameter by name.
    ///
    /// Last write wins: with duplicate parameter names at different depths
    /// (e.g. `/org/:id/user/:id`) the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Look up a header by its lowercase name.
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
