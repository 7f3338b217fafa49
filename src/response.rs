use std::collections::HashMap;
use std::mem;

use serde_json::Value;

/// Final response produced by a handler chain.
///
/// The body is a JSON value; how it is serialized onto the wire (raw text for
/// `text/plain`, serialized JSON otherwise) is the platform adapter's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

/// Mutable response builder handed to every handler in a chain.
///
/// Handlers accumulate status and headers with the `with_*` methods and finish
/// with one of the terminal constructors (`json`, `text`, `redirect`), which
/// drain the accumulated state into an owned [`Response`]:
///
/// ```
/// use fnrouter::ResponseCtx;
/// use serde_json::json;
///
/// let mut ctx = ResponseCtx::new();
/// let res = ctx.with_status(201).json(json!({ "id": 42 }));
/// assert_eq!(res.status, 201);
/// ```
#[derive(Debug, Default)]
pub struct ResponseCtx {
    status: Option<u16>,
    headers: HashMap<String, String>,
}

impl ResponseCtx {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(&mut self, status: u16) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_headers<I>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.headers.extend(headers);
        self
    }

    /// Finish with a JSON body. Defaults to status 200 and sets
    /// `content-type: application/json` unless a content type was set already.
    pub fn json(&mut self, body: Value) -> Response {
        self.finish("application/json", body)
    }

    /// Finish with a plain-text body.
    pub fn text(&mut self, body: &str) -> Response {
        self.finish("text/plain", Value::String(body.to_string()))
    }

    /// Finish with a redirect to `location`. Status defaults to 302 unless one
    /// was set explicitly.
    pub fn redirect(&mut self, location: &str) -> Response {
        let status = self.status.unwrap_or(302);
        self.with_header("location", location);
        Response {
            status,
            headers: mem::take(&mut self.headers),
            body: Value::Null,
        }
    }

    fn finish(&mut self, content_type: &str, body: Value) -> Response {
        let mut headers = mem::take(&mut self.headers);
        headers
            .entry("content-type".to_string())
            .or_insert_with(|| content_type.to_string());
        Response {
            status: self.status.unwrap_or(200),
            headers,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_defaults() {
        let mut ctx = ResponseCtx::new();
        let res = ctx.json(json!({ "ok": true }));
        assert_eq!(res.status, 200);
        assert_eq!(
            res.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_status_and_header_chain() {
        let mut ctx = ResponseCtx::new();
        let res = ctx
            .with_status(418)
            .with_header("x-kettle", "on")
            .text("short and stout");
        assert_eq!(res.status, 418);
        assert_eq!(res.headers.get("x-kettle").map(String::as_str), Some("on"));
        assert_eq!(
            res.headers.get("content-type").map(String::as_str),
            Some("text/plain")
        );
        assert_eq!(res.body, Value::String("short and stout".to_string()));
    }

    #[test]
    fn test_redirect() {
        let mut ctx = ResponseCtx::new();
        let res = ctx.redirect("/login");
        assert_eq!(res.status, 302);
        assert_eq!(res.headers.get("location").map(String::as_str), Some("/login"));
    }

    #[test]
    fn test_explicit_content_type_is_kept() {
        let mut ctx = ResponseCtx::new();
        let res = ctx
            .with_header("content-type", "application/problem+json")
            .json(json!({ "title": "nope" }));
        assert_eq!(
            res.headers.get("content-type").map(String::as_str),
            Some("application/problem+json")
        );
    }
}
