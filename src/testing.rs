//! In-process test harness: exercises an [`Api`] through fabricated platform
//! events, no transport involved.

use serde_json::Value;

use crate::api::Api;
use crate::event::{FunctionEvent, FunctionResponse};

/// Drives an [`Api`] the way the platform would, from tests.
///
/// ```
/// use fnrouter::testing::ApiTestHarness;
/// use fnrouter::{handler, Api, Next, Request, Response, ResponseCtx};
/// use serde_json::json;
///
/// fn health(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
///     ctx.json(json!({ "status": "ok" }))
/// }
///
/// let mut api = Api::new();
/// api.get("/health", vec![handler(health)]);
///
/// let harness = ApiTestHarness::new(api);
/// assert_eq!(harness.get("/health").status_code, 200);
/// ```
pub struct ApiTestHarness {
    api: Api,
}

impl ApiTestHarness {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Send an arbitrary event. The building blocks for the verb helpers
    /// below; also useful when a test needs custom headers.
    #[must_use]
    pub fn request(&self, event: FunctionEvent) -> FunctionResponse {
        self.api.handle(event)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> FunctionResponse {
        self.request(FunctionEvent::new("GET", path))
    }

    #[must_use]
    pub fn post(&self, path: &str, body: Value) -> FunctionResponse {
        let mut event = FunctionEvent::new("POST", path);
        event.body = Some(body.to_string());
        self.request(event)
    }

    #[must_use]
    pub fn put(&self, path: &str, body: Value) -> FunctionResponse {
        let mut event = FunctionEvent::new("PUT", path);
        event.body = Some(body.to_string());
        self.request(event)
    }

    #[must_use]
    pub fn patch(&self, path: &str, body: Value) -> FunctionResponse {
        let mut event = FunctionEvent::new("PATCH", path);
        event.body = Some(body.to_string());
        self.request(event)
    }

    #[must_use]
    pub fn delete(&self, path: &str) -> FunctionResponse {
        self.request(FunctionEvent::new("DELETE", path))
    }
}
