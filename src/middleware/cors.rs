use std::collections::HashMap;

use http::Method;
use serde_json::Value;

use crate::handler::{Handler, Next};
use crate::request::Request;
use crate::response::{Response, ResponseCtx};

/// CORS middleware.
///
/// Answers OPTIONS preflight requests directly with 204 and otherwise runs the
/// rest of the chain, appending the allow-origin and allow-credentials headers
/// to whatever response comes back.
pub struct CorsMiddleware {
    origin: String,
}

impl CorsMiddleware {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    fn apply(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "access-control-allow-origin".to_string(),
            self.origin.clone(),
        );
        headers.insert(
            "access-control-allow-credentials".to_string(),
            "true".to_string(),
        );
    }
}

impl Handler for CorsMiddleware {
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response {
        if req.method == Method::OPTIONS {
            let mut headers = HashMap::new();
            self.apply(&mut headers);
            headers.insert(
                "access-control-allow-methods".to_string(),
                "GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS".to_string(),
            );
            headers.insert(
                "access-control-allow-headers".to_string(),
                "content-type, authorization".to_string(),
            );
            return Response {
                status: 204,
                headers,
                body: Value::Null,
            };
        }

        let mut res = next.run(req, ctx);
        self.apply(&mut res.headers);
        res
    }
}
