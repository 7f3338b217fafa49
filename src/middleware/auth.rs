use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::handler::{Handler, Next};
use crate::request::{AuthClaims, Request};
use crate::response::{Response, ResponseCtx};

/// External authority that verifies bearer tokens.
///
/// Implementations may block on I/O (e.g. a JWKS fetch); the router itself
/// never calls this — only the middleware does, at request time.
pub trait AuthProvider: Send + Sync {
    fn verify_token(&self, token: &str) -> anyhow::Result<AuthClaims>;
}

/// Middleware extracting a bearer token from the `authorization` header and
/// attaching the verified claims to the request.
///
/// A request without the header passes through unauthenticated; a failed
/// verification short-circuits with 401.
pub struct AuthMiddleware {
    provider: Arc<dyn AuthProvider>,
}

impl AuthMiddleware {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

impl Handler for AuthMiddleware {
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response {
        let Some(authorization) = req.header("authorization").map(str::to_string) else {
            return next.run(req, ctx);
        };
        let token = authorization
            .strip_prefix("Bearer ")
            .unwrap_or(&authorization);

        match self.provider.verify_token(token) {
            Ok(claims) => {
                req.claims = Some(claims);
                next.run(req, ctx)
            }
            Err(err) => {
                warn!(error = %err, "bearer token verification failed");
                ctx.with_status(401).json(json!({ "error": "Unauthorized" }))
            }
        }
    }
}
