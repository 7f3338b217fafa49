use std::sync::Arc;

use crate::request::Request;
use crate::response::{Response, ResponseCtx};

/// One step of a handler chain: either path-scoped middleware or the route
/// handler itself.
///
/// A handler receives the request, the shared response builder, and the
/// continuation for the rest of the chain. Returning without invoking the
/// continuation short-circuits the chain and makes the returned response
/// final.
///
/// Plain functions of the same shape implement the trait:
///
/// ```
/// use fnrouter::{handler, Next, Request, Response, ResponseCtx};
/// use serde_json::json;
///
/// fn health(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
///     ctx.json(json!({ "status": "ok" }))
/// }
/// let _shared = handler(health);
/// ```
pub trait Handler: Send + Sync {
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response;
}

impl<F> Handler for F
where
    F: for<'c> Fn(&mut Request, &mut ResponseCtx, Next<'c>) -> Response + Send + Sync,
{
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response {
        self(req, ctx, next)
    }
}

/// An ordered handler list as assembled by the router: accumulated middleware
/// first, route handlers last.
pub type HandlerChain = Vec<Arc<dyn Handler>>;

/// Wrap a function as a shareable chain element.
///
/// Registration takes `Vec<Arc<dyn Handler>>`; this avoids spelling the cast
/// at every call site: `api.get("/health", vec![handler(health)])`.
pub fn handler<F>(f: F) -> Arc<dyn Handler>
where
    F: for<'c> Fn(&mut Request, &mut ResponseCtx, Next<'c>) -> Response + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The continuation a handler invokes to advance to the next handler in its
/// chain.
///
/// The runner is the only code that advances the position; a handler can only
/// pass the continuation on, not rewind it. Invoking the continuation when no
/// handlers remain is a contract violation and panics with an index
/// out-of-bounds error rather than silently succeeding.
pub struct Next<'c> {
    chain: &'c [Arc<dyn Handler>],
    index: usize,
}

impl<'c> Next<'c> {
    /// Execute the next handler in the chain and return its response.
    pub fn run(self, req: &mut Request, ctx: &mut ResponseCtx) -> Response {
        // Contract: indexing past the end of the chain must fail loudly.
        let handler = &self.chain[self.index];
        handler.call(
            req,
            ctx,
            Next {
                chain: self.chain,
                index: self.index + 1,
            },
        )
    }
}

/// Run an ordered handler chain to completion.
///
/// The chain must be non-empty; route registration always yields at least one
/// handler for a matched route.
pub fn run_chain(chain: &[Arc<dyn Handler>], req: &mut Request, ctx: &mut ResponseCtx) -> Response {
    Next { chain, index: 0 }.run(req, ctx)
}
