//! # fnrouter
//!
//! A tree-based HTTP request router and middleware engine for serverless
//! function handlers.
//!
//! Given a registered set of (method, path-template, handler-chain) triples
//! and path-scoped middleware, `fnrouter` locates the single best-matching
//! route for an incoming (method, path) pair, extracts its path parameters,
//! and runs the ordered handler chain — middleware first, route handler last.
//! There is no HTTP transport here: the platform adapter consumes an already
//! parsed event (`{method, path, headers, body, query}`) and produces the
//! platform's response shape.
//!
//! ## Architecture
//!
//! - **[`router`]** — the engine: route tree, compiled path patterns, and the
//!   matcher that assembles handler chains
//! - **[`handler`]** — the `Handler` trait and the continuation-passing chain
//!   runner
//! - **[`middleware`]** — schema validation, CORS, and bearer-token auth
//! - **[`event`]** / **[`api`]** — platform-event translation around the
//!   engine
//! - **[`testing`]** — an in-process harness for exercising an [`Api`]
//!
//! ## Quick start
//!
//! ```
//! use fnrouter::{handler, Api, FunctionEvent, Next, Request, Response, ResponseCtx};
//! use serde_json::json;
//!
//! fn get_user(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
//!     ctx.json(json!({ "id": req.param("id") }))
//! }
//!
//! let mut api = Api::new();
//! api.get("/users/:id", vec![handler(get_user)]);
//!
//! let res = api.handle(FunctionEvent::new("GET", "/users/42"));
//! assert_eq!(res.status_code, 200);
//! ```
//!
//! ## Concurrency model
//!
//! Registration is build-then-freeze: wire up every route and middleware
//! before the first request, then share the frozen [`Api`] (or [`Router`])
//! across concurrent invocations. Matching only reads the tree; no
//! request-time code path mutates it.

pub mod api;
pub mod event;
pub mod handler;
pub mod middleware;
pub mod request;
pub mod response;
pub mod router;
pub mod testing;

pub use api::{Api, ApiConfig};
pub use event::{FunctionEvent, FunctionResponse};
pub use handler::{handler, run_chain, Handler, HandlerChain, Next};
pub use request::{AuthClaims, Request};
pub use response::{Response, ResponseCtx};
pub use router::{ParamVec, PathPattern, RouteEntry, RouteMatch, RouteOptions, Router};
