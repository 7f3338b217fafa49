//! # Router Module
//!
//! Path matching and route resolution: the only part of the crate with real
//! algorithmic content. Everything else is glue around this engine.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building the route tree from registered (method, template, handlers)
//!   triples and path-scoped middleware
//! - Matching incoming requests to registered routes
//! - Extracting path parameters from matched routes
//! - Assembling the ordered handler chain (middleware root-to-leaf, then the
//!   route's own handlers)
//!
//! ## Architecture
//!
//! Registration time compiles one [`PathPattern`] per route and inserts it
//! into a tree of path segments; request time walks the tree read-only, one
//! segment per step, trying literal children before parameter children and
//! verifying the candidate entry's pattern against the full request path at
//! the leaf.
//!
//! ## Example
//!
//! ```
//! use fnrouter::router::{RouteOptions, Router};
//! use fnrouter::{handler, Next, Request, Response, ResponseCtx};
//! use http::Method;
//! use serde_json::json;
//!
//! fn get_user(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
//!     ctx.json(json!({ "id": req.param("id") }))
//! }
//!
//! let mut router = Router::new();
//! router.add_route(Method::GET, "/users/:id", RouteOptions::default(), vec![handler(get_user)]);
//!
//! let m = router.match_route(Method::GET, "/users/42").expect("route should match");
//! assert_eq!(m.param("id"), Some("42"));
//! ```

mod core;
mod pattern;
mod tree;

pub use core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use pattern::PathPattern;
pub use tree::{RouteEntry, RouteOptions};
