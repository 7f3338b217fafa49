use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use http::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::event::{split_query, FunctionEvent, FunctionResponse};
use crate::handler::{run_chain, HandlerChain};
use crate::request::Request;
use crate::response::ResponseCtx;
use crate::router::{ParamVec, RouteEntry, RouteOptions, Router};

/// Adapter configuration.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Function-mount prefix stripped from incoming event paths before
    /// matching (e.g. `/.netlify/functions/api`).
    pub strip_prefix: Option<String>,
}

/// The registration surface plus the platform-event adapter around the
/// routing engine.
///
/// Registration is build-then-freeze: wire up every route and middleware
/// before serving; a frozen `Api` only reads the tree and may be shared
/// across concurrent invocations.
///
/// ```
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
/// let res = api.handle(fnrouter::FunctionEvent::new("GET", "/health"));
/// assert_eq!(res.status_code, 200);
/// ```
#[derive(Default)]
pub struct Api {
    router: Router,
    config: ApiConfig,
}

impl Api {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            router: Router::new(),
            config,
        }
    }

    /// The underlying routing engine, for direct matching and introspection.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Register a route without per-route options.
    pub fn route(&mut self, method: Method, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.router
            .add_route(method, template, RouteOptions::default(), handlers)
    }

    /// Register a route with body/query schema options.
    pub fn route_with(
        &mut self,
        method: Method,
        template: &str,
        options: RouteOptions,
        handlers: HandlerChain,
    ) -> Arc<RouteEntry> {
        self.router.add_route(method, template, options, handlers)
    }

    pub fn get(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::GET, template, handlers)
    }

    pub fn post(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::POST, template, handlers)
    }

    pub fn put(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::PUT, template, handlers)
    }

    pub fn patch(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::PATCH, template, handlers)
    }

    pub fn delete(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::DELETE, template, handlers)
    }

    pub fn head(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::HEAD, template, handlers)
    }

    pub fn options(&mut self, template: &str, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route(Method::OPTIONS, template, handlers)
    }

    pub fn get_with(&mut self, template: &str, options: RouteOptions, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route_with(Method::GET, template, options, handlers)
    }

    pub fn post_with(&mut self, template: &str, options: RouteOptions, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route_with(Method::POST, template, options, handlers)
    }

    pub fn put_with(&mut self, template: &str, options: RouteOptions, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route_with(Method::PUT, template, options, handlers)
    }

    pub fn patch_with(&mut self, template: &str, options: RouteOptions, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route_with(Method::PATCH, template, options, handlers)
    }

    pub fn delete_with(&mut self, template: &str, options: RouteOptions, handlers: HandlerChain) -> Arc<RouteEntry> {
        self.route_with(Method::DELETE, template, options, handlers)
    }

    /// Attach middleware to a path scope; `/` scopes it globally.
    pub fn middleware(&mut self, prefix: &str, handlers: HandlerChain) {
        self.router.add_middleware(prefix, handlers);
    }

    /// Handle one platform event: translate it into a request, match, run the
    /// chain, and translate the final response back. No match yields 404.
    pub fn handle(&self, event: FunctionEvent) -> FunctionResponse {
        let mut path = event.path.as_str();
        if let Some(prefix) = &self.config.strip_prefix {
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                path = rest;
            }
        }
        let (path, embedded_query) = split_query(path);
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let method: Method = match event.http_method.parse() {
            Ok(method) => method,
            Err(_) => {
                warn!(method = %event.http_method, path = %path, "unsupported method");
                return FunctionResponse::not_found();
            }
        };

        let Some(route_match) = self.router.match_route(method.clone(), &path) else {
            return FunctionResponse::not_found();
        };

        // The event's own query map wins over pairs embedded in the path.
        let mut query = embedded_query;
        query.extend(event.query_string_parameters);

        let headers: HashMap<String, String> = event
            .headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        let body = event
            .body
            .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)));

        // Matching is byte-for-byte; parameter values are percent-decoded
        // only here at the boundary.
        let params: ParamVec = route_match
            .params
            .iter()
            .map(|(name, value)| {
                let decoded = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.clone());
                (Arc::clone(name), decoded)
            })
            .collect();

        let mut req = Request {
            method: method.clone(),
            path: path.clone(),
            headers,
            query,
            params,
            body,
            claims: None,
        };
        let mut ctx = ResponseCtx::new();

        let start = Instant::now();
        let res = run_chain(&route_match.handlers, &mut req, &mut ctx);
        info!(
            method = %method,
            path = %path,
            status = res.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "request handled"
        );

        FunctionResponse::from_response(res)
    }
}
