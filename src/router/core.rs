use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::pattern::{normalize_path, split_segments, PathPattern};
use super::tree::{RouteEntry, RouteNode, RouteOptions, SearchHit};
use crate::handler::HandlerChain;
use crate::middleware::{BodyValidator, QueryValidator};

/// Maximum number of path parameters before parameter storage spills to the
/// heap. Most routes have well under 8 parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match hot path.
///
/// Parameter names are `Arc<str>` because they come from the compiled route
/// template: extraction clones a pointer, while values are per-request strings
/// taken from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request to a route.
///
/// Holds the matched entry, the extracted path parameters, and the final
/// ordered handler list: accumulated middleware root-to-leaf, then the route's
/// own chain. Created per request and owned by the caller; the tree itself is
/// never mutated by a match.
#[derive(Clone)]
pub struct RouteMatch {
    pub entry: Arc<RouteEntry>,
    pub params: ParamVec,
    pub handlers: HandlerChain,
}

impl RouteMatch {
    /// Get a path parameter by name, last write wins for duplicate names.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the parameter list to a map. This allocates; prefer
    /// [`RouteMatch::param`] in hot paths.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// The route table: a tree of path segments with method-keyed entries and
/// path-scoped middleware, plus the matcher that walks it.
///
/// Build-then-freeze: all registration completes before requests are served.
/// Matching is read-only, so a frozen router may be shared across concurrent
/// requests without synchronization.
#[derive(Default)]
pub struct Router {
    root: RouteNode,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RouteNode::root(),
        }
    }

    /// Register a route. Re-registering the same (method, template) silently
    /// replaces the previous entry — last write wins.
    ///
    /// Schemas in `options` are compiled here, once; an invalid schema panics
    /// at registration time rather than surfacing per request.
    ///
    /// Returns the created entry for introspection.
    pub fn add_route(
        &mut self,
        method: Method,
        template: &str,
        options: RouteOptions,
        handlers: HandlerChain,
    ) -> Arc<RouteEntry> {
        let template = normalize_path(template);
        let pattern = PathPattern::new(template);

        // Validators run ahead of user handlers: query first, then body.
        let mut chain: HandlerChain = Vec::with_capacity(handlers.len() + 2);
        if let Some(schema) = &options.query_schema {
            chain.push(Arc::new(QueryValidator::new(schema)));
        }
        if let Some(schema) = &options.body_schema {
            chain.push(Arc::new(BodyValidator::new(schema)));
        }
        chain.extend(handlers);

        let entry = Arc::new(RouteEntry {
            pattern,
            handlers: chain,
        });

        let segments = split_segments(template);
        let node = self.root.walk_or_create(&segments);
        if node
            .entries
            .insert(method.clone(), Arc::clone(&entry))
            .is_some()
        {
            debug!(method = %method, template, "route re-registered, previous entry replaced");
        } else {
            debug!(method = %method, template, "route registered");
        }
        entry
    }

    /// Attach middleware to a path scope. The handlers run for every request
    /// whose matched route lies at or beneath `prefix`; repeated registrations
    /// at the same prefix accumulate in order.
    pub fn add_middleware(&mut self, prefix: &str, handlers: HandlerChain) {
        let prefix = normalize_path(prefix);
        let segments = split_segments(prefix);
        let node = self.root.walk_or_create(&segments);
        debug!(prefix, count = handlers.len(), "middleware registered");
        node.middleware.extend(handlers);
    }

    /// Match a request to a route.
    ///
    /// Returns `None` when nothing matches; the caller surfaces that as a
    /// not-found response. A miss is an expected outcome, not an error.
    #[must_use]
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "route match attempt");
        let match_start = std::time::Instant::now();

        let path = normalize_path(path);
        let segments = split_segments(path);

        let hit = if segments.is_empty() {
            self.match_root(&method, path)
        } else {
            self.root.search(&segments, 0, &method, path)
        };

        let match_duration = match_start.elapsed();

        match hit {
            Some(hit) => {
                if match_duration > std::time::Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        route_template = %hit.entry.pattern.template(),
                        duration_us = match_duration.as_micros(),
                        "slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route_template = %hit.entry.pattern.template(),
                        path_params = ?hit.params,
                        duration_us = match_duration.as_micros(),
                        "route matched"
                    );
                }
                Some(RouteMatch {
                    entry: hit.entry,
                    params: hit.params,
                    handlers: hit.handlers,
                })
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "no route matched"
                );
                None
            }
        }
    }

    /// A request for exactly `/` matches against the root node's own method
    /// map, independent of the recursive descent.
    fn match_root(&self, method: &Method, path: &str) -> Option<SearchHit> {
        let entry = self.root.entries.get(method)?;
        let params = entry.pattern.capture(path)?;
        let mut handlers = self.root.middleware.clone();
        handlers.extend(entry.handlers.iter().cloned());
        Some(SearchHit {
            entry: Arc::clone(entry),
            params,
            handlers,
        })
    }

    /// Every registered entry, in tree order. Useful for startup diagnostics
    /// and metrics pre-registration.
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<RouteEntry>> {
        let mut out = Vec::new();
        self.root.collect_entries(&mut out);
        out
    }
}
