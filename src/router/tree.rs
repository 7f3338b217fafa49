use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::Value;

use super::core::ParamVec;
use super::pattern::{PathPattern, PARAM_MARKER};
use crate::handler::HandlerChain;

/// Per-route options supplied at registration time.
///
/// A schema present here causes a validator middleware to be synthesized at
/// the front of the route's handler chain (query validator ahead of body
/// validator when both are given), so validation always runs before user
/// handlers.
#[derive(Debug, Default, Clone)]
pub struct RouteOptions {
    /// JSON Schema the request body must satisfy.
    pub body_schema: Option<Value>,
    /// JSON Schema the query parameters must satisfy.
    pub query_schema: Option<Value>,
}

/// One registered (method, template) pair: the compiled pattern plus the
/// ordered handler chain, synthesized validators included.
///
/// The chain order is fixed at registration and never mutated once the route
/// is reachable by requests; entries are shared via `Arc` so a match clones
/// pointers, not handlers.
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub handlers: HandlerChain,
}

/// Result of a successful tree search, before it is wrapped into a
/// [`RouteMatch`](super::core::RouteMatch).
pub(crate) struct SearchHit {
    pub entry: Arc<RouteEntry>,
    pub params: ParamVec,
    pub handlers: HandlerChain,
}

/// A node in the route tree, keyed by path segment.
///
/// Fixed shape: a method-to-entry map, a middleware list scoped to this node
/// and everything beneath it, and literal/parameter child lists — all empty by
/// default. Parameter children keep their marker-prefixed key (e.g. `":id"`)
/// and are tried in insertion order.
pub(crate) struct RouteNode {
    segment: String,
    pub(crate) entries: HashMap<Method, Arc<RouteEntry>>,
    pub(crate) middleware: HandlerChain,
    children: Vec<RouteNode>,
    param_children: Vec<RouteNode>,
}

impl Default for RouteNode {
    fn default() -> Self {
        Self::root()
    }
}

impl RouteNode {
    fn new(segment: String) -> Self {
        Self {
            segment,
            entries: HashMap::new(),
            middleware: Vec::new(),
            children: Vec::new(),
            param_children: Vec::new(),
        }
    }

    /// The root node, representing the path `/`.
    pub(crate) fn root() -> Self {
        Self::new(String::new())
    }

    /// Walk to the node for `segments`, creating intermediate nodes as needed.
    /// Empty segments (doubled separators) are skipped.
    pub(crate) fn walk_or_create(&mut self, segments: &[&str]) -> &mut RouteNode {
        let mut node = self;
        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            node = node.child_or_create(segment);
        }
        node
    }

    fn child_or_create(&mut self, segment: &str) -> &mut RouteNode {
        let list = if segment.starts_with(PARAM_MARKER) {
            &mut self.param_children
        } else {
            &mut self.children
        };
        let pos = match list.iter().position(|c| c.segment == segment) {
            Some(pos) => pos,
            None => {
                list.push(RouteNode::new(segment.to_string()));
                list.len() - 1
            }
        };
        &mut list[pos]
    }

    /// Recursive descent over a pre-split segment sequence, consuming one
    /// segment per call.
    ///
    /// Literal children are tried first; parameter children only when the
    /// literal branch is absent or failed, in insertion order. On success the
    /// node's own middleware is prepended, so accumulation comes out strictly
    /// root-to-leaf.
    pub(crate) fn search(
        &self,
        segments: &[&str],
        idx: usize,
        method: &Method,
        full_path: &str,
    ) -> Option<SearchHit> {
        let segment = segments[idx];
        let last = idx + 1 == segments.len();

        let mut hit = self
            .children
            .iter()
            .find(|child| child.segment == segment)
            .and_then(|child| child.descend(segments, idx, method, full_path, last));

        if hit.is_none() && !segment.is_empty() {
            for child in &self.param_children {
                hit = child.descend(segments, idx, method, full_path, last);
                if hit.is_some() {
                    break;
                }
            }
        }

        let mut hit = hit?;
        if !self.middleware.is_empty() {
            hit.handlers.splice(0..0, self.middleware.iter().cloned());
        }
        Some(hit)
    }

    /// Try this child as either a terminal match or a subtree to recurse into.
    fn descend(
        &self,
        segments: &[&str],
        idx: usize,
        method: &Method,
        full_path: &str,
        last: bool,
    ) -> Option<SearchHit> {
        if last {
            let entry = self.entries.get(method)?;
            // Verify the entry's pattern against the full reference path and
            // extract parameters in the same pass.
            let params = entry.pattern.capture(full_path)?;
            let mut handlers = self.middleware.clone();
            handlers.extend(entry.handlers.iter().cloned());
            Some(SearchHit {
                entry: Arc::clone(entry),
                params,
                handlers,
            })
        } else if !self.children.is_empty() || !self.param_children.is_empty() {
            self.search(segments, idx + 1, method, full_path)
        } else {
            None
        }
    }

    pub(crate) fn collect_entries(&self, out: &mut Vec<Arc<RouteEntry>>) {
        out.extend(self.entries.values().cloned());
        for child in self.children.iter().chain(&self.param_children) {
            child.collect_entries(out);
        }
    }
}
