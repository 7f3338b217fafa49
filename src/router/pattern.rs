use std::sync::Arc;

use smallvec::SmallVec;

use super::core::ParamVec;

/// Marker character introducing a named parameter segment in a route template.
pub(crate) const PARAM_MARKER: char = ':';

/// Strip the trailing separator from a non-root path, so `/users/` and
/// `/users` refer to the same route.
pub(crate) fn normalize_path(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// Split a path into its `/`-delimited segments, discarding the empty leading
/// segment produced by the initial separator. The root path yields no
/// segments.
pub(crate) fn split_segments(path: &str) -> SmallVec<[&str; 16]> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        SmallVec::new()
    } else {
        trimmed.split('/').collect()
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
}

/// A compiled route template: an ordered sequence of literal and named
/// parameter segments.
///
/// Compiled once at registration time and immutable thereafter. Matching
/// requires equal segment counts; literal segments compare byte-for-byte and
/// parameter segments accept any non-empty candidate segment.
///
/// Parameter names are stored as `Arc<str>` so extraction clones a pointer,
/// not the name.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template such as `/users/:id/posts`. A trailing slash on a
    /// non-root template is stripped first.
    #[must_use]
    pub fn new(template: &str) -> Self {
        let template = normalize_path(template).to_string();
        let segments = split_segments(&template)
            .iter()
            .map(|seg| match seg.strip_prefix(PARAM_MARKER) {
                Some(name) => Segment::Param(Arc::from(name)),
                None => Segment::Literal((*seg).to_string()),
            })
            .collect();
        Self { template, segments }
    }

    /// The normalized template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether `path` matches this pattern. The caller is expected to pass a
    /// trailing-slash-normalized path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let candidate = split_segments(path);
        if candidate.len() != self.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(&candidate)
            .all(|(expected, seg)| match expected {
                Segment::Literal(lit) => lit == seg,
                Segment::Param(_) => !seg.is_empty(),
            })
    }

    /// Match `path` and extract its parameter bindings in one pass.
    ///
    /// Returns `None` on any mismatch, so bindings can never be produced from
    /// a path the pattern did not accept.
    #[must_use]
    pub fn capture(&self, path: &str) -> Option<ParamVec> {
        let candidate = split_segments(path);
        if candidate.len() != self.segments.len() {
            return None;
        }
        let mut params = ParamVec::new();
        for (expected, seg) in self.segments.iter().zip(&candidate) {
            match expected {
                Segment::Literal(lit) if lit == seg => {}
                Segment::Param(name) if !seg.is_empty() => {
                    params.push((Arc::clone(name), (*seg).to_string()));
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_only() {
        let pattern = PathPattern::new("/users/me");
        assert!(pattern.matches("/users/me"));
        assert!(!pattern.matches("/users/other"));
        assert!(!pattern.matches("/users"));
        assert!(!pattern.matches("/users/me/posts"));
    }

    #[test]
    fn test_parameter_capture() {
        let pattern = PathPattern::new("/users/:id/posts/:post_id");
        let params = pattern.capture("/users/42/posts/7").expect("should match");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], (Arc::from("id"), "42".to_string()));
        assert_eq!(params[1], (Arc::from("post_id"), "7".to_string()));
    }

    #[test]
    fn test_capture_rejects_mismatch() {
        let pattern = PathPattern::new("/users/:id");
        assert!(pattern.capture("/posts/42").is_none());
        assert!(pattern.capture("/users/42/extra").is_none());
    }

    #[test]
    fn test_parameter_rejects_empty_segment() {
        let pattern = PathPattern::new("/users/:id");
        assert!(!pattern.matches("/users//"));
        assert!(pattern.capture("/users//").is_none());
    }

    #[test]
    fn test_trailing_slash_stripped_at_compile() {
        let pattern = PathPattern::new("/users/");
        assert_eq!(pattern.template(), "/users");
        assert!(pattern.matches("/users"));
    }

    #[test]
    fn test_root_template() {
        let pattern = PathPattern::new("/");
        assert_eq!(pattern.template(), "/");
        assert!(pattern.matches("/"));
        assert!(!pattern.matches("/users"));
    }

    #[test]
    fn test_case_sensitive_literals() {
        let pattern = PathPattern::new("/Users");
        assert!(!pattern.matches("/users"));
    }
}
