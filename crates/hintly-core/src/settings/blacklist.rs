//! URL patterns on which the extension stays inactive.

use serde::{Deserialize, Serialize};

/// A list of URL patterns with `*` wildcards, matched against `host/path`
/// (scheme stripped). A pattern without a `/` matches the host on any path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Blacklist(Vec<String>);

impl Blacklist {
    pub fn new(patterns: Vec<String>) -> Self {
        Self(patterns)
    }

    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    /// Whether any pattern matches the given URL.
    pub fn matches(&self, url: &str) -> bool {
        let target = strip_scheme(url);
        self.0.iter().any(|pattern| {
            if pattern.contains('/') {
                wildcard_match(pattern, target)
            } else {
                // Host-only pattern matches regardless of path.
                let host = target.split('/').next().unwrap_or(target);
                wildcard_match(pattern, host)
            }
        })
    }
}

fn strip_scheme(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}

/// Glob-style match where `*` spans any run of characters. The first segment
/// is anchored at the start, the last at the end, segments in between are
/// located greedily left to right.
fn wildcard_match(pattern: &str, target: &str) -> bool {
    let mut parts = pattern.split('*').peekable();

    let first = parts.next().unwrap_or("");
    let Some(mut rest) = target.strip_prefix(first) else {
        return false;
    };
    if parts.peek().is_none() {
        // No wildcard at all: the whole pattern must consume the target.
        return rest.is_empty();
    }

    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            return part.is_empty() || rest.ends_with(part);
        }
        if part.is_empty() {
            continue;
        }
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    true
}
