//! Hierarchical namespaces for query identifiers.
//!
//! A [`Scope`] is an immutable chain of name segments from the protocol root
//! down to a sub-protocol or round. Scopes are cheap to clone and are shared
//! (not owned) by every query declared under them.

use std::fmt;
use std::sync::Arc;

/// Separator between segments in [`Scope::full_scope`] and in query identity strings.
pub const SCOPE_SEPARATOR: &str = "/";

#[derive(Debug)]
struct ScopeNode {
    parent: Option<Scope>,
    name: String,
    tags: Vec<String>,
}

/// Immutable handle to a node in the scope tree.
#[derive(Clone, Debug)]
pub struct Scope(Arc<ScopeNode>);

impl Scope {
    /// Create the root scope of a protocol instance.
    pub fn root(name: impl Into<String>) -> Self {
        Self(Arc::new(ScopeNode {
            parent: None,
            name: name.into(),
            tags: Vec::new(),
        }))
    }

    /// Open a nested scope below `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.child_with_tags(name, std::iter::empty::<String>())
    }

    /// Open a nested scope carrying tags that every query declared under it
    /// (or under any of its descendants) inherits in [`Scope::inherited_tags`].
    pub fn child_with_tags<I, S>(&self, name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(ScopeNode {
            parent: Some(self.clone()),
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }))
    }

    /// Last segment of the scope path.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// Number of ancestors, the root being at depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Segments from the root down to `self`.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.ancestors().map(|s| s.0.name.as_str()).collect();
        segments.reverse();
        segments
    }

    /// Full path from the protocol root, segments joined with [`SCOPE_SEPARATOR`].
    pub fn full_scope(&self) -> String {
        self.segments().join(SCOPE_SEPARATOR)
    }

    /// Tags attached to this scope and all of its ancestors, root first.
    pub fn inherited_tags(&self) -> Vec<String> {
        let mut chain: Vec<&Scope> = self.ancestors().collect();
        chain.reverse();
        chain
            .into_iter()
            .flat_map(|s| s.0.tags.iter().cloned())
            .collect()
    }

    /// `true` when `self` is `other` or nested somewhere below it.
    pub fn is_within(&self, other: &Scope) -> bool {
        self.ancestors().any(|s| Arc::ptr_eq(&s.0, &other.0))
    }

    fn ancestors(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self), |s| s.parent())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_scope())
    }
}
