//! Identity, naming, documentation and tags attached to every query.

use std::fmt;
use std::sync::Arc;

use crate::scope::{Scope, SCOPE_SEPARATOR};

/// Dense identifier of a query within one protocol instance.
///
/// Ids are handed out by [`crate::protocol::Protocol`] in declaration order and
/// key the result registry of both runtimes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryId(pub(crate) u32);

impl QueryId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of query variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QueryKind {
    Inclusion,
    LocalConstraint,
    Permutation,
    UnivariateEval,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Inclusion => "Inclusion",
            QueryKind::LocalConstraint => "LocalConstraint",
            QueryKind::Permutation => "Permutation",
            QueryKind::UnivariateEval => "UnivariateEval",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-supplied closure describing what the query asserts.
pub type Explainer = Arc<dyn Fn() -> String + Send + Sync>;

/// Metadata owned by exactly one query.
pub struct QueryMetadata {
    id: QueryId,
    kind: QueryKind,
    pub(crate) name: Option<String>,
    pub(crate) doc: Option<String>,
    pub(crate) tags: Vec<String>,
    scope: Scope,
    explainer: Explainer,
}

impl QueryMetadata {
    pub(crate) fn new(id: QueryId, kind: QueryKind, scope: Scope, explainer: Explainer) -> Self {
        Self {
            id,
            kind,
            name: None,
            doc: None,
            tags: Vec::new(),
            scope,
            explainer,
        }
    }

    pub fn id(&self) -> QueryId {
        self.id
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Own tags, insertion order, duplicates kept.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Scope-inherited tags followed by the query's own tags.
    pub fn list_tags(&self) -> Vec<String> {
        let mut tags = self.scope.inherited_tags();
        tags.extend(self.tags.iter().cloned());
        tags
    }

    /// Explicit name, or `<Kind>_<id>` when none was given.
    pub fn name_or_default(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.kind, self.id),
        }
    }

    /// `<full scope>/<name or default>/<id>`
    pub fn identity(&self) -> String {
        [
            self.scope.full_scope(),
            self.name_or_default(),
            self.id.to_string(),
        ]
        .join(SCOPE_SEPARATOR)
    }

    /// Documentation, if any, followed by the variant's own description.
    pub fn explain(&self) -> String {
        let generated = (self.explainer)();
        match self.doc.as_deref() {
            Some(doc) if !doc.is_empty() => format!("{doc}\n{generated}"),
            _ => generated,
        }
    }
}

impl fmt::Debug for QueryMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryMetadata")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("tags", &self.tags)
            .field("scope", &self.scope.full_scope())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: u32, kind: QueryKind) -> QueryMetadata {
        let scope = Scope::root("wizard").child_with_tags("round-1", ["r1"]);
        QueryMetadata::new(QueryId(id), kind, scope, Arc::new(|| "asserts nothing".to_string()))
    }

    #[test]
    fn default_name_depends_on_kind_and_id() {
        let m = meta(4, QueryKind::Permutation);
        assert_eq!(m.name_or_default(), "Permutation_4");
        assert_eq!(m.identity(), "wizard/round-1/Permutation_4/4");
        assert_eq!(m.identity(), m.identity());
    }

    #[test]
    fn explicit_name_replaces_default() {
        let mut m = meta(2, QueryKind::UnivariateEval);
        m.name = Some("opening".into());
        assert_eq!(m.identity(), "wizard/round-1/opening/2");
    }

    #[test]
    fn explain_prefixes_doc() {
        let mut m = meta(0, QueryKind::Inclusion);
        assert_eq!(m.explain(), "asserts nothing");
        m.doc = Some("range check on the limbs".into());
        assert_eq!(m.explain(), "range check on the limbs\nasserts nothing");
    }

    #[test]
    fn list_tags_is_superset_of_tags() {
        let mut m = meta(0, QueryKind::Inclusion);
        m.tags.extend(["lookup".to_string(), "lookup".to_string()]);
        assert_eq!(m.tags(), ["lookup", "lookup"]);
        assert_eq!(m.list_tags(), vec!["r1", "lookup", "lookup"]);
    }
}
