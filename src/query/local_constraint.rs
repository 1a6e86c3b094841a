//! Constraint over a set of columns pinned to a single row.

use std::sync::Arc;

use crate::metadata::{QueryId, QueryKind, QueryMetadata};
use crate::query::{fmt_columns, impl_pure_constraint, impl_query_meta};
use crate::runtime::ColumnId;
use crate::scope::Scope;

/// `row` counts from the top of the columns when non-negative and from the
/// bottom when negative (`-1` is the last row).
#[derive(Debug)]
pub struct LocalConstraint {
    metadata: QueryMetadata,
    columns: Vec<ColumnId>,
    row: i64,
}

impl LocalConstraint {
    pub(crate) fn new(id: QueryId, scope: Scope, columns: Vec<ColumnId>, row: i64) -> Self {
        let cols = fmt_columns(&columns);
        let explainer = Arc::new(move || {
            format!("LocalConstraint: expression over {cols} vanishes at row {row}")
        });
        Self {
            metadata: QueryMetadata::new(id, QueryKind::LocalConstraint, scope, explainer),
            columns,
            row,
        }
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn row(&self) -> i64 {
        self.row
    }
}

impl_query_meta!(LocalConstraint);
impl_pure_constraint!(LocalConstraint);


#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryMeta;

    #[test]
    fn row_is_kept_as_declared() {
        let q = LocalConstraint::new(QueryId(0), Scope::root("wizard"), vec!["A".into()], -1);
        assert_eq!(q.row(), -1);
        assert_eq!(q.explain(), "LocalConstraint: expression over (A) vanishes at row -1");
    }
}
