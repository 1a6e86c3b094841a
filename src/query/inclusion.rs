//! Lookup query: every row of the included columns appears as a row of the
//! including columns.

use std::sync::Arc;

use crate::metadata::{QueryId, QueryKind, QueryMetadata};
use crate::query::{fmt_columns, impl_pure_constraint, impl_query_meta};
use crate::runtime::ColumnId;
use crate::scope::Scope;

#[derive(Debug)]
pub struct Inclusion {
    metadata: QueryMetadata,
    included: Vec<ColumnId>,
    including: Vec<ColumnId>,
}

impl Inclusion {
    pub(crate) fn new(
        id: QueryId,
        scope: Scope,
        included: Vec<ColumnId>,
        including: Vec<ColumnId>,
    ) -> Self {
        let (lhs, rhs) = (fmt_columns(&included), fmt_columns(&including));
        let explainer = Arc::new(move || {
            format!("Inclusion: every row of {lhs} is a row of {rhs}")
        });
        Self {
            metadata: QueryMetadata::new(id, QueryKind::Inclusion, scope, explainer),
            included,
            including,
        }
    }

    pub fn included(&self) -> &[ColumnId] {
        &self.included
    }

    pub fn including(&self) -> &[ColumnId] {
        &self.including
    }
}

impl_query_meta!(Inclusion);
impl_pure_constraint!(Inclusion);
