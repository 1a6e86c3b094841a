//! Multiset equality between the rows of two column tuples.

use std::sync::Arc;

use crate::metadata::{QueryId, QueryKind, QueryMetadata};
use crate::query::{fmt_columns, impl_pure_constraint, impl_query_meta};
use crate::runtime::ColumnId;
use crate::scope::Scope;

#[derive(Debug)]
pub struct Permutation {
    metadata: QueryMetadata,
    a: Vec<ColumnId>,
    b: Vec<ColumnId>,
}

impl Permutation {
    pub(crate) fn new(id: QueryId, scope: Scope, a: Vec<ColumnId>, b: Vec<ColumnId>) -> Self {
        let (lhs, rhs) = (fmt_columns(&a), fmt_columns(&b));
        let explainer = Arc::new(move || {
            format!("Permutation: the rows of {lhs} are a permutation of the rows of {rhs}")
        });
        Self {
            metadata: QueryMetadata::new(id, QueryKind::Permutation, scope, explainer),
            a,
            b,
        }
    }

    pub fn a(&self) -> &[ColumnId] {
        &self.a
    }

    pub fn b(&self) -> &[ColumnId] {
        &self.b
    }
}

impl_query_meta!(Permutation);
impl_pure_constraint!(Permutation);
