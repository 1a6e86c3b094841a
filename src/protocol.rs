//! Protocol instance: id assignment, query registration and verification passes.
//!
//! A [`Protocol`] is the explicit session context queries are declared in.
//! Declaring a query assigns the next dense [`QueryId`] and binds a scope; the
//! returned value can still be configured with the `with_*` setters until it
//! is passed to [`Protocol::register`], which takes ownership and seals it.

use std::collections::BTreeMap;

use ark_ff::PrimeField;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::circuit::CircuitRuntime;
use crate::config::VerifierConfig;
use crate::error::{QueryError, Result};
use crate::metadata::{QueryId, QueryKind};
use crate::query::{EvalPoint, Inclusion, LocalConstraint, Permutation, Query, UnivariateEval, Verdict};
use crate::runtime::{ColumnId, Runtime};
use crate::scope::Scope;

/// Diagnostic record for constraint-listing tools.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryListing {
    pub id: QueryId,
    pub kind: QueryKind,
    pub identity: String,
    pub tags: Vec<String>,
    pub explanation: String,
}

/// Outcome of a native verification pass, in query id order.
#[derive(Clone, Debug, Default)]
pub struct VerificationReport {
    pub outcomes: Vec<(QueryId, Result<Verdict>)>,
}

impl VerificationReport {
    /// `true` when every checked query passed.
    pub fn is_accepted(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (QueryId, &QueryError)> {
        self.outcomes
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, e)))
    }

    /// First failure, if any.
    pub fn into_result(self) -> Result<()> {
        match self.outcomes.into_iter().find_map(|(_, r)| r.err()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub struct Protocol<F: PrimeField> {
    root: Scope,
    next_id: u32,
    queries: BTreeMap<QueryId, Query<F>>,
}

impl<F: PrimeField> Protocol<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: Scope::root(name),
            next_id: 0,
            queries: BTreeMap::new(),
        }
    }

    pub fn root_scope(&self) -> &Scope {
        &self.root
    }

    fn fresh_id(&mut self) -> QueryId {
        let id = QueryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn check_scope(&self, scope: &Scope) -> Result<()> {
        if scope.is_within(&self.root) {
            Ok(())
        } else {
            Err(QueryError::InvalidDeclaration {
                reason: format!("scope {scope} does not belong to protocol {}", self.root),
            })
        }
    }

    pub fn inclusion(
        &mut self,
        scope: &Scope,
        included: Vec<ColumnId>,
        including: Vec<ColumnId>,
    ) -> Result<Inclusion> {
        self.check_scope(scope)?;
        check_tuples("inclusion", &included, &including)?;
        Ok(Inclusion::new(self.fresh_id(), scope.clone(), included, including))
    }

    pub fn local_constraint(
        &mut self,
        scope: &Scope,
        columns: Vec<ColumnId>,
        row: i64,
    ) -> Result<LocalConstraint> {
        self.check_scope(scope)?;
        if columns.is_empty() {
            return Err(QueryError::InvalidDeclaration {
                reason: "local constraint over no column".into(),
            });
        }
        Ok(LocalConstraint::new(self.fresh_id(), scope.clone(), columns, row))
    }

    pub fn permutation(
        &mut self,
        scope: &Scope,
        a: Vec<ColumnId>,
        b: Vec<ColumnId>,
    ) -> Result<Permutation> {
        self.check_scope(scope)?;
        check_tuples("permutation", &a, &b)?;
        Ok(Permutation::new(self.fresh_id(), scope.clone(), a, b))
    }

    pub fn univariate_eval(
        &mut self,
        scope: &Scope,
        column: impl Into<ColumnId>,
        point: EvalPoint<F>,
    ) -> Result<UnivariateEval<F>> {
        self.check_scope(scope)?;
        Ok(UnivariateEval::new(self.fresh_id(), scope.clone(), column.into(), point))
    }

    /// Take ownership of a declared query. Its metadata is frozen from here on.
    ///
    /// Only queries declared by this protocol are accepted, each at most once.
    pub fn register(&mut self, query: impl Into<Query<F>>) -> Result<QueryId> {
        let query = query.into();
        let id = query.id();
        self.check_scope(query.metadata().scope())?;
        if id.0 >= self.next_id {
            return Err(QueryError::InvalidDeclaration {
                reason: format!("query id {id} was not issued by this protocol"),
            });
        }
        if self.queries.contains_key(&id) {
            tracing::warn!(%id, "query already registered");
            return Err(QueryError::InvalidDeclaration {
                reason: format!("query id {id} is already registered"),
            });
        }
        tracing::trace!(query = %query, "registered");
        self.queries.insert(id, query);
        Ok(id)
    }

    pub fn query(&self, id: QueryId) -> Result<&Query<F>> {
        self.queries.get(&id).ok_or(QueryError::UnknownQuery { id })
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Registered queries in id order.
    pub fn queries(&self) -> impl Iterator<Item = &Query<F>> {
        self.queries.values()
    }

    /// Queries whose effective tags (scope tags included) contain `tag`.
    pub fn queries_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Query<F>> + 'a {
        self.queries()
            .filter(move |q| q.list_tags().iter().any(|t| t == tag))
    }

    /// Queries declared in `scope` or below it.
    pub fn queries_in_scope<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a Query<F>> + 'a {
        self.queries()
            .filter(move |q| q.metadata().scope().is_within(scope))
    }

    pub fn listing(&self) -> Vec<QueryListing> {
        self.queries()
            .map(|q| QueryListing {
                id: q.id(),
                kind: q.kind(),
                identity: q.to_string(),
                tags: q.list_tags(),
                explanation: q.explain(),
            })
            .collect()
    }

    /// Native verification with the default configuration; first failure wins.
    pub fn verify(&self, run: &Runtime<F>) -> Result<()> {
        self.verify_with(run, &VerifierConfig::default()).into_result()
    }

    /// Check every registered query once against `run`.
    pub fn verify_with(&self, run: &Runtime<F>, config: &VerifierConfig) -> VerificationReport {
        let _span = tracing::info_span!("verify", queries = self.queries.len()).entered();

        #[cfg(feature = "parallel")]
        if config.runs_parallel() {
            return self.verify_parallel(run);
        }

        let mut report = VerificationReport::default();
        for query in self.queries() {
            let outcome = check_one(query, run);
            let failed = outcome.is_err();
            report.outcomes.push((query.id(), outcome));
            if failed && config.fail_fast {
                break;
            }
        }
        report
    }

    #[cfg(feature = "parallel")]
    fn verify_parallel(&self, run: &Runtime<F>) -> VerificationReport {
        use rayon::prelude::*;

        let queries: Vec<&Query<F>> = self.queries().collect();
        let outcomes = queries
            .par_iter()
            .map(|q| (q.id(), check_one(q, run)))
            .collect();
        VerificationReport { outcomes }
    }

    /// Emit the checks of every registered query into `cs`.
    ///
    /// There is no early exit: a wrong claim leaves `cs` unsatisfiable and is
    /// only detected when the constraint system is checked or proven.
    pub fn verify_circuit(
        &self,
        cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<(), SynthesisError> {
        let _span = tracing::info_span!("verify_circuit", queries = self.queries.len()).entered();
        let before = cs.num_constraints();
        for query in self.queries() {
            let verdict = query.check_circuit(cs.clone(), run)?;
            tracing::debug!(query = %query, ?verdict, "constraints emitted");
        }
        tracing::debug!(constraints = cs.num_constraints() - before, "circuit checks emitted");
        Ok(())
    }
}

fn check_one<F: PrimeField>(query: &Query<F>, run: &Runtime<F>) -> Result<Verdict> {
    let outcome = query.check(run);
    match &outcome {
        Ok(verdict) => tracing::debug!(query = %query, ?verdict, "query accepted"),
        Err(err) => tracing::warn!(query = %query, error = %err, "query rejected"),
    }
    outcome
}

fn check_tuples(what: &str, lhs: &[ColumnId], rhs: &[ColumnId]) -> Result<()> {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return Err(QueryError::InvalidDeclaration {
            reason: format!(
                "{what} needs two non-empty column tuples of the same width, got {} and {}",
                lhs.len(),
                rhs.len()
            ),
        });
    }
    Ok(())
}
