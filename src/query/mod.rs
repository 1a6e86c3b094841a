//! Query variants and the dual native/circuit verification contract.
//!
//! Every variant owns one [`QueryMetadata`] and implements:
//! - [`QueryMeta`]: identity, naming, tags and the chained `with_*` setters;
//! - [`ComputeResult`]: recomputation of the expected result from committed data,
//!   natively and as circuit variables;
//! - [`CheckResult`] (value-producing variants only): comparison of the
//!   recomputed result with the one the proof claims in the runtime registry.
//!
//! Pure constraints (`Inclusion`, `LocalConstraint`, `Permutation`) always
//! produce [`QueryResult::None`] and do not implement [`CheckResult`]; their
//! satisfaction is carried by the arithmetization that assembles them.

use std::fmt;

use ark_ff::PrimeField;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::circuit::CircuitRuntime;
use crate::error::{QueryError, Result};
use crate::metadata::{QueryId, QueryKind, QueryMetadata};
use crate::result::{QueryResult, QueryResultVar, ResultShape};
use crate::runtime::Runtime;

pub mod inclusion;
pub mod local_constraint;
pub mod permutation;
pub mod univariate;

pub use inclusion::Inclusion;
pub use local_constraint::LocalConstraint;
pub use permutation::Permutation;
pub use univariate::{EvalPoint, UnivariateEval};

/// Metadata side of the query contract.
///
/// The `with_*` setters consume and return the query so they chain. Once a
/// query is handed to [`crate::protocol::Protocol::register`] it is owned by
/// the protocol and no mutable access remains.
pub trait QueryMeta: fmt::Display {
    fn metadata(&self) -> &QueryMetadata;

    fn metadata_mut(&mut self) -> &mut QueryMetadata;

    /// Append tags, keeping order and duplicates.
    fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata_mut()
            .tags
            .extend(tags.into_iter().map(Into::into));
        self
    }

    fn with_name(mut self, name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.metadata_mut().name = Some(name.into());
        self
    }

    fn with_doc(mut self, doc: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.metadata_mut().doc = Some(doc.into());
        self
    }

    fn tags(&self) -> &[String] {
        self.metadata().tags()
    }

    fn list_tags(&self) -> Vec<String> {
        self.metadata().list_tags()
    }

    fn explain(&self) -> String {
        self.metadata().explain()
    }

    fn id(&self) -> QueryId {
        self.metadata().id()
    }

    fn kind(&self) -> QueryKind {
        self.metadata().kind()
    }
}

/// Recompute, from committed data only, the result a correct proof must exhibit.
///
/// Never touches the result registry.
pub trait ComputeResult<F: PrimeField>: QueryMeta {
    /// The single result shape this variant produces.
    const SHAPE: ResultShape;

    fn compute_result(&self, run: &Runtime<F>) -> Result<QueryResult<F>>;

    fn compute_result_var(
        &self,
        cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<QueryResultVar<F>, SynthesisError>;
}

/// Consistency check between the recomputed result and the registry.
pub trait CheckResult<F: PrimeField>: ComputeResult<F> {
    /// Native check. Missing and mismatching results are returned as errors.
    fn check(&self, run: &Runtime<F>) -> Result<()> {
        let expected = self.compute_result(run)?;
        let claimed = run
            .try_get_result(self.id())
            .ok_or_else(|| QueryError::MissingResult {
                query: self.to_string(),
            })?;

        if claimed.shape() != <Self as ComputeResult<F>>::SHAPE {
            return Err(QueryError::UnexpectedResultShape {
                query: self.to_string(),
                expected: <Self as ComputeResult<F>>::SHAPE.as_str(),
                found: claimed.shape().as_str(),
            });
        }

        if *claimed != expected {
            return Err(QueryError::ResultMismatch {
                query: self.to_string(),
                expected: expected.to_string(),
                claimed: claimed.to_string(),
            });
        }

        Ok(())
    }

    /// Circuit check. A mismatch makes `cs` unsatisfiable; a registry entry
    /// that is missing or of the wrong shape is a circuit assembly bug and panics.
    fn check_circuit(
        &self,
        cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<(), SynthesisError> {
        let expected = self.compute_result_var(cs, run)?;
        let claimed = match run.try_get_result(self.id()) {
            Some(claimed) => claimed,
            None => panic!("error verifying {self}: missing result from the proof"),
        };

        match (&expected, claimed) {
            (QueryResultVar::FieldElement(e), QueryResultVar::FieldElement(c)) => e.enforce_equal(c),
            (QueryResultVar::None, QueryResultVar::None) => Ok(()),
            _ => panic!(
                "error verifying {self}: expected a {} result, the circuit runtime holds a {} result",
                expected.shape().as_str(),
                claimed.shape().as_str()
            ),
        }
    }
}

/// How a query was found to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The recomputed result matched the registry.
    Checked,
    /// Pure constraint: satisfaction is enforced by the constraint system it
    /// is compiled into, nothing was compared.
    Structural,
}

/// Any registered query.
///
/// Not `Clone`: a query exists once, so its id cannot be registered twice.
#[derive(Debug)]
pub enum Query<F: PrimeField> {
    Inclusion(Inclusion),
    LocalConstraint(LocalConstraint),
    Permutation(Permutation),
    UnivariateEval(UnivariateEval<F>),
}

impl<F: PrimeField> Query<F> {
    pub fn metadata(&self) -> &QueryMetadata {
        match self {
            Query::Inclusion(q) => q.metadata(),
            Query::LocalConstraint(q) => q.metadata(),
            Query::Permutation(q) => q.metadata(),
            Query::UnivariateEval(q) => q.metadata(),
        }
    }

    pub fn id(&self) -> QueryId {
        self.metadata().id()
    }

    pub fn kind(&self) -> QueryKind {
        self.metadata().kind()
    }

    pub fn tags(&self) -> &[String] {
        self.metadata().tags()
    }

    pub fn list_tags(&self) -> Vec<String> {
        self.metadata().list_tags()
    }

    pub fn explain(&self) -> String {
        self.metadata().explain()
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            Query::Inclusion(_) => <Inclusion as ComputeResult<F>>::SHAPE,
            Query::LocalConstraint(_) => <LocalConstraint as ComputeResult<F>>::SHAPE,
            Query::Permutation(_) => <Permutation as ComputeResult<F>>::SHAPE,
            Query::UnivariateEval(_) => <UnivariateEval<F> as ComputeResult<F>>::SHAPE,
        }
    }

    pub fn is_pure_constraint(&self) -> bool {
        self.shape() == ResultShape::None
    }

    pub fn compute_result(&self, run: &Runtime<F>) -> Result<QueryResult<F>> {
        match self {
            Query::Inclusion(q) => q.compute_result(run),
            Query::LocalConstraint(q) => q.compute_result(run),
            Query::Permutation(q) => q.compute_result(run),
            Query::UnivariateEval(q) => q.compute_result(run),
        }
    }

    pub fn compute_result_var(
        &self,
        cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<QueryResultVar<F>, SynthesisError> {
        match self {
            Query::Inclusion(q) => q.compute_result_var(cs, run),
            Query::LocalConstraint(q) => q.compute_result_var(cs, run),
            Query::Permutation(q) => q.compute_result_var(cs, run),
            Query::UnivariateEval(q) => q.compute_result_var(cs, run),
        }
    }

    /// Native check. Pure constraints report [`Verdict::Structural`] without
    /// reading the runtime.
    pub fn check(&self, run: &Runtime<F>) -> Result<Verdict> {
        match self {
            Query::UnivariateEval(q) => q.check(run).map(|()| Verdict::Checked),
            Query::Inclusion(_) | Query::LocalConstraint(_) | Query::Permutation(_) => {
                Ok(Verdict::Structural)
            }
        }
    }

    /// Circuit check. Pure constraints emit nothing.
    pub fn check_circuit(
        &self,
        cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<Verdict, SynthesisError> {
        match self {
            Query::UnivariateEval(q) => q.check_circuit(cs, run).map(|()| Verdict::Checked),
            Query::Inclusion(_) | Query::LocalConstraint(_) | Query::Permutation(_) => {
                Ok(Verdict::Structural)
            }
        }
    }
}

impl<F: PrimeField> fmt::Display for Query<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metadata().identity())
    }
}

impl<F: PrimeField> From<Inclusion> for Query<F> {
    fn from(q: Inclusion) -> Self {
        Query::Inclusion(q)
    }
}

impl<F: PrimeField> From<LocalConstraint> for Query<F> {
    fn from(q: LocalConstraint) -> Self {
        Query::LocalConstraint(q)
    }
}

impl<F: PrimeField> From<Permutation> for Query<F> {
    fn from(q: Permutation) -> Self {
        Query::Permutation(q)
    }
}

impl<F: PrimeField> From<UnivariateEval<F>> for Query<F> {
    fn from(q: UnivariateEval<F>) -> Self {
        Query::UnivariateEval(q)
    }
}

/// Implements [`QueryMeta`] and `Display` for a variant holding its metadata
/// in a `metadata` field.
macro_rules! impl_query_meta {
    ($ty:ident) => {
        impl $crate::query::QueryMeta for $ty {
            fn metadata(&self) -> &$crate::metadata::QueryMetadata {
                &self.metadata
            }

            fn metadata_mut(&mut self) -> &mut $crate::metadata::QueryMetadata {
                &mut self.metadata
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.metadata.identity())
            }
        }
    };
    ($ty:ident<$f:ident>) => {
        impl<$f: ::ark_ff::PrimeField> $crate::query::QueryMeta for $ty<$f> {
            fn metadata(&self) -> &$crate::metadata::QueryMetadata {
                &self.metadata
            }

            fn metadata_mut(&mut self) -> &mut $crate::metadata::QueryMetadata {
                &mut self.metadata
            }
        }

        impl<$f: ::ark_ff::PrimeField> ::std::fmt::Display for $ty<$f> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.metadata.identity())
            }
        }
    };
}

pub(crate) use impl_query_meta;

/// Pure-constraint variants share the same `ComputeResult`: always `None`.
macro_rules! impl_pure_constraint {
    ($ty:ident) => {
        impl<F: ::ark_ff::PrimeField> $crate::query::ComputeResult<F> for $ty {
            const SHAPE: $crate::result::ResultShape = $crate::result::ResultShape::None;

            fn compute_result(
                &self,
                _run: &$crate::runtime::Runtime<F>,
            ) -> $crate::error::Result<$crate::result::QueryResult<F>> {
                Ok($crate::result::QueryResult::None)
            }

            fn compute_result_var(
                &self,
                _cs: ::ark_relations::r1cs::ConstraintSystemRef<F>,
                _run: &$crate::circuit::CircuitRuntime<F>,
            ) -> ::core::result::Result<
                $crate::result::QueryResultVar<F>,
                ::ark_relations::r1cs::SynthesisError,
            > {
                Ok($crate::result::QueryResultVar::None)
            }
        }
    };
}

pub(crate) use impl_pure_constraint;

/// Render a list of columns as `(A, B, C)`.
pub(crate) fn fmt_columns(columns: &[crate::runtime::ColumnId]) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
    format!("({})", names.join(", "))
}
