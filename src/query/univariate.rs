//! Evaluation claim: a committed column, read as polynomial coefficients,
//! evaluates to the value the proof asserts at a given point.

use std::fmt;
use std::sync::Arc;

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::circuit::CircuitRuntime;
use crate::error::Result;
use crate::gadgets::horner::{horner_eval, horner_eval_var};
use crate::metadata::{QueryId, QueryKind, QueryMetadata};
use crate::query::{impl_query_meta, CheckResult, ComputeResult};
use crate::result::{QueryResult, QueryResultVar, ResultShape};
use crate::runtime::{CoinId, ColumnId, Runtime};
use crate::scope::Scope;

/// Where the polynomial is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalPoint<F: PrimeField> {
    /// A point fixed at declaration time.
    Fixed(F),
    /// A verifier coin read from the runtime.
    Coin(CoinId),
}

impl<F: PrimeField> EvalPoint<F> {
    pub fn resolve(&self, run: &Runtime<F>) -> Result<F> {
        match self {
            EvalPoint::Fixed(x) => Ok(*x),
            EvalPoint::Coin(coin) => run.coin(coin),
        }
    }

    pub fn resolve_var(&self, run: &CircuitRuntime<F>) -> core::result::Result<FpVar<F>, SynthesisError> {
        match self {
            EvalPoint::Fixed(x) => Ok(FpVar::constant(*x)),
            EvalPoint::Coin(coin) => run.coin(coin).cloned(),
        }
    }
}

impl<F: PrimeField> fmt::Display for EvalPoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalPoint::Fixed(x) => write!(f, "{x}"),
            EvalPoint::Coin(coin) => write!(f, "coin {coin}"),
        }
    }
}

#[derive(Debug)]
pub struct UnivariateEval<F: PrimeField> {
    metadata: QueryMetadata,
    column: ColumnId,
    point: EvalPoint<F>,
}

impl<F: PrimeField> UnivariateEval<F> {
    pub(crate) fn new(id: QueryId, scope: Scope, column: ColumnId, point: EvalPoint<F>) -> Self {
        let description = format!("UnivariateEval: claimed value of {column}(X) at X = {point}");
        let explainer = Arc::new(move || description.clone());
        Self {
            metadata: QueryMetadata::new(id, QueryKind::UnivariateEval, scope, explainer),
            column,
            point,
        }
    }

    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn point(&self) -> &EvalPoint<F> {
        &self.point
    }
}

impl_query_meta!(UnivariateEval<F>);

impl<F: PrimeField> ComputeResult<F> for UnivariateEval<F> {
    const SHAPE: ResultShape = ResultShape::FieldElement;

    fn compute_result(&self, run: &Runtime<F>) -> Result<QueryResult<F>> {
        let coeffs = run.column(&self.column)?;
        let x = self.point.resolve(run)?;
        Ok(QueryResult::FieldElement(horner_eval(coeffs, x)))
    }

    fn compute_result_var(
        &self,
        _cs: ConstraintSystemRef<F>,
        run: &CircuitRuntime<F>,
    ) -> core::result::Result<QueryResultVar<F>, SynthesisError> {
        let coeffs = run.column(&self.column)?;
        let x = self.point.resolve_var(run)?;
        Ok(QueryResultVar::FieldElement(horner_eval_var(coeffs, &x)?))
    }
}

impl<F: PrimeField> CheckResult<F> for UnivariateEval<F> {}
