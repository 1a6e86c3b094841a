//! Circuit verification runtime.
//!
//! Mirrors [`Runtime`] with `FpVar`s in place of field elements. Claimed
//! results and verifier coins are public inputs of the verification circuit,
//! committed columns are witnesses.

use std::collections::HashMap;

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::metadata::QueryId;
use crate::result::{QueryResult, QueryResultVar};
use crate::runtime::{CoinId, ColumnId, Runtime};

pub struct CircuitRuntime<F: PrimeField> {
    cs: ConstraintSystemRef<F>,
    columns: HashMap<ColumnId, Vec<FpVar<F>>>,
    coins: HashMap<CoinId, FpVar<F>>,
    results: HashMap<QueryId, QueryResultVar<F>>,
}

impl<F: PrimeField> CircuitRuntime<F> {
    pub fn new(cs: ConstraintSystemRef<F>) -> Self {
        Self {
            cs,
            columns: HashMap::new(),
            coins: HashMap::new(),
            results: HashMap::new(),
        }
    }

    /// Allocate everything a native runtime holds into `cs`.
    ///
    /// Entries are allocated in sorted key order so that two runtimes with the
    /// same content yield the same constraint system layout.
    pub fn allocate(cs: ConstraintSystemRef<F>, run: &Runtime<F>) -> Result<Self, SynthesisError> {
        let mut out = Self::new(cs);

        let mut coins: Vec<_> = run.coins().collect();
        coins.sort_by(|a, b| a.0.cmp(b.0));
        for (coin, value) in coins {
            let _ = out.alloc_coin(coin.clone(), *value)?;
        }

        let mut results: Vec<_> = run.results().collect();
        results.sort_by_key(|(id, _)| **id);
        for (id, result) in results {
            out.alloc_result(*id, result)?;
        }

        let mut columns: Vec<_> = run.columns().collect();
        columns.sort_by(|a, b| a.0.cmp(b.0));
        for (column, values) in columns {
            let _ = out.alloc_column(column.clone(), values)?;
        }

        Ok(out)
    }

    pub fn cs(&self) -> ConstraintSystemRef<F> {
        self.cs.clone()
    }

    /// Allocate a committed column as witnesses.
    pub fn alloc_column(
        &mut self,
        column: impl Into<ColumnId>,
        values: &[F],
    ) -> Result<&[FpVar<F>], SynthesisError> {
        let vars = values
            .iter()
            .map(|v| FpVar::new_witness(self.cs.clone(), || Ok(*v)))
            .collect::<Result<Vec<_>, _>>()?;
        let column = column.into();
        self.columns.insert(column.clone(), vars);
        Ok(&self.columns[&column])
    }

    /// Allocate a verifier coin as a public input.
    pub fn alloc_coin(&mut self, coin: impl Into<CoinId>, value: F) -> Result<FpVar<F>, SynthesisError> {
        let var = FpVar::new_input(self.cs.clone(), || Ok(value))?;
        self.coins.insert(coin.into(), var.clone());
        Ok(var)
    }

    /// Allocate a claimed result as a public input and register it under `id`.
    pub fn alloc_result(&mut self, id: QueryId, result: &QueryResult<F>) -> Result<(), SynthesisError> {
        let var = match result {
            QueryResult::None => QueryResultVar::None,
            QueryResult::FieldElement(v) => {
                QueryResultVar::FieldElement(FpVar::new_input(self.cs.clone(), || Ok(*v))?)
            }
        };
        self.results.insert(id, var);
        Ok(())
    }

    /// Register an already-built circuit result under `id`.
    pub fn set_result(&mut self, id: QueryId, result: QueryResultVar<F>) {
        self.results.insert(id, result);
    }

    pub fn column(&self, column: &ColumnId) -> Result<&[FpVar<F>], SynthesisError> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or(SynthesisError::AssignmentMissing)
    }

    pub fn coin(&self, coin: &CoinId) -> Result<&FpVar<F>, SynthesisError> {
        self.coins.get(coin).ok_or(SynthesisError::AssignmentMissing)
    }

    pub fn try_get_result(&self, id: QueryId) -> Option<&QueryResultVar<F>> {
        self.results.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn allocate_mirrors_native_runtime() {
        let mut run = Runtime::<Fr>::new();
        run.assign_column("A", vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)])
            .set_coin("x", Fr::from(5u64))
            .set_result(QueryId(0), QueryResult::FieldElement(Fr::from(11u64)))
            .set_result(QueryId(1), QueryResult::None);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();

        assert_eq!(cs.num_instance_variables(), 1 + 2);
        assert_eq!(cs.num_witness_variables(), 3);
        assert_eq!(circuit.coin(&"x".into()).unwrap().value().unwrap(), Fr::from(5u64));
        assert_eq!(
            circuit.try_get_result(QueryId(0)).unwrap().value().unwrap(),
            QueryResult::FieldElement(Fr::from(11u64))
        );
        assert!(matches!(circuit.try_get_result(QueryId(1)), Some(QueryResultVar::None)));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn unknown_column_is_an_assignment_error() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit = CircuitRuntime::new(cs);
        assert!(matches!(
            circuit.column(&ColumnId::new("nope")),
            Err(SynthesisError::AssignmentMissing)
        ));
    }
}
