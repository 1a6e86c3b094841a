//! Native verification runtime.
//!
//! Holds the committed columns and verifier coins queries read from, plus the
//! result registry the proof populates. The registry must be fully written
//! before any query is checked; nothing here enforces that ordering.

use std::collections::HashMap;
use std::fmt;

use ark_ff::PrimeField;

use crate::error::{QueryError, Result};
use crate::metadata::QueryId;
use crate::result::QueryResult;

/// Identity of a committed column.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ColumnId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a verifier random coin.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoinId(String);

impl CoinId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CoinId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-session native runtime.
#[derive(Clone, Debug)]
pub struct Runtime<F: PrimeField> {
    columns: HashMap<ColumnId, Vec<F>>,
    coins: HashMap<CoinId, F>,
    results: HashMap<QueryId, QueryResult<F>>,
}

impl<F: PrimeField> Default for Runtime<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Runtime<F> {
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            coins: HashMap::new(),
            results: HashMap::new(),
        }
    }

    /// Assign (or overwrite) the values of a committed column.
    pub fn assign_column(&mut self, column: impl Into<ColumnId>, values: Vec<F>) -> &mut Self {
        self.columns.insert(column.into(), values);
        self
    }

    pub fn column(&self, column: &ColumnId) -> Result<&[F]> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| QueryError::MissingColumn {
                column: column.to_string(),
            })
    }

    pub fn columns(&self) -> impl Iterator<Item = (&ColumnId, &[F])> {
        self.columns.iter().map(|(id, v)| (id, v.as_slice()))
    }

    pub fn set_coin(&mut self, coin: impl Into<CoinId>, value: F) -> &mut Self {
        self.coins.insert(coin.into(), value);
        self
    }

    pub fn coin(&self, coin: &CoinId) -> Result<F> {
        self.coins
            .get(coin)
            .copied()
            .ok_or_else(|| QueryError::MissingCoin {
                coin: coin.to_string(),
            })
    }

    pub fn coins(&self) -> impl Iterator<Item = (&CoinId, &F)> {
        self.coins.iter()
    }

    /// Record the result the proof claims for `id`.
    pub fn set_result(&mut self, id: QueryId, result: QueryResult<F>) -> &mut Self {
        self.results.insert(id, result);
        self
    }

    pub fn try_get_result(&self, id: QueryId) -> Option<&QueryResult<F>> {
        self.results.get(&id)
    }

    pub fn results(&self) -> impl Iterator<Item = (&QueryId, &QueryResult<F>)> {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;

    #[test]
    fn missing_data_is_reported_by_name() {
        let run = Runtime::<Fr>::new();
        assert_eq!(
            run.column(&ColumnId::new("A")),
            Err(QueryError::MissingColumn { column: "A".into() })
        );
        assert_eq!(
            run.coin(&CoinId::new("alpha")),
            Err(QueryError::MissingCoin { coin: "alpha".into() })
        );
    }

    #[test]
    fn registry_is_keyed_by_id() {
        let mut run = Runtime::<Fr>::new();
        run.set_result(QueryId(3), QueryResult::FieldElement(Fr::from(9u64)))
            .assign_column("A", vec![Fr::from(1u64), Fr::from(2u64)]);

        assert_eq!(
            run.try_get_result(QueryId(3)),
            Some(&QueryResult::FieldElement(Fr::from(9u64)))
        );
        assert!(run.try_get_result(QueryId(4)).is_none());
        assert_eq!(run.column(&"A".into()).unwrap().len(), 2);
    }
}
