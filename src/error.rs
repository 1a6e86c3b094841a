// src/error.rs

use thiserror::Error;

use crate::metadata::QueryId;

/// Native-mode verification failures.
///
/// Circuit-mode failures never show up here: a mismatch in-circuit is an
/// unsatisfiable constraint and a missing registry entry is a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("error verifying {query}: the result is missing from the proof")]
    MissingResult { query: String },

    #[error("error verifying {query}: the result {claimed} does not match the correct value: {expected}")]
    ResultMismatch {
        query: String,
        expected: String,
        claimed: String,
    },

    #[error("error verifying {query}: expected a {expected} result, the proof holds a {found} result")]
    UnexpectedResultShape {
        query: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("column {column} is not assigned in the runtime")]
    MissingColumn { column: String },

    #[error("coin {coin} is not sampled in the runtime")]
    MissingCoin { coin: String },

    #[error("invalid query declaration: {reason}")]
    InvalidDeclaration { reason: String },

    #[error("no query is registered under id {id}")]
    UnknownQuery { id: QueryId },
}

pub type Result<T> = core::result::Result<T, QueryError>;
