//! Query layer of a wizard IOP compiler.
//!
//! A proof is a sequence of queries over committed columns. Each query is
//! checkable in two modes that must agree:
//! - natively, against a [`Runtime`] holding field elements, where failures are
//!   returned as [`QueryError`]s;
//! - in-circuit, against a [`CircuitRuntime`] holding R1CS variables, where a
//!   failure makes the constraint system unsatisfiable (recursive verification).
//!
//! Queries are declared through a [`Protocol`], which assigns their ids and
//! binds them to a [`Scope`]. Their metadata can be configured with the
//! `with_*` setters of [`QueryMeta`] until they are registered.

pub mod circuit;
pub mod config;
pub mod error;
pub mod gadgets;
pub mod metadata;
pub mod protocol;
pub mod query;
pub mod result;
pub mod runtime;
pub mod scope;

pub use circuit::CircuitRuntime;
pub use config::VerifierConfig;
pub use error::{QueryError, Result};
pub use metadata::{QueryId, QueryKind, QueryMetadata};
pub use protocol::{Protocol, QueryListing, VerificationReport};
pub use query::{
    CheckResult, ComputeResult, EvalPoint, Inclusion, LocalConstraint, Permutation, Query,
    QueryMeta, UnivariateEval, Verdict,
};
pub use result::{QueryResult, QueryResultVar, ResultShape};
pub use runtime::{CoinId, ColumnId, Runtime};
pub use scope::Scope;
