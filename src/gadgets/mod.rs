//! In-circuit helpers shared by the query variants.

pub mod horner;
