//! Result shapes a query can produce, native and in-circuit.

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::R1CSVar;
use ark_relations::r1cs::SynthesisError;

/// Tag of a result, independent of the representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultShape {
    None,
    FieldElement,
}

impl ResultShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultShape::None => "none",
            ResultShape::FieldElement => "field-element",
        }
    }
}

/// Native result of a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResult<F: PrimeField> {
    /// Pure constraint: nothing to compare.
    None,
    FieldElement(F),
}

impl<F: PrimeField> QueryResult<F> {
    pub fn shape(&self) -> ResultShape {
        match self {
            QueryResult::None => ResultShape::None,
            QueryResult::FieldElement(_) => ResultShape::FieldElement,
        }
    }

    pub fn as_field_element(&self) -> Option<&F> {
        match self {
            QueryResult::FieldElement(v) => Some(v),
            QueryResult::None => None,
        }
    }
}

impl<F: PrimeField> core::fmt::Display for QueryResult<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QueryResult::None => f.write_str("none"),
            QueryResult::FieldElement(v) => write!(f, "{v}"),
        }
    }
}

/// In-circuit mirror of [`QueryResult`].
#[derive(Clone, Debug)]
pub enum QueryResultVar<F: PrimeField> {
    None,
    FieldElement(FpVar<F>),
}

impl<F: PrimeField> QueryResultVar<F> {
    pub fn shape(&self) -> ResultShape {
        match self {
            QueryResultVar::None => ResultShape::None,
            QueryResultVar::FieldElement(_) => ResultShape::FieldElement,
        }
    }

    pub fn as_field_element(&self) -> Option<&FpVar<F>> {
        match self {
            QueryResultVar::FieldElement(v) => Some(v),
            QueryResultVar::None => None,
        }
    }

    /// Native value carried by the circuit variable (needs an assignment).
    pub fn value(&self) -> Result<QueryResult<F>, SynthesisError> {
        match self {
            QueryResultVar::None => Ok(QueryResult::None),
            QueryResultVar::FieldElement(v) => Ok(QueryResult::FieldElement(v.value()?)),
        }
    }
}
