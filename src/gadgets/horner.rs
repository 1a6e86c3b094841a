//! Polynomial evaluation in coefficient form, native and in-circuit.

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// `sum_i coeffs[i] * x^i`
pub fn horner_eval<F: PrimeField>(coeffs: &[F], x: F) -> F {
    coeffs.iter().rev().fold(F::zero(), |acc, c| acc * x + c)
}

/// In-circuit counterpart of [`horner_eval`]. One multiplication constraint per
/// coefficient when `x` is a variable, none when it is a constant.
pub fn horner_eval_var<F: PrimeField>(
    coeffs: &[FpVar<F>],
    x: &FpVar<F>,
) -> Result<FpVar<F>, SynthesisError> {
    let mut acc = FpVar::<F>::zero();
    for c in coeffs.iter().rev() {
        acc = &acc * x + c;
    }
    Ok(acc)
}
