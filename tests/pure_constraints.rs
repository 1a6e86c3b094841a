//! Inclusion, LocalConstraint and Permutation carry no comparable output.

use ark_bls12_381::Fr;
use ark_relations::r1cs::ConstraintSystem;
use ark_std::{test_rng, UniformRand};

use wizard_query::{
    CircuitRuntime, ColumnId, ComputeResult, Protocol, Query, QueryResult, QueryResultVar,
    ResultShape, Runtime, Verdict,
};

fn cols(names: &[&str]) -> Vec<ColumnId> {
    names.iter().map(|n| ColumnId::new(*n)).collect()
}

fn pure_protocol() -> Protocol<Fr> {
    let mut p = Protocol::<Fr>::new("wizard");
    let root = p.root_scope().clone();
    let incl = p.inclusion(&root, cols(&["A"]), cols(&["T"])).unwrap();
    let local = p.local_constraint(&root, cols(&["A"]), 0).unwrap();
    let perm = p.permutation(&root, cols(&["A"]), cols(&["B"])).unwrap();
    p.register(incl).unwrap();
    p.register(local).unwrap();
    p.register(perm).unwrap();
    p
}

fn random_runtime() -> Runtime<Fr> {
    let mut rng = test_rng();
    let mut run = Runtime::new();
    for name in ["A", "B", "T"] {
        run.assign_column(name, (0..4).map(|_| Fr::rand(&mut rng)).collect());
    }
    run
}

#[test]
fn compute_result_is_none_whatever_the_runtime() {
    let p = pure_protocol();
    for run in [Runtime::new(), random_runtime()] {
        for q in p.queries() {
            assert!(q.is_pure_constraint());
            assert_eq!(q.shape(), ResultShape::None);
            assert_eq!(q.compute_result(&run).unwrap(), QueryResult::None);

            let cs = ConstraintSystem::<Fr>::new_ref();
            let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();
            assert!(matches!(
                q.compute_result_var(cs, &circuit).unwrap(),
                QueryResultVar::None
            ));
        }
    }
}

#[test]
fn checks_are_structural_in_both_modes() {
    let p = pure_protocol();
    let run = Runtime::new();
    for q in p.queries() {
        assert_eq!(q.check(&run), Ok(Verdict::Structural));
    }
    assert!(p.verify(&run).is_ok());

    let cs = ConstraintSystem::<Fr>::new_ref();
    let circuit = CircuitRuntime::new(cs.clone());
    p.verify_circuit(cs.clone(), &circuit).unwrap();
    assert_eq!(cs.num_constraints(), 0);
    assert!(cs.is_satisfied().unwrap());
}

#[test]
fn variant_level_compute_is_none() {
    let mut p = Protocol::<Fr>::new("wizard");
    let root = p.root_scope().clone();
    let incl = p.inclusion(&root, cols(&["A"]), cols(&["T"])).unwrap();
    let run = random_runtime();

    assert_eq!(<wizard_query::Inclusion as ComputeResult<Fr>>::SHAPE, ResultShape::None);
    assert_eq!(incl.compute_result(&run).unwrap(), QueryResult::None);
    assert!(matches!(Query::<Fr>::from(incl), Query::Inclusion(_)));
}
