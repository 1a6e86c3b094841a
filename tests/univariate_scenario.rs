//! End-to-end check of a single evaluation claim in both modes.
//!
//! P(X) = 3 + 2X opened at X = 2, so the true value is 7.

use ark_bls12_381::Fr;
use ark_relations::r1cs::{ConstraintLayer, ConstraintSystem};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use wizard_query::{
    CheckResult, CircuitRuntime, EvalPoint, Protocol, QueryError, QueryId, QueryMeta, QueryResult,
    Runtime, UnivariateEval,
};

fn fr(v: u64) -> Fr {
    Fr::from(v)
}

fn declare() -> (Protocol<Fr>, UnivariateEval<Fr>) {
    let mut protocol = Protocol::new("wizard");
    let round = protocol.root_scope().child("round-1");
    let u = protocol
        .univariate_eval(&round, "P", EvalPoint::Fixed(fr(2)))
        .unwrap()
        .with_name("u");
    (protocol, u)
}

fn runtime_with(id: QueryId, claimed: Option<u64>) -> Runtime<Fr> {
    let mut run = Runtime::new();
    run.assign_column("P", vec![fr(3), fr(2)]);
    if let Some(v) = claimed {
        run.set_result(id, QueryResult::FieldElement(fr(v)));
    }
    run
}

#[test]
fn native_check_accepts_true_value() {
    let (_, u) = declare();
    let run = runtime_with(u.id(), Some(7));
    assert_eq!(u.check(&run), Ok(()));
}

#[test]
fn native_check_reports_both_values_on_mismatch() {
    let (_, u) = declare();
    let run = runtime_with(u.id(), Some(8));
    let err = u.check(&run).unwrap_err();
    assert_eq!(
        err,
        QueryError::ResultMismatch {
            query: "wizard/round-1/u/0".into(),
            expected: "7".into(),
            claimed: "8".into(),
        }
    );
    let msg = err.to_string();
    assert!(msg.contains('7') && msg.contains('8'), "{msg}");
}

#[test]
fn native_check_reports_missing_result() {
    let (_, u) = declare();
    let run = runtime_with(u.id(), None);
    assert_eq!(
        u.check(&run),
        Err(QueryError::MissingResult {
            query: "wizard/round-1/u/0".into()
        })
    );
}

#[test]
fn protocol_verify_runs_the_same_check() {
    let (mut protocol, u) = declare();
    let id = protocol.register(u).unwrap();

    assert!(protocol.verify(&runtime_with(id, Some(7))).is_ok());
    assert!(matches!(
        protocol.verify(&runtime_with(id, Some(8))),
        Err(QueryError::ResultMismatch { .. })
    ));
    assert!(matches!(
        protocol.verify(&runtime_with(id, None)),
        Err(QueryError::MissingResult { .. })
    ));
}

#[test]
fn circuit_check_is_satisfied_for_true_value() {
    let (mut protocol, u) = declare();
    let id = protocol.register(u).unwrap();
    let run = runtime_with(id, Some(7));

    let cs = ConstraintSystem::<Fr>::new_ref();
    let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();
    protocol.verify_circuit(cs.clone(), &circuit).unwrap();

    assert!(cs.num_constraints() > 0);
    assert!(cs.is_satisfied().unwrap());
}

#[test]
fn circuit_check_is_unsatisfiable_on_mismatch() {
    let (mut protocol, u) = declare();
    let id = protocol.register(u).unwrap();
    let run = runtime_with(id, Some(8));

    let cs = ConstraintSystem::<Fr>::new_ref();
    let subscriber = Registry::default().with(ConstraintLayer::default());
    tracing::subscriber::with_default(subscriber, || {
        let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();
        protocol.verify_circuit(cs.clone(), &circuit).unwrap();
    });

    assert!(!cs.is_satisfied().unwrap());
    assert!(cs.which_is_unsatisfied().unwrap().is_some());
}

#[test]
fn native_and_circuit_results_agree() {
    let (_, u) = declare();
    let run = runtime_with(u.id(), Some(7));

    let cs = ConstraintSystem::<Fr>::new_ref();
    let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();

    let native = wizard_query::ComputeResult::compute_result(&u, &run).unwrap();
    let in_circuit = wizard_query::ComputeResult::compute_result_var(&u, cs, &circuit)
        .unwrap()
        .value()
        .unwrap();
    assert_eq!(native, in_circuit);
}

#[test]
#[should_panic(expected = "missing result from the proof")]
fn circuit_check_panics_when_result_was_never_wired() {
    let (mut protocol, u) = declare();
    let id = protocol.register(u).unwrap();
    let run = runtime_with(id, None);

    let cs = ConstraintSystem::<Fr>::new_ref();
    let circuit = CircuitRuntime::allocate(cs.clone(), &run).unwrap();
    let _ = protocol.verify_circuit(cs, &circuit);
}
