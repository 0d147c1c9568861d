#![cfg(test)]

use super::balanced_pair;
use super::expect;
use super::failure;
use super::run;
use super::single_column;
use crate::engine::test_helper::Call;
use crate::engine::test_helper::ScriptedEngine;
use crate::engine::test_helper::ScriptedPhase;
use crate::model::ObjectiveSense;
use crate::orchestrator::verify_instance;
use crate::orchestrator::Limits;
use crate::orchestrator::RunOptions;
use crate::orchestrator::RunOutcome;
use crate::orchestrator::VerificationError;
use crate::tolerance::Relation;

#[test]
fn known_optimum_is_reached() {
    let outcome = run(
        balanced_pair(),
        ScriptedPhase::optimal(100.0, vec![2.5, 2.5]),
        ScriptedPhase::optimal(120.0, vec![3.0, 3.0]),
        &expect("100.0", "0", "120.0", "True"),
    )
    .expect("valid run");

    assert_eq!(outcome, RunOutcome::Passed);
}

#[test]
fn infeasible_instance_is_proven_infeasible() {
    // Neither phase has a solution, so any attempt to check one would fail the run.
    let outcome = run(
        balanced_pair(),
        ScriptedPhase::infeasible(),
        ScriptedPhase::infeasible(),
        &expect("inf", "0", "inf", "False"),
    )
    .expect("valid run");

    assert_eq!(outcome, RunOutcome::Passed);
}

#[test]
fn optimum_respecting_lower_bound_is_accepted() {
    let outcome = run(
        single_column(ObjectiveSense::Minimize),
        ScriptedPhase::optimal(48.0, vec![12.0]),
        ScriptedPhase::optimal(52.0, vec![13.0]),
        &expect("48", "50", "52", "False"),
    )
    .expect("52 >= 50");

    assert_eq!(outcome, RunOutcome::Passed);
}

#[test]
fn optimum_violating_lower_bound_is_rejected() {
    let result = run(
        single_column(ObjectiveSense::Minimize),
        ScriptedPhase::optimal(48.0, vec![12.0]),
        ScriptedPhase::optimal(48.0, vec![12.0]),
        &expect("48", "50", "52", "False"),
    );

    let failure = failure(result);
    assert_eq!(failure.context.instance(), "scripted");
    assert_eq!(failure.context.step(), "checking bounds");
    assert!(matches!(
        failure.mismatch,
        crate::checking::Mismatch::Value {
            relation: Relation::AtLeast,
            expected,
            observed,
            ..
        } if expected == 50.0 && observed == 48.0
    ));
}

#[test]
fn limits_are_configured_before_the_integer_solve() {
    let engine = ScriptedEngine::new(
        balanced_pair(),
        ScriptedPhase::optimal(100.0, vec![2.5, 2.5]),
        ScriptedPhase::optimal(120.0, vec![3.0, 3.0]),
    );
    let calls = engine.calls();

    let options = RunOptions {
        limits: Limits {
            max_nodes: 10,
            time_limit: 2.5,
        },
        ..Default::default()
    };

    let _ = verify_instance(
        engine,
        "p0033.json".as_ref(),
        &expect("100", "0", "120", "True"),
        &options,
    )
    .expect("valid run");

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::ReadInstance,
            Call::SolveRelaxation,
            Call::SetMaxNodes(10),
            Call::SetTimeLimit(2.5),
            Call::Solve,
            Call::Release,
        ]
    );
}

#[test]
fn failed_relaxation_skips_the_integer_solve_and_releases() {
    let engine = ScriptedEngine::new(
        balanced_pair(),
        ScriptedPhase::optimal(90.0, vec![2.5, 2.5]),
        ScriptedPhase::optimal(120.0, vec![3.0, 3.0]),
    );
    let calls = engine.calls();

    let _ = verify_instance(
        engine,
        "p0033.json".as_ref(),
        &expect("100", "0", "120", "True"),
        &RunOptions::default(),
    )
    .expect_err("relaxation objective differs from the expectation");

    assert_eq!(
        *calls.borrow(),
        vec![Call::ReadInstance, Call::SolveRelaxation, Call::Release]
    );
}

#[test]
fn read_error_is_an_engine_error_and_releases() {
    let engine = ScriptedEngine::new(
        balanced_pair(),
        ScriptedPhase::default(),
        ScriptedPhase::default(),
    )
    .failing_read();
    let calls = engine.calls();

    let error = verify_instance(
        engine,
        "p0033.json".as_ref(),
        &expect("100", "0", "120", "True"),
        &RunOptions::default(),
    )
    .expect_err("instance cannot be read");

    assert!(matches!(
        error,
        VerificationError::Engine { ref step, .. } if step == "reading instance"
    ));
    assert_eq!(*calls.borrow(), vec![Call::ReadInstance, Call::Release]);
}
