#![cfg(test)]

use crate::checking::VerificationFailure;
use crate::engine::test_helper::ScriptedEngine;
use crate::engine::test_helper::ScriptedPhase;
use crate::expectation::Expectation;
use crate::model::Column;
use crate::model::Model;
use crate::model::ObjectiveSense;
use crate::model::Row;
use crate::orchestrator::verify_instance;
use crate::orchestrator::RunOptions;
use crate::orchestrator::RunOutcome;
use crate::orchestrator::VerificationError;

pub(crate) mod scenarios;

/// ```text
/// min  20x + 20y
/// s.t. x + y >= 5   (demand)
///      x - y  = 0   (balance)
///      x, y integer
/// ```
///
/// The relaxation optimum is `x = y = 2.5` with objective 100, the integer optimum is `x = y = 3`
/// with objective 120.
pub(crate) fn balanced_pair() -> Model {
    Model::new(
        ObjectiveSense::Minimize,
        vec![Column::integer("x", 20.0), Column::integer("y", 20.0)],
        vec![
            Row::greater_equal("demand", vec![(0, 1.0), (1, 1.0)], 5.0),
            Row::equal("balance", vec![(0, 1.0), (1, -1.0)], 0.0),
        ],
    )
    .expect("valid model")
}

/// ```text
/// opt  4x
/// s.t. x >= 12   (floor)
///      x integer
/// ```
pub(crate) fn single_column(sense: ObjectiveSense) -> Model {
    Model::new(
        sense,
        vec![Column::integer("x", 4.0)],
        vec![Row::greater_equal("floor", vec![(0, 1.0)], 12.0)],
    )
    .expect("valid model")
}

pub(crate) fn expect(relaxation: &str, best_bound: &str, mip: &str, optimal: &str) -> Expectation {
    Expectation::from_tokens(relaxation, best_bound, mip, optimal).expect("valid expectation")
}

pub(crate) fn run(
    model: Model,
    relaxation: ScriptedPhase,
    mip: ScriptedPhase,
    expectation: &Expectation,
) -> Result<RunOutcome, VerificationError> {
    run_with_options(model, relaxation, mip, expectation, &RunOptions::default())
}

pub(crate) fn run_with_options(
    model: Model,
    relaxation: ScriptedPhase,
    mip: ScriptedPhase,
    expectation: &Expectation,
    options: &RunOptions,
) -> Result<RunOutcome, VerificationError> {
    let engine = ScriptedEngine::new(model, relaxation, mip);
    verify_instance(
        engine,
        "instances/scripted.mps.gz".as_ref(),
        expectation,
        options,
    )
}

/// Unwrap the verification failure of a run which is expected to fail a check.
pub(crate) fn failure(result: Result<RunOutcome, VerificationError>) -> VerificationFailure {
    match result {
        Err(VerificationError::Failure(failure)) => failure,
        Err(error) => panic!("expected a failed check, got {error}"),
        Ok(outcome) => panic!("expected a failed check, got {outcome}"),
    }
}
