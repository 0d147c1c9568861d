use super::context::DiagnosticContext;
use super::failure::VerificationFailure;
use super::solution::check_solution;
use super::solution::Integrality;
use crate::engine::SolverEngine;
use crate::engine::StatusFlag;
use crate::expectation::Expectation;
use crate::expectation::MipExpectation;
use crate::model::Model;
use crate::model::ObjectiveSense;
use crate::tolerance::Relation;
use crate::tolerance::Tolerance;

/// The outcome of an integer solve that passed verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MipVerdict {
    /// The solver proved infeasibility, as expected.
    Infeasible,
    /// The solver neither proved infeasibility nor found a solution, so nothing can be
    /// disproven. This happens when a resource limit is reached before the first solution.
    Inconclusive,
    /// The solver found a feasible solution, which respects the expectation if its optimality was
    /// proven.
    Feasible { proven_optimal: bool },
}

/// Verify the outcome of the integer solve in `engine` against `expectation`.
///
/// The engine must have been solved under resource limits, so not reaching optimality is an
/// anticipated outcome rather than an error.
pub fn verify_mip<Engine: SolverEngine + ?Sized>(
    engine: &Engine,
    model: &Model,
    expectation: &Expectation,
    context: &mut DiagnosticContext,
) -> Result<MipVerdict, VerificationFailure> {
    context.set_step("checking optimization results");

    let status = engine.status();
    if status.contains(StatusFlag::ProvenInfeasible) {
        context.check_flag(
            "expected infeasibility",
            true,
            expectation.mip.is_infeasible(),
        )?;

        return Ok(MipVerdict::Infeasible);
    }

    let saved_solutions = engine.number_saved_solutions();
    if saved_solutions == 0 {
        return Ok(MipVerdict::Inconclusive);
    }

    let solution = engine.column_solution().ok_or_else(|| {
        context.mismatch(
            "solution",
            format_args!("the best of {saved_solutions} saved solutions"),
            "none",
        )
    })?;

    let objective = engine.objective_value();
    check_solution(model, objective, solution, Integrality::Enforced, context)?;

    context.set_step("checking optimization status");
    // A feasible solution contradicts an expected infeasibility.
    context.check_flag(
        "expected infeasibility",
        false,
        expectation.mip.is_infeasible(),
    )?;
    context.check_flag(
        "proven infeasible",
        false,
        status.contains(StatusFlag::ProvenInfeasible),
    )?;
    context.check_flag("abandoned", false, status.contains(StatusFlag::Abandoned))?;

    let proven_optimal = status.contains(StatusFlag::ProvenOptimal);
    if proven_optimal {
        context.set_step("checking bounds");

        match expectation.mip {
            MipExpectation::Optimal(exact) => {
                context.check_value(
                    "objective value",
                    Tolerance::Bound,
                    Relation::Equal,
                    objective,
                    exact,
                )?;
            }
            MipExpectation::Bounded(bound) => {
                // A valid dual bound can never be exceeded by the optimum, but it need not be
                // tight.
                let relation = match expectation.sense.unwrap_or(model.sense()) {
                    ObjectiveSense::Minimize => Relation::AtLeast,
                    ObjectiveSense::Maximize => Relation::AtMost,
                };

                context.check_value(
                    "objective value",
                    Tolerance::Bound,
                    relation,
                    objective,
                    bound,
                )?;
            }
            MipExpectation::Infeasible => {}
        }
    }

    Ok(MipVerdict::Feasible { proven_optimal })
}
