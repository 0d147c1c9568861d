use super::context::DiagnosticContext;
use super::failure::VerificationFailure;
use super::solution::check_solution;
use super::solution::Integrality;
use crate::engine::SolverEngine;
use crate::engine::StatusFlag;
use crate::expectation::RelaxationExpectation;
use crate::model::Model;
use crate::tolerance::Relation;
use crate::tolerance::Tolerance;

/// Verify the outcome of solving the continuous relaxation in `engine` against `expected`.
pub fn verify_relaxation<Engine: SolverEngine + ?Sized>(
    engine: &Engine,
    model: &Model,
    expected: RelaxationExpectation,
    context: &mut DiagnosticContext,
) -> Result<(), VerificationFailure> {
    context.set_step("checking solution of LP relaxation");

    let status = engine.status();
    let is_infeasible = status.contains(StatusFlag::ProvenInfeasible);
    let is_optimal = status.contains(StatusFlag::ProvenOptimal);

    let RelaxationExpectation::Optimal(objective) = expected else {
        context.check_flag("proven infeasible", true, is_infeasible)?;
        context.check_flag("proven optimal", false, is_optimal)?;

        return Ok(());
    };

    context.check_flag("proven infeasible", false, is_infeasible)?;
    context.check_flag("proven optimal", true, is_optimal)?;
    context.check_value(
        "objective value",
        Tolerance::Bound,
        Relation::Equal,
        engine.objective_value(),
        objective,
    )?;

    let solution = engine
        .column_solution()
        .ok_or_else(|| context.mismatch("solution", "an optimal relaxation solution", "none"))?;

    check_solution(
        model,
        engine.objective_value(),
        solution,
        Integrality::Relaxed,
        context,
    )
}
