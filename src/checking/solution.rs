use super::context::DiagnosticContext;
use super::failure::VerificationFailure;
use crate::model::Model;
use crate::model::RowSense;
use crate::tolerance::Relation;
use crate::tolerance::Tolerance;

/// Whether integer columns must take integral values in the checked solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrality {
    /// The solution comes from the continuous relaxation.
    Relaxed,
    Enforced,
}

/// Verify that `solution` is feasible for `model` and that `reported_objective` is its objective
/// value. Only the first violation is reported.
///
/// The checks, in order:
/// 1. With [`Integrality::Enforced`], every integer column must round to an integer.
/// 2. The objective value recomputed from the solution must match the reported one.
/// 3. Every row must be satisfied by the activity recomputed from the solution.
pub fn check_solution(
    model: &Model,
    reported_objective: f64,
    solution: &[f64],
    integrality: Integrality,
    context: &mut DiagnosticContext,
) -> Result<(), VerificationFailure> {
    if solution.len() != model.columns().len() {
        context.set_step("checking dimension of the solution");
        return Err(context.mismatch(
            "solution length",
            model.columns().len(),
            solution.len(),
        ));
    }

    if integrality == Integrality::Enforced {
        context.set_step("checking integrality of variables");

        for (index, (column, &value)) in model.columns().iter().zip(solution).enumerate() {
            if !column.is_integer {
                continue;
            }

            context.set_element(format_args!("variable {} ({index})", column.name));
            context.check_value(
                "solution value",
                Tolerance::Continuous,
                Relation::Equal,
                value,
                (value + 0.5).floor(),
            )?;
        }
    }
    context.clear_element();

    context.set_step("checking computed objective value");
    context.check_value(
        "objective value",
        Tolerance::Bound,
        Relation::Equal,
        reported_objective,
        model.objective_value(solution),
    )?;

    context.set_step("testing if solution satisfies all problem constraints");
    for (index, row) in model.rows().iter().enumerate() {
        context.set_element(format_args!("constraint {} ({index})", row.name));

        let lhs = row.activity(solution);
        let (tolerance, element) = (Tolerance::Continuous, "lhs");

        match row.sense {
            RowSense::LessEqual => {
                context.check_value(element, tolerance, Relation::AtMost, lhs, row.rhs)?
            }
            RowSense::GreaterEqual => {
                context.check_value(element, tolerance, Relation::AtLeast, lhs, row.rhs)?
            }
            RowSense::Equal => {
                context.check_value(element, tolerance, Relation::Equal, lhs, row.rhs)?
            }
            RowSense::Range => {
                context.check_value(element, tolerance, Relation::AtMost, lhs, row.upper)?;
                context.check_value(element, tolerance, Relation::AtLeast, lhs, row.lower)?;
            }
        }
    }
    context.clear_element();

    // TODO: check special ordered sets once the model carries them.

    Ok(())
}
