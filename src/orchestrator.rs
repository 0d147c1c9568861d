//! Drives a solver through both solve phases of an instance and verifies each of them.

use std::fmt::Display;
use std::path::Path;

use clap::ValueEnum;
use log::info;
use log::warn;
use thiserror::Error;

use crate::checking::verify_mip;
use crate::checking::verify_relaxation;
use crate::checking::DiagnosticContext;
use crate::checking::MipVerdict;
use crate::checking::VerificationFailure;
use crate::engine::DblParam;
use crate::engine::EngineError;
use crate::engine::IntParam;
use crate::engine::SolverEngine;
use crate::engine::SolverHandle;
use crate::expectation::Expectation;
use crate::model::Model;

/// The resource limits of the integer solve. They bound the run time of a verification, which
/// makes termination without a proof of optimality a legitimate outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub max_nodes: i32,
    /// In seconds.
    pub time_limit: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_nodes: 1000,
            time_limit: 300.0,
        }
    }
}

/// How to treat an integer solve which produced neither a solution nor a proof of
/// infeasibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InconclusivePolicy {
    /// Nothing was disproven, so the run passes with an inconclusive outcome.
    #[default]
    Accept,
    /// Treat the run as failed.
    Reject,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunOptions {
    pub limits: Limits,
    pub inconclusive: InconclusivePolicy,
}

/// The outcome of a run in which no check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Passed,
    /// The integer solve hit its limits before producing anything that could be checked.
    Inconclusive,
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Passed => write!(f, "PASSED"),
            RunOutcome::Inconclusive => write!(f, "INCONCLUSIVE"),
        }
    }
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Failure(#[from] VerificationFailure),
    #[error("the solver engine failed while {step}")]
    Engine {
        step: String,
        #[source]
        source: EngineError,
    },
}

impl VerificationError {
    fn engine(context: &DiagnosticContext, source: EngineError) -> VerificationError {
        VerificationError::Engine {
            step: context.step().to_owned(),
            source,
        }
    }
}

/// Verify `engine` on the instance at `instance`: solve the relaxation and check it, then solve
/// with integrality under the configured limits and check that.
///
/// The first failing check ends the run. The engine is released before returning, whatever the
/// outcome.
pub fn verify_instance<Engine: SolverEngine>(
    engine: Engine,
    instance: &Path,
    expectation: &Expectation,
    options: &RunOptions,
) -> Result<RunOutcome, VerificationError> {
    let mut solver = SolverHandle::new(engine);
    let mut context = DiagnosticContext::new(instance_name(instance));

    info!("Starting test with {}", solver.build_info());
    info!("Expecting {expectation}");

    context.set_step("reading instance");
    solver
        .read_instance(instance)
        .map_err(|error| VerificationError::engine(&context, error))?;
    let model = Model::from_engine(&*solver).map_err(|error| {
        context.mismatch("model", "rows over distinct existing columns", error)
    })?;

    context.set_step("solving linear programming relaxation");
    solver
        .solve_relaxation()
        .map_err(|error| VerificationError::engine(&context, error))?;
    verify_relaxation(&*solver, &model, expectation.relaxation, &mut context)?;

    solver.set_int_param(IntParam::MaxNodes, options.limits.max_nodes);
    solver.set_dbl_param(DblParam::TimeLimit, options.limits.time_limit);

    context.set_step("integer optimization");
    solver
        .solve()
        .map_err(|error| VerificationError::engine(&context, error))?;

    match verify_mip(&*solver, &model, expectation, &mut context)? {
        MipVerdict::Inconclusive => match options.inconclusive {
            InconclusivePolicy::Accept => {
                warn!(
                    "No solution and no proof of infeasibility within {} nodes and {}s.",
                    options.limits.max_nodes, options.limits.time_limit
                );
                Ok(RunOutcome::Inconclusive)
            }
            InconclusivePolicy::Reject => Err(context
                .mismatch(
                    "integer optimization outcome",
                    "a solution or a proof of infeasibility",
                    "neither within the resource limits",
                )
                .into()),
        },
        MipVerdict::Infeasible => {
            info!("The instance was proven infeasible.");
            Ok(RunOutcome::Passed)
        }
        MipVerdict::Feasible { proven_optimal } => {
            info!(
                "Found a valid solution with objective value {}{}.",
                solver.objective_value(),
                if proven_optimal { ", proven optimal" } else { "" }
            );
            Ok(RunOutcome::Passed)
        }
    }
}

/// Name the instance at `path` by what follows its `instances/` directory, without the file
/// extension.
pub fn instance_name(path: &Path) -> String {
    const INSTANCES_DIRECTORY: &str = "instances/";
    const EXTENSIONS: [&str; 3] = [".mps.gz", ".mps", ".json"];

    let path = path.to_string_lossy();

    let name = match path.rfind(INSTANCES_DIRECTORY) {
        Some(start) => &path[start + INSTANCES_DIRECTORY.len()..],
        None => path.rsplit('/').next().unwrap_or_default(),
    };

    EXTENSIONS
        .iter()
        .find_map(|extension| name.strip_suffix(extension))
        .unwrap_or(name)
        .to_owned()
}
