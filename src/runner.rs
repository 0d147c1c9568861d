use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use log::info;

use crate::checking::report;
use crate::engine::SolverEngine;
use crate::expectation::Expectation;
use crate::logging::configure;
use crate::model::ObjectiveSense;
use crate::orchestrator::verify_instance;
use crate::orchestrator::InconclusivePolicy;
use crate::orchestrator::Limits;
use crate::orchestrator::RunOptions;
use crate::orchestrator::RunOutcome;
use crate::orchestrator::VerificationError;

/// The exit code of a run with a failed check or a malformed invocation.
const FAILURE: u8 = 1;

/// Checks the results of a MIP solver on an instance against what is known about it.
#[derive(Debug, clap::Parser)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// The instance to solve.
    pub instance: PathBuf,

    /// The optimal objective value of the linear programming relaxation, or `inf` if the
    /// relaxation is infeasible.
    pub relax_obj: String,

    /// A valid bound on the optimal objective value. Only used when `optimal` is not `True`.
    pub best_bound: String,

    /// The optimal objective value, or `inf` if the instance is infeasible.
    pub mip_bound: String,

    /// `True` if `mip_bound` is known to be the optimal objective value.
    pub optimal: String,

    /// The maximum number of nodes of the integer solve.
    #[arg(long, default_value_t = Limits::default().max_nodes)]
    pub max_nodes: i32,

    /// The time limit of the integer solve, in seconds.
    #[arg(long, default_value_t = Limits::default().time_limit)]
    pub time_limit: f64,

    /// What to conclude when the integer solve finds neither a solution nor infeasibility.
    #[arg(long, value_enum, default_value_t)]
    pub inconclusive: InconclusivePolicy,

    /// Use this objective sense when checking a bound, instead of the one of the solver.
    #[arg(long, value_enum)]
    pub sense: Option<ObjectiveSense>,

    /// Log debug information.
    #[arg(short, long)]
    pub verbose: bool,
}

#[macro_export]
macro_rules! entry_point {
    (engine = $engine:ty) => {
        fn main() -> std::process::ExitCode {
            $crate::runner::run::<$engine>()
        }
    };
}

/// Parse the command line and verify a freshly created engine against it.
pub fn run<Engine>() -> ExitCode
where
    Engine: SolverEngine + Default,
{
    run_from(Engine::default(), std::env::args_os())
}

/// Verify `engine` against the command line `args`, the first of which is the program name.
pub fn run_from<Engine, I, T>(engine: Engine, args: I) -> ExitCode
where
    Engine: SolverEngine,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    use clap::Parser;

    let args = match Cli::try_parse_from(args) {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();

            // Help and version requests are not errors.
            return if error.use_stderr() {
                ExitCode::from(FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    configure(args.verbose, "%% ");

    match execute(engine, args) {
        Ok(outcome) => {
            info!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            match error.downcast_ref::<VerificationError>() {
                Some(VerificationError::Failure(failure)) => report(failure),
                _ => {
                    let _ = std::io::stdout().flush();
                    eprintln!("Error: {error:#}");
                }
            }

            ExitCode::from(FAILURE)
        }
    }
}

/// Verify `engine` on the instance and expectation given by `args`.
pub fn execute<Engine: SolverEngine>(engine: Engine, args: Cli) -> anyhow::Result<RunOutcome> {
    let expectation = Expectation::from_tokens(
        &args.relax_obj,
        &args.best_bound,
        &args.mip_bound,
        &args.optimal,
    )
    .context("Invalid expectation")?
    .with_sense(args.sense);

    let options = RunOptions {
        limits: Limits {
            max_nodes: args.max_nodes,
            time_limit: args.time_limit,
        },
        inconclusive: args.inconclusive,
    };

    let outcome = verify_instance(engine, &args.instance, &expectation, &options)
        .with_context(|| format!("Verification of {} failed", args.instance.display()))?;

    Ok(outcome)
}
