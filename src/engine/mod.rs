//! The boundary between the verification and the solver being verified.
//!
//! Everything the checks need to know about a solver goes through [`SolverEngine`]. The engine is
//! owned by a [`SolverHandle`] for the duration of a run, which releases it on every exit path.

use std::ops::Deref;
use std::ops::DerefMut;
use std::path::Path;
use std::path::PathBuf;

use enumset::EnumSet;
use enumset::EnumSetType;
use log::debug;
use thiserror::Error;

use crate::model::Column;
use crate::model::ObjectiveSense;
use crate::model::Row;

#[cfg(test)]
pub(crate) mod test_helper;
mod transcript;

pub use transcript::TranscriptEngine;

/// The status flags a solver reports after a solve call.
#[derive(Debug, EnumSetType)]
pub enum StatusFlag {
    ProvenInfeasible,
    ProvenOptimal,
    /// The solver stopped because of an internal (numerical) failure, rather than because it hit
    /// a resource limit.
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntParam {
    /// The maximum number of branch-and-bound nodes.
    MaxNodes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DblParam {
    /// The wall-clock budget of a solve call, in seconds.
    TimeLimit,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no instance has been loaded")]
    NotLoaded,
    #[error("failed to read instance {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("the solver failed: {0}")]
    Solver(String),
}

/// The operations the verification needs from an optimisation solver.
///
/// Solution and status queries refer to the most recent solve call.
pub trait SolverEngine {
    /// A description of the solver build, logged at the start of a run.
    fn build_info(&self) -> String;

    fn read_instance(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Solve the continuous relaxation of the loaded instance.
    fn solve_relaxation(&mut self) -> Result<(), EngineError>;

    /// Solve the loaded instance with integrality, within the configured limits.
    fn solve(&mut self) -> Result<(), EngineError>;

    fn set_int_param(&mut self, param: IntParam, value: i32);

    fn set_dbl_param(&mut self, param: DblParam, value: f64);

    fn status(&self) -> EnumSet<StatusFlag>;

    fn objective_value(&self) -> f64;

    fn objective_sense(&self) -> ObjectiveSense;

    /// The number of feasible solutions found during the last solve call.
    fn number_saved_solutions(&self) -> usize;

    /// The best solution of the last solve call, indexed by column.
    fn column_solution(&self) -> Option<&[f64]>;

    fn num_cols(&self) -> usize;

    fn num_rows(&self) -> usize;

    /// The metadata of column `index`, where `index < self.num_cols()`.
    fn column(&self, index: usize) -> Column;

    /// The metadata of row `index`, where `index < self.num_rows()`.
    fn row(&self, index: usize) -> Row;

    /// Free every resource held for the loaded instance.
    fn release(&mut self);
}

/// Exclusive ownership of a [`SolverEngine`]. When the handle is dropped, the engine is released.
#[derive(Debug)]
pub struct SolverHandle<Engine: SolverEngine> {
    engine: Engine,
}

impl<Engine: SolverEngine> SolverHandle<Engine> {
    pub fn new(engine: Engine) -> Self {
        SolverHandle { engine }
    }
}

impl<Engine: SolverEngine> Deref for SolverHandle<Engine> {
    type Target = Engine;

    fn deref(&self) -> &Engine {
        &self.engine
    }
}

impl<Engine: SolverEngine> DerefMut for SolverHandle<Engine> {
    fn deref_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}

impl<Engine: SolverEngine> Drop for SolverHandle<Engine> {
    fn drop(&mut self) {
        debug!("Releasing the solver");
        self.engine.release();
    }
}
