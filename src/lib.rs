//! A correctness oracle for linear and mixed-integer programming solvers.
//!
//! Given an instance and what is known about it, the solver is run on the continuous relaxation
//! and on the integer problem. Instead of trusting the status the solver reports, its solutions
//! are checked against the instance: the objective value is recomputed, every constraint is
//! evaluated and integrality is tested. The reported objective values are then compared with the
//! known optimum or dual bound.
//!
//! The entry point is [`orchestrator::verify_instance`]. Solvers are plugged in through
//! [`engine::SolverEngine`].

pub mod checking;
pub mod engine;
pub mod expectation;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod runner;
pub mod tolerance;

#[cfg(test)]
mod tests;
