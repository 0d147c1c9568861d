//! The checks made on the results of a solver.
//!
//! Every check reads the [`DiagnosticContext`] only to describe itself when it fails, and the
//! first failing check ends the verification with a [`VerificationFailure`].

mod context;
mod failure;
mod mip;
mod relaxation;
mod solution;

pub use context::DiagnosticContext;
pub use failure::report;
pub use failure::Banner;
pub use failure::Mismatch;
pub use failure::VerificationFailure;
pub use mip::verify_mip;
pub use mip::MipVerdict;
pub use relaxation::verify_relaxation;
pub use solution::check_solution;
pub use solution::Integrality;
