use std::fmt::Display;
use std::io::Write;
use std::panic::Location;

use thiserror::Error;

use super::context::DiagnosticContext;
use crate::tolerance::Relation;
use crate::tolerance::Tolerance;

/// What was found to be different from what was expected.
#[derive(Clone, Debug, PartialEq)]
pub enum Mismatch {
    /// A discrete property did not match exactly.
    Flag { expected: bool, observed: bool },
    /// A numeric value was outside its tolerance window.
    Value {
        tolerance: Tolerance,
        relation: Relation,
        expected: f64,
        observed: f64,
        /// `observed - expected`
        difference: f64,
    },
    /// Any other property that does not hold, described textually.
    Structure { expected: String, observed: String },
}

/// The first check that did not hold during a verification run.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{element} does not match while {} ({location})", .context.step())]
pub struct VerificationFailure {
    /// A snapshot of the diagnostic context at the moment of failure.
    pub context: DiagnosticContext,
    /// The place in the source code where the failing check was made.
    pub location: &'static Location<'static>,
    pub element: &'static str,
    pub mismatch: Mismatch,
}

impl VerificationFailure {
    /// The full multi-line description of the failure.
    pub fn banner(&self) -> Banner<'_> {
        Banner(self)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Banner<'a>(&'a VerificationFailure);

impl Display for Banner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let failure = self.0;

        writeln!(f)?;
        writeln!(f, "************************* ERROR *************************")?;
        writeln!(f, "  instance name: {}", failure.context.instance())?;
        writeln!(f, "      test step: {}", failure.context.step())?;
        writeln!(f, "   test element: {}", failure.context.element())?;
        writeln!(f, "    source code: {}", failure.location)?;
        writeln!(f, "        element: {}", failure.element)?;

        match &failure.mismatch {
            Mismatch::Flag { expected, observed } => {
                writeln!(f, " expected value: {expected}")?;
                writeln!(f, "  current value: {observed}")?;
            }
            Mismatch::Value {
                tolerance,
                relation,
                expected,
                observed,
                difference,
            } => {
                match relation {
                    Relation::Equal => writeln!(f, " expected value: {expected}")?,
                    _ => writeln!(f, " expected value: {relation} {expected}")?,
                }
                writeln!(f, "  current value: {observed}")?;
                writeln!(f, "     difference: {difference}")?;
                writeln!(f, "      tolerance: {}", tolerance.slack(*expected))?;
            }
            Mismatch::Structure { expected, observed } => {
                writeln!(f, " expected value: {expected}")?;
                writeln!(f, "  current value: {observed}")?;
            }
        }

        writeln!(f, "*********************************************************")
    }
}

/// Write the banner of `failure` to standard error as one block. Both standard streams are
/// flushed before and after, so that the block does not interleave with regular output.
pub fn report(failure: &VerificationFailure) {
    let _ = std::io::stdout().flush();

    let mut stderr = std::io::stderr().lock();
    let _ = write!(stderr, "{}", failure.banner());
    let _ = stderr.flush();

    let _ = std::io::stdout().flush();
}
