use std::fmt::Display;
use std::panic::Location;

use super::failure::Mismatch;
use super::failure::VerificationFailure;
use crate::tolerance::Relation;
use crate::tolerance::Tolerance;

/// Describes where the verification currently is. It is only read when a check fails, so that
/// the failure can say which instance, step and element it concerns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticContext {
    instance: String,
    step: String,
    element: String,
}

impl DiagnosticContext {
    pub fn new(instance: impl Into<String>) -> DiagnosticContext {
        DiagnosticContext {
            instance: instance.into(),
            step: String::new(),
            element: String::new(),
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    /// Set the step of the test that is being executed. The element is left untouched.
    pub fn set_step(&mut self, step: impl Into<String>) {
        self.step = step.into();
    }

    pub fn set_element(&mut self, element: impl Display) {
        self.element = element.to_string();
    }

    pub fn clear_element(&mut self) {
        self.element.clear();
    }

    /// Check that a discrete property of the solver or the expectation matches exactly.
    #[track_caller]
    pub fn check_flag(
        &self,
        element: &'static str,
        expected: bool,
        observed: bool,
    ) -> Result<(), VerificationFailure> {
        if expected == observed {
            return Ok(());
        }

        Err(self.failure(element, Mismatch::Flag { expected, observed }))
    }

    /// Check that `observed` relates to `expected` through `relation` within `tolerance`.
    #[track_caller]
    pub fn check_value(
        &self,
        element: &'static str,
        tolerance: Tolerance,
        relation: Relation,
        observed: f64,
        expected: f64,
    ) -> Result<(), VerificationFailure> {
        let comparison = tolerance.compare(relation, observed, expected);
        if comparison.passed {
            return Ok(());
        }

        Err(self.failure(
            element,
            Mismatch::Value {
                tolerance,
                relation,
                expected,
                observed,
                difference: comparison.difference,
            },
        ))
    }

    /// Create a failure for a structural property that does not hold.
    #[track_caller]
    pub fn mismatch(
        &self,
        element: &'static str,
        expected: impl Display,
        observed: impl Display,
    ) -> VerificationFailure {
        self.failure(
            element,
            Mismatch::Structure {
                expected: expected.to_string(),
                observed: observed.to_string(),
            },
        )
    }

    #[track_caller]
    fn failure(&self, element: &'static str, mismatch: Mismatch) -> VerificationFailure {
        VerificationFailure {
            context: self.clone(),
            location: Location::caller(),
            element,
            mismatch,
        }
    }
}
