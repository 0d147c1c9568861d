//! Numeric comparison predicates used by every check in the crate.
//!
//! There are two families of comparators. [`Tolerance::Bound`] is used when a value reported by
//! the solver is compared against an externally supplied expectation, which may live on a
//! different scale; its slack grows with the magnitude of the expected value.
//! [`Tolerance::Continuous`] is used when the compared quantities are recomputed from the
//! solution itself, and only allows the fixed absolute slack.
//!
//! The tolerances are larger than the default tolerances of solvers. They focus on significant
//! errors, which are the important ones and the easiest to debug.

use std::fmt::Display;

/// Absolute tolerance shared by both comparator families.
pub const ABS_TOL: f64 = 1e-4;

/// Relative tolerance applied by [`Tolerance::Bound`].
pub const REL_TOL: f64 = 0.01;

/// The relation that must hold between an observed value and its expected counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// `observed >= expected`
    AtLeast,
    /// `observed <= expected`
    AtMost,
    /// `observed == expected`
    Equal,
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::AtLeast => write!(f, ">="),
            Relation::AtMost => write!(f, "<="),
            Relation::Equal => write!(f, "=="),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tolerance {
    /// `max(ABS_TOL, |expected| * REL_TOL)`
    Bound,
    /// `ABS_TOL`
    Continuous,
}

/// The result of a single comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    pub passed: bool,
    /// `observed - expected`
    pub difference: f64,
}

impl Tolerance {
    /// The slack allowed around `expected`.
    pub fn slack(self, expected: f64) -> f64 {
        match self {
            Tolerance::Bound => ABS_TOL.max((expected * REL_TOL).abs()),
            Tolerance::Continuous => ABS_TOL,
        }
    }

    /// Test whether `observed` relates to `expected` through `relation`, within the slack of
    /// this tolerance. The boundaries of the tolerance window are accepted.
    ///
    /// A `NaN` on either side never passes.
    pub fn compare(self, relation: Relation, observed: f64, expected: f64) -> Comparison {
        let slack = self.slack(expected);

        let passed = match relation {
            Relation::AtLeast => observed >= expected - slack,
            Relation::AtMost => observed <= expected + slack,
            Relation::Equal => observed >= expected - slack && observed <= expected + slack,
        };

        Comparison {
            passed,
            difference: observed - expected,
        }
    }
}
