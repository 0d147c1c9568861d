//! The externally supplied knowledge about an instance, against which the solver is checked.

use std::fmt::Display;

use thiserror::Error;

use crate::model::ObjectiveSense;

/// The token which denotes that a phase is infeasible.
const INFEASIBLE_TOKEN: &str = "inf";

/// The token which denotes that the optimal objective value is known.
const OPTIMAL_TOKEN: &str = "True";

/// What should happen when the continuous relaxation is solved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RelaxationExpectation {
    Infeasible,
    /// The relaxation is solved to optimality with this objective value.
    Optimal(f64),
}

/// What is known about the integer optimum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MipExpectation {
    Infeasible,
    /// The exact optimal objective value is known.
    Optimal(f64),
    /// Only a valid dual bound is known, which may not be tight.
    Bounded(f64),
}

impl MipExpectation {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, MipExpectation::Infeasible)
    }

    pub fn is_optimality_known(&self) -> bool {
        matches!(self, MipExpectation::Optimal(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expectation {
    pub relaxation: RelaxationExpectation,
    pub mip: MipExpectation,
    /// Overrides the objective sense reported by the solver when checking a dual bound.
    pub sense: Option<ObjectiveSense>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ExpectationError {
    #[error("{argument} should be a finite number or 'inf', got '{value}'")]
    NotANumber {
        argument: &'static str,
        value: String,
    },
}

impl Expectation {
    /// Interpret the expectation as it is given on the command line.
    ///
    /// `relaxation` and `mip` are either a number or the case-insensitive token `inf`. `optimal`
    /// marks `mip` as the exact optimum if it case-insensitively equals `True`; otherwise
    /// `best_bound` is used as a valid dual bound. Tokens which are not needed are not parsed.
    pub fn from_tokens(
        relaxation: &str,
        best_bound: &str,
        mip: &str,
        optimal: &str,
    ) -> Result<Expectation, ExpectationError> {
        let relaxation = if is_infeasible_token(relaxation) {
            RelaxationExpectation::Infeasible
        } else {
            RelaxationExpectation::Optimal(parse_value("relaxation objective", relaxation)?)
        };

        let mip = if is_infeasible_token(mip) {
            MipExpectation::Infeasible
        } else if optimal.trim().eq_ignore_ascii_case(OPTIMAL_TOKEN) {
            MipExpectation::Optimal(parse_value("mip objective", mip)?)
        } else {
            MipExpectation::Bounded(parse_value("best bound", best_bound)?)
        };

        Ok(Expectation {
            relaxation,
            mip,
            sense: None,
        })
    }

    pub fn with_sense(self, sense: Option<ObjectiveSense>) -> Expectation {
        Expectation { sense, ..self }
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.relaxation {
            RelaxationExpectation::Infeasible => write!(f, "relaxation infeasible")?,
            RelaxationExpectation::Optimal(value) => write!(f, "relaxation optimum {value}")?,
        }

        match self.mip {
            MipExpectation::Infeasible => write!(f, ", mip infeasible"),
            MipExpectation::Optimal(value) => write!(f, ", mip optimum {value}"),
            MipExpectation::Bounded(value) => write!(f, ", mip bound {value}"),
        }
    }
}

fn is_infeasible_token(token: &str) -> bool {
    token.trim().eq_ignore_ascii_case(INFEASIBLE_TOKEN)
}

fn parse_value(argument: &'static str, token: &str) -> Result<f64, ExpectationError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExpectationError::NotANumber {
            argument,
            value: token.to_owned(),
        })
}
