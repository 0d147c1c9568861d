#![cfg(test)]
//! This module exposes an in-memory [`SolverEngine`] whose answers are scripted up front, which
//! allows setting up specific solver behaviour under which to test the verification.
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use enumset::EnumSet;

use super::DblParam;
use super::EngineError;
use super::IntParam;
use super::SolverEngine;
use super::StatusFlag;
use crate::model::Column;
use crate::model::Model;
use crate::model::ObjectiveSense;
use crate::model::Row;

/// What the scripted engine reports after one solve call.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedPhase {
    pub(crate) status: EnumSet<StatusFlag>,
    pub(crate) objective: f64,
    pub(crate) solution: Option<Vec<f64>>,
}

impl ScriptedPhase {
    pub(crate) fn infeasible() -> ScriptedPhase {
        ScriptedPhase {
            status: EnumSet::only(StatusFlag::ProvenInfeasible),
            objective: f64::NAN,
            solution: None,
        }
    }

    pub(crate) fn optimal(objective: f64, solution: Vec<f64>) -> ScriptedPhase {
        ScriptedPhase {
            status: EnumSet::only(StatusFlag::ProvenOptimal),
            objective,
            solution: Some(solution),
        }
    }

    /// A solution was found, but its optimality was not proven within the limits.
    pub(crate) fn feasible(objective: f64, solution: Vec<f64>) -> ScriptedPhase {
        ScriptedPhase {
            status: EnumSet::empty(),
            objective,
            solution: Some(solution),
        }
    }

    /// The limits were reached before anything was found.
    pub(crate) fn limit_reached() -> ScriptedPhase {
        ScriptedPhase {
            status: EnumSet::empty(),
            objective: f64::NAN,
            solution: None,
        }
    }

    pub(crate) fn with_status(mut self, flag: StatusFlag) -> ScriptedPhase {
        let _ = self.status.insert(flag);
        self
    }
}

/// The calls made on a [`ScriptedEngine`], in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    ReadInstance,
    SolveRelaxation,
    SetMaxNodes(i32),
    SetTimeLimit(f64),
    Solve,
    Release,
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedEngine {
    model: Model,
    relaxation: ScriptedPhase,
    mip: ScriptedPhase,
    active: Option<ScriptedPhase>,
    read_error: bool,
    /// Shared with the test, so the calls can be inspected after the engine is consumed.
    calls: Rc<RefCell<Vec<Call>>>,
}

impl ScriptedEngine {
    pub(crate) fn new(model: Model, relaxation: ScriptedPhase, mip: ScriptedPhase) -> Self {
        ScriptedEngine {
            model,
            relaxation,
            mip,
            ..Default::default()
        }
    }

    /// Make reading the instance fail.
    pub(crate) fn failing_read(mut self) -> Self {
        self.read_error = true;
        self
    }

    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<Call>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn active(&self) -> Option<&ScriptedPhase> {
        self.active.as_ref()
    }
}

impl SolverEngine for ScriptedEngine {
    fn build_info(&self) -> String {
        "scripted engine".to_owned()
    }

    fn read_instance(&mut self, path: &Path) -> Result<(), EngineError> {
        self.record(Call::ReadInstance);

        if self.read_error {
            return Err(EngineError::Read {
                path: path.to_path_buf(),
                source: "scripted read failure".into(),
            });
        }

        Ok(())
    }

    fn solve_relaxation(&mut self) -> Result<(), EngineError> {
        self.record(Call::SolveRelaxation);
        self.active = Some(self.relaxation.clone());
        Ok(())
    }

    fn solve(&mut self) -> Result<(), EngineError> {
        self.record(Call::Solve);
        self.active = Some(self.mip.clone());
        Ok(())
    }

    fn set_int_param(&mut self, param: IntParam, value: i32) {
        match param {
            IntParam::MaxNodes => self.record(Call::SetMaxNodes(value)),
        }
    }

    fn set_dbl_param(&mut self, param: DblParam, value: f64) {
        match param {
            DblParam::TimeLimit => self.record(Call::SetTimeLimit(value)),
        }
    }

    fn status(&self) -> EnumSet<StatusFlag> {
        self.active().map(|phase| phase.status).unwrap_or_default()
    }

    fn objective_value(&self) -> f64 {
        self.active().map_or(f64::NAN, |phase| phase.objective)
    }

    fn objective_sense(&self) -> ObjectiveSense {
        self.model.sense()
    }

    fn number_saved_solutions(&self) -> usize {
        self.column_solution().map_or(0, |_| 1)
    }

    fn column_solution(&self) -> Option<&[f64]> {
        self.active()?.solution.as_deref()
    }

    fn num_cols(&self) -> usize {
        self.model.columns().len()
    }

    fn num_rows(&self) -> usize {
        self.model.rows().len()
    }

    fn column(&self, index: usize) -> Column {
        self.model.columns()[index].clone()
    }

    fn row(&self, index: usize) -> Row {
        self.model.rows()[index].clone()
    }

    fn release(&mut self) {
        self.record(Call::Release);
        self.active = None;
    }
}
