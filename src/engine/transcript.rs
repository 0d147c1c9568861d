use std::path::Path;

use enumset::EnumSet;
use log::debug;
use log::warn;
use mip_transcript::ColumnRecord;
use mip_transcript::PhaseRecord;
use mip_transcript::RowRecord;
use mip_transcript::Sense;
use mip_transcript::Transcript;

use super::DblParam;
use super::EngineError;
use super::IntParam;
use super::SolverEngine;
use super::StatusFlag;
use crate::model::Column;
use crate::model::ObjectiveSense;
use crate::model::Row;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Unsolved,
    Relaxation,
    Mip,
}

/// Replays a [`Transcript`] recorded from a real solver run. The solve calls select which
/// recorded phase the status, objective and solution queries answer from.
#[derive(Debug, Default)]
pub struct TranscriptEngine {
    transcript: Option<Transcript>,
    phase: Phase,
    max_nodes: Option<i32>,
    time_limit: Option<f64>,
}

impl TranscriptEngine {
    /// Create an engine with an already loaded transcript.
    pub fn from_transcript(transcript: Transcript) -> TranscriptEngine {
        TranscriptEngine {
            transcript: Some(transcript),
            ..Default::default()
        }
    }

    fn loaded(&self) -> Result<&Transcript, EngineError> {
        self.transcript.as_ref().ok_or(EngineError::NotLoaded)
    }

    fn active_phase(&self) -> Option<&PhaseRecord> {
        let transcript = self.transcript.as_ref()?;

        match self.phase {
            Phase::Unsolved => None,
            Phase::Relaxation => Some(&transcript.relaxation),
            Phase::Mip => Some(&transcript.mip),
        }
    }

    fn columns(&self) -> &[ColumnRecord] {
        self.transcript
            .as_ref()
            .map(|transcript| transcript.columns.as_slice())
            .unwrap_or_default()
    }

    fn rows(&self) -> &[RowRecord] {
        self.transcript
            .as_ref()
            .map(|transcript| transcript.rows.as_slice())
            .unwrap_or_default()
    }

    /// Warn when the limits the integer solve was recorded with differ from the configured ones.
    fn compare_limits(&self, transcript: &Transcript) {
        let Some(recorded) = transcript.limits else {
            return;
        };

        if let Some(max_nodes) = self.max_nodes.filter(|&nodes| nodes != recorded.max_nodes) {
            warn!(
                "The transcript was recorded with a node limit of {}, but {max_nodes} is configured.",
                recorded.max_nodes
            );
        }

        if let Some(time_limit) = self.time_limit.filter(|&time| time != recorded.time_limit) {
            warn!(
                "The transcript was recorded with a time limit of {}s, but {time_limit}s is configured.",
                recorded.time_limit
            );
        }
    }
}

impl SolverEngine for TranscriptEngine {
    fn build_info(&self) -> String {
        match &self.transcript {
            Some(transcript) => format!("transcript replay of {}", transcript.solver),
            None => "transcript replay".to_owned(),
        }
    }

    fn read_instance(&mut self, path: &Path) -> Result<(), EngineError> {
        let transcript = Transcript::from_path(path).map_err(|error| EngineError::Read {
            path: path.to_path_buf(),
            source: Box::new(error),
        })?;

        debug!(
            "Read transcript of {} with {} columns and {} rows",
            transcript.solver,
            transcript.columns.len(),
            transcript.rows.len()
        );

        self.transcript = Some(transcript);
        self.phase = Phase::Unsolved;

        Ok(())
    }

    fn solve_relaxation(&mut self) -> Result<(), EngineError> {
        let _ = self.loaded()?;
        self.phase = Phase::Relaxation;

        Ok(())
    }

    fn solve(&mut self) -> Result<(), EngineError> {
        self.compare_limits(self.loaded()?);
        self.phase = Phase::Mip;

        Ok(())
    }

    fn set_int_param(&mut self, param: IntParam, value: i32) {
        match param {
            IntParam::MaxNodes => self.max_nodes = Some(value),
        }
    }

    fn set_dbl_param(&mut self, param: DblParam, value: f64) {
        match param {
            DblParam::TimeLimit => self.time_limit = Some(value),
        }
    }

    fn status(&self) -> EnumSet<StatusFlag> {
        let Some(phase) = self.active_phase() else {
            return EnumSet::empty();
        };

        let mut status = EnumSet::empty();
        if phase.proven_infeasible {
            let _ = status.insert(StatusFlag::ProvenInfeasible);
        }
        if phase.proven_optimal {
            let _ = status.insert(StatusFlag::ProvenOptimal);
        }
        if phase.abandoned {
            let _ = status.insert(StatusFlag::Abandoned);
        }

        status
    }

    /// The recorded objective value, or `NaN` if none was recorded. A `NaN` never passes a
    /// comparison.
    fn objective_value(&self) -> f64 {
        self.active_phase()
            .and_then(|phase| phase.objective)
            .unwrap_or(f64::NAN)
    }

    fn objective_sense(&self) -> ObjectiveSense {
        match self.transcript.as_ref().map(|transcript| transcript.sense) {
            Some(Sense::Maximize) => ObjectiveSense::Maximize,
            Some(Sense::Minimize) | None => ObjectiveSense::Minimize,
        }
    }

    fn number_saved_solutions(&self) -> usize {
        self.column_solution().map_or(0, |_| 1)
    }

    fn column_solution(&self) -> Option<&[f64]> {
        self.active_phase()?.solution.as_deref()
    }

    fn num_cols(&self) -> usize {
        self.columns().len()
    }

    fn num_rows(&self) -> usize {
        self.rows().len()
    }

    fn column(&self, index: usize) -> Column {
        let record = &self.columns()[index];

        Column {
            name: record.name.clone(),
            objective: record.objective,
            is_integer: record.integer,
        }
    }

    fn row(&self, index: usize) -> Row {
        let record = &self.rows()[index];
        let name = record.name.clone();
        let coefficients = record.coefficients.clone();

        match record.sense {
            mip_transcript::RowSense::LessEqual => Row::less_equal(name, coefficients, record.rhs),
            mip_transcript::RowSense::GreaterEqual => {
                Row::greater_equal(name, coefficients, record.rhs)
            }
            mip_transcript::RowSense::Equal => Row::equal(name, coefficients, record.rhs),
            mip_transcript::RowSense::Range => Row::range(
                name,
                coefficients,
                record.lower.unwrap_or(f64::NEG_INFINITY),
                record.upper.unwrap_or(f64::INFINITY),
            ),
        }
    }

    fn release(&mut self) {
        if let Some(transcript) = self.transcript.take() {
            debug!("Released transcript of {}", transcript.solver);
        }
        self.phase = Phase::Unsolved;
    }
}
