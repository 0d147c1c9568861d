//! This crate contains the transcript format: a record of a mixed-integer programming solver run
//! on a single instance. A transcript holds the metadata of the instance (columns, rows and
//! objective sense) and what the solver reported after solving the continuous relaxation and
//! after solving with integrality.
//!
//! Transcripts are JSON documents. Read them with [`Transcript::from_path`] or
//! [`Transcript::read`], and write them with [`Transcript::write`].
mod records;

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

pub use records::*;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to access transcript")]
    Io(#[from] std::io::Error),
    #[error("malformed transcript")]
    Json(#[from] serde_json::Error),
    #[error("range row '{row}' needs both a lower and an upper bound")]
    MissingRangeBounds { row: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Identifies the solver and its build.
    pub solver: String,
    #[serde(default)]
    pub sense: Sense,
    pub columns: Vec<ColumnRecord>,
    #[serde(default)]
    pub rows: Vec<RowRecord>,
    pub relaxation: PhaseRecord,
    pub mip: PhaseRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

impl Transcript {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Transcript, TranscriptError> {
        let file = File::open(path)?;
        Transcript::read(BufReader::new(file))
    }

    pub fn read(reader: impl Read) -> Result<Transcript, TranscriptError> {
        let transcript: Transcript = serde_json::from_reader(reader)?;
        transcript.validate()?;

        Ok(transcript)
    }

    pub fn write(&self, writer: impl Write) -> Result<(), TranscriptError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), TranscriptError> {
        let incomplete_range = self.rows.iter().find(|row| {
            row.sense == RowSense::Range && (row.lower.is_none() || row.upper.is_none())
        });

        match incomplete_range {
            Some(row) => Err(TranscriptError::MissingRangeBounds {
                row: row.name.clone(),
            }),
            None => Ok(()),
        }
    }
}
