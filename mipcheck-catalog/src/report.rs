use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum InstanceStatus {
    Passed,
    Inconclusive,
    Failed,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceReport {
    pub(crate) name: String,
    pub(crate) status: InstanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

/// The summary of a catalog run.
#[derive(Debug, Default, Serialize)]
pub(crate) struct CatalogReport {
    pub(crate) catalog: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) batch: Option<usize>,
    pub(crate) interrupted: bool,
    pub(crate) passed: usize,
    pub(crate) inconclusive: usize,
    pub(crate) failed: usize,
    pub(crate) instances: Vec<InstanceReport>,
}

impl CatalogReport {
    pub(crate) fn new(catalog: &Path, batch: Option<usize>) -> CatalogReport {
        CatalogReport {
            catalog: catalog.display().to_string(),
            batch,
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, name: &str, status: InstanceStatus, message: Option<String>) {
        match status {
            InstanceStatus::Passed => self.passed += 1,
            InstanceStatus::Inconclusive => self.inconclusive += 1,
            InstanceStatus::Failed => self.failed += 1,
        }

        self.instances.push(InstanceReport {
            name: name.to_owned(),
            status,
            message,
        });
    }

    pub(crate) fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub(crate) fn write(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}
