//! Runs `mipcheck` over a catalog of instances, either by printing the invocations of every batch
//! for an external job runner or by verifying a batch of recorded transcripts in-process.

mod catalog;
mod report;

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use log::error;
use log::info;
use log::warn;
use mipcheck::checking::report as report_failure;
use mipcheck::engine::TranscriptEngine;
use mipcheck::orchestrator::verify_instance;
use mipcheck::orchestrator::InconclusivePolicy;
use mipcheck::orchestrator::Limits;
use mipcheck::orchestrator::RunOptions;
use mipcheck::orchestrator::RunOutcome;
use mipcheck::orchestrator::VerificationError;

use crate::catalog::Entry;
use crate::report::CatalogReport;
use crate::report::InstanceStatus;

#[derive(Debug, Parser)]
#[command(name = "mipcheck-catalog")]
struct Cli {
    /// The catalog, one `name,relaxObj,bestBound,mipBound,optimal` line per instance.
    catalog: PathBuf,

    /// The directory holding the instance transcripts.
    #[arg(long, default_value = "instances")]
    instances_dir: PathBuf,

    #[arg(long, default_value_t = catalog::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Shuffle the catalog before splitting it into batches.
    #[arg(long)]
    shuffle: bool,

    /// The seed of the shuffle. Without it every shuffle differs.
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the `mipcheck` invocations of every batch.
    Plan {
        /// The program the invocations start with.
        #[arg(long, default_value = "mipcheck")]
        program: String,
    },

    /// Verify the transcripts of the catalog.
    Run {
        /// Only verify this batch, counting from zero.
        #[arg(long)]
        batch: Option<usize>,

        /// Stop at the first instance which fails.
        #[arg(long)]
        fail_fast: bool,

        /// Write a JSON summary of the run to this file.
        #[arg(long)]
        json_report: Option<PathBuf>,

        #[arg(long, default_value_t = Limits::default().max_nodes)]
        max_nodes: i32,

        #[arg(long, default_value_t = Limits::default().time_limit)]
        time_limit: f64,

        #[arg(long, value_enum, default_value_t)]
        inconclusive: InconclusivePolicy,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    mipcheck::logging::configure(cli.verbose, "%% ");

    let text = fs::read_to_string(&cli.catalog)
        .with_context(|| format!("Failed to read catalog {}", cli.catalog.display()))?;
    let mut entries = catalog::parse(&text)?;

    if cli.shuffle {
        catalog::shuffle(&mut entries, cli.seed);
    }

    let batches = catalog::batches(&entries, cli.batch_size)?;

    match cli.command {
        Command::Plan { program } => {
            plan(&batches, &program, &cli.instances_dir);
            Ok(ExitCode::SUCCESS)
        }

        Command::Run {
            batch,
            fail_fast,
            json_report,
            max_nodes,
            time_limit,
            inconclusive,
        } => {
            let selected: Vec<&Entry> = match batch {
                Some(index) => batches
                    .get(index)
                    .with_context(|| {
                        format!("Batch {index} does not exist, there are {}", batches.len())
                    })?
                    .iter()
                    .collect(),
                None => entries.iter().collect(),
            };

            let options = RunOptions {
                limits: Limits {
                    max_nodes,
                    time_limit,
                },
                inconclusive,
            };

            let interrupted = Arc::new(AtomicBool::new(false));
            let _ = signal_hook::flag::register(
                signal_hook::consts::SIGINT,
                Arc::clone(&interrupted),
            )?;

            let mut report = CatalogReport::new(&cli.catalog, batch);
            run(
                &selected,
                &cli.instances_dir,
                &options,
                fail_fast,
                &interrupted,
                &mut report,
            );

            info!(
                "{} passed, {} inconclusive, {} failed of {} instances.",
                report.passed,
                report.inconclusive,
                report.failed,
                selected.len()
            );

            if let Some(path) = json_report {
                report.write(&path)?;
            }

            if report.has_failures() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn plan(batches: &[&[Entry]], program: &str, instances_dir: &Path) {
    for (index, batch) in batches.iter().enumerate() {
        println!("# batch {index}");

        for entry in batch.iter() {
            println!("{program} {}", entry.arguments(instances_dir));
        }
    }
}

fn run(
    entries: &[&Entry],
    instances_dir: &Path,
    options: &RunOptions,
    fail_fast: bool,
    interrupted: &AtomicBool,
    report: &mut CatalogReport,
) {
    for entry in entries {
        if interrupted.load(Ordering::Relaxed) {
            warn!("Interrupted, skipping the remaining instances.");
            report.interrupted = true;
            break;
        }

        info!("Verifying {}", entry.name);
        let (status, message) = verify_entry(entry, instances_dir, options);
        report.record(&entry.name, status, message);

        if fail_fast && status == InstanceStatus::Failed {
            warn!("Stopping after the first failure.");
            break;
        }
    }
}

fn verify_entry(
    entry: &Entry,
    instances_dir: &Path,
    options: &RunOptions,
) -> (InstanceStatus, Option<String>) {
    let expectation = match entry.expectation() {
        Ok(expectation) => expectation,
        Err(error) => {
            error!("{}: {error}", entry.name);
            return (InstanceStatus::Failed, Some(error.to_string()));
        }
    };

    let path = entry.instance_path(instances_dir);

    match verify_instance(TranscriptEngine::default(), &path, &expectation, options) {
        Ok(RunOutcome::Passed) => (InstanceStatus::Passed, None),
        Ok(RunOutcome::Inconclusive) => (InstanceStatus::Inconclusive, None),
        Err(VerificationError::Failure(failure)) => {
            report_failure(&failure);
            (InstanceStatus::Failed, Some(failure.to_string()))
        }
        Err(error) => {
            error!("{}: {error:#}", entry.name);
            (InstanceStatus::Failed, Some(format!("{error:#}")))
        }
    }
}
