//! Command line front end.
//!
//! Machine-readable output (the status report or the printed config) goes to
//! one writer; the human preview goes to another, so the JSON stream stays
//! parseable.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use crate::config::ProcessConfig;
use crate::data::preview::preview;
use crate::pipeline::{process, ProcessOptions, ProcessOutcome, StatusReport};
use crate::store::FileStore;

/// Filter and priority-sort an event listing table.
#[derive(Debug, Parser)]
#[command(name = "agenda-sift", version)]
pub struct Cli {
    /// Table to process (.csv, .json or .parquet); the first row is the header.
    #[arg(required_unless_present = "print_config")]
    pub input: Option<PathBuf>,

    /// Write the result here instead of back into INPUT.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON processing config; defaults to the built-in agenda rules.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Process without writing anything back.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the first N rows of the result to stderr.
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ProcessConfig> {
        match &self.config {
            Some(path) => ProcessConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(ProcessConfig::default()),
        }
    }

    fn run(&self, config: &ProcessConfig, diag: &mut impl Write) -> Result<ProcessOutcome> {
        let input = self.input.as_deref().context("no input table given")?;
        let mut store = match &self.output {
            Some(output) => FileStore::new(input, output),
            None => FileStore::in_place(input),
        };
        let outcome = process(
            &mut store,
            config,
            ProcessOptions {
                dry_run: self.dry_run,
            },
        )?;

        if let Some(limit) = self.preview {
            writeln!(diag, "{}", preview(&outcome.sheet, limit)?).context("writing preview")?;
        }
        Ok(outcome)
    }
}

/// Run `cli`, writing JSON to `out` and the preview to `diag`.
///
/// Unless `--print-config` is given, a status report is written to `out`
/// whether processing succeeds or not. Returns `true` on success.
pub fn execute(cli: &Cli, out: &mut impl Write, diag: &mut impl Write) -> bool {
    if cli.print_config {
        let json = cli
            .load_config()
            .and_then(|config| Ok(config.to_json_pretty()?))
            .and_then(|json| Ok(writeln!(out, "{json}")?));
        return match json {
            Ok(()) => true,
            Err(err) => {
                error!("{err:#}");
                false
            }
        };
    }

    let result = cli.load_config().and_then(|config| cli.run(&config, diag));
    if let Err(err) = &result {
        error!("Processing failed: {err:#}");
    }

    let report = StatusReport::from_result(&result);
    let written = serde_json::to_string_pretty(&report)
        .map_err(anyhow::Error::from)
        .and_then(|json| Ok(writeln!(out, "{json}")?));
    if let Err(err) = written {
        error!("Cannot write status report: {err:#}");
        return false;
    }
    report.is_success()
}
