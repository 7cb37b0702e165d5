//! Command-line interface for the unbundler.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{FailurePolicy, UnbundleOptions, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_DIR};
use crate::error::{Result, UnbundleError};
use crate::report::{Outcome, UnbundleReport};
use crate::unbundler::unbundle;

/// Split a FHIR R4 bundle into one JSON file per contained resource.
#[derive(Parser)]
#[command(name = "fhir-unbundle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the FHIR bundle JSON file
    pub bundle: PathBuf,

    /// Output directory, which must already exist
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Continue past entries that fail to write, and report them at the end
    #[arg(long)]
    pub keep_going: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter directive implied by `--verbose`.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "info",
            _ => "debug",
        }
    }

    /// Library options built from the flags.
    #[must_use]
    pub fn options(&self) -> UnbundleOptions {
        let policy = if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        };
        UnbundleOptions::default()
            .with_output_dir(&self.output_dir)
            .with_failure_policy(policy)
    }
}

/// Run the CLI with already parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    unbundle_command(&cli.bundle, &cli.options())
}

/// Execute the unbundle command.
fn unbundle_command(bundle: &Path, options: &UnbundleOptions) -> Result<()> {
    println!(
        "{} {}",
        style("Unbundling").bold(),
        style(bundle.display()).cyan()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Writing resources...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = unbundle(bundle, options);
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            print_summary(&report, &options.output_dir);
            Ok(())
        }
        Err(UnbundleError::EntriesFailed { report }) => {
            print_summary(&report, &options.output_dir);
            Err(UnbundleError::EntriesFailed { report })
        }
        Err(e) => Err(e),
    }
}

fn print_summary(report: &UnbundleReport, output_dir: &Path) {
    match report.outcome {
        Outcome::NotABundle { kind } => {
            println!(
                "  {} input is a {} resource, not a Bundle; nothing written",
                style("Note:").yellow().bold(),
                style(kind).cyan()
            );
        }
        Outcome::Unbundled { entries } => {
            println!("  Entries: {entries}");
            if !report.skipped.is_empty() {
                println!("  Skipped: {}", style(report.skipped.len()).yellow().bold());
                for skipped in &report.skipped {
                    println!("    #{}: {}", skipped.index, skipped.reason);
                }
            }
            if !report.failed.is_empty() {
                println!("  Failed: {}", style(report.failed.len()).red().bold());
                for failed in &report.failed {
                    println!("    #{}: {}", failed.index, failed.error);
                }
            }
            println!();
            println!(
                "{} {} file(s) to {}",
                style("Wrote").green().bold(),
                report.written.len(),
                output_dir.display()
            );
        }
    }
}
