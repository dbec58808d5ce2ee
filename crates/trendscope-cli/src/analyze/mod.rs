//! `analyze` command handler.
//!
//! Reads ingestion batches, ranks every category concurrently, prints a
//! report per category and writes the result files. A category whose task
//! fails is logged and skipped; the rest of the run continues.

mod input;
mod output;
mod runner;

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use trendscope_core::{AppConfig, Category, ScoringConfig, VersionId};

/// Run the full analysis over the batches in `input_path`.
///
/// When `dry_run` is `true` the rankings are printed but no file is written.
///
/// # Errors
///
/// Returns an error if the category filter is unknown, the input file cannot
/// be read, a result file cannot be written, or every category failed.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    scoring: ScoringConfig,
    input_path: &Path,
    category_filter: Option<&str>,
    output_dir: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let only = category_filter.map(Category::resolve).transpose()?;
    let batches = input::load_batches(input_path)?;
    let inputs = input::to_category_inputs(batches, only);

    if inputs.is_empty() {
        println!("no ingestion batches to analyze in {}", input_path.display());
        return Ok(());
    }

    let as_of = Utc::now();
    let version_id = VersionId::generate();
    let category_count = inputs.len();
    tracing::info!(
        categories = category_count,
        version_id = %version_id,
        dry_run,
        "analyzing categories"
    );

    let outcomes = runner::run_categories(
        Arc::new(scoring),
        inputs,
        as_of,
        version_id,
        config.max_concurrent_categories,
    )
    .await;

    let output_dir = output_dir.unwrap_or(config.output_dir.as_path());
    let tally = emit_outcomes(outcomes, output_dir, dry_run);
    let failed_categories = tally.failed();

    if failed_categories == category_count {
        anyhow::bail!(
            "all {failed_categories} categories failed ({} analysis, {} write)",
            tally.analysis_failed,
            tally.write_failed
        );
    }
    if failed_categories > 0 {
        tracing::warn!(
            analysis_failed = tally.analysis_failed,
            write_failed = tally.write_failed,
            total_categories = category_count,
            "some categories failed during analysis"
        );
    }

    if dry_run {
        println!("dry-run: nothing written (version {version_id})");
    } else {
        println!(
            "analysis complete: {} categories written to {} (version {version_id})",
            tally.succeeded,
            output_dir.display()
        );
    }
    Ok(())
}

/// Per-run counts of how each category ended.
#[derive(Debug, Default, PartialEq, Eq)]
struct OutcomeTally {
    succeeded: usize,
    analysis_failed: usize,
    write_failed: usize,
}

impl OutcomeTally {
    fn failed(&self) -> usize {
        self.analysis_failed + self.write_failed
    }
}

/// Print every report and write its files. A failing category is logged and
/// counted; the remaining categories are still handled.
fn emit_outcomes(
    outcomes: Vec<runner::CategoryOutcome>,
    output_dir: &Path,
    dry_run: bool,
) -> OutcomeTally {
    let mut tally = OutcomeTally::default();

    for (category, outcome) in outcomes {
        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(category = %category, error = %e, "category analysis failed");
                tally.analysis_failed += 1;
                continue;
            }
        };

        output::print_report(&report);
        if dry_run {
            tally.succeeded += 1;
            continue;
        }
        match output::write_artifacts(output_dir, &report) {
            Ok(_) => tally.succeeded += 1,
            Err(e) => {
                tracing::error!(category = %category, error = %e, "failed to write result files");
                tally.write_failed += 1;
            }
        }
    }

    tally
}
