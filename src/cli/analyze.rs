//! Analyze command handler.
//!
//! Runs the full analysis and writes the report files.

use crate::analysis::InsightsAnalyzer;
use crate::config::AnalysisConfig;
use crate::reports::{InsightsBundle, SummaryReporter, write_reports};
use crate::store::FsDocumentStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the analyze command
#[allow(clippy::needless_pass_by_value)]
pub fn run_analyze(
    base_path: PathBuf,
    file_path: String,
    output_path: PathBuf,
    config: AnalysisConfig,
    quiet: bool,
    no_color: bool,
) -> Result<()> {
    let store = FsDocumentStore::new();
    let analyzer = InsightsAnalyzer::new(&store, &base_path, config);

    let report = analyzer
        .load_and_analyze(&file_path)
        .with_context(|| format!("analyzing {file_path}"))?;
    let bundle = InsightsBundle::from_report(&report).context("building report bundle")?;

    let written = write_reports(&bundle, &output_path)
        .with_context(|| format!("writing reports to {}", output_path.display()))?;
    tracing::info!(reports = written.len(), "analysis reports written");

    if !quiet {
        let mut reporter = SummaryReporter::new();
        if no_color {
            reporter = reporter.no_color();
        }
        println!("{}", reporter.generate(&bundle));
    }
    Ok(())
}
