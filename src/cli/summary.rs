//! Summary command handler.
//!
//! Prints the human-readable insights summary without writing files.

use crate::analysis::InsightsAnalyzer;
use crate::config::AnalysisConfig;
use crate::reports::{InsightsBundle, SummaryReporter};
use crate::store::FsDocumentStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the summary command
#[allow(clippy::needless_pass_by_value)]
pub fn run_summary(
    base_path: PathBuf,
    file_path: String,
    config: AnalysisConfig,
    no_color: bool,
) -> Result<()> {
    let store = FsDocumentStore::new();
    let analyzer = InsightsAnalyzer::new(&store, &base_path, config);

    let report = analyzer
        .load_and_analyze(&file_path)
        .with_context(|| format!("analyzing {file_path}"))?;
    let bundle = InsightsBundle::from_report(&report).context("building report bundle")?;

    let mut reporter = SummaryReporter::new();
    if no_color {
        reporter = reporter.no_color();
    }
    println!("{}", reporter.generate(&bundle));
    Ok(())
}
