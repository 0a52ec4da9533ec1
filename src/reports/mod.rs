//! Report generation: the downstream consumer of the analysis accessors.
//!
//! The analysis core exposes only data; everything user-facing (section
//! layout, file names, colors, the 100% warn/good threshold) lives here and
//! is replaceable without touching the core.

mod json;
mod summary;
mod types;

pub use json::{render_json, render_section};
pub use summary::SummaryReporter;
pub use types::{
    ComponentCheckCoverage, ComponentControlCount, ControlComponentCount, ControlsCoverageReport,
    CoverageStatus, ImplementationsReport, InsightsBundle, RulesChecksReport,
};

use crate::error::{InsightsError, Result};
use std::path::{Path, PathBuf};

/// File names for the six per-report JSON outputs, mirroring the report
/// sections of [`InsightsBundle`].
const REPORT_FILES: [&str; 6] = [
    "controls-coverage.json",
    "controls-to-number-of-components.json",
    "components-to-number-of-controls.json",
    "components-to-check-coverage.json",
    "rules-checks-counts.json",
    "implementations-exist.json",
];

/// Write the six report files plus the combined `insights.json` into
/// `output`, creating the directory if needed. Returns the written paths.
pub fn write_reports(bundle: &InsightsBundle, output: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output).map_err(|e| InsightsError::io(output, e))?;

    let sections: [String; 6] = [
        render_section(&bundle.controls_coverage)?,
        render_section(&bundle.controls_to_components)?,
        render_section(&bundle.components_to_controls)?,
        render_section(&bundle.check_coverage)?,
        render_section(&bundle.rules_checks)?,
        render_section(&bundle.implementations)?,
    ];

    let mut written = Vec::with_capacity(REPORT_FILES.len() + 1);
    for (name, content) in REPORT_FILES.iter().zip(sections) {
        let path = output.join(name);
        std::fs::write(&path, content).map_err(|e| InsightsError::io(&path, e))?;
        tracing::info!(path = %path.display(), "wrote report");
        written.push(path);
    }

    let combined = output.join("insights.json");
    std::fs::write(&combined, render_json(bundle)?)
        .map_err(|e| InsightsError::io(&combined, e))?;
    tracing::info!(path = %combined.display(), "wrote report");
    written.push(combined);

    Ok(written)
}
