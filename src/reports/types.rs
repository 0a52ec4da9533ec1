//! Report data structures.
//!
//! An [`InsightsBundle`] is the serializable face of one analysis run: six
//! reports mirroring the accessor outputs, ready for JSON output or summary
//! rendering. Building the bundle consumes only `AnalysisReport` accessors;
//! the analysis core has no knowledge of this module.

use crate::analysis::AnalysisReport;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashSet;

/// All six derived reports plus document identification.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsBundle {
    /// Document version from the definition metadata.
    pub version: String,
    /// Document last-modified timestamp (RFC 3339), if present.
    pub last_modified: Option<String>,
    /// Short display name for labels.
    pub title: String,
    pub controls_coverage: ControlsCoverageReport,
    pub controls_to_components: Vec<ControlComponentCount>,
    pub components_to_controls: Vec<ComponentControlCount>,
    pub check_coverage: Vec<ComponentCheckCoverage>,
    pub rules_checks: RulesChecksReport,
    pub implementations: ImplementationsReport,
}

/// Covered vs. not-covered controls against the catalog universe.
#[derive(Debug, Clone, Serialize)]
pub struct ControlsCoverageReport {
    pub covered: usize,
    pub catalog_total: usize,
    pub not_covered: usize,
    pub covered_pct: f64,
}

/// How many components claim one control.
#[derive(Debug, Clone, Serialize)]
pub struct ControlComponentCount {
    pub control: String,
    pub components: usize,
}

/// How many controls one component implements.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentControlCount {
    pub component: String,
    pub controls: usize,
}

/// Percentage of a component's declared rules that have a backing check.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentCheckCoverage {
    pub component: String,
    pub coverage_pct: f64,
    pub status: CoverageStatus,
}

/// Coverage status split: full coverage is good, anything below warns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    Good,
    Warn,
}

impl CoverageStatus {
    fn from_pct(pct: f64) -> Self {
        if pct < 100.0 { Self::Warn } else { Self::Good }
    }
}

/// Rule/check population summary.
#[derive(Debug, Clone, Serialize)]
pub struct RulesChecksReport {
    pub unique_rules: usize,
    pub unique_checks: usize,
    pub reused_checks: usize,
}

/// Declared rules with and without a fact-type implementation.
#[derive(Debug, Clone, Serialize)]
pub struct ImplementationsReport {
    pub rules_total: usize,
    pub implementation_exists: usize,
    pub implementation_missing: usize,
}

impl InsightsBundle {
    /// Build the bundle from an analysis report. Fails only on malformed
    /// control ids surfaced by the sort.
    pub fn from_report(report: &AnalysisReport) -> Result<Self> {
        let controls_sorted = report.all_controls_sorted()?;

        let covered = controls_sorted.len();
        let catalog_total = report.catalogs_controls_count();
        // A definition can reference controls beyond its resolved catalogs;
        // measure against whichever universe is larger so the percentage
        // stays within [0, 100].
        let universe = catalog_total.max(covered);
        let covered_pct = if universe == 0 {
            0.0
        } else {
            covered as f64 / universe as f64 * 100.0
        };
        let controls_coverage = ControlsCoverageReport {
            covered,
            catalog_total,
            not_covered: universe - covered,
            covered_pct,
        };

        let controls_to_components = controls_sorted
            .iter()
            .map(|control| ControlComponentCount {
                components: report.control_components()[control].len(),
                control: control.clone(),
            })
            .collect();

        let components_to_controls = report
            .component_controls()
            .iter()
            .map(|(component, controls)| ComponentControlCount {
                component: component.title().to_string(),
                controls: controls.len(),
            })
            .collect();

        let check_coverage = report
            .check_coverage()
            .into_iter()
            .map(|(component, pct)| ComponentCheckCoverage {
                component: component.title().to_string(),
                coverage_pct: pct,
                status: CoverageStatus::from_pct(pct),
            })
            .collect();

        let unique_rules = report
            .validation_rules()
            .iter()
            .collect::<HashSet<_>>()
            .len();
        let checks_total = report.validation_checks().len();
        let unique_checks = report
            .validation_checks()
            .iter()
            .collect::<HashSet<_>>()
            .len();
        let rules_checks = RulesChecksReport {
            unique_rules,
            unique_checks,
            reused_checks: checks_total - unique_checks,
        };

        let rules_total = report.rule_implementations().len();
        // An absent or empty fact-type list both count as missing.
        let implementation_exists = report
            .rule_implementations()
            .values()
            .filter(|facts| facts.as_deref().is_some_and(|s| !s.is_empty()))
            .count();
        let implementations = ImplementationsReport {
            rules_total,
            implementation_exists,
            implementation_missing: rules_total - implementation_exists,
        };

        Ok(Self {
            version: report.version().to_string(),
            last_modified: report.last_modified().map(|ts| ts.to_rfc3339()),
            title: report.reduced_title().to_string(),
            controls_coverage,
            controls_to_components,
            components_to_controls,
            check_coverage,
            rules_checks,
            implementations,
        })
    }
}
