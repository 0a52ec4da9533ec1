//! Human-readable summary rendering for terminal usage.

use super::types::{CoverageStatus, InsightsBundle};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Horizontal bar scaled to `max`, at most `width` cells.
fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = ((value * width + max - 1) / max).min(width);
    "█".repeat(cells)
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Render the full bundle as a multi-section text summary.
    #[must_use]
    pub fn generate(&self, bundle: &InsightsBundle) -> String {
        let mut lines = Vec::new();

        lines.push(self.color(
            &format!("{} Component Definition Insights", bundle.title),
            "bold",
        ));
        lines.push(self.color("─".repeat(48).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Version:", "cyan"),
            bundle.version
        ));
        if let Some(last_modified) = &bundle.last_modified {
            lines.push(format!(
                "{}  {}",
                self.color("Last modified:", "cyan"),
                last_modified
            ));
        }

        // 1 - controls coverage
        lines.push(String::new());
        lines.push(self.color("Controls coverage", "bold"));
        let coverage = &bundle.controls_coverage;
        let pct = format!("{:.0}%", coverage.covered_pct);
        let pct_color = if coverage.not_covered == 0 {
            "green"
        } else {
            "yellow"
        };
        lines.push(format!(
            "  {} of {} catalog controls covered ({}), {} not covered",
            coverage.covered,
            coverage.catalog_total,
            self.color(&pct, pct_color),
            coverage.not_covered
        ));

        // 2 - controls to number of components
        lines.push(String::new());
        lines.push(self.color("Components per control", "bold"));
        let max = bundle
            .controls_to_components
            .iter()
            .map(|row| row.components)
            .max()
            .unwrap_or(0);
        for row in &bundle.controls_to_components {
            lines.push(format!(
                "  {:<12} {:>4}  {}",
                row.control,
                row.components,
                bar(row.components, max, 24)
            ));
        }

        // 3 - components to number of controls
        lines.push(String::new());
        lines.push(self.color("Controls per component", "bold"));
        let max = bundle
            .components_to_controls
            .iter()
            .map(|row| row.controls)
            .max()
            .unwrap_or(0);
        for row in &bundle.components_to_controls {
            lines.push(format!(
                "  {:<32} {:>4}  {}",
                row.component,
                row.controls,
                bar(row.controls, max, 24)
            ));
        }

        // 4 - check coverage per component
        lines.push(String::new());
        lines.push(self.color("Check coverage per component", "bold"));
        for row in &bundle.check_coverage {
            let pct = format!("{:>5.1}%", row.coverage_pct);
            let color = match row.status {
                CoverageStatus::Good => "green",
                CoverageStatus::Warn => "yellow",
            };
            lines.push(format!(
                "  {:<32} {}",
                row.component,
                self.color(&pct, color)
            ));
        }

        // 5 - rules & checks counts
        lines.push(String::new());
        lines.push(self.color("Rules and checks", "bold"));
        lines.push(format!("  Rules: {}", bundle.rules_checks.unique_rules));
        lines.push(format!(
            "  Assessment checks (unique): {}",
            bundle.rules_checks.unique_checks
        ));
        lines.push(format!(
            "  Assessment checks (re-used): {}",
            bundle.rules_checks.reused_checks
        ));

        // 6 - implementation status
        lines.push(String::new());
        lines.push(self.color("Rule implementations", "bold"));
        let implementations = &bundle.implementations;
        lines.push(format!(
            "  {} {}",
            self.color(&format!("✓{}", implementations.implementation_exists), "green"),
            "exist"
        ));
        lines.push(format!(
            "  {} {}",
            self.color(
                &format!("!{}", implementations.implementation_missing),
                "yellow"
            ),
            "missing"
        ));

        lines.join("\n")
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}
