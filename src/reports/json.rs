//! JSON report rendering.

use super::types::InsightsBundle;
use crate::error::{InsightsError, Result};
use serde::Serialize;

/// Render the full bundle as pretty-printed JSON.
pub fn render_json(bundle: &InsightsBundle) -> Result<String> {
    to_pretty(bundle)
}

/// Render one report section as pretty-printed JSON.
pub fn render_section<T: Serialize>(section: &T) -> Result<String> {
    to_pretty(section)
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| InsightsError::report(format!("JSON serialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::types::ControlsCoverageReport;

    #[test]
    fn test_render_section() {
        let section = ControlsCoverageReport {
            covered: 3,
            catalog_total: 10,
            not_covered: 7,
            covered_pct: 30.0,
        };
        let json = render_section(&section).expect("section should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["covered"], 3);
        assert_eq!(value["not_covered"], 7);
    }
}
