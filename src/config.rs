//! Analysis configuration.
//!
//! All knobs that influence an analysis run are passed in explicitly through
//! [`AnalysisConfig`]; the library keeps no global mutable state.

/// Configuration for a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Descend into nested sub-controls when collecting a catalog's control
    /// ids. When false, only group-level and catalog-level controls count
    /// toward the catalog universe.
    pub recurse: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { recurse: true }
    }
}

impl AnalysisConfig {
    /// Configuration that counts only top-level controls.
    #[must_use]
    pub const fn flat() -> Self {
        Self { recurse: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recurses() {
        assert!(AnalysisConfig::default().recurse);
        assert!(!AnalysisConfig::flat().recurse);
    }
}
