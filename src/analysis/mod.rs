//! The analysis core: identifier ordering, catalog resolution, and the
//! component-definition aggregation engine.

mod catalog;
mod insights;
mod ordering;

pub use catalog::{CatalogResolver, ControlSet};
pub use insights::{
    AnalysisReport, ComponentKey, InsightsAnalyzer, PROP_CHECK_ID, PROP_FACT_TYPES, PROP_RULE_ID,
    extract_rule_ids,
};
pub use ordering::{compare_control_ids, sort_control_ids};
