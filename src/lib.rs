//! **Coverage insights for OSCAL component definitions.**
//!
//! `oscal-insights` ingests an OSCAL component-definition document and
//! derives cross-reference tables and coverage metrics: how thoroughly
//! components implement controls, how thoroughly those implementations are
//! backed by automated rules, and how thoroughly rules are backed by
//! executable checks.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Read-only serde representations of the OSCAL documents
//!   consumed: component definitions, catalogs, and profiles.
//! - **[`store`]**: The [`DocumentStore`] retrieval seam and its filesystem
//!   implementation. Control-implementation `source` references are
//!   discriminated between catalogs and profiles by their top-level wrapper
//!   key; profiles resolve recursively through their imports.
//! - **[`analysis`]**: The aggregation engine. [`InsightsAnalyzer`] walks a
//!   definition in two passes (non-validation components, then validation
//!   components) and builds an [`AnalysisReport`] exposing five derived
//!   relations: component→controls, control→components,
//!   (component, control)→rules, rule→implementation-fact, and the
//!   per-validation-component rule→check map, plus per-catalog control
//!   counts and check-coverage percentages.
//! - **[`reports`]**: The downstream reporting adapter: six reports
//!   rendered as JSON files or a colored terminal summary. Replaceable
//!   without touching the core.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use oscal_insights::{AnalysisConfig, FsDocumentStore, InsightsAnalyzer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FsDocumentStore::new();
//!     let base = Path::new("/path/to/workspace");
//!     let analyzer = InsightsAnalyzer::new(&store, base, AnalysisConfig::default());
//!
//!     let report = analyzer.load_and_analyze("component-definition.json")?;
//!
//!     println!(
//!         "{} controls covered across {} components",
//!         report.control_components().len(),
//!         report.component_controls().len()
//!     );
//!     for (component, pct) in report.check_coverage() {
//!         println!("{component}: {pct:.1}% of rules backed by checks");
//!     }
//!
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize→f64 casts are confined to percentage math over
    // small, bounded counts
    clippy::cast_precision_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod reports;
pub mod store;

// Re-export main types for convenience
pub use analysis::{
    AnalysisReport, CatalogResolver, ComponentKey, ControlSet, InsightsAnalyzer,
    compare_control_ids, extract_rule_ids, sort_control_ids,
};
pub use config::AnalysisConfig;
pub use error::{InsightsError, Result};
pub use model::{Catalog, ComponentDefinition, ComponentKind, OscalDocument, Profile};
pub use reports::{InsightsBundle, SummaryReporter};
pub use store::{DocumentStore, FsDocumentStore};
