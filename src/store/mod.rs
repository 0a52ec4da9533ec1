//! Document retrieval for OSCAL artifacts.
//!
//! The analysis core never touches the filesystem directly; it goes through
//! the [`DocumentStore`] trait so tests can substitute an in-memory store and
//! so retrieval policy (workspace layout, profile resolution) stays out of
//! the aggregation logic.

mod fs;

pub use fs::FsDocumentStore;

use crate::error::Result;
use crate::model::{Catalog, ComponentDefinition, OscalDocument, Profile};
use std::path::Path;

/// Read access to the OSCAL documents an analysis run needs.
pub trait DocumentStore {
    /// Read the primary component-definition artifact. A missing or
    /// unreadable document is fatal for the run.
    fn read_component_definition(&self, path: &Path) -> Result<ComponentDefinition>;

    /// Read a referenced document, discriminating catalog vs. profile by the
    /// top-level wrapper key. A malformed catalog surfaces as a catalog
    /// parse error; it is never retried as a profile.
    fn read_document(&self, path: &Path) -> Result<OscalDocument>;

    /// Read a document that must be a catalog.
    fn read_catalog(&self, path: &Path) -> Result<Catalog>;

    /// Resolve a profile into its effective catalog by following imports
    /// (recursively; nested profiles are allowed, cycles are an error).
    /// Import hrefs resolve relative to `base`.
    fn resolve_profile(&self, base: &Path, profile: &Profile) -> Result<Catalog>;
}
