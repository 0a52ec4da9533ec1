//! Catalog source resolution with per-run memoization.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::model::{Catalog, OscalDocument};
use crate::store::DocumentStore;
use indexmap::{IndexMap, IndexSet};
use std::path::Path;

/// The deduplicated set of control ids in a resolved catalog's scope.
///
/// The analyzer only needs the cardinality, but the full set is exposed for
/// downstream consumers.
#[derive(Debug, Clone, Default)]
pub struct ControlSet {
    ids: IndexSet<String>,
}

impl ControlSet {
    /// Collect a control set from a catalog, honoring the recursion setting
    /// for nested sub-controls.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, recurse: bool) -> Self {
        Self {
            ids: catalog.control_ids(recurse),
        }
    }

    /// Number of controls in scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, control_id: &str) -> bool {
        self.ids.contains(control_id)
    }

    /// Iterate the control ids in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Resolves `source` references to [`ControlSet`]s, at most once per
/// distinct source string for the resolver's lifetime (one analysis run).
pub struct CatalogResolver<'a, S: DocumentStore> {
    store: &'a S,
    base: &'a Path,
    config: AnalysisConfig,
    cache: IndexMap<String, ControlSet>,
}

impl<'a, S: DocumentStore> CatalogResolver<'a, S> {
    /// Create a resolver rooted at `base`.
    pub fn new(store: &'a S, base: &'a Path, config: AnalysisConfig) -> Self {
        Self {
            store,
            base,
            config,
            cache: IndexMap::new(),
        }
    }

    /// Resolve a source reference, reusing the cached result on repeat
    /// lookups.
    pub fn resolve(&mut self, source: &str) -> Result<&ControlSet> {
        if !self.cache.contains_key(source) {
            let set = self.resolve_uncached(source)?;
            tracing::debug!(source, controls = set.len(), "resolved control source");
            self.cache.insert(source.to_string(), set);
        }
        Ok(&self.cache[source])
    }

    /// The source is read once; its wrapper key decides whether it is taken
    /// as a catalog directly or resolved as a profile.
    fn resolve_uncached(&self, source: &str) -> Result<ControlSet> {
        let path = self.base.join(source);
        let catalog = match self.store.read_document(&path)? {
            OscalDocument::Catalog(catalog) => catalog,
            OscalDocument::Profile(profile) => self.store.resolve_profile(self.base, &profile)?,
        };
        Ok(ControlSet::from_catalog(&catalog, self.config.recurse))
    }

    /// Consume the resolver, yielding the memoization table keyed by source.
    #[must_use]
    pub fn into_catalogs(self) -> IndexMap<String, ControlSet> {
        self.cache
    }
}
