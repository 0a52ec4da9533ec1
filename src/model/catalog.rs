//! OSCAL catalog structures.
//!
//! Catalogs organize controls in arbitrarily nested groups; controls may in
//! turn nest sub-controls (enhancements such as `ac-2.1` under `ac-2`).

use super::Metadata;
use indexmap::IndexSet;
use serde::Deserialize;

/// Top-level wrapper, `{ "catalog": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub catalog: Catalog,
}

/// An OSCAL catalog: the authoritative enumeration of controls in scope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
    pub uuid: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Catalog {
    /// Collect the deduplicated set of control ids in this catalog, in
    /// document order. `recurse` controls whether nested sub-controls are
    /// included.
    #[must_use]
    pub fn control_ids(&self, recurse: bool) -> IndexSet<String> {
        let mut ids = IndexSet::new();
        for group in &self.groups {
            group.collect_control_ids(recurse, &mut ids);
        }
        for control in &self.controls {
            control.collect_ids(recurse, &mut ids);
        }
        ids
    }
}

/// A group of controls; groups nest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Group {
    fn collect_control_ids(&self, recurse: bool, ids: &mut IndexSet<String>) {
        for group in &self.groups {
            group.collect_control_ids(recurse, ids);
        }
        for control in &self.controls {
            control.collect_ids(recurse, ids);
        }
    }
}

/// A single control, possibly carrying nested sub-controls.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Control {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Control {
    /// Build a bare control with just an id. Used when flattening a resolved
    /// profile into a synthetic catalog.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            controls: Vec::new(),
        }
    }

    fn collect_ids(&self, recurse: bool, ids: &mut IndexSet<String>) {
        ids.insert(self.id.clone());
        if recurse {
            for child in &self.controls {
                child.collect_ids(recurse, ids);
            }
        }
    }
}
