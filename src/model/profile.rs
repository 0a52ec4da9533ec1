//! OSCAL profile structures.
//!
//! A profile selects and tailors a subset of one or more catalogs (or other
//! profiles) through its imports; resolving it yields an effective catalog.

use super::Metadata;
use serde::Deserialize;

/// Top-level wrapper, `{ "profile": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDocument {
    pub profile: Profile,
}

/// An OSCAL profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    pub uuid: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub imports: Vec<ProfileImport>,
}

/// One import: a source document plus control selections.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileImport {
    pub href: String,
    #[serde(default)]
    pub include_all: Option<IncludeAll>,
    #[serde(default)]
    pub include_controls: Vec<ControlSelection>,
    #[serde(default)]
    pub exclude_controls: Vec<ControlSelection>,
}

impl ProfileImport {
    /// Whether this import selects the source's entire control set. An
    /// import with neither `include-all` nor `include-controls` is treated
    /// as include-all.
    #[must_use]
    pub fn includes_all(&self) -> bool {
        self.include_all.is_some() || self.include_controls.is_empty()
    }
}

/// The `include-all` marker (an empty object in OSCAL JSON).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeAll {}

/// A control selection clause.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ControlSelection {
    #[serde(default)]
    pub with_ids: Vec<String>,
}
