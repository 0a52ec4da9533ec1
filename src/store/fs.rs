//! Filesystem-backed document store.
//!
//! Reads OSCAL JSON documents from a workspace directory and resolves
//! profiles into effective catalogs by walking their imports.

use super::DocumentStore;
use crate::error::{InsightsError, ParseErrorKind, ResolveErrorKind, Result};
use crate::model::{Catalog, ComponentDefinition, Control, OscalDocument, Profile, ProfileImport};
use indexmap::IndexSet;
use std::path::Path;

/// Production [`DocumentStore`] reading OSCAL JSON files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    /// Create a new filesystem store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_json(&self, path: &Path) -> Result<serde_json::Value> {
        let content = std::fs::read_to_string(path).map_err(|e| InsightsError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            InsightsError::parse(
                format!("reading {}", path.display()),
                ParseErrorKind::InvalidJson(e.to_string()),
            )
        })
    }

    fn parse_wrapped<T: serde::de::DeserializeOwned>(
        value: serde_json::Value,
        kind: &str,
        path: &Path,
    ) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            InsightsError::parse(
                format!("reading {}", path.display()),
                ParseErrorKind::UnexpectedShape {
                    kind: kind.to_string(),
                    message: e.to_string(),
                },
            )
        })
    }

    /// Walk a profile's imports, accumulating the selected control ids.
    ///
    /// `active` holds the hrefs of profiles on the current resolution chain;
    /// re-entering one of them is an import cycle. Sibling imports of the
    /// same catalog are fine and are not tracked.
    fn resolve_imports(
        &self,
        base: &Path,
        profile: &Profile,
        active: &mut IndexSet<String>,
    ) -> Result<IndexSet<String>> {
        if profile.imports.is_empty() {
            return Err(InsightsError::resolve(
                format!("profile {}", profile.uuid),
                ResolveErrorKind::EmptyProfile,
            ));
        }

        let mut selected = IndexSet::new();
        for import in &profile.imports {
            let path = base.join(&import.href);
            let available = match self.read_document(&path)? {
                OscalDocument::Catalog(catalog) => catalog.control_ids(true),
                OscalDocument::Profile(nested) => {
                    if active.contains(&import.href) {
                        return Err(InsightsError::resolve(
                            format!("profile {}", profile.uuid),
                            ResolveErrorKind::ImportCycle(import.href.clone()),
                        ));
                    }
                    active.insert(import.href.clone());
                    let ids = self.resolve_imports(base, &nested, active)?;
                    active.shift_remove(&import.href);
                    ids
                }
            };
            selected.extend(apply_selections(&available, import));
        }
        Ok(selected)
    }
}

/// Apply an import's include/exclude clauses to the source's control set.
fn apply_selections(available: &IndexSet<String>, import: &ProfileImport) -> IndexSet<String> {
    let mut picked: IndexSet<String> = if import.includes_all() {
        available.clone()
    } else {
        import
            .include_controls
            .iter()
            .flat_map(|selection| &selection.with_ids)
            .filter(|id| {
                let known = available.contains(id.as_str());
                if !known {
                    tracing::debug!(control = %id, href = %import.href, "selected control not present in import source");
                }
                known
            })
            .cloned()
            .collect()
    };
    for selection in &import.exclude_controls {
        for id in &selection.with_ids {
            picked.shift_remove(id);
        }
    }
    picked
}

impl DocumentStore for FsDocumentStore {
    fn read_component_definition(&self, path: &Path) -> Result<ComponentDefinition> {
        tracing::debug!(path = %path.display(), "reading component definition");
        let mut value = self.read_json(path)?;
        let Some(inner) = value.get_mut("component-definition") else {
            return Err(InsightsError::parse(
                format!("reading {}", path.display()),
                ParseErrorKind::UnexpectedShape {
                    kind: "component-definition".to_string(),
                    message: "missing top-level \"component-definition\" object".to_string(),
                },
            ));
        };
        Self::parse_wrapped(inner.take(), "component-definition", path)
    }

    fn read_document(&self, path: &Path) -> Result<OscalDocument> {
        let mut value = self.read_json(path)?;
        if let Some(inner) = value.get_mut("catalog") {
            let catalog = Self::parse_wrapped(inner.take(), "catalog", path)?;
            return Ok(OscalDocument::Catalog(catalog));
        }
        if let Some(inner) = value.get_mut("profile") {
            let profile = Self::parse_wrapped(inner.take(), "profile", path)?;
            return Ok(OscalDocument::Profile(profile));
        }
        Err(InsightsError::parse(
            format!("reading {}", path.display()),
            ParseErrorKind::UnknownDocumentKind,
        ))
    }

    fn read_catalog(&self, path: &Path) -> Result<Catalog> {
        match self.read_document(path)? {
            OscalDocument::Catalog(catalog) => Ok(catalog),
            OscalDocument::Profile(_) => Err(InsightsError::parse(
                format!("reading {}", path.display()),
                ParseErrorKind::UnexpectedShape {
                    kind: "catalog".to_string(),
                    message: "document is a profile".to_string(),
                },
            )),
        }
    }

    fn resolve_profile(&self, base: &Path, profile: &Profile) -> Result<Catalog> {
        let mut active = IndexSet::new();
        let ids = self.resolve_imports(base, profile, &mut active)?;
        tracing::debug!(
            profile = %profile.uuid,
            controls = ids.len(),
            "resolved profile into effective catalog"
        );
        Ok(Catalog {
            uuid: profile.uuid.clone(),
            metadata: profile.metadata.clone(),
            groups: Vec::new(),
            controls: ids.into_iter().map(Control::bare).collect(),
        })
    }
}
