//! OSCAL document model.
//!
//! Read-only serde representations of the three OSCAL document kinds this
//! tool consumes: component definitions, catalogs, and profiles. Only the
//! fields the analysis needs are modeled; unknown fields are ignored.

mod catalog;
mod component;
mod profile;

pub use catalog::{Catalog, CatalogDocument, Control, Group};
pub use component::{
    ComponentDefinition, ComponentDefinitionDocument, ComponentKind, ControlImplementation,
    DefinedComponent, ImplementedRequirement, Metadata, Property,
};
pub use profile::{ControlSelection, IncludeAll, Profile, ProfileDocument, ProfileImport};

use serde::Deserialize;

/// A catalog-or-profile document, discriminated by its top-level wrapper key.
///
/// OSCAL documents are externally tagged (`{"catalog": ...}` /
/// `{"profile": ...}`), so the wrapper key is the type discriminator: no
/// trial parsing is needed to tell the two apart.
#[derive(Debug, Clone, Deserialize)]
pub enum OscalDocument {
    #[serde(rename = "catalog")]
    Catalog(Catalog),
    #[serde(rename = "profile")]
    Profile(Profile),
}

impl OscalDocument {
    /// Human-readable document kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::Profile(_) => "profile",
        }
    }
}
