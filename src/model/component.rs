//! OSCAL component-definition data structures.
//!
//! Field names follow the OSCAL JSON schema (kebab-case). Everything is
//! read-only after deserialization; the analyzer never mutates the input
//! document.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexSet;
use serde::Deserialize;

/// Top-level wrapper, `{ "component-definition": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDefinitionDocument {
    #[serde(rename = "component-definition")]
    pub component_definition: ComponentDefinition,
}

/// An OSCAL component definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentDefinition {
    pub uuid: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub components: Vec<DefinedComponent>,
}

/// Document metadata common to OSCAL models.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Metadata {
    pub title: String,
    pub version: String,
    pub last_modified: DateTime<FixedOffset>,
    #[serde(default)]
    pub oscal_version: Option<String>,
}

impl Metadata {
    /// Last whitespace-separated token of the title, used as a short display
    /// name in report labels.
    #[must_use]
    pub fn reduced_title(&self) -> &str {
        self.title
            .split_whitespace()
            .last()
            .unwrap_or(self.title.as_str())
    }
}

/// A component declaring how it implements a set of controls.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefinedComponent {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub props: Vec<Property>,
    #[serde(default)]
    pub control_implementations: Vec<ControlImplementation>,
}

impl DefinedComponent {
    /// Ordered-unique control ids across all of this component's implemented
    /// requirements, in first-encountered order.
    #[must_use]
    pub fn implemented_control_ids(&self) -> IndexSet<String> {
        let mut ids = IndexSet::new();
        for ci in &self.control_implementations {
            for req in &ci.implemented_requirements {
                ids.insert(req.control_id.clone());
            }
        }
        ids
    }
}

/// Component kind tag. `Validation` components carry rule/check metadata and
/// are analyzed separately from every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ComponentKind {
    Software,
    Hardware,
    Service,
    Policy,
    Physical,
    Process,
    Validation,
    Interconnection,
    Plan,
    Guidance,
    Standard,
    Other(String),
}

impl ComponentKind {
    /// Whether this is a validation component.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

impl From<&str> for ComponentKind {
    fn from(s: &str) -> Self {
        // OSCAL type strings are case-insensitive in the wild ("Validation"
        // and "validation" both occur).
        match s.to_ascii_lowercase().as_str() {
            "software" => Self::Software,
            "hardware" => Self::Hardware,
            "service" => Self::Service,
            "policy" => Self::Policy,
            "physical" => Self::Physical,
            "process" | "process-procedure" => Self::Process,
            "validation" => Self::Validation,
            "interconnection" => Self::Interconnection,
            "plan" => Self::Plan,
            "guidance" => Self::Guidance,
            "standard" => Self::Standard,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Software => write!(f, "software"),
            Self::Hardware => write!(f, "hardware"),
            Self::Service => write!(f, "service"),
            Self::Policy => write!(f, "policy"),
            Self::Physical => write!(f, "physical"),
            Self::Process => write!(f, "process"),
            Self::Validation => write!(f, "validation"),
            Self::Interconnection => write!(f, "interconnection"),
            Self::Plan => write!(f, "plan"),
            Self::Guidance => write!(f, "guidance"),
            Self::Standard => write!(f, "standard"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A component's claim of implementing requirements from one source catalog
/// or profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ControlImplementation {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

/// One implemented-requirement entry referencing a control.
///
/// A missing `control-id` deserializes to the empty string instead of being
/// rejected or skipped, so downstream consumers can detect the anomaly in the
/// derived relations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImplementedRequirement {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub control_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub props: Vec<Property>,
}

/// A (name, value, remarks) property triple.
///
/// On validation components, `remarks` is the rule-set grouping key that
/// binds together the `Rule_Id`, fact-type-list and `Check_Id` properties
/// describing one rule/check pairing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub ns: Option<String>,
}
