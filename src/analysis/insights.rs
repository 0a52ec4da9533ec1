//! Component-definition analysis engine.
//!
//! Walks a parsed component definition in two passes and builds the derived
//! relations: which controls each component implements, which components
//! claim each control, which rules back each (component, control) pair,
//! which rules have fact-type implementations, and which rules have
//! executable checks.
//!
//! Pass 1 covers every non-validation component and triggers catalog
//! resolution for each distinct `source`. Pass 2 covers validation
//! components, grouping their properties by the rule-set key carried in
//! `remarks`. Check-coverage percentages are computed lazily by accessor, so
//! they always see the complete rule and check populations regardless of
//! component order in the document.

use super::catalog::{CatalogResolver, ControlSet};
use super::ordering::sort_control_ids;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::model::{ComponentDefinition, DefinedComponent, Metadata, Property};
use crate::store::DocumentStore;
use chrono::{DateTime, FixedOffset};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::path::Path;

/// Property name carrying a rule identifier.
pub const PROP_RULE_ID: &str = "Rule_Id";
/// Property name carrying a rule's implementation fact-type list.
pub const PROP_FACT_TYPES: &str = "Rule_Data_Model_Fact_Type_Id_List";
/// Property name carrying a check identifier.
pub const PROP_CHECK_ID: &str = "Check_Id";

/// Stable identity for a component within one analysis run.
///
/// Identity is the component uuid; the title rides along for display only.
/// Two components may share a title (the analyzer warns when they do) without
/// clobbering each other's derived relations.
#[derive(Debug, Clone)]
pub struct ComponentKey {
    uuid: String,
    title: String,
}

impl ComponentKey {
    /// The component uuid.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl From<&DefinedComponent> for ComponentKey {
    fn from(component: &DefinedComponent) -> Self {
        Self {
            uuid: component.uuid.clone(),
            title: component.title.clone(),
        }
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for ComponentKey {}

impl std::hash::Hash for ComponentKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Extract every `Rule_Id` property value from a property list, duplicates
/// preserved as found. Callers deduplicate where they need to.
#[must_use]
pub fn extract_rule_ids(props: &[Property]) -> Vec<String> {
    props
        .iter()
        .filter(|p| p.name == PROP_RULE_ID)
        .map(|p| p.value.clone())
        .collect()
}

/// Find the value of the named property within one rule-set group.
fn rule_set_property<'p>(
    props: &'p [Property],
    rule_set: Option<&str>,
    name: &str,
) -> Option<&'p str> {
    props
        .iter()
        .find(|p| p.remarks.as_deref() == rule_set && p.name == name)
        .map(|p| p.value.as_str())
}

/// The aggregation engine. One instance analyzes any number of documents;
/// each [`analyze`](Self::analyze) call builds a fresh, independent
/// [`AnalysisReport`].
pub struct InsightsAnalyzer<'a, S: DocumentStore> {
    store: &'a S,
    base: &'a Path,
    config: AnalysisConfig,
}

impl<'a, S: DocumentStore> InsightsAnalyzer<'a, S> {
    /// Create an analyzer rooted at `base` (sources in control
    /// implementations resolve relative to it).
    pub fn new(store: &'a S, base: &'a Path, config: AnalysisConfig) -> Self {
        Self {
            store,
            base,
            config,
        }
    }

    /// Read the component definition at `base`/`file` and analyze it.
    pub fn load_and_analyze(&self, file: &str) -> Result<AnalysisReport> {
        let path = self.base.join(file);
        let definition = self.store.read_component_definition(&path)?;
        self.analyze(&definition)
    }

    /// Run the two-pass analysis over a parsed component definition.
    pub fn analyze(&self, definition: &ComponentDefinition) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::new(definition.metadata.clone());
        let mut resolver = CatalogResolver::new(self.store, self.base, self.config);

        let mut titles: HashSet<&str> = HashSet::new();
        for component in &definition.components {
            if !titles.insert(component.title.as_str()) {
                tracing::warn!(
                    title = %component.title,
                    "duplicate component title; components are tracked by uuid"
                );
            }
        }

        for component in &definition.components {
            if !component.kind.is_validation() {
                self.analyze_component(component, &mut report, &mut resolver)?;
            }
        }
        for component in &definition.components {
            if component.kind.is_validation() {
                Self::analyze_validation_component(component, &mut report);
            }
        }

        report.catalogs = resolver.into_catalogs();
        tracing::info!(
            components = report.component_controls.len(),
            controls = report.control_components.len(),
            catalogs = report.catalogs.len(),
            "analysis complete"
        );
        Ok(report)
    }

    fn analyze_component(
        &self,
        component: &DefinedComponent,
        report: &mut AnalysisReport,
        resolver: &mut CatalogResolver<'a, S>,
    ) -> Result<()> {
        let key = ComponentKey::from(component);
        let controls = component.implemented_control_ids();

        for control in &controls {
            let components = report
                .control_components
                .entry(control.clone())
                .or_default();
            if !components.contains(&key) {
                components.push(key.clone());
            }
        }
        report.component_controls.insert(key.clone(), controls);

        Self::analyze_rules(component, &key, report);

        for ci in &component.control_implementations {
            if let Some(source) = &ci.source {
                resolver.resolve(source)?;
            }
        }
        Ok(())
    }

    fn analyze_rules(
        component: &DefinedComponent,
        key: &ComponentKey,
        report: &mut AnalysisReport,
    ) {
        for ci in &component.control_implementations {
            for req in &ci.implemented_requirements {
                let rules = extract_rule_ids(&req.props);
                if rules.is_empty() {
                    continue;
                }
                report
                    .component_control_rules
                    .entry(key.clone())
                    .or_default()
                    .entry(req.control_id.clone())
                    .or_default()
                    .extend(rules);
            }
        }
    }

    fn analyze_validation_component(component: &DefinedComponent, report: &mut AnalysisReport) {
        if component.props.is_empty() {
            return;
        }
        let key = ComponentKey::from(component);

        // Rule-set groups in first-appearance order; properties without
        // remarks form a single group under the absent key.
        let mut rule_sets: IndexSet<Option<&str>> = IndexSet::new();
        for prop in &component.props {
            rule_sets.insert(prop.remarks.as_deref());
        }

        let mut checks: IndexMap<String, String> = IndexMap::new();
        for rule_set in rule_sets {
            let Some(rule) = rule_set_property(&component.props, rule_set, PROP_RULE_ID) else {
                continue;
            };
            let fact_types = rule_set_property(&component.props, rule_set, PROP_FACT_TYPES);
            report
                .rule_implementations
                .insert(rule.to_string(), fact_types.map(str::to_string));

            if let Some(check) = rule_set_property(&component.props, rule_set, PROP_CHECK_ID) {
                report.validation_rules.push(rule.to_string());
                report.validation_checks.push(check.to_string());
                checks.insert(rule.to_string(), check.to_string());
            }
        }

        // First definition wins in lookups (validation components are
        // scanned in document order); note redefinitions for diagnosis.
        for (rule, check) in &checks {
            if let Some(previous) = report.check_for_rule(rule) {
                if previous != check {
                    tracing::debug!(
                        rule,
                        component = %key,
                        "rule already mapped to a different check; first definition wins"
                    );
                }
            }
        }
        report.component_rule_checks.insert(key, checks);
    }
}

/// The derived relations and metrics for one analyzed component definition.
///
/// Built in a single `analyze` call, immutable afterwards.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    metadata: Option<Metadata>,
    component_controls: IndexMap<ComponentKey, IndexSet<String>>,
    control_components: IndexMap<String, Vec<ComponentKey>>,
    component_control_rules: IndexMap<ComponentKey, IndexMap<String, IndexSet<String>>>,
    rule_implementations: IndexMap<String, Option<String>>,
    component_rule_checks: IndexMap<ComponentKey, IndexMap<String, String>>,
    validation_rules: Vec<String>,
    validation_checks: Vec<String>,
    catalogs: IndexMap<String, ControlSet>,
}

impl AnalysisReport {
    fn new(metadata: Metadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..Self::default()
        }
    }

    /// Document version from the definition's metadata.
    #[must_use]
    pub fn version(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.version.as_str())
    }

    /// Document last-modified timestamp.
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<FixedOffset>> {
        self.metadata.as_ref().map(|m| m.last_modified)
    }

    /// Short display name: the last whitespace-separated token of the
    /// document title.
    #[must_use]
    pub fn reduced_title(&self) -> &str {
        self.metadata.as_ref().map_or("", Metadata::reduced_title)
    }

    /// Per non-validation component, the ordered-unique control ids it
    /// implements. Components with no implemented requirements still appear,
    /// with an empty set.
    #[must_use]
    pub fn component_controls(&self) -> &IndexMap<ComponentKey, IndexSet<String>> {
        &self.component_controls
    }

    /// Per control id, the components claiming it, deduplicated in
    /// first-encountered order.
    #[must_use]
    pub fn control_components(&self) -> &IndexMap<String, Vec<ComponentKey>> {
        &self.control_components
    }

    /// Per component and control, the rule ids declared on its implemented
    /// requirements. Only present where at least one rule was found.
    #[must_use]
    pub fn component_control_rules(
        &self,
    ) -> &IndexMap<ComponentKey, IndexMap<String, IndexSet<String>>> {
        &self.component_control_rules
    }

    /// Per rule id, the fact-type list implementing it (`None` means the
    /// rule is declared but not implemented).
    #[must_use]
    pub fn rule_implementations(&self) -> &IndexMap<String, Option<String>> {
        &self.rule_implementations
    }

    /// Per validation component, its rule-to-check map. An entry exists for
    /// every validation component carrying properties, even when no
    /// rule/check pairing was found.
    #[must_use]
    pub fn component_rule_checks(&self) -> &IndexMap<ComponentKey, IndexMap<String, String>> {
        &self.component_rule_checks
    }

    /// Rule ids per rule-set occurrence with a check, not deduplicated.
    #[must_use]
    pub fn validation_rules(&self) -> &[String] {
        &self.validation_rules
    }

    /// Check ids parallel to [`validation_rules`](Self::validation_rules).
    #[must_use]
    pub fn validation_checks(&self) -> &[String] {
        &self.validation_checks
    }

    /// Resolved control sets keyed by source reference; one entry per
    /// distinct source encountered during the run.
    #[must_use]
    pub fn catalogs(&self) -> &IndexMap<String, ControlSet> {
        &self.catalogs
    }

    /// Total number of controls across every distinct resolved catalog.
    #[must_use]
    pub fn catalogs_controls_count(&self) -> usize {
        self.catalogs.values().map(ControlSet::len).sum()
    }

    /// The check backing a rule, scanning validation components in document
    /// order; the first definition wins.
    #[must_use]
    pub fn check_for_rule(&self, rule: &str) -> Option<&str> {
        self.component_rule_checks
            .values()
            .find_map(|checks| checks.get(rule))
            .map(String::as_str)
    }

    /// All referenced control ids in group-then-numeric-suffix order.
    /// Malformed ids surface as an error here rather than being sorted
    /// arbitrarily.
    pub fn all_controls_sorted(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.control_components.keys().cloned().collect();
        sort_control_ids(&mut ids)?;
        Ok(ids)
    }

    /// All analyzed (non-validation) components, sorted by title.
    #[must_use]
    pub fn all_components_sorted(&self) -> Vec<&ComponentKey> {
        let mut components: Vec<&ComponentKey> = self.component_controls.keys().collect();
        components.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.uuid().cmp(b.uuid())));
        components
    }

    /// Per component with declared rules, the percentage of those rules
    /// backed by a check. A component whose rule map is empty reports 0.0:
    /// no automated backing exists, and the metric must not inflate it.
    #[must_use]
    pub fn check_coverage(&self) -> IndexMap<ComponentKey, f64> {
        let mut coverage = IndexMap::new();
        for (component, control_rules) in &self.component_control_rules {
            let mut pct = 0.0;
            if self.component_controls.contains_key(component) {
                let mut total = 0usize;
                let mut checked = 0usize;
                for rules in control_rules.values() {
                    for rule in rules {
                        total += 1;
                        if self.check_for_rule(rule).is_some() {
                            checked += 1;
                        }
                    }
                }
                if total > 0 {
                    pct = checked as f64 / total as f64 * 100.0;
                }
            }
            coverage.insert(component.clone(), pct);
        }
        coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsDocumentStore;
    use std::path::PathBuf;

    fn definition(json: &str) -> ComponentDefinition {
        serde_json::from_str(json).expect("definition fixture should deserialize")
    }

    fn analyze(json: &str) -> AnalysisReport {
        // No sources in these fixtures, so the store is never consulted.
        let store = FsDocumentStore::new();
        let base = PathBuf::from(".");
        let analyzer = InsightsAnalyzer::new(&store, &base, AnalysisConfig::default());
        analyzer
            .analyze(&definition(json))
            .expect("analysis should succeed")
    }

    const TWO_COMPONENTS: &str = r#"{
        "uuid": "66666666-0000-4000-8000-000000000001",
        "metadata": {
            "title": "Test Component Definition Demo",
            "version": "1.2.3",
            "last-modified": "2024-05-01T10:00:00+00:00"
        },
        "components": [
            {
                "uuid": "66666666-0000-4000-8000-0000000000a1",
                "type": "software",
                "title": "Web Server",
                "control-implementations": [{
                    "implemented-requirements": [
                        {"control-id": "ac-2", "props": [
                            {"name": "Rule_Id", "value": "rule-a"},
                            {"name": "Rule_Id", "value": "rule-b"}
                        ]},
                        {"control-id": "ac-1"}
                    ]
                }]
            },
            {
                "uuid": "66666666-0000-4000-8000-0000000000a2",
                "type": "service",
                "title": "Database",
                "control-implementations": [{
                    "implemented-requirements": [
                        {"control-id": "ac-2", "props": [
                            {"name": "Rule_Id", "value": "rule-c"}
                        ]}
                    ]
                }]
            },
            {
                "uuid": "66666666-0000-4000-8000-0000000000a3",
                "type": "validation",
                "title": "Scanner",
                "props": [
                    {"name": "Rule_Id", "value": "rule-a", "remarks": "rs-1"},
                    {"name": "Rule_Data_Model_Fact_Type_Id_List", "value": "fact-1", "remarks": "rs-1"},
                    {"name": "Check_Id", "value": "check-a", "remarks": "rs-1"},
                    {"name": "Rule_Id", "value": "rule-b", "remarks": "rs-2"},
                    {"name": "Check_Id", "value": "check-b", "remarks": "rs-2"},
                    {"name": "Rule_Id", "value": "rule-d", "remarks": "rs-3"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_control_to_components_dedup_in_order() {
        let report = analyze(TWO_COMPONENTS);
        let components: Vec<_> = report.control_components()["ac-2"]
            .iter()
            .map(ComponentKey::title)
            .collect();
        assert_eq!(components, vec!["Web Server", "Database"]);
    }

    #[test]
    fn test_relation_round_trip() {
        let report = analyze(TWO_COMPONENTS);
        // Every control in control→components is implemented by one of its
        // listed components, and vice versa.
        for (control, components) in report.control_components() {
            assert!(components.iter().any(|c| {
                report.component_controls()[c].contains(control.as_str())
            }));
        }
        for (component, controls) in report.component_controls() {
            for control in controls {
                assert!(report.control_components()[control].contains(component));
            }
        }
    }

    #[test]
    fn test_validation_components_excluded_from_control_maps() {
        let report = analyze(TWO_COMPONENTS);
        assert!(!report
            .component_controls()
            .keys()
            .any(|key| key.title() == "Scanner"));
    }

    #[test]
    fn test_rules_collected_per_component_and_control() {
        let report = analyze(TWO_COMPONENTS);
        let web = report
            .component_control_rules()
            .iter()
            .find(|(key, _)| key.title() == "Web Server")
            .map(|(_, rules)| rules)
            .expect("web server should have rules");
        let rules: Vec<_> = web["ac-2"].iter().map(String::as_str).collect();
        assert_eq!(rules, vec!["rule-a", "rule-b"]);
        // ac-1 had no Rule_Id props, so no entry
        assert!(!web.contains_key("ac-1"));
    }

    #[test]
    fn test_check_for_rule() {
        let report = analyze(TWO_COMPONENTS);
        assert_eq!(report.check_for_rule("rule-a"), Some("check-a"));
        assert_eq!(report.check_for_rule("rule-b"), Some("check-b"));
        // rule-d has no Check_Id in its rule set
        assert_eq!(report.check_for_rule("rule-d"), None);
    }

    #[test]
    fn test_rule_implementations() {
        let report = analyze(TWO_COMPONENTS);
        let implementations = report.rule_implementations();
        assert_eq!(
            implementations["rule-a"].as_deref(),
            Some("fact-1"),
            "rule-a carries a fact-type list"
        );
        assert_eq!(implementations["rule-b"], None);
        assert_eq!(implementations["rule-d"], None);
    }

    #[test]
    fn test_validation_lists_parallel() {
        let report = analyze(TWO_COMPONENTS);
        assert_eq!(report.validation_rules(), ["rule-a", "rule-b"]);
        assert_eq!(report.validation_checks(), ["check-a", "check-b"]);
    }

    #[test]
    fn test_check_coverage_percentages() {
        let report = analyze(TWO_COMPONENTS);
        let coverage = report.check_coverage();
        let web = coverage
            .iter()
            .find(|(key, _)| key.title() == "Web Server")
            .map(|(_, pct)| *pct)
            .expect("web server coverage");
        // rule-a and rule-b both checked
        assert!((web - 100.0).abs() < f64::EPSILON);
        let db = coverage
            .iter()
            .find(|(key, _)| key.title() == "Database")
            .map(|(_, pct)| *pct)
            .expect("database coverage");
        // rule-c has no check
        assert!(db.abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_check_coverage() {
        // 4 distinct rules, 3 with checks -> 75.0
        let report = analyze(
            r#"{
                "uuid": "66666666-0000-4000-8000-000000000002",
                "metadata": {
                    "title": "Coverage Fixture",
                    "version": "0.1.0",
                    "last-modified": "2024-05-01T10:00:00+00:00"
                },
                "components": [
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000b1",
                        "type": "software",
                        "title": "App",
                        "control-implementations": [{
                            "implemented-requirements": [
                                {"control-id": "ac-1", "props": [
                                    {"name": "Rule_Id", "value": "r1"},
                                    {"name": "Rule_Id", "value": "r2"}
                                ]},
                                {"control-id": "ac-2", "props": [
                                    {"name": "Rule_Id", "value": "r3"},
                                    {"name": "Rule_Id", "value": "r4"}
                                ]}
                            ]
                        }]
                    },
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000b2",
                        "type": "validation",
                        "title": "Checker",
                        "props": [
                            {"name": "Rule_Id", "value": "r1", "remarks": "g1"},
                            {"name": "Check_Id", "value": "c1", "remarks": "g1"},
                            {"name": "Rule_Id", "value": "r2", "remarks": "g2"},
                            {"name": "Check_Id", "value": "c2", "remarks": "g2"},
                            {"name": "Rule_Id", "value": "r3", "remarks": "g3"},
                            {"name": "Check_Id", "value": "c3", "remarks": "g3"},
                            {"name": "Rule_Id", "value": "r4", "remarks": "g4"}
                        ]
                    }
                ]
            }"#,
        );
        let coverage = report.check_coverage();
        let (_, pct) = coverage.first().expect("one covered component");
        assert!((pct - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_rule_across_validation_components_first_wins() {
        let report = analyze(
            r#"{
                "uuid": "66666666-0000-4000-8000-000000000003",
                "metadata": {
                    "title": "Conflict Fixture",
                    "version": "0.1.0",
                    "last-modified": "2024-05-01T10:00:00+00:00"
                },
                "components": [
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000c1",
                        "type": "validation",
                        "title": "First Scanner",
                        "props": [
                            {"name": "Rule_Id", "value": "r1", "remarks": "g1"},
                            {"name": "Check_Id", "value": "check-first", "remarks": "g1"}
                        ]
                    },
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000c2",
                        "type": "validation",
                        "title": "Second Scanner",
                        "props": [
                            {"name": "Rule_Id", "value": "r1", "remarks": "g1"},
                            {"name": "Check_Id", "value": "check-second", "remarks": "g1"}
                        ]
                    }
                ]
            }"#,
        );
        assert_eq!(report.check_for_rule("r1"), Some("check-first"));
    }

    #[test]
    fn test_validation_component_without_props_skipped() {
        let report = analyze(
            r#"{
                "uuid": "66666666-0000-4000-8000-000000000004",
                "metadata": {
                    "title": "Empty Validation",
                    "version": "0.1.0",
                    "last-modified": "2024-05-01T10:00:00+00:00"
                },
                "components": [
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000d1",
                        "type": "validation",
                        "title": "Idle Scanner"
                    }
                ]
            }"#,
        );
        assert!(report.component_rule_checks().is_empty());
    }

    #[test]
    fn test_metadata_accessors() {
        let report = analyze(TWO_COMPONENTS);
        assert_eq!(report.version(), "1.2.3");
        assert_eq!(report.reduced_title(), "Demo");
        assert!(report.last_modified().is_some());
    }

    #[test]
    fn test_all_controls_sorted() {
        let report = analyze(TWO_COMPONENTS);
        let sorted = report.all_controls_sorted().expect("ids are well-formed");
        assert_eq!(sorted, vec!["ac-1", "ac-2"]);
    }

    #[test]
    fn test_all_components_sorted_by_title() {
        let report = analyze(TWO_COMPONENTS);
        let titles: Vec<_> = report
            .all_components_sorted()
            .iter()
            .map(|c| c.title())
            .collect();
        assert_eq!(titles, vec!["Database", "Web Server"]);
    }

    #[test]
    fn test_extract_rule_ids_preserves_duplicates() {
        let props: Vec<Property> = serde_json::from_str(
            r#"[
                {"name": "Rule_Id", "value": "r1"},
                {"name": "Other", "value": "x"},
                {"name": "Rule_Id", "value": "r1"}
            ]"#,
        )
        .expect("props fixture");
        assert_eq!(extract_rule_ids(&props), vec!["r1", "r1"]);
    }

    #[test]
    fn test_missing_control_id_recorded_as_empty() {
        let report = analyze(
            r#"{
                "uuid": "66666666-0000-4000-8000-000000000005",
                "metadata": {
                    "title": "Anomaly Fixture",
                    "version": "0.1.0",
                    "last-modified": "2024-05-01T10:00:00+00:00"
                },
                "components": [
                    {
                        "uuid": "66666666-0000-4000-8000-0000000000e1",
                        "type": "software",
                        "title": "Odd Component",
                        "control-implementations": [{
                            "implemented-requirements": [{"description": "no control id"}]
                        }]
                    }
                ]
            }"#,
        );
        // The anomaly is preserved, not skipped: an empty id shows up.
        assert!(report.control_components().contains_key(""));
    }
}
