//! Normalized analysis model consumed by the dashboard.
//!
//! Field names and shapes are a wire contract: chart panels key off
//! `summary.*`, the architecture graph off `components[].id/issues/linesOfCode`
//! and `dependencies[].source/target/type`. Keep serialization stable.

use serde::{Deserialize, Serialize};

/// Issue severity derived from the violation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Fixed taxonomy of migration issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "Hibernate/Persistence")]
    HibernatePersistence,
    #[serde(rename = "Persistence")]
    Persistence,
    #[serde(rename = "CDI Changes")]
    CdiChanges,
    #[serde(rename = "Java EE to CDI")]
    JavaEeToCdi,
    #[serde(rename = "Messaging")]
    Messaging,
    #[serde(rename = "REST/JAX-RS")]
    RestJaxRs,
    #[serde(rename = "Build Configuration")]
    BuildConfiguration,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Deprecated APIs")]
    DeprecatedApis,
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Quarkus Migration")]
    QuarkusMigration,
    #[serde(rename = "Code Quality")]
    CodeQuality,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::HibernatePersistence => "Hibernate/Persistence",
            IssueType::Persistence => "Persistence",
            IssueType::CdiChanges => "CDI Changes",
            IssueType::JavaEeToCdi => "Java EE to CDI",
            IssueType::Messaging => "Messaging",
            IssueType::RestJaxRs => "REST/JAX-RS",
            IssueType::BuildConfiguration => "Build Configuration",
            IssueType::Security => "Security",
            IssueType::DeprecatedApis => "Deprecated APIs",
            IssueType::Performance => "Performance",
            IssueType::QuarkusMigration => "Quarkus Migration",
            IssueType::CodeQuality => "Code Quality",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of architectural buckets inferred from source paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    Model,
    Service,
    Rest,
    Persistence,
    Utils,
    Webapp,
    BuildConfig,
    Config,
    Controller,
    Core,
}

impl ComponentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Model => "model",
            ComponentId::Service => "service",
            ComponentId::Rest => "rest",
            ComponentId::Persistence => "persistence",
            ComponentId::Utils => "utils",
            ComponentId::Webapp => "webapp",
            ComponentId::BuildConfig => "build-config",
            ComponentId::Config => "config",
            ComponentId::Controller => "controller",
            ComponentId::Core => "core",
        }
    }

    /// Display name: the id with its first letter capitalized
    pub fn display_name(&self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Architectural tier for the component
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentId::Webapp => ComponentType::Frontend,
            ComponentId::Rest | ComponentId::Controller => ComponentType::Middleware,
            ComponentId::BuildConfig | ComponentId::Config => ComponentType::Infrastructure,
            ComponentId::Model
            | ComponentId::Service
            | ComponentId::Persistence
            | ComponentId::Utils
            | ComponentId::Core => ComponentType::Backend,
        }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Architectural tier of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Frontend,
    Backend,
    Middleware,
    Infrastructure,
}

/// Lifecycle status of an inferred framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkStatus {
    Current,
    Outdated,
    Eol,
}

/// Technology fingerprint, fixed by the first incident assigned to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub language: String,
    pub framework: String,
    pub framework_status: FrameworkStatus,
}

/// One migration issue derived from a violation incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub location: String,
    pub effort: u32,
    pub rule_id: String,
}

/// An inferred architectural component with its accumulated issues
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub lines_of_code: u64,
    pub technology: Technology,
    pub issues: Vec<Issue>,
    /// Kept for wire compatibility with the dashboard; always empty, the
    /// document-level dependency list is authoritative.
    pub dependencies: Vec<Dependency>,
}

/// Kind of a synthesized dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Http,
    Internal,
    Build,
}

/// A directed edge between two discovered components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub source: ComponentId,
    pub target: ComponentId,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

/// Aggregated totals across all components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_components: u64,
    pub total_issues: u64,
    pub lines_of_code: u64,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

/// The final output document consumed by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub application_name: String,
    pub analysis_date: String,
    pub summary: AnalysisSummary,
    pub components: Vec<Component>,
    pub dependencies: Vec<Dependency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
    }

    #[test]
    fn test_component_id_wire_names() {
        assert_eq!(
            serde_json::to_string(&ComponentId::BuildConfig).unwrap(),
            "\"build-config\""
        );
        assert_eq!(
            serde_json::to_string(&ComponentId::Webapp).unwrap(),
            "\"webapp\""
        );
    }

    #[test]
    fn test_display_name_capitalization() {
        assert_eq!(ComponentId::Service.display_name(), "Service");
        assert_eq!(ComponentId::BuildConfig.display_name(), "Build-config");
    }

    #[test]
    fn test_component_type_derivation() {
        assert_eq!(ComponentId::Webapp.component_type(), ComponentType::Frontend);
        assert_eq!(ComponentId::Rest.component_type(), ComponentType::Middleware);
        assert_eq!(
            ComponentId::Controller.component_type(),
            ComponentType::Middleware
        );
        assert_eq!(
            ComponentId::Config.component_type(),
            ComponentType::Infrastructure
        );
        assert_eq!(
            ComponentId::BuildConfig.component_type(),
            ComponentType::Infrastructure
        );
        assert_eq!(ComponentId::Model.component_type(), ComponentType::Backend);
        assert_eq!(ComponentId::Core.component_type(), ComponentType::Backend);
    }

    #[test]
    fn test_issue_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&IssueType::HibernatePersistence).unwrap(),
            "\"Hibernate/Persistence\""
        );
        assert_eq!(
            serde_json::to_string(&IssueType::RestJaxRs).unwrap(),
            "\"REST/JAX-RS\""
        );
    }

    #[test]
    fn test_issue_field_names() {
        let issue = Issue {
            id: "issue-1".to_string(),
            title: "Replace javax import".to_string(),
            issue_type: IssueType::JavaEeToCdi,
            severity: Severity::Critical,
            description: "javax import found".to_string(),
            location: "OrderService.java:42".to_string(),
            effort: 3,
            rule_id: "ee-to-quarkus-00001".to_string(),
        };

        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], "Java EE to CDI");
        assert_eq!(value["ruleId"], "ee-to-quarkus-00001");
        assert!(value.get("issue_type").is_none());
    }

    #[test]
    fn test_dependency_field_names() {
        let dep = Dependency {
            source: ComponentId::Webapp,
            target: ComponentId::Rest,
            kind: DependencyKind::Http,
        };
        let value = serde_json::to_value(dep).unwrap();
        assert_eq!(value["source"], "webapp");
        assert_eq!(value["target"], "rest");
        assert_eq!(value["type"], "http");
    }

    #[test]
    fn test_summary_field_names() {
        let value = serde_json::to_value(AnalysisSummary::default()).unwrap();
        assert!(value.get("totalComponents").is_some());
        assert!(value.get("totalIssues").is_some());
        assert!(value.get("linesOfCode").is_some());
    }
}
