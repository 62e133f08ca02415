// Public exports for data models

pub mod analysis;
pub mod report;

pub use analysis::{
    AnalysisDocument, AnalysisSummary, Component, ComponentId, ComponentType, Dependency,
    DependencyKind, FrameworkStatus, Issue, IssueType, Severity, Technology,
};
pub use report::{RawIncident, RawRuleset, RawViolation};
