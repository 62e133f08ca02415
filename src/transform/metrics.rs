//! Dashboard metrics derived from a transformed document.
//!
//! These are the deterministic reductions the dashboard panels render:
//! graph nodes/links, severity totals with a health score, and the issue
//! breakdowns by type and by component.

use serde::{Deserialize, Serialize};

use crate::models::analysis::{
    AnalysisDocument, ComponentId, ComponentType, DependencyKind, IssueType, Severity, Technology,
};

/// Node in the force-directed architecture graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: ComponentId,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub issues: u64,
    pub lines_of_code: u64,
    pub technology: Technology,
}

/// Link in the force-directed architecture graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: ComponentId,
    pub target: ComponentId,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

/// Graph-shaped view of the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Severity totals plus an overall health score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_issues: u64,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
    pub health_score: u64,
}

/// Issue count for one taxonomy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeCount {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub count: u64,
}

/// Heatmap bucket for a component's issue load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    Critical,
    Warning,
    Good,
}

/// Heatmap row for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHeat {
    pub component: String,
    pub issues: u64,
    pub severity: HeatLevel,
}

/// Project the document into graph nodes and links
pub fn graph_data(document: &AnalysisDocument) -> GraphData {
    let nodes = document
        .components
        .iter()
        .map(|component| GraphNode {
            id: component.id,
            name: component.name.clone(),
            component_type: component.component_type,
            issues: component.issues.len() as u64,
            lines_of_code: component.lines_of_code,
            technology: component.technology.clone(),
        })
        .collect();

    let links = document
        .dependencies
        .iter()
        .map(|dep| GraphLink {
            source: dep.source,
            target: dep.target,
            kind: dep.kind,
        })
        .collect();

    GraphData { nodes, links }
}

/// Compute severity totals and the health score.
///
/// Health score: 100 minus the per-component penalty (2 per critical, 1 per
/// warning, 0.5 per info), rounded and clamped to 0-100. A document with no
/// components scores 100.
pub fn dashboard_metrics(document: &AnalysisDocument) -> DashboardMetrics {
    let mut critical = 0u64;
    let mut warning = 0u64;
    let mut info = 0u64;
    let mut total_issues = 0u64;

    for component in &document.components {
        for issue in &component.issues {
            total_issues += 1;
            match issue.severity {
                Severity::Critical => critical += 1,
                Severity::Warning => warning += 1,
                Severity::Info => info += 1,
            }
        }
    }

    let total_components = document.components.len() as f64;
    let health_score = if total_components == 0.0 {
        100
    } else {
        let penalty =
            (critical as f64 * 2.0 + warning as f64 + info as f64 * 0.5) / total_components;
        (100.0 - penalty).round().clamp(0.0, 100.0) as u64
    };

    DashboardMetrics {
        total_issues,
        critical,
        warning,
        info,
        health_score,
    }
}

/// Count issues per taxonomy type, in first-seen order
pub fn issues_by_type(document: &AnalysisDocument) -> Vec<IssueTypeCount> {
    let mut counts: Vec<IssueTypeCount> = Vec::new();

    for component in &document.components {
        for issue in &component.issues {
            match counts.iter_mut().find(|c| c.issue_type == issue.issue_type) {
                Some(entry) => entry.count += 1,
                None => counts.push(IssueTypeCount {
                    issue_type: issue.issue_type,
                    count: 1,
                }),
            }
        }
    }

    counts
}

/// Heatmap rows, one per component in document order
pub fn issues_by_component(document: &AnalysisDocument) -> Vec<ComponentHeat> {
    document
        .components
        .iter()
        .map(|component| {
            let issues = component.issues.len() as u64;
            let severity = if issues > 20 {
                HeatLevel::Critical
            } else if issues > 5 {
                HeatLevel::Warning
            } else {
                HeatLevel::Good
            };
            ComponentHeat {
                component: component.name.clone(),
                issues,
                severity,
            }
        })
        .collect()
}
