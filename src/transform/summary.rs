//! Summary reduction over the component list.

use crate::models::analysis::{AnalysisSummary, Component, Severity};

/// Aggregate totals and severity counts across all components
pub fn summarize(components: &[Component]) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total_components: components.len() as u64,
        ..Default::default()
    };

    for component in components {
        summary.total_issues += component.issues.len() as u64;
        summary.lines_of_code += component.lines_of_code;

        for issue in &component.issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{ComponentId, ComponentType, FrameworkStatus, Issue, IssueType, Technology};

    fn component(id: ComponentId, severities: &[Severity]) -> Component {
        let issues: Vec<Issue> = severities
            .iter()
            .enumerate()
            .map(|(i, severity)| Issue {
                id: format!("issue-{}", i + 1),
                title: "title".to_string(),
                issue_type: IssueType::CodeQuality,
                severity: *severity,
                description: String::new(),
                location: "File.java".to_string(),
                effort: 1,
                rule_id: "rule-x".to_string(),
            })
            .collect();

        Component {
            id,
            name: id.display_name(),
            component_type: ComponentType::Backend,
            lines_of_code: 1000 + 100 * issues.len() as u64,
            technology: Technology {
                language: "Java".to_string(),
                framework: "Unknown".to_string(),
                framework_status: FrameworkStatus::Current,
            },
            issues,
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn test_empty_component_list() {
        let summary = summarize(&[]);
        assert_eq!(summary, AnalysisSummary::default());
    }

    #[test]
    fn test_totals_and_severity_counts() {
        let components = vec![
            component(
                ComponentId::Service,
                &[Severity::Critical, Severity::Warning, Severity::Warning],
            ),
            component(ComponentId::Model, &[Severity::Info]),
        ];

        let summary = summarize(&components);
        assert_eq!(summary.total_components, 2);
        assert_eq!(summary.total_issues, 4);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.warning, 2);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.lines_of_code, 1300 + 1100);
        assert_eq!(
            summary.total_issues,
            summary.critical + summary.warning + summary.info
        );
    }
}
