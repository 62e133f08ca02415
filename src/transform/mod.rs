//! The Kantra report transformation pipeline.
//!
//! A pure, synchronous function from raw report text to the dashboard
//! document: parse rulesets, classify each violation incident into an issue,
//! accumulate issues into components, then derive lines of code, the
//! dependency graph and the summary. No shared state and no logging; the
//! caller either gets a complete document or a single terminal error.

pub mod classify;
pub mod components;
pub mod dependencies;
pub mod metrics;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::models::analysis::{AnalysisDocument, Component, Issue, Technology};
use crate::models::report::{self, RawRuleset};
use crate::KantravizResult;

/// Default application name when the caller supplies none
pub const DEFAULT_APPLICATION_NAME: &str = "Konveyor Analysis";

/// Caller-supplied transform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    pub application_name: Option<String>,
    pub analysis_date: Option<String>,
}

/// Parse raw YAML report text and transform it into the dashboard document
pub fn transform_report(
    yaml_text: &str,
    options: &TransformOptions,
) -> KantravizResult<AnalysisDocument> {
    let rulesets = report::parse_report(yaml_text)?;
    Ok(transform_rulesets(&rulesets, options))
}

/// Transform parsed rulesets into the dashboard document
pub fn transform_rulesets(rulesets: &[RawRuleset], options: &TransformOptions) -> AnalysisDocument {
    let mut components: Vec<Component> = Vec::new();
    let mut issue_counter: u64 = 1;

    for ruleset in rulesets {
        for (rule_id, violation) in &ruleset.violations {
            // A violation without incidents produces no issues at all
            if violation.incidents.is_empty() {
                continue;
            }

            let severity = classify::map_severity(violation.category.as_deref());
            let effort = violation.effective_effort();

            for incident in &violation.incidents {
                let file_path = classify::extract_file_path(incident.uri.as_deref());
                let component_id = components::component_for_path(&file_path);

                let idx = match components.iter().position(|c| c.id == component_id) {
                    Some(idx) => idx,
                    None => {
                        // Technology is fixed by the first incident assigned
                        // to the component and never recomputed
                        let (framework, framework_status) =
                            components::infer_framework(&violation.labels, rule_id);
                        components.push(Component {
                            id: component_id,
                            name: component_id.display_name(),
                            component_type: component_id.component_type(),
                            lines_of_code: 0,
                            technology: Technology {
                                language: components::detect_language(&file_path).to_string(),
                                framework,
                                framework_status,
                            },
                            issues: Vec::new(),
                            dependencies: Vec::new(),
                        });
                        components.len() - 1
                    }
                };

                let title = match non_empty(violation.description.as_deref()) {
                    Some(description) => description.to_string(),
                    None => format!("{} violation", rule_id),
                };
                let description = non_empty(incident.message.as_deref())
                    .or_else(|| non_empty(violation.description.as_deref()))
                    .unwrap_or("")
                    .to_string();

                components[idx].issues.push(Issue {
                    id: format!("issue-{}", issue_counter),
                    title,
                    issue_type: classify::classify_issue_type(violation, rule_id),
                    severity,
                    description,
                    location: classify::format_location(&file_path, incident.line_number),
                    effort,
                    rule_id: rule_id.clone(),
                });
                issue_counter += 1;
            }
        }
    }

    // Lines of code are derived from final issue counts in a second pass,
    // never accumulated incrementally
    for component in &mut components {
        component.lines_of_code = 1000 + 100 * component.issues.len() as u64;
    }

    let present: Vec<_> = components.iter().map(|c| c.id).collect();
    let dependencies = dependencies::synthesize(&present);
    let summary = summary::summarize(&components);

    AnalysisDocument {
        application_name: options
            .application_name
            .clone()
            .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string()),
        analysis_date: options
            .analysis_date
            .clone()
            .unwrap_or_else(default_analysis_date),
        summary,
        components,
        dependencies,
    }
}

fn default_analysis_date() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{ComponentId, Severity};

    fn transform(yaml: &str) -> AnalysisDocument {
        transform_report(
            yaml,
            &TransformOptions {
                application_name: Some("Test App".to_string()),
                analysis_date: Some("2024-01-01".to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_issue_ids_follow_processing_order() {
        let yaml = r#"
- violations:
    rule-a:
      incidents:
        - uri: file:///app/model/A.java
        - uri: file:///app/model/B.java
    rule-b:
      incidents:
        - uri: file:///app/service/C.java
"#;
        let doc = transform(yaml);
        let ids: Vec<&str> = doc
            .components
            .iter()
            .flat_map(|c| c.issues.iter())
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["issue-1", "issue-2", "issue-3"]);
    }

    #[test]
    fn test_first_incident_fixes_technology() {
        let yaml = r#"
- violations:
    rule-a:
      labels:
        - konveyor.io/source=eap7
      incidents:
        - uri: file:///app/service/OrderService.java
    rule-b:
      labels:
        - konveyor.io/source=springboot
      incidents:
        - uri: file:///app/service/config.xml
"#;
        let doc = transform(yaml);
        assert_eq!(doc.components.len(), 1);
        let technology = &doc.components[0].technology;
        assert_eq!(technology.language, "Java");
        assert_eq!(technology.framework, "Java EE 7 / JBoss EAP 7.4");
    }

    #[test]
    fn test_title_falls_back_to_rule_id() {
        let yaml = r#"
- violations:
    rule-a:
      incidents:
        - uri: file:///app/Main.java
          message: something happened
"#;
        let doc = transform(yaml);
        let issue = &doc.components[0].issues[0];
        assert_eq!(issue.title, "rule-a violation");
        assert_eq!(issue.description, "something happened");
    }

    #[test]
    fn test_incident_message_preferred_over_description() {
        let yaml = r#"
- violations:
    rule-a:
      description: violation description
      incidents:
        - uri: file:///app/Main.java
        - uri: file:///app/Other.java
          message: incident message
"#;
        let doc = transform(yaml);
        let issues = &doc.components[0].issues;
        assert_eq!(issues[0].description, "violation description");
        assert_eq!(issues[1].description, "incident message");
    }

    #[test]
    fn test_violation_without_incidents_is_dropped() {
        let yaml = r#"
- violations:
    rule-a:
      category: mandatory
      description: no incidents here
    rule-b:
      incidents: []
"#;
        let doc = transform(yaml);
        assert!(doc.components.is_empty());
        assert_eq!(doc.summary.total_issues, 0);
    }

    #[test]
    fn test_absent_uri_lands_in_core() {
        let yaml = r#"
- violations:
    rule-a:
      incidents:
        - message: no uri at all
"#;
        let doc = transform(yaml);
        assert_eq!(doc.components[0].id, ComponentId::Core);
        assert_eq!(doc.components[0].issues[0].location, "");
    }

    #[test]
    fn test_loc_second_pass() {
        let yaml = r#"
- violations:
    rule-a:
      incidents:
        - uri: file:///app/model/A.java
        - uri: file:///app/model/B.java
        - uri: file:///app/model/C.java
"#;
        let doc = transform(yaml);
        assert_eq!(doc.components[0].lines_of_code, 1300);
    }

    #[test]
    fn test_severity_applies_to_all_incidents() {
        let yaml = r#"
- violations:
    rule-a:
      category: Mandatory
      incidents:
        - uri: file:///app/model/A.java
        - uri: file:///app/service/B.java
"#;
        let doc = transform(yaml);
        for component in &doc.components {
            for issue in &component.issues {
                assert_eq!(issue.severity, Severity::Critical);
            }
        }
    }

    #[test]
    fn test_caller_options_are_used() {
        let doc = transform("[]");
        assert_eq!(doc.application_name, "Test App");
        assert_eq!(doc.analysis_date, "2024-01-01");
    }

    #[test]
    fn test_default_options() {
        let doc = transform_report("[]", &TransformOptions::default()).unwrap();
        assert_eq!(doc.application_name, DEFAULT_APPLICATION_NAME);
        // ISO date shape: YYYY-MM-DD
        assert_eq!(doc.analysis_date.len(), 10);
        assert_eq!(&doc.analysis_date[4..5], "-");
    }
}
