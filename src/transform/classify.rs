//! Violation classification: severity mapping, location formatting and the
//! issue taxonomy.

use crate::models::analysis::{IssueType, Severity};
use crate::models::report::RawViolation;

/// Map a Kantra category to a dashboard severity (case-insensitive)
pub fn map_severity(category: Option<&str>) -> Severity {
    match category {
        Some(value) => match value.to_lowercase().as_str() {
            "mandatory" => Severity::Critical,
            "potential" => Severity::Warning,
            "optional" => Severity::Info,
            _ => Severity::Info,
        },
        None => Severity::Info,
    }
}

/// Extract the file path from a `file://` URI.
///
/// Anything after the first `file://` marker is the path; URIs without the
/// marker (or with nothing after it) are passed through verbatim.
pub fn extract_file_path(uri: Option<&str>) -> String {
    let Some(uri) = uri else {
        return String::new();
    };
    match uri.find("file://") {
        Some(idx) => {
            let rest = &uri[idx + "file://".len()..];
            if rest.is_empty() {
                uri.to_string()
            } else {
                rest.to_string()
            }
        }
        None => uri.to_string(),
    }
}

/// Last path segment, falling back to the whole path when the path ends in
/// a separator.
pub fn base_name(file_path: &str) -> &str {
    match file_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => file_path,
    }
}

/// Format the issue location as `<basename>[:<lineNumber>]`.
///
/// Line 0 is treated as absent; Kantra line numbers are 1-based.
pub fn format_location(file_path: &str, line_number: Option<u32>) -> String {
    let name = base_name(file_path);
    match line_number.filter(|n| *n != 0) {
        Some(line) => format!("{}:{}", name, line),
        None => name.to_string(),
    }
}

/// Categorize a violation into the fixed issue taxonomy.
///
/// Ordered first-match predicates: rule id patterns are most specific and
/// win over description content, which wins over the generic label check.
/// All substring tests are case-insensitive.
pub fn classify_issue_type(violation: &RawViolation, rule_id: &str) -> IssueType {
    let rule_id = rule_id.to_lowercase();
    let description = violation
        .description
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    if rule_id.contains("hibernate") {
        return IssueType::HibernatePersistence;
    }
    if rule_id.contains("persistence") {
        return IssueType::Persistence;
    }
    if rule_id.contains("cdi-to-quarkus") {
        return IssueType::CdiChanges;
    }
    if rule_id.contains("ee-to-quarkus") || rule_id.contains("ejb") {
        return IssueType::JavaEeToCdi;
    }
    if rule_id.contains("jms-to-reactive") {
        return IssueType::Messaging;
    }
    if rule_id.contains("jaxrs") {
        return IssueType::RestJaxRs;
    }
    if rule_id.contains("pom-to-quarkus") || rule_id.contains("maven") {
        return IssueType::BuildConfiguration;
    }
    if rule_id.contains("security") {
        return IssueType::Security;
    }

    if description.contains("security") {
        return IssueType::Security;
    }
    if description.contains("deprecated") || description.contains("outdated") {
        return IssueType::DeprecatedApis;
    }
    if description.contains("performance") {
        return IssueType::Performance;
    }
    if description.contains("stateless") || description.contains("stateful") {
        return IssueType::JavaEeToCdi;
    }
    if description.contains("persistence")
        || description.contains("hibernate")
        || description.contains("entitymanager")
    {
        return IssueType::HibernatePersistence;
    }
    if description.contains("cdi")
        || description.contains("inject")
        || description.contains("produces")
    {
        return IssueType::CdiChanges;
    }

    if violation
        .labels
        .iter()
        .any(|label| label.to_lowercase().contains("quarkus"))
    {
        return IssueType::QuarkusMigration;
    }

    IssueType::CodeQuality
}
