//! Component inference: source-path bucketing and technology detection.

use crate::models::analysis::{ComponentId, FrameworkStatus};

const SOURCE_LABEL_PREFIX: &str = "konveyor.io/source=";

/// Assign a file path to an architectural component.
///
/// Ordered first-match tests on exact path segments, except the build file
/// rule which is a substring test on the whole path and the web asset rule
/// which also checks the file extension.
pub fn component_for_path(file_path: &str) -> ComponentId {
    let segments: Vec<&str> = file_path.split('/').collect();
    let has_segment = |names: &[&str]| segments.iter().any(|s| names.contains(s));

    if has_segment(&["model"]) {
        return ComponentId::Model;
    }
    if has_segment(&["service"]) {
        return ComponentId::Service;
    }
    if has_segment(&["rest", "api"]) {
        return ComponentId::Rest;
    }
    if has_segment(&["persistence", "dao", "repository"]) {
        return ComponentId::Persistence;
    }
    if has_segment(&["utils", "util"]) {
        return ComponentId::Utils;
    }
    if has_segment(&["webapp", "web"]) || has_web_extension(file_path) {
        return ComponentId::Webapp;
    }
    if ["pom.xml", "build.gradle", "package.json"]
        .iter()
        .any(|f| file_path.contains(f))
    {
        return ComponentId::BuildConfig;
    }
    if has_segment(&["config", "configuration"]) {
        return ComponentId::Config;
    }
    if has_segment(&["controller"]) {
        return ComponentId::Controller;
    }

    ComponentId::Core
}

fn has_web_extension(file_path: &str) -> bool {
    [".html", ".jsp", ".css", ".js"]
        .iter()
        .any(|ext| file_path.ends_with(ext))
}

/// Detect the programming language from a file extension
pub fn detect_language(file_path: &str) -> &'static str {
    if file_path.ends_with(".java") {
        "Java"
    } else if file_path.ends_with(".xml") {
        "XML"
    } else if file_path.ends_with(".js") {
        "JavaScript"
    } else if file_path.ends_with(".ts") {
        "TypeScript"
    } else if file_path.ends_with(".py") {
        "Python"
    } else if file_path.ends_with(".go") {
        "Go"
    } else if file_path.ends_with(".rb") {
        "Ruby"
    } else if file_path.ends_with(".cs") {
        "C#"
    } else if file_path.ends_with(".yml") || file_path.ends_with(".yaml") {
        "YAML"
    } else if file_path.ends_with(".html") || file_path.ends_with(".jsp") {
        "HTML"
    } else {
        "Other"
    }
}

/// Infer the source framework from violation labels, falling back to rule id
/// substrings when no `konveyor.io/source=` label matches.
pub fn infer_framework(labels: &[String], rule_id: &str) -> (String, FrameworkStatus) {
    let mut framework = "Unknown".to_string();
    let mut status = FrameworkStatus::Current;

    for label in labels {
        if !label.contains(SOURCE_LABEL_PREFIX) {
            continue;
        }
        let source = label.replacen(SOURCE_LABEL_PREFIX, "", 1);
        if source.contains("eap7") || source.contains("java-ee7") {
            framework = "Java EE 7 / JBoss EAP 7.4".to_string();
            status = FrameworkStatus::Outdated;
        } else if source.contains("eap6") || source.contains("java-ee6") {
            framework = "Java EE 6 / JBoss EAP 6.x".to_string();
            status = FrameworkStatus::Eol;
        } else if source.contains("springboot") {
            framework = "Spring Boot".to_string();
            status = FrameworkStatus::Current;
        }
    }

    if framework == "Unknown" {
        if rule_id.contains("eap7") || rule_id.contains("java-ee") {
            framework = "Java EE 7 / JBoss EAP 7.4".to_string();
            status = FrameworkStatus::Outdated;
        } else if rule_id.contains("springboot") {
            framework = "Spring Boot".to_string();
            status = FrameworkStatus::Current;
        } else if rule_id.contains("quarkus") {
            framework = "Quarkus".to_string();
            status = FrameworkStatus::Current;
        }
    }

    (framework, status)
}
