//! Raw Kantra report types as emitted by `kantra analyze` (output.yaml).
//!
//! The report is a top-level sequence of rulesets; each ruleset carries a
//! mapping of rule id to violation. Rule order in the document drives issue
//! id assignment downstream, so violations are kept as an explicit ordered
//! sequence of (rule id, violation) pairs rather than a hash map.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One named group of violations found by a rule module
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuleset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Violations keyed by rule id, in document order
    #[serde(default, deserialize_with = "ordered_violations")]
    pub violations: Vec<(String, RawViolation)>,
}

/// A single rule that matched one or more locations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawViolation {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub effort: Option<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub incidents: Vec<RawIncident>,
}

impl RawViolation {
    /// Effective story-point effort. Kantra omits the field for trivial
    /// rules and some writers emit 0; both mean 1.
    pub fn effective_effort(&self) -> u32 {
        self.effort.filter(|e| *e > 0).unwrap_or(1)
    }
}

/// One concrete occurrence (file + line) of a violation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIncident {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "lineNumber")]
    pub line_number: Option<u32>,
}

fn ordered_violations<'de, D>(deserializer: D) -> Result<Vec<(String, RawViolation)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, RawViolation)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping of rule id to violation")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((rule_id, violation)) = map.next_entry::<String, RawViolation>()? {
                entries.push((rule_id, violation));
            }
            Ok(entries)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedVisitor)
}

/// Parse raw report text into a sequence of rulesets.
///
/// Fails with a parse error when the text is not well-formed YAML; no
/// partial results are returned.
pub fn parse_report(raw_text: &str) -> crate::KantravizResult<Vec<RawRuleset>> {
    let rulesets: Vec<RawRuleset> = serde_yaml::from_str(raw_text)?;
    Ok(rulesets)
}
