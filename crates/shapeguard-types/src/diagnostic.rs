use crate::SourcePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for shapeguard reports.
pub const SCHEMA_REPORT_V1: &str = "shapeguard.report.v1";

/// Every policy violation is an error: there is no warning tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: SourcePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,

    /// Fully rendered, single-line message (this is what lands on stderr).
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and baselining. A hash of
    /// `check_id + code + type + field`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// Outcome of one package, in the order the packages were requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackageOutcome {
    pub package: String,
    pub verdict: Verdict,
    pub types_checked: u32,
    pub fields_checked: u32,
    pub diagnostics: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Shapeguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ReportData {
    pub checks: Vec<String>,
    pub packages: Vec<PackageOutcome>,
    pub types_checked: u32,
    pub fields_checked: u32,

    /// Fields whose static type could not be fully resolved and were skipped by
    /// resolution-sensitive checks.
    pub fields_skipped_unresolved: u32,

    pub diagnostics_total: u32,
}

/// A generic report envelope with a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ReportData> {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub diagnostics: Vec<Diagnostic>,
    pub data: TData,
}

pub type ShapeguardReport = ReportEnvelope<ReportData>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diagnostic() -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            check_id: "types.allowlist".to_string(),
            code: "disallowed_type".to_string(),
            message: "pkg.Foo:Bar: type *Baz is not allowed to be used".to_string(),
            location: Some(Location {
                path: SourcePath::new("pkg/types.go"),
                line: Some(12),
            }),
            help: None,
            fingerprint: None,
            data: JsonValue::Null,
        }
    }

    #[test]
    fn verdict_is_pass_only_when_empty() {
        assert_eq!(Verdict::from_diagnostics(&[]), Verdict::Pass);
        assert_eq!(Verdict::from_diagnostics(&[diagnostic()]), Verdict::Fail);
    }

    #[test]
    fn diagnostic_serializes_with_lowercase_severity_and_skips_empty_fields() {
        let value = serde_json::to_value(diagnostic()).expect("serialize");
        assert_eq!(value["severity"], json!("error"));
        assert_eq!(value["location"]["path"], json!("pkg/types.go"));
        assert!(value.get("help").is_none());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn location_display_includes_line_when_known() {
        let loc = Location {
            path: SourcePath::new("pkg/types.go"),
            line: Some(3),
        };
        assert_eq!(loc.to_string(), "pkg/types.go:3");
        let loc = Location {
            path: SourcePath::new("pkg/types.go"),
            line: None,
        };
        assert_eq!(loc.to_string(), "pkg/types.go");
    }
}
