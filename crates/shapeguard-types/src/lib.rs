//! Stable DTOs and IDs used across the shapeguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for diagnostics and the emitted report
//! - stable string IDs and codes
//! - canonical source-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod explain;
pub mod ids;
pub mod path;

pub use diagnostic::{
    Diagnostic, Location, PackageOutcome, ReportData, ReportEnvelope, SCHEMA_REPORT_V1, Severity,
    ShapeguardReport, ToolMeta, Verdict,
};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::SourcePath;
