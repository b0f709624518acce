//! Use case orchestration for shapeguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! markers and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod allowlist;
mod check;
mod explain;
mod render;
mod schema;

pub use allowlist::{AllowlistInput, run_allowlist};
pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{
    OutputFormat, render_diagnostics, render_markdown, serialize_report, write_report, write_text,
};
pub use schema::{PackageSchemas, SchemaInput, run_schema, schema_for_signature};
