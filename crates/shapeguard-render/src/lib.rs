//! Rendering utilities for terminals and CI surfaces (plain lines, GitHub annotations, Markdown).

#![forbid(unsafe_code)]

mod gha;
mod lines;
mod markdown;

pub use gha::render_github_annotations;
pub use lines::render_lines;
pub use markdown::render_markdown;

#[cfg(test)]
pub(crate) mod fixtures {
    use shapeguard_types::{Diagnostic, Location, Severity, SourcePath};

    pub fn diagnostic(code: &str, message: &str, line: Option<u32>) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            check_id: "types.allowlist".to_string(),
            code: code.to_string(),
            message: message.to_string(),
            location: line.map(|line| Location {
                path: SourcePath::new("example.com/api/v1/types.go"),
                line: Some(line),
            }),
            help: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }
    }
}
