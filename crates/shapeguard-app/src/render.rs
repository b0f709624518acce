//! Render use cases: diagnostics for the terminal or CI, and report files.

use anyhow::Context;
use camino::Utf8Path;
use shapeguard_types::{Diagnostic, ShapeguardReport};

/// How diagnostics are written to stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One message per line.
    #[default]
    Lines,
    /// GitHub Actions workflow commands.
    Github,
}

pub fn render_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) -> Vec<String> {
    match format {
        OutputFormat::Lines => shapeguard_render::render_lines(diagnostics),
        OutputFormat::Github => shapeguard_render::render_github_annotations(diagnostics),
    }
}

pub fn render_markdown(report: &ShapeguardReport) -> String {
    shapeguard_render::render_markdown(report)
}

pub fn serialize_report(report: &ShapeguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Write the JSON report, creating parent directories as needed.
pub fn write_report(path: &Utf8Path, report: &ShapeguardReport) -> anyhow::Result<()> {
    let bytes = serialize_report(report)?;
    write_bytes(path, &bytes)
}

/// Write a text artifact (e.g. Markdown), creating parent directories as needed.
pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path))
}
