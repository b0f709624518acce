use shapeguard_types::{Diagnostic, Severity};

/// Render diagnostics as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line}::{message}`
pub fn render_github_annotations(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut out = Vec::new();

    for d in diagnostics {
        let level = match d.severity {
            Severity::Error => "error",
        };

        let mut meta = String::new();
        if let Some(loc) = &d.location {
            meta.push_str(&format!("file={}", loc.path.as_str()));
            if let Some(line) = loc.line {
                meta.push_str(&format!(",line={}", line));
            }
        }

        let message = format!("[{}:{}] {}", d.check_id, d.code, d.message)
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        if meta.is_empty() {
            out.push(format!("::{}::{}", level, message));
        } else {
            out.push(format!("::{} {}::{}", level, meta, message));
        }
    }

    out
}
