use shapeguard_types::Diagnostic;

/// One line per diagnostic, exactly its message, in the order given.
pub fn render_lines(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}
