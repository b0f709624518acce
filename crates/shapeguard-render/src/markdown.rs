use shapeguard_types::{ShapeguardReport, Verdict};

/// Markdown summary of a report, suitable for a CI job summary.
pub fn render_markdown(report: &ShapeguardReport) -> String {
    let mut out = String::new();

    out.push_str("# Shapeguard report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Checks: {}\n- Types checked: {}\n- Fields checked: {}\n- Fields skipped (unresolved): {}\n- Diagnostics: {}\n\n",
        verdict,
        if report.data.checks.is_empty() {
            "none".to_string()
        } else {
            report.data.checks.join(", ")
        },
        report.data.types_checked,
        report.data.fields_checked,
        report.data.fields_skipped_unresolved,
        report.data.diagnostics_total,
    ));

    if report.diagnostics.is_empty() {
        out.push_str("No diagnostics.\n");
        return out;
    }

    out.push_str("## Diagnostics\n\n");
    for d in &report.diagnostics {
        match &d.location {
            Some(loc) => out.push_str(&format!(
                "- `{}` / `{}`: {} (`{}`)\n",
                d.check_id, d.code, d.message, loc
            )),
            None => out.push_str(&format!("- `{}` / `{}`: {}\n", d.check_id, d.code, d.message)),
        }
        if let Some(help) = &d.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::diagnostic;
    use shapeguard_types::{ReportData, SCHEMA_REPORT_V1, ToolMeta};
    use time::macros::datetime;

    fn report(diagnostics: Vec<shapeguard_types::Diagnostic>) -> ShapeguardReport {
        ShapeguardReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "shapeguard".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: datetime!(2026-01-01 0:00 UTC),
            finished_at: datetime!(2026-01-01 0:00 UTC),
            verdict: Verdict::from_diagnostics(&diagnostics),
            data: ReportData {
                checks: vec!["types.allowlist".to_string()],
                types_checked: 1,
                fields_checked: 3,
                fields_skipped_unresolved: 0,
                diagnostics_total: diagnostics.len() as u32,
                ..ReportData::default()
            },
            diagnostics,
        }
    }

    #[test]
    fn renders_passing_report() {
        insta::assert_snapshot!(render_markdown(&report(Vec::new())), @r"
        # Shapeguard report

        - Verdict: **PASS**
        - Checks: types.allowlist
        - Types checked: 1
        - Fields checked: 3
        - Fields skipped (unresolved): 0
        - Diagnostics: 0

        No diagnostics.
        ");
    }

    #[test]
    fn renders_diagnostics_with_location_and_help() {
        let mut d = diagnostic(
            "disallowed_type",
            "example.com/api/v1.MyStruct:Ref: type *Other is not allowed to be used",
            Some(9),
        );
        d.help = Some("Use an allowed type.".to_string());

        let md = render_markdown(&report(vec![d]));
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("## Diagnostics"));
        assert!(md.contains("(`example.com/api/v1/types.go:9`)"));
        assert!(md.contains("  - help: Use an allowed type."));
    }
}
