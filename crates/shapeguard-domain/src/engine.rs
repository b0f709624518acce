use crate::checks;
use crate::model::TypeGraph;
use crate::policy::PolicyConfig;
use crate::report::DomainReport;
use shapeguard_types::{Diagnostic, PackageOutcome, ReportData, Verdict};

/// Evaluate every package of `graph` against `cfg`.
///
/// Packages are checked independently, each into its own buffer, and the buffers are
/// concatenated in graph order. Diagnostics are not re-sorted: output order is the
/// provider's order, so identical input gives identical output.
pub fn evaluate(graph: &TypeGraph, cfg: &PolicyConfig) -> DomainReport {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut data = ReportData {
        checks: cfg.enabled_checks().into_iter().map(str::to_string).collect(),
        ..ReportData::default()
    };

    for package in &graph.packages {
        let mut buffer = Vec::new();
        let stats = checks::run_all(package, cfg, &mut buffer);

        data.types_checked += stats.types_checked;
        data.fields_checked += stats.fields_checked;
        data.fields_skipped_unresolved += stats.fields_skipped_unresolved;
        data.packages.push(PackageOutcome {
            package: package.path.clone(),
            verdict: Verdict::from_diagnostics(&buffer),
            types_checked: stats.types_checked,
            fields_checked: stats.fields_checked,
            diagnostics: buffer.len() as u32,
        });

        diagnostics.append(&mut buffer);
    }

    data.diagnostics_total = diagnostics.len() as u32;

    DomainReport {
        verdict: Verdict::from_diagnostics(&diagnostics),
        diagnostics,
        data,
    }
}
