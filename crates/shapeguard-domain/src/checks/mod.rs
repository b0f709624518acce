use crate::model::PackageModel;
use crate::policy::PolicyConfig;
use crate::report::PackageStats;
use shapeguard_types::Diagnostic;

mod field_types;
mod json_tags;
mod optional_or_required;
mod utils;


/// Run every enabled check over one package, appending diagnostics in check order.
pub fn run_all(
    package: &PackageModel,
    cfg: &PolicyConfig,
    out: &mut Vec<Diagnostic>,
) -> PackageStats {
    let mut stats = PackageStats::default();
    for ty in package.checked_types() {
        stats.types_checked += 1;
        stats.fields_checked += ty.fields.len() as u32;
    }

    field_types::run(package, cfg, out);
    stats.fields_skipped_unresolved = json_tags::run(package, cfg, out);
    optional_or_required::run(package, cfg, out);

    stats
}
