//! The `check` use case: resolve policy, load the type graph, evaluate, produce a report.

use anyhow::Context;
use shapeguard_domain::report::DomainReport;
use shapeguard_repo::TypeGraphProvider;
use shapeguard_settings::{Overrides, ResolvedConfig, ShapeguardConfigV1};
use shapeguard_types::{SCHEMA_REPORT_V1, ShapeguardReport, ToolMeta, Verdict};
use time::OffsetDateTime;

/// Input for the check use case.
pub struct CheckInput<'a> {
    pub provider: &'a dyn TypeGraphProvider,
    /// Package identifiers, checked in this order.
    pub packages: &'a [String],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ShapeguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, resolve policy, load packages, evaluate.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    // Empty is allowed, defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        ShapeguardConfigV1::default()
    } else {
        shapeguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    evaluate_config(input.provider, input.packages, cfg, input.overrides)
}

pub(crate) fn evaluate_config(
    provider: &dyn TypeGraphProvider,
    packages: &[String],
    cfg: ShapeguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved =
        shapeguard_settings::resolve_config(cfg, overrides).context("invalid configuration")?;

    let graph = provider.load(packages).context("load type graph")?;
    tracing::debug!(
        packages = graph.packages.len(),
        checks = ?resolved.policy.enabled_checks(),
        "evaluating type graph"
    );

    let DomainReport {
        verdict,
        diagnostics,
        data,
    } = shapeguard_domain::evaluate(&graph, &resolved.policy);

    if data.fields_skipped_unresolved > 0 {
        tracing::debug!(
            skipped = data.fields_skipped_unresolved,
            "fields with partially resolved types were not tag-checked"
        );
    }

    let finished_at = OffsetDateTime::now_utc();
    let report = ShapeguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "shapeguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        diagnostics,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map a verdict to the process exit code.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
    }
}
