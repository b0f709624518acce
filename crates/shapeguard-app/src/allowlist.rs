//! The `allowlist` use case: only the field type allow-list, driven entirely by arguments.

use crate::check::{CheckOutput, evaluate_config};
use shapeguard_repo::TypeGraphProvider;
use shapeguard_settings::{JsonTagsConfig, Overrides, ShapeguardConfigV1};

pub struct AllowlistInput<'a> {
    pub provider: &'a dyn TypeGraphProvider,
    pub packages: &'a [String],
    /// Pattern a field type signature must match somewhere.
    pub allowlist: &'a str,
    /// `<package-path>.<TypeName>:<FieldName>` keys exempt from the pattern.
    pub excluded: Vec<String>,
}

pub fn run_allowlist(input: AllowlistInput<'_>) -> anyhow::Result<CheckOutput> {
    let cfg = ShapeguardConfigV1 {
        json_tags: JsonTagsConfig {
            enabled: Some(false),
            ..JsonTagsConfig::default()
        },
        ..ShapeguardConfigV1::default()
    };
    let overrides = Overrides {
        allowlist: Some(input.allowlist.to_string()),
        excluded: input.excluded,
    };

    evaluate_config(input.provider, input.packages, cfg, overrides)
}
