//! Config parsing, validation and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;
mod validate;

pub use model::{JsonTagsConfig, OptionalOrRequiredConfig, ShapeguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};
pub use validate::{ValidationError, ValidationErrorKind, ValidationErrors};

/// Parse `shapeguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ShapeguardConfigV1> {
    let cfg: ShapeguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Validate every setting, collecting all violations in field order.
pub fn validate_config(cfg: &ShapeguardConfigV1) -> Result<(), ValidationErrors> {
    validate::validate(cfg)
}

/// Resolve the policy used by the engine (config + CLI overrides), validating first.
pub fn resolve_config(
    cfg: ShapeguardConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ValidationErrors> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema of the config record, for editor tooling.
pub fn config_json_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(ShapeguardConfigV1)).unwrap_or_default()
}
