use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `shapeguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive (every key optional,
/// unknown keys ignored) so it can be embedded in a larger tool's config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShapeguardConfigV1 {
    /// Optional schema string for tooling (`shapeguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Pattern every field type signature must match somewhere. Enables `types.allowlist`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowlist: Option<String>,

    /// `<package-path>.<TypeName>:<FieldName>` keys exempt from the allow-list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<String>,

    #[serde(default)]
    pub json_tags: JsonTagsConfig,

    #[serde(default)]
    pub optional_or_required: OptionalOrRequiredConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonTagsConfig {
    /// Run the serialization tag check (default: true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Pattern serialization tag names must match (default: lower camel case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_tag_regex: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalOrRequiredConfig {
    /// Run the optional/required marker check (default: false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `optional` (default) or `kubebuilder:validation:Optional`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_optional_marker: Option<String>,

    /// `required` (default) or `kubebuilder:validation:Required`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_required_marker: Option<String>,
}
