use crate::model::ShapeguardConfigV1;
use crate::validate::{self, ValidationError, ValidationErrorKind, ValidationErrors};
use regex::Regex;
use shapeguard_domain::policy::{
    DEFAULT_TAG_NAME_PATTERN, FieldTypePolicy, OptionalMarker, OptionalityPolicy, PolicyConfig,
    RequiredMarker, TagPolicy,
};

/// Values supplied on the command line. They win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub allowlist: Option<String>,
    /// Appended to the config's `excluded` list.
    pub excluded: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: PolicyConfig,
}

pub fn resolve_config(
    mut cfg: ShapeguardConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ValidationErrors> {
    if overrides.allowlist.is_some() {
        cfg.allowlist = overrides.allowlist;
    }
    cfg.excluded.extend(overrides.excluded);

    validate::validate(&cfg)?;

    let field_types = match cfg.allowlist.as_deref() {
        Some(pattern) => Some(FieldTypePolicy {
            allowlist: compile("allowlist", pattern)?,
            excluded: cfg.excluded.iter().cloned().collect(),
        }),
        None => None,
    };

    let json_tags = if cfg.json_tags.enabled.unwrap_or(true) {
        let pattern = match cfg.json_tags.json_tag_regex.as_deref() {
            Some(pattern) if !pattern.is_empty() => pattern,
            _ => DEFAULT_TAG_NAME_PATTERN,
        };
        Some(TagPolicy {
            name_pattern: compile("jsonTags.jsonTagRegex", pattern)?,
        })
    } else {
        None
    };

    let oor = &cfg.optional_or_required;
    let optional_or_required = oor.enabled.unwrap_or(false).then(|| OptionalityPolicy {
        preferred_optional: oor
            .preferred_optional_marker
            .as_deref()
            .and_then(OptionalMarker::parse)
            .unwrap_or_default(),
        preferred_required: oor
            .preferred_required_marker
            .as_deref()
            .and_then(RequiredMarker::parse)
            .unwrap_or_default(),
    });

    Ok(ResolvedConfig {
        policy: PolicyConfig {
            field_types,
            json_tags,
            optional_or_required,
        },
    })
}

fn compile(path: &str, pattern: &str) -> Result<Regex, ValidationErrors> {
    Regex::new(pattern).map_err(|err| {
        ValidationErrors(vec![ValidationError {
            path: path.to_string(),
            kind: ValidationErrorKind::Invalid {
                value: pattern.to_string(),
                detail: err.to_string(),
            },
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JsonTagsConfig, OptionalOrRequiredConfig};
    use shapeguard_types::ids;

    #[test]
    fn empty_config_enables_only_tag_check_with_default_pattern() {
        let resolved =
            resolve_config(ShapeguardConfigV1::default(), Overrides::default()).expect("resolve");
        assert_eq!(resolved.policy.enabled_checks(), vec![ids::CHECK_TAGS_JSON]);
        let tags = resolved.policy.json_tags.expect("tag policy");
        assert_eq!(tags.name_pattern.as_str(), DEFAULT_TAG_NAME_PATTERN);
        assert!(tags.name_pattern.is_match("fooBar"));
        assert!(!tags.name_pattern.is_match("foo_bar"));
    }

    #[test]
    fn cli_allowlist_wins_and_exclusions_accumulate() {
        let cfg = ShapeguardConfigV1 {
            allowlist: Some("string".to_string()),
            excluded: vec!["example.com/api.Foo:Legacy".to_string()],
            ..ShapeguardConfigV1::default()
        };
        let overrides = Overrides {
            allowlist: Some("Quantity".to_string()),
            excluded: vec!["example.com/api.Foo:Other".to_string()],
        };

        let resolved = resolve_config(cfg, overrides).expect("resolve");
        let field_types = resolved.policy.field_types.expect("allowlist policy");
        assert!(field_types.allows("[]Quantity"));
        assert!(!field_types.allows("string"));
        assert!(field_types.is_excluded("example.com/api.Foo:Legacy"));
        assert!(field_types.is_excluded("example.com/api.Foo:Other"));
    }

    #[test]
    fn invalid_override_is_reported_against_allowlist() {
        let overrides = Overrides {
            allowlist: Some("[".to_string()),
            ..Overrides::default()
        };
        let errs =
            resolve_config(ShapeguardConfigV1::default(), overrides).expect_err("invalid");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.iter().next().map(|e| e.path.as_str()), Some("allowlist"));
    }

    #[test]
    fn optionality_check_uses_preferred_spellings() {
        let cfg = ShapeguardConfigV1 {
            json_tags: JsonTagsConfig {
                enabled: Some(false),
                ..JsonTagsConfig::default()
            },
            optional_or_required: OptionalOrRequiredConfig {
                enabled: Some(true),
                preferred_optional_marker: Some("kubebuilder:validation:Optional".to_string()),
                preferred_required_marker: None,
            },
            ..ShapeguardConfigV1::default()
        };

        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        assert_eq!(
            resolved.policy.enabled_checks(),
            vec![ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED]
        );
        let policy = resolved.policy.optional_or_required.expect("optionality");
        assert_eq!(policy.preferred_optional, OptionalMarker::KubebuilderOptional);
        assert_eq!(policy.preferred_required, RequiredMarker::Required);
    }
}
