use crate::model::ShapeguardConfigV1;
use regex::Regex;
use shapeguard_domain::policy::{OptionalMarker, RequiredMarker};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The value is well-typed but unusable, e.g. a pattern that does not compile.
    Invalid { value: String, detail: String },
    /// The value is not one of a fixed set.
    NotSupported {
        value: String,
        supported: Vec<&'static str>,
    },
}

/// One violation, addressed by its dotted field path (e.g. `jsonTags.jsonTagRegex`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::Invalid { value, detail } => {
                write!(f, "{}: Invalid value: {:?}: {}", self.path, value, detail)
            }
            ValidationErrorKind::NotSupported { value, supported } => {
                let quoted: Vec<String> = supported.iter().map(|s| format!("{s:?}")).collect();
                write!(
                    f,
                    "{}: Unsupported value: {:?}: supported values: {}",
                    self.path,
                    value,
                    quoted.join(", ")
                )
            }
        }
    }
}

/// Every violation found in one config, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    fn invalid(&mut self, path: impl Into<String>, value: &str, detail: impl fmt::Display) {
        self.0.push(ValidationError {
            path: path.into(),
            kind: ValidationErrorKind::Invalid {
                value: value.to_string(),
                detail: detail.to_string(),
            },
        });
    }

    fn not_supported(&mut self, path: &str, value: &str, supported: Vec<&'static str>) {
        self.0.push(ValidationError {
            path: path.to_string(),
            kind: ValidationErrorKind::NotSupported {
                value: value.to_string(),
                supported,
            },
        });
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Check every setting. Never stops at the first violation.
pub fn validate(cfg: &ShapeguardConfigV1) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    if let Some(pattern) = cfg.allowlist.as_deref() {
        if pattern.is_empty() {
            errs.invalid("allowlist", pattern, "pattern must not be empty");
        } else if let Err(err) = Regex::new(pattern) {
            errs.invalid("allowlist", pattern, err);
        }
    }

    for (idx, key) in cfg.excluded.iter().enumerate() {
        let well_formed = key
            .rsplit_once(':')
            .is_some_and(|(ty, field)| !ty.is_empty() && !field.is_empty());
        if !well_formed {
            errs.invalid(
                format!("excluded[{idx}]"),
                key,
                "expected <package-path>.<TypeName>:<FieldName>",
            );
        }
    }

    if let Some(pattern) = cfg.json_tags.json_tag_regex.as_deref()
        && !pattern.is_empty()
        && let Err(err) = Regex::new(pattern)
    {
        errs.invalid("jsonTags.jsonTagRegex", pattern, err);
    }

    if let Some(marker) = cfg.optional_or_required.preferred_optional_marker.as_deref()
        && OptionalMarker::parse(marker).is_none()
    {
        errs.not_supported(
            "optionalOrRequired.preferredOptionalMarker",
            marker,
            OptionalMarker::ALL.iter().map(|m| m.as_str()).collect(),
        );
    }

    if let Some(marker) = cfg.optional_or_required.preferred_required_marker.as_deref()
        && RequiredMarker::parse(marker).is_none()
    {
        errs.not_supported(
            "optionalOrRequired.preferredRequiredMarker",
            marker,
            RequiredMarker::ALL.iter().map(|m| m.as_str()).collect(),
        );
    }

    errs.into_result()
}
