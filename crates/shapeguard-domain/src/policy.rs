use regex::Regex;
use std::collections::BTreeSet;

/// Lower camel case: a lowercase leading letter, then alphanumeric word groups that each
/// start with an uppercase letter.
pub const DEFAULT_TAG_NAME_PATTERN: &str = "^[a-z][a-z0-9]*(?:[A-Z][a-z0-9]*)*$";

/// Spelling used to mark a field optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptionalMarker {
    #[default]
    Optional,
    KubebuilderOptional,
}

impl OptionalMarker {
    pub const ALL: [OptionalMarker; 2] = [Self::Optional, Self::KubebuilderOptional];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::KubebuilderOptional => "kubebuilder:validation:Optional",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    /// The other accepted spelling.
    pub fn alternative(self) -> Self {
        match self {
            Self::Optional => Self::KubebuilderOptional,
            Self::KubebuilderOptional => Self::Optional,
        }
    }
}

/// Spelling used to mark a field required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequiredMarker {
    #[default]
    Required,
    KubebuilderRequired,
}

impl RequiredMarker {
    pub const ALL: [RequiredMarker; 2] = [Self::Required, Self::KubebuilderRequired];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::KubebuilderRequired => "kubebuilder:validation:Required",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn alternative(self) -> Self {
        match self {
            Self::Required => Self::KubebuilderRequired,
            Self::KubebuilderRequired => Self::Required,
        }
    }
}

/// `types.allowlist`: every field type signature must match `allowlist` unless the field
/// key is excluded.
#[derive(Clone, Debug)]
pub struct FieldTypePolicy {
    pub allowlist: Regex,
    /// `<package-path>.<TypeName>:<FieldName>` keys, matched exactly.
    pub excluded: BTreeSet<String>,
}

impl FieldTypePolicy {
    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    /// Find-anywhere semantics: the pattern need not cover the whole signature.
    pub fn allows(&self, type_signature: &str) -> bool {
        self.allowlist.is_match(type_signature)
    }
}

/// `tags.json`: serialization tag names must match `name_pattern`.
#[derive(Clone, Debug)]
pub struct TagPolicy {
    pub name_pattern: Regex,
}

impl TagPolicy {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name_pattern: Regex::new(pattern)?,
        })
    }

    /// Policy using [`DEFAULT_TAG_NAME_PATTERN`].
    pub fn lower_camel() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_TAG_NAME_PATTERN)
    }
}

/// `markers.optional_or_required`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionalityPolicy {
    pub preferred_optional: OptionalMarker,
    pub preferred_required: RequiredMarker,
}

/// Immutable, validated check parameters. A `None` policy disables its check.
#[derive(Clone, Debug, Default)]
pub struct PolicyConfig {
    pub field_types: Option<FieldTypePolicy>,
    pub json_tags: Option<TagPolicy>,
    pub optional_or_required: Option<OptionalityPolicy>,
}

impl PolicyConfig {
    /// Check ids enabled by this config, in evaluation order.
    pub fn enabled_checks(&self) -> Vec<&'static str> {
        use shapeguard_types::ids;
        let mut out = Vec::new();
        if self.field_types.is_some() {
            out.push(ids::CHECK_TYPES_ALLOWLIST);
        }
        if self.json_tags.is_some() {
            out.push(ids::CHECK_TAGS_JSON);
        }
        if self.optional_or_required.is_some() {
            out.push(ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED);
        }
        out
    }
}
