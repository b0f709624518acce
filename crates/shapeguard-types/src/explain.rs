//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after declarations.
    pub examples: ExamplePair,
}

/// Before and after declarations.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Declaration that would trigger a diagnostic.
    pub before: &'static str,
    /// Declaration that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_TYPES_ALLOWLIST => Some(explain_types_allowlist()),
        ids::CHECK_TAGS_JSON => Some(explain_tags_json()),
        ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED => Some(explain_optional_or_required()),

        // Codes
        ids::CODE_DISALLOWED_TYPE => Some(explain_disallowed_type()),
        ids::CODE_MISSING_TAG => Some(explain_missing_tag()),
        ids::CODE_EMPTY_TAG_NAME => Some(explain_empty_tag_name()),
        ids::CODE_INVALID_TAG_NAME => Some(explain_invalid_tag_name()),
        ids::CODE_MISSING_OPTIONALITY_MARKER => Some(explain_missing_optionality_marker()),
        ids::CODE_CONFLICTING_OPTIONALITY_MARKERS => Some(explain_conflicting_markers()),
        ids::CODE_NON_PREFERRED_MARKER => Some(explain_non_preferred_marker()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_TYPES_ALLOWLIST,
        ids::CHECK_TAGS_JSON,
        ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_DISALLOWED_TYPE,
        ids::CODE_MISSING_TAG,
        ids::CODE_EMPTY_TAG_NAME,
        ids::CODE_INVALID_TAG_NAME,
        ids::CODE_MISSING_OPTIONALITY_MARKER,
        ids::CODE_CONFLICTING_OPTIONALITY_MARKERS,
        ids::CODE_NON_PREFERRED_MARKER,
    ]
}

// --- Check-level explanations ---

fn explain_types_allowlist() -> Explanation {
    Explanation {
        title: "Allowed Field Types",
        description: "\
Every field of an exported structured type must use a type signature matched by the
configured allow-list pattern.

The pattern is matched anywhere inside the signature, so an allowed name also authorizes
compound forms such as `[]Foo`, `*Foo` or `map[string]Foo` unless the pattern is anchored.
Fields listed in the exclusion set (`<Package>.<Type>:<Field>`) are never checked.",
        remediation: "\
Change the field to an approved type, widen the allow-list pattern, or add the field's
key to the exclusion set when the exception is deliberate:

    shapeguard allowlist ./api/v1 -allowlist '^(string|int32|bool)$' \\
        -excluded example.com/api/v1.Widget:Raw",
        examples: ExamplePair {
            before: r#"type Widget struct {
    Name string `json:"name"`
    Ref  *Other `json:"ref"`
}"#,
            after: r#"type Widget struct {
    Name    string `json:"name"`
    RefName string `json:"refName"`
}"#,
        },
    }
}

fn explain_tags_json() -> Explanation {
    Explanation {
        title: "Serialization Tags",
        description: "\
Every field of an exported structured type must carry a `json` tag whose name matches the
configured naming pattern (lower camel case by default).

Inline fields (`json:\",inline\"`) are flattened into the parent and are not named.
Fields whose type could not be fully resolved are skipped rather than guessed at.",
        remediation: "\
Add a `json` tag to the field and spell its name in lower camel case, or configure
`jsonTags.jsonTagRegex` when the API follows a different convention.",
        examples: ExamplePair {
            before: r#"type Widget struct {
    Name  string
    Count int32 `json:"Count"`
}"#,
            after: r#"type Widget struct {
    Name  string `json:"name"`
    Count int32  `json:"count,omitempty"`
}"#,
        },
    }
}

fn explain_optional_or_required() -> Explanation {
    Explanation {
        title: "Optional Or Required Markers",
        description: "\
Every non-inline field of an exported structured type must be marked either optional or
required, exactly once, using the preferred marker spelling.

The preferred spellings are configured through
`optionalOrRequired.preferredOptionalMarker` (`optional` or `kubebuilder:validation:Optional`)
and `optionalOrRequired.preferredRequiredMarker` (`required` or
`kubebuilder:validation:Required`).",
        remediation: "\
Add exactly one of the optional/required markers to the field comment, spelled the
preferred way. Remove any duplicate marker in the other spelling.",
        examples: ExamplePair {
            before: r#"type Widget struct {
    // +kubebuilder:validation:Optional
    Name string `json:"name"`
}"#,
            after: r#"type Widget struct {
    // +optional
    Name string `json:"name"`
}"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_disallowed_type() -> Explanation {
    let mut exp = explain_types_allowlist();
    exp.title = "Disallowed Field Type";
    exp
}

fn explain_missing_tag() -> Explanation {
    Explanation {
        title: "Missing Serialization Tag",
        description: "\
The field has no `json` tag, or is explicitly excluded from serialization with
`json:\"-\"`. Public API fields must be serialized under an explicit name.",
        remediation: "Add a `json` tag with a lower camel case name.",
        examples: ExamplePair {
            before: r#"Replicas int32"#,
            after: r#"Replicas int32 `json:"replicas"`"#,
        },
    }
}

fn explain_empty_tag_name() -> Explanation {
    Explanation {
        title: "Empty Serialization Tag Name",
        description: "\
The field has a `json` tag but the name part is empty (for example `json:\",omitempty\"`),
so the serialized name silently falls back to the Go field name.",
        remediation: "Spell the serialized name explicitly before any options.",
        examples: ExamplePair {
            before: r#"Replicas int32 `json:",omitempty"`"#,
            after: r#"Replicas int32 `json:"replicas,omitempty"`"#,
        },
    }
}

fn explain_invalid_tag_name() -> Explanation {
    let mut exp = explain_tags_json();
    exp.title = "Invalid Serialization Tag Name";
    exp
}

fn explain_missing_optionality_marker() -> Explanation {
    let mut exp = explain_optional_or_required();
    exp.title = "Missing Optional Or Required Marker";
    exp
}

fn explain_conflicting_markers() -> Explanation {
    Explanation {
        title: "Conflicting Optionality Markers",
        description: "The field is marked both optional and required.",
        remediation: "Keep exactly one of the two markers.",
        examples: ExamplePair {
            before: "// +optional\n// +required\nName string `json:\"name\"`",
            after: "// +required\nName string `json:\"name\"`",
        },
    }
}

fn explain_non_preferred_marker() -> Explanation {
    let mut exp = explain_optional_or_required();
    exp.title = "Non-Preferred Optionality Marker";
    exp
}
