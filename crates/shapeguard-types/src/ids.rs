//! Stable identifiers for checks and diagnostic codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_TYPES_ALLOWLIST: &str = "types.allowlist";
pub const CHECK_TAGS_JSON: &str = "tags.json";
pub const CHECK_MARKERS_OPTIONAL_OR_REQUIRED: &str = "markers.optional_or_required";

// Codes: types.allowlist
pub const CODE_DISALLOWED_TYPE: &str = "disallowed_type";

// Codes: tags.json
pub const CODE_MISSING_TAG: &str = "missing_tag";
pub const CODE_EMPTY_TAG_NAME: &str = "empty_tag_name";
pub const CODE_INVALID_TAG_NAME: &str = "invalid_tag_name";

// Codes: markers.optional_or_required
pub const CODE_MISSING_OPTIONALITY_MARKER: &str = "missing_optionality_marker";
pub const CODE_CONFLICTING_OPTIONALITY_MARKERS: &str = "conflicting_optionality_markers";
pub const CODE_NON_PREFERRED_MARKER: &str = "non_preferred_marker";
