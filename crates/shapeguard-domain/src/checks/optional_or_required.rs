use crate::checks::utils::field_diagnostic;
use crate::model::PackageModel;
use crate::policy::PolicyConfig;
use crate::tags::TagInfo;
use serde_json::json;
use shapeguard_types::{Diagnostic, ids};

pub fn run(package: &PackageModel, cfg: &PolicyConfig, out: &mut Vec<Diagnostic>) {
    let Some(policy) = cfg.optional_or_required else {
        return;
    };
    let optional = [
        policy.preferred_optional.as_str(),
        policy.preferred_optional.alternative().as_str(),
    ];
    let required = [
        policy.preferred_required.as_str(),
        policy.preferred_required.alternative().as_str(),
    ];

    for ty in package.checked_types() {
        for field in &ty.fields {
            if TagInfo::from_struct_tag(field.tag.as_deref()).inline {
                continue;
            }

            let key = ty.field_key(field);
            let is_optional = optional.iter().any(|m| field.has_marker(m));
            let is_required = required.iter().any(|m| field.has_marker(m));

            if !is_optional && !is_required {
                out.push(field_diagnostic(
                    ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED,
                    ids::CODE_MISSING_OPTIONALITY_MARKER,
                    ty,
                    field,
                    format!(
                        "{key}: field must be marked as {} or {}",
                        optional[0], required[0]
                    ),
                    "Mark the field optional or required.",
                    json!({ "key": key, "field": field.name }),
                ));
                continue;
            }

            if is_optional && is_required {
                out.push(field_diagnostic(
                    ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED,
                    ids::CODE_CONFLICTING_OPTIONALITY_MARKERS,
                    ty,
                    field,
                    format!("{key}: field must not be marked as both optional and required"),
                    "Keep exactly one of the optional/required markers.",
                    json!({ "key": key, "field": field.name }),
                ));
                continue;
            }

            let (preferred, alternative) = if is_optional {
                (optional[0], optional[1])
            } else {
                (required[0], required[1])
            };
            if field.has_marker(alternative) {
                out.push(field_diagnostic(
                    ids::CHECK_MARKERS_OPTIONAL_OR_REQUIRED,
                    ids::CODE_NON_PREFERRED_MARKER,
                    ty,
                    field,
                    format!("{key}: field should use marker {preferred} instead of {alternative}"),
                    "Respell the marker using the preferred form.",
                    json!({
                        "key": key,
                        "field": field.name,
                        "found": alternative,
                        "preferred": preferred,
                    }),
                ));
            }
        }
    }
}
