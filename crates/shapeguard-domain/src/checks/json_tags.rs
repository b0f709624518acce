use crate::checks::utils::field_diagnostic;
use crate::model::PackageModel;
use crate::policy::PolicyConfig;
use crate::tags::TagInfo;
use serde_json::json;
use shapeguard_types::{Diagnostic, ids};

/// Returns the number of fields skipped because their type was only partially resolved.
pub fn run(package: &PackageModel, cfg: &PolicyConfig, out: &mut Vec<Diagnostic>) -> u32 {
    let Some(policy) = cfg.json_tags.as_ref() else {
        return 0;
    };
    let mut skipped = 0;

    for ty in package.checked_types() {
        for field in &ty.fields {
            // Partially resolved fields are counted, never checked.
            if !field.is_resolved() {
                skipped += 1;
                continue;
            }

            let key = ty.field_key(field);
            let info = TagInfo::from_struct_tag(field.tag.as_deref());

            if info.missing {
                out.push(field_diagnostic(
                    ids::CHECK_TAGS_JSON,
                    ids::CODE_MISSING_TAG,
                    ty,
                    field,
                    format!("{key}: missing serialization tag"),
                    "Add a json tag naming the serialized field.",
                    json!({ "key": key, "field": field.name }),
                ));
                continue;
            }

            if info.inline {
                continue;
            }

            if info.name.is_empty() {
                out.push(field_diagnostic(
                    ids::CHECK_TAGS_JSON,
                    ids::CODE_EMPTY_TAG_NAME,
                    ty,
                    field,
                    format!("{key}: empty serialization tag name"),
                    "Spell the serialized name before any tag options.",
                    json!({ "key": key, "field": field.name, "tag": info.raw }),
                ));
                continue;
            }

            if !policy.name_pattern.is_match(&info.name) {
                out.push(field_diagnostic(
                    ids::CHECK_TAGS_JSON,
                    ids::CODE_INVALID_TAG_NAME,
                    ty,
                    field,
                    format!(
                        "{key}: serialization tag name {:?} of field {} does not match pattern {:?}",
                        info.name,
                        field.name,
                        policy.name_pattern.as_str()
                    ),
                    "Rename the serialized field so it matches the configured naming pattern.",
                    json!({
                        "key": key,
                        "field": field.name,
                        "name": info.name,
                        "pattern": policy.name_pattern.as_str(),
                    }),
                ));
            }
        }
    }

    skipped
}
