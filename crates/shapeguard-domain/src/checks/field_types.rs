use crate::checks::utils::field_diagnostic;
use crate::model::PackageModel;
use crate::policy::PolicyConfig;
use serde_json::json;
use shapeguard_types::{Diagnostic, ids};

pub fn run(package: &PackageModel, cfg: &PolicyConfig, out: &mut Vec<Diagnostic>) {
    let Some(policy) = cfg.field_types.as_ref() else {
        return;
    };

    for ty in package.checked_types() {
        for field in &ty.fields {
            let key = ty.field_key(field);
            if policy.is_excluded(&key) {
                continue;
            }
            if policy.allows(&field.type_signature) {
                continue;
            }

            out.push(field_diagnostic(
                ids::CHECK_TYPES_ALLOWLIST,
                ids::CODE_DISALLOWED_TYPE,
                ty,
                field,
                format!("{}: type {} is not allowed to be used", key, field.type_signature),
                "Use an approved field type, widen the allow-list, or exclude this field key.",
                json!({
                    "key": key,
                    "type": field.type_signature,
                    "pattern": policy.allowlist.as_str(),
                }),
            ));
        }
    }
}
