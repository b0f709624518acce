use crate::fingerprint::fingerprint_for_field;
use crate::model::{DeclaredType, Field};
use serde_json::Value;
use shapeguard_types::{Diagnostic, Severity};

/// Build an error diagnostic anchored at `field`, falling back to the type's location.
pub fn field_diagnostic(
    check_id: &str,
    code: &str,
    ty: &DeclaredType,
    field: &Field,
    message: String,
    help: &str,
    data: Value,
) -> Diagnostic {
    let type_name = ty.full_name();
    Diagnostic {
        severity: Severity::Error,
        check_id: check_id.to_string(),
        code: code.to_string(),
        message,
        location: field.location.clone().or_else(|| ty.location.clone()),
        help: Some(help.to_string()),
        fingerprint: Some(fingerprint_for_field(check_id, code, &type_name, &field.name)),
        data,
    }
}
