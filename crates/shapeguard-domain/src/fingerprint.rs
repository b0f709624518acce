use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a field diagnostic.
///
/// Identity fields:
/// - check_id
/// - code
/// - type full name (`<package-path>.<TypeName>`)
/// - field name
pub fn fingerprint_for_field(check_id: &str, code: &str, type_name: &str, field: &str) -> String {
    let canonical = [check_id, code, type_name, field].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
