//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Exclusion keys and allow-list matching
//! - Diagnostic ordering determinism
//! - Tag parsing robustness

use crate::engine::evaluate;
use crate::model::{PackageModel, TypeGraph};
use crate::tags::TagInfo;
use crate::test_support::{allowlist_config, field, struct_type, tag_config};
use proptest::prelude::*;
use regex::Regex;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Exported field names: uppercase first letter, alphanumeric tail.
fn arb_field_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z0-9]{0,12}").unwrap()
}

/// Type signatures in the shapes a provider emits.
fn arb_type_signature() -> impl Strategy<Value = String> {
    let base = prop_oneof![
        Just("string".to_string()),
        Just("int32".to_string()),
        Just("bool".to_string()),
        Just("metav1.Time".to_string()),
        prop::string::string_regex("[A-Z][a-z]{1,8}").unwrap(),
    ];
    base.prop_flat_map(|b| {
        prop_oneof![
            Just(b.clone()),
            Just(format!("*{b}")),
            Just(format!("[]{b}")),
            Just(format!("map[string]{b}")),
        ]
    })
}

fn arb_fields() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_field_name(), arb_type_signature()), 0..12).prop_map(|fields| {
        // Field names are unique within a type.
        let mut seen = std::collections::BTreeSet::new();
        fields
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .collect()
    })
}

fn graph_of(fields: &[(String, String)]) -> TypeGraph {
    let ty = struct_type(
        "example.com/api/v1",
        "Widget",
        fields
            .iter()
            .map(|(name, sig)| field(name, sig, "name"))
            .collect(),
    );
    TypeGraph {
        packages: vec![PackageModel {
            path: "example.com/api/v1".to_string(),
            types: vec![ty],
        }],
    }
}

proptest! {
    #[test]
    fn excluding_every_field_yields_no_diagnostics(fields in arb_fields()) {
        let keys: Vec<String> = fields
            .iter()
            .map(|(name, _)| format!("example.com/api/v1.Widget:{name}"))
            .collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        // An allow-list that matches nothing.
        let cfg = allowlist_config("^$", &key_refs);

        let report = evaluate(&graph_of(&fields), &cfg);
        prop_assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn one_diagnostic_per_unmatched_field(fields in arb_fields()) {
        let pattern = "^(string|int32|bool)$";
        let re = Regex::new(pattern).unwrap();
        let expected = fields.iter().filter(|(_, sig)| !re.is_match(sig)).count();

        let report = evaluate(&graph_of(&fields), &allowlist_config(pattern, &[]));
        prop_assert_eq!(report.diagnostics.len(), expected);
        for d in &report.diagnostics {
            let sig = d.data["type"].as_str().unwrap_or_default();
            prop_assert!(!re.is_match(sig));
        }
    }

    #[test]
    fn evaluation_is_deterministic(fields in arb_fields()) {
        let graph = graph_of(&fields);
        let cfg = allowlist_config("^string$", &[]);
        let a = evaluate(&graph, &cfg);
        let b = evaluate(&graph, &cfg);
        prop_assert_eq!(a.diagnostics, b.diagnostics);
    }

    #[test]
    fn tag_parse_never_panics(value in ".*") {
        let info = TagInfo::parse(&value);
        if info.inline {
            prop_assert!(info.name.is_empty());
        }
        let _ = TagInfo::from_struct_tag(Some(&value));
    }

    #[test]
    fn lower_camel_names_pass_the_default_tag_check(
        name in prop::string::string_regex("[a-z][a-z0-9]{0,6}([A-Z][a-z0-9]{0,4}){0,3}").unwrap()
    ) {
        let ty = struct_type("example.com/api/v1", "Widget", vec![field("Name", "string", &name)]);
        let graph = TypeGraph {
            packages: vec![PackageModel {
                path: "example.com/api/v1".to_string(),
                types: vec![ty],
            }],
        };
        let report = evaluate(&graph, &tag_config(None));
        prop_assert!(report.diagnostics.is_empty());
    }
}
