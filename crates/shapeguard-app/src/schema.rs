//! The `schema` use case: generate a JSON schema per exported struct and apply field markers.

use anyhow::Context;
use serde::Serialize;
use shapeguard_domain::model::{DeclaredType, PackageModel};
use shapeguard_domain::policy::{OptionalMarker, RequiredMarker};
use shapeguard_domain::tags::{self, SERIALIZATION_TAG_KEY, TagInfo};
use shapeguard_markers::{FeatureSetActivation, JsonSchemaProps, MarkerRegistry};
use shapeguard_repo::TypeGraphProvider;
use std::collections::{BTreeMap, BTreeSet};

pub struct SchemaInput<'a> {
    pub provider: &'a dyn TypeGraphProvider,
    pub packages: &'a [String],
    pub registry: &'a MarkerRegistry,
    pub active: &'a FeatureSetActivation,
}

/// Generated schemas of one package, keyed by type name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PackageSchemas {
    pub package: String,
    pub schemas: BTreeMap<String, JsonSchemaProps>,
}

pub fn run_schema(input: SchemaInput<'_>) -> anyhow::Result<Vec<PackageSchemas>> {
    let graph = input.provider.load(input.packages).context("load type graph")?;
    tracing::debug!(
        packages = graph.packages.len(),
        feature_sets = ?input.active.names().collect::<Vec<_>>(),
        "generating schemas"
    );

    let mut out = Vec::with_capacity(graph.packages.len());
    for package in &graph.packages {
        let mut schemas = BTreeMap::new();
        for ty in package.checked_types() {
            let mut visiting = BTreeSet::new();
            let schema = struct_schema(package, ty, &input, &mut visiting)?;
            schemas.insert(ty.name.clone(), schema);
        }
        out.push(PackageSchemas {
            package: package.path.clone(),
            schemas,
        });
    }
    Ok(out)
}

fn struct_schema(
    package: &PackageModel,
    ty: &DeclaredType,
    input: &SchemaInput<'_>,
    visiting: &mut BTreeSet<String>,
) -> anyhow::Result<JsonSchemaProps> {
    let mut schema = JsonSchemaProps::typed("object");
    if !visiting.insert(ty.name.clone()) {
        schema.type_ref = Some(ty.full_name());
        return Ok(schema);
    }

    for field in &ty.fields {
        let raw_value = field
            .tag
            .as_deref()
            .and_then(|t| tags::lookup(t, SERIALIZATION_TAG_KEY));
        if raw_value.as_deref() == Some("-") {
            continue;
        }
        let tag = raw_value
            .as_deref()
            .map(TagInfo::parse)
            .unwrap_or_else(TagInfo::missing);

        if tag.inline || (field.embedded && tag.missing) {
            let target = field.type_signature.trim_start_matches('*');
            if let Some(embedded) = package.types.iter().find(|t| t.name == target) {
                let inner = struct_schema(package, embedded, input, visiting)?;
                schema.required.extend(inner.required);
                schema.properties.extend(inner.properties);
            }
            continue;
        }

        let name = if tag.missing || tag.name.is_empty() {
            field.name.clone()
        } else {
            tag.name.clone()
        };

        let mut prop = schema_for_signature(&field.type_signature);
        input
            .registry
            .apply_all(field.markers.as_slice(), input.active, &mut prop)
            .with_context(|| format!("{}: apply markers", ty.field_key(field)))?;

        let marked_optional = OptionalMarker::ALL
            .iter()
            .any(|m| field.has_marker(m.as_str()));
        let marked_required = RequiredMarker::ALL
            .iter()
            .any(|m| field.has_marker(m.as_str()));
        if marked_required || (!tag.omit_empty && !marked_optional) {
            schema.required.push(name.clone());
        }
        schema.properties.insert(name, prop);
    }

    visiting.remove(&ty.name);
    Ok(schema)
}

/// Schema for a declared type signature such as `*[]map[string]int64`.
///
/// Named types that are not builtins become references (`x-shapeguard-ref`).
pub fn schema_for_signature(signature: &str) -> JsonSchemaProps {
    let sig = signature.trim().trim_start_matches('*');

    if sig == "[]byte" {
        return with_format("string", "byte");
    }
    if let Some(rest) = sig.strip_prefix('[')
        && let Some(end) = rest.find(']')
        && rest[..end].chars().all(|c| c.is_ascii_digit())
    {
        return JsonSchemaProps {
            items: Some(Box::new(schema_for_signature(&rest[end + 1..]))),
            ..JsonSchemaProps::typed("array")
        };
    }
    if let Some(rest) = sig.strip_prefix("map[")
        && let Some(end) = closing_bracket(rest)
    {
        return JsonSchemaProps {
            additional_properties: Some(Box::new(schema_for_signature(&rest[end + 1..]))),
            ..JsonSchemaProps::typed("object")
        };
    }

    match sig {
        "string" => JsonSchemaProps::typed("string"),
        "bool" => JsonSchemaProps::typed("boolean"),
        "int8" | "int16" | "int32" | "uint8" | "uint16" | "byte" | "rune" => {
            with_format("integer", "int32")
        }
        "int" | "int64" | "uint" | "uint32" | "uint64" => with_format("integer", "int64"),
        "float32" => with_format("number", "float"),
        "float64" => with_format("number", "double"),
        "time.Time" | "metav1.Time" => with_format("string", "date-time"),
        "any" | "interface{}" => JsonSchemaProps::default(),
        named => JsonSchemaProps {
            type_ref: Some(named.to_string()),
            ..JsonSchemaProps::default()
        },
    }
}

fn with_format(schema_type: &str, format: &str) -> JsonSchemaProps {
    JsonSchemaProps {
        format: Some(format.to_string()),
        ..JsonSchemaProps::typed(schema_type)
    }
}

/// Index of the `]` closing a `map[` key, honoring nested brackets.
fn closing_bracket(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Some(idx),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shapeguard_domain::model::{Field, TypeKind};
    use shapeguard_repo::InMemoryProvider;

    const PKG: &str = "example.com/api/v1";

    fn field(name: &str, sig: &str, tag: &str, markers: &[&str]) -> Field {
        Field {
            name: name.to_string(),
            type_signature: sig.to_string(),
            tag: Some(tag.to_string()),
            markers: markers.iter().map(|m| m.to_string()).collect(),
            ..Field::default()
        }
    }

    fn provider() -> InMemoryProvider {
        let meta = DeclaredType {
            package: PKG.to_string(),
            name: "CommonMeta".to_string(),
            fields: vec![field("Owner", "string", r#"json:"owner,omitempty""#, &[])],
            ..DeclaredType::default()
        };
        let widget = DeclaredType {
            package: PKG.to_string(),
            name: "WidgetSpec".to_string(),
            fields: vec![
                field("CommonMeta", "CommonMeta", r#"json:",inline""#, &[]),
                field(
                    "Mode",
                    "string",
                    r#"json:"mode""#,
                    &[
                        "required",
                        "kubebuilder:validation:Enum=Stable",
                        "shapeguard:validation:FeatureSetAwareEnum:featureSet=TechPreviewNoUpgrade,enum=Stable;Experimental",
                    ],
                ),
                field("Replicas", "*int32", r#"json:"replicas,omitempty""#, &["optional"]),
                field("Labels", "map[string]string", r#"json:"labels,omitempty""#, &[]),
                field("Internal", "string", r#"json:"-""#, &[]),
            ],
            ..DeclaredType::default()
        };
        let phase = DeclaredType {
            package: PKG.to_string(),
            name: "Phase".to_string(),
            kind: TypeKind::Other,
            ..DeclaredType::default()
        };
        InMemoryProvider::new().with_package(PackageModel {
            path: PKG.to_string(),
            types: vec![meta, widget, phase],
        })
    }

    fn generate(active: &FeatureSetActivation) -> Vec<PackageSchemas> {
        let provider = provider();
        let registry = MarkerRegistry::builtin();
        run_schema(SchemaInput {
            provider: &provider,
            packages: &[PKG.to_string()],
            registry: &registry,
            active,
        })
        .expect("schema")
    }

    #[test]
    fn generates_object_schema_per_struct() {
        let out = generate(&FeatureSetActivation::default());
        assert_eq!(out.len(), 1);
        let names: Vec<&str> = out[0].schemas.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["CommonMeta", "WidgetSpec"]);

        let spec = serde_json::to_value(&out[0].schemas["WidgetSpec"]).expect("json");
        assert_eq!(
            spec,
            json!({
                "type": "object",
                "properties": {
                    "labels": { "type": "object", "additionalProperties": { "type": "string" } },
                    "mode": { "type": "string", "enum": ["Stable"] },
                    "owner": { "type": "string" },
                    "replicas": { "type": "integer", "format": "int32" }
                },
                "required": ["mode"]
            })
        );
    }

    #[test]
    fn active_feature_set_widens_enum() {
        let out = generate(&FeatureSetActivation::new(["TechPreviewNoUpgrade"]));
        assert_eq!(
            out[0].schemas["WidgetSpec"].properties["mode"].enum_values,
            Some(vec![json!("Stable"), json!("Experimental")])
        );
    }

    #[test]
    fn malformed_marker_fails_with_field_context() {
        let bad = field(
            "Mode",
            "string",
            r#"json:"mode""#,
            &["shapeguard:validation:FeatureSetAwareEnum:enum=A"],
        );
        let provider = InMemoryProvider::new().with_package(PackageModel {
            path: PKG.to_string(),
            types: vec![DeclaredType {
                package: PKG.to_string(),
                name: "Broken".to_string(),
                fields: vec![bad],
                ..DeclaredType::default()
            }],
        });
        let registry = MarkerRegistry::builtin();
        let err = run_schema(SchemaInput {
            provider: &provider,
            packages: &[PKG.to_string()],
            registry: &registry,
            active: &FeatureSetActivation::new(["Default"]),
        })
        .expect_err("missing featureSet");
        assert!(
            err.to_string()
                .starts_with("example.com/api/v1.Broken:Mode: apply markers")
        );
    }

    #[test]
    fn signatures_map_to_schema_types() {
        let cases = [
            ("string", json!({ "type": "string" })),
            ("*bool", json!({ "type": "boolean" })),
            ("int64", json!({ "type": "integer", "format": "int64" })),
            ("[]byte", json!({ "type": "string", "format": "byte" })),
            (
                "[]*Condition",
                json!({ "type": "array", "items": { "x-shapeguard-ref": "Condition" } }),
            ),
            (
                "map[string][]int32",
                json!({
                    "type": "object",
                    "additionalProperties": {
                        "type": "array",
                        "items": { "type": "integer", "format": "int32" }
                    }
                }),
            ),
            ("metav1.Time", json!({ "type": "string", "format": "date-time" })),
            ("resource.Quantity", json!({ "x-shapeguard-ref": "resource.Quantity" })),
        ];
        for (sig, expected) in cases {
            let value = serde_json::to_value(schema_for_signature(sig)).expect("json");
            assert_eq!(value, expected, "{sig}");
        }
    }
}
