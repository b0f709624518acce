use crate::model::{DeclaredType, Field, PackageModel, Resolution, TypeKind};
use crate::policy::{FieldTypePolicy, OptionalityPolicy, PolicyConfig, TagPolicy};
use regex::Regex;
use shapeguard_types::{Location, SourcePath};

pub fn location(package: &str, line: u32) -> Option<Location> {
    Some(Location {
        path: SourcePath::new(package).join("types.go"),
        line: Some(line),
    })
}

/// A fully resolved field tagged `json:"<json_name>"`.
pub fn field(name: &str, type_signature: &str, json_name: &str) -> Field {
    Field {
        name: name.to_string(),
        type_signature: type_signature.to_string(),
        tag: Some(format!("json:\"{json_name}\"")),
        location: location("pkg", 10),
        embedded: false,
        resolution: Resolution::Full,
        markers: Vec::new(),
    }
}

pub fn with_markers(mut field: Field, markers: &[&str]) -> Field {
    field.markers = markers.iter().map(|m| m.to_string()).collect();
    field
}

pub fn struct_type(package: &str, name: &str, fields: Vec<Field>) -> DeclaredType {
    DeclaredType {
        package: package.to_string(),
        name: name.to_string(),
        kind: TypeKind::Struct,
        location: location(package, 1),
        fields,
    }
}

pub fn package(path: &str, types: Vec<DeclaredType>) -> PackageModel {
    PackageModel {
        path: path.to_string(),
        types,
    }
}

pub fn allowlist_config(pattern: &str, excluded: &[&str]) -> PolicyConfig {
    PolicyConfig {
        field_types: Some(FieldTypePolicy {
            allowlist: Regex::new(pattern).expect("valid test pattern"),
            excluded: excluded.iter().map(|k| k.to_string()).collect(),
        }),
        ..PolicyConfig::default()
    }
}

pub fn tag_config(pattern: Option<&str>) -> PolicyConfig {
    let policy = match pattern {
        Some(p) => TagPolicy {
            name_pattern: Regex::new(p).expect("valid test pattern"),
        },
        None => TagPolicy::lower_camel().expect("default pattern"),
    };
    PolicyConfig {
        json_tags: Some(policy),
        ..PolicyConfig::default()
    }
}

pub fn optionality_config(policy: OptionalityPolicy) -> PolicyConfig {
    PolicyConfig {
        optional_or_required: Some(policy),
        ..PolicyConfig::default()
    }
}
