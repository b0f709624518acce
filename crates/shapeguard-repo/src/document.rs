//! On-disk `types.json` documents and their mapping onto the domain model.

use crate::ProviderError;
use serde::Deserialize;
use shapeguard_domain::model::{DeclaredType, Field, PackageModel, Resolution, TypeKind};
use shapeguard_types::{Location, SourcePath};
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
pub(crate) struct PackageDocument {
    pub package: String,
    #[serde(default)]
    pub types: Vec<TypeDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum KindDocument {
    Struct,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeDocument {
    pub name: String,
    pub kind: KindDocument,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_signature: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub embedded: bool,
    #[serde(default = "resolved_by_default")]
    pub resolved: bool,
    #[serde(default)]
    pub markers: Vec<String>,
}

fn resolved_by_default() -> bool {
    true
}

/// Parse one package document. Never panics on arbitrary input.
pub(crate) fn parse_package(requested: &str, text: &str) -> Result<PackageModel, ProviderError> {
    let doc: PackageDocument =
        serde_json::from_str(text).map_err(|source| ProviderError::Malformed {
            package: requested.to_string(),
            source,
        })?;

    if doc.package != requested {
        return Err(ProviderError::PackageMismatch {
            requested: requested.to_string(),
            found: doc.package,
        });
    }

    let invalid = |reason: String| ProviderError::InvalidDocument {
        package: doc.package.clone(),
        reason,
    };
    let dir = SourcePath::new(&doc.package);
    let mut type_names = BTreeSet::new();
    let mut types = Vec::with_capacity(doc.types.len());

    for ty in doc.types {
        if ty.name.is_empty() {
            return Err(invalid("type with an empty name".to_string()));
        }
        if !type_names.insert(ty.name.clone()) {
            return Err(invalid(format!("type {} is declared twice", ty.name)));
        }

        let file = ty.file.as_deref().map(|f| dir.join(f));
        let location_at = |line: Option<u32>| {
            file.as_ref().map(|path| Location {
                path: path.clone(),
                line,
            })
        };

        let mut field_names = BTreeSet::new();
        let mut fields = Vec::with_capacity(ty.fields.len());
        for f in ty.fields {
            if f.name.is_empty() {
                return Err(invalid(format!("type {}: field with an empty name", ty.name)));
            }
            if !field_names.insert(f.name.clone()) {
                return Err(invalid(format!(
                    "type {}: field {} is declared twice",
                    ty.name, f.name
                )));
            }
            fields.push(Field {
                location: location_at(f.line),
                name: f.name,
                type_signature: f.type_signature,
                tag: f.tag,
                embedded: f.embedded,
                resolution: if f.resolved {
                    Resolution::Full
                } else {
                    Resolution::Partial
                },
                markers: f.markers,
            });
        }

        types.push(DeclaredType {
            package: doc.package.clone(),
            location: location_at(ty.line),
            name: ty.name,
            kind: match ty.kind {
                KindDocument::Struct => TypeKind::Struct,
                KindDocument::Other => TypeKind::Other,
            },
            fields,
        });
    }

    Ok(PackageModel {
        path: doc.package,
        types,
    })
}
