//! Type graph providers: turn package identifiers into the in-memory model the engine checks.
//!
//! This crate is allowed to do filesystem IO. It does not compile or introspect source code;
//! type information is produced ahead of time into one `types.json` document per package.

#![forbid(unsafe_code)]

mod document;
mod error;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use shapeguard_domain::model::{PackageModel, TypeGraph};
use std::collections::BTreeMap;

pub use error::ProviderError;

/// File name of the per-package type document.
pub const TYPES_DOCUMENT: &str = "types.json";

/// Resolves package identifiers into declared types and fields.
///
/// Packages come back in request order; a package requested twice is loaded once.
pub trait TypeGraphProvider {
    fn load(&self, packages: &[String]) -> Result<TypeGraph, ProviderError>;
}

/// Fuzz-friendly API for exercising document parsing without filesystem access.
pub mod fuzz {
    /// Parse arbitrary text as the type document of package `p`. **Never panics.**
    pub fn parse_package_document(text: &str) -> Result<(), crate::ProviderError> {
        crate::document::parse_package("p", text).map(|_| ())
    }
}

/// Provider over packages already held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    packages: BTreeMap<String, PackageModel>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: PackageModel) -> Self {
        self.insert(package);
        self
    }

    pub fn insert(&mut self, package: PackageModel) {
        self.packages.insert(package.path.clone(), package);
    }
}

impl TypeGraphProvider for InMemoryProvider {
    fn load(&self, packages: &[String]) -> Result<TypeGraph, ProviderError> {
        collect_in_order(packages, |name| {
            self.packages
                .get(name)
                .cloned()
                .ok_or_else(|| ProviderError::NotFound {
                    package: name.to_string(),
                    path: Utf8PathBuf::from(name),
                })
        })
    }
}

/// Provider reading `<root>/<package>/types.json`.
#[derive(Clone, Debug)]
pub struct FsTypeGraphProvider {
    root: Utf8PathBuf,
}

impl FsTypeGraphProvider {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute location of a package's type document.
    pub fn document_path(&self, package: &str) -> Result<Utf8PathBuf, ProviderError> {
        let rel = Utf8Path::new(package);
        let relative_only = !package.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if !relative_only {
            return Err(ProviderError::InvalidPackage(package.to_string()));
        }
        Ok(self.root.join(rel).join(TYPES_DOCUMENT))
    }

    fn load_package(&self, package: &str) -> Result<PackageModel, ProviderError> {
        let path = self.document_path(package)?;
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProviderError::NotFound {
                    package: package.to_string(),
                    path: path.clone(),
                }
            } else {
                ProviderError::Io {
                    package: package.to_string(),
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let model = document::parse_package(package, &text)?;
        let unresolved = model
            .types
            .iter()
            .flat_map(|t| &t.fields)
            .filter(|f| !f.is_resolved())
            .count();
        tracing::debug!(
            package,
            path = %path,
            types = model.types.len(),
            unresolved_fields = unresolved,
            "loaded type document"
        );
        Ok(model)
    }
}

impl TypeGraphProvider for FsTypeGraphProvider {
    fn load(&self, packages: &[String]) -> Result<TypeGraph, ProviderError> {
        collect_in_order(packages, |name| self.load_package(name))
    }
}

fn collect_in_order(
    packages: &[String],
    mut load: impl FnMut(&str) -> Result<PackageModel, ProviderError>,
) -> Result<TypeGraph, ProviderError> {
    let mut graph = TypeGraph::default();
    for name in packages {
        if graph.packages.iter().any(|p| &p.path == name) {
            continue;
        }
        graph.packages.push(load(name)?);
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn package(path: &str) -> PackageModel {
        PackageModel {
            path: path.to_string(),
            types: Vec::new(),
        }
    }

    #[test]
    fn in_memory_provider_keeps_request_order_and_dedupes() {
        let provider = InMemoryProvider::new()
            .with_package(package("a"))
            .with_package(package("b"));

        let graph = provider
            .load(&["b".to_string(), "a".to_string(), "b".to_string()])
            .expect("load");
        let paths: Vec<&str> = graph.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["b", "a"]);
    }

    #[test]
    fn in_memory_provider_reports_unknown_package() {
        let err = InMemoryProvider::new()
            .load(&["missing".to_string()])
            .expect_err("unknown");
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[test]
    fn fs_provider_rejects_escaping_package_paths() {
        let provider = FsTypeGraphProvider::new("/repo");
        for bad in ["", "../outside", "/abs/pkg", "a/../../b"] {
            assert!(
                matches!(
                    provider.document_path(bad),
                    Err(ProviderError::InvalidPackage(_))
                ),
                "{bad} should be rejected"
            );
        }
        assert_eq!(
            provider.document_path("example.com/api/v1").expect("path"),
            Utf8PathBuf::from("/repo/example.com/api/v1/types.json")
        );
    }

    #[test]
    fn fs_provider_reads_package_documents() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("example.com/api/v1/types.json"),
            r#"{"package":"example.com/api/v1","types":[
                {"name":"Widget","kind":"struct","file":"types.go","line":3,
                 "fields":[{"name":"Name","type":"string","tag":"json:\"name\"","line":4}]}]}"#,
        );

        let graph = FsTypeGraphProvider::new(root)
            .load(&["example.com/api/v1".to_string()])
            .expect("load");
        assert_eq!(graph.packages.len(), 1);
        let field = &graph.packages[0].types[0].fields[0];
        assert_eq!(field.type_signature, "string");
        assert_eq!(
            field.location.as_ref().map(ToString::to_string).as_deref(),
            Some("example.com/api/v1/types.go:4")
        );
    }

    #[test]
    fn fs_provider_missing_document_is_fatal() {
        let tmp = TempDir::new().expect("temp dir");
        let err = FsTypeGraphProvider::new(utf8_root(&tmp))
            .load(&["nowhere".to_string()])
            .expect_err("missing");
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    proptest! {
        #[test]
        fn document_parser_never_panics(input in ".*") {
            let _ = fuzz::parse_package_document(&input);
        }
    }
}
