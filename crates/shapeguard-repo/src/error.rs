use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure to produce a type graph. Always fatal: packages are never silently skipped.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("package {0:?} is not a relative package path")]
    InvalidPackage(String),

    #[error("package {package}: no type information at {path}")]
    NotFound { package: String, path: Utf8PathBuf },

    #[error("package {package}: read {path}")]
    Io {
        package: String,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("package {package}: malformed type document")]
    Malformed {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("package {package}: invalid type document: {reason}")]
    InvalidDocument { package: String, reason: String },

    #[error("package {requested}: type document describes package {found}")]
    PackageMismatch { requested: String, found: String },
}
