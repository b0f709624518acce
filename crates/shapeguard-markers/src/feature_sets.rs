use crate::MarkerError;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Comma-delimited list of active feature-set names, read once at startup.
pub const FEATURE_SETS_ENV: &str = "SHAPEGUARD_FEATURE_SETS";

static ACTIVE: OnceLock<FeatureSetActivation> = OnceLock::new();

/// Named feature sets that are switched on for this process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureSetActivation {
    names: BTreeSet<String>,
}

impl FeatureSetActivation {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .map(|n: String| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Parse a delimited list such as `TechPreviewNoUpgrade, CustomNoUpgrade`.
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn from_env() -> Self {
        std::env::var(FEATURE_SETS_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    /// Install the process-wide set. Writes happen once, before any marker is resolved.
    pub fn install(self) -> Result<&'static FeatureSetActivation, MarkerError> {
        ACTIVE.set(self).map_err(|_| MarkerError::AlreadyInitialized)?;
        Ok(Self::global())
    }

    /// The process-wide set. Falls back to the environment if nothing was installed.
    pub fn global() -> &'static FeatureSetActivation {
        ACTIVE.get_or_init(Self::from_env)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.contains(n.as_ref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let active = FeatureSetActivation::parse(" TechPreviewNoUpgrade,,CustomNoUpgrade , ");
        let names: Vec<&str> = active.names().collect();
        assert_eq!(names, vec!["CustomNoUpgrade", "TechPreviewNoUpgrade"]);
    }

    #[test]
    fn empty_value_activates_nothing() {
        assert!(FeatureSetActivation::parse("").is_empty());
        assert!(!FeatureSetActivation::parse("").contains(""));
    }

    // The only test in this crate that touches the process-wide set.
    #[test]
    fn install_succeeds_once() {
        let installed = FeatureSetActivation::new(["TechPreviewNoUpgrade"])
            .install()
            .expect("first install");
        assert!(installed.contains("TechPreviewNoUpgrade"));

        let err = FeatureSetActivation::new(["Default"])
            .install()
            .expect_err("second install");
        assert!(matches!(err, MarkerError::AlreadyInitialized));
        assert!(!FeatureSetActivation::global().contains("Default"));
    }

    #[test]
    fn contains_any_matches_one_of_several() {
        let active = FeatureSetActivation::new(["Default"]);
        assert!(active.contains_any(&["TechPreviewNoUpgrade", "Default"]));
        assert!(!active.contains_any(&["TechPreviewNoUpgrade"]));
        assert!(!active.contains_any::<&str>(&[]));
    }
}
