use crate::{FeatureSetActivation, JsonSchemaProps, MarkerArgs, MarkerError};
use serde::Serialize;

/// `+shapeguard:validation:FeatureSetAwareEnum:featureSet=<a>;<b>,enum=<v1>;<v2>`
pub const FEATURE_SET_ENUM_MARKER: &str = "shapeguard:validation:FeatureSetAwareEnum";

/// An enum constraint that only exists while one of its feature sets is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSetEnum<T = String> {
    pub feature_sets: Vec<String>,
    pub values: Vec<T>,
}

impl FeatureSetEnum<String> {
    pub fn from_args(args: &MarkerArgs) -> Result<Self, MarkerError> {
        Ok(Self {
            feature_sets: args
                .require(FEATURE_SET_ENUM_MARKER, "featureSet")?
                .to_vec(),
            values: args.require(FEATURE_SET_ENUM_MARKER, "enum")?.to_vec(),
        })
    }
}

impl<T: Serialize> FeatureSetEnum<T> {
    /// Replace the schema's enum with `values` when a named feature set is active.
    ///
    /// With no active feature set the schema is left exactly as it was. Values are encoded
    /// one at a time; the first encoding failure aborts and leaves the schema untouched.
    pub fn apply_to_schema(
        &self,
        active: &FeatureSetActivation,
        schema: &mut JsonSchemaProps,
    ) -> Result<(), MarkerError> {
        if !active.contains_any(&self.feature_sets) {
            return Ok(());
        }

        let mut literals = Vec::with_capacity(self.values.len());
        for value in &self.values {
            let literal = serde_json::to_value(value).map_err(|source| MarkerError::Encode {
                marker: FEATURE_SET_ENUM_MARKER.to_string(),
                source,
            })?;
            literals.push(literal);
        }
        schema.enum_values = Some(literals);
        Ok(())
    }
}
