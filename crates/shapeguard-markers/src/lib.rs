//! Schema markers: feature-set activation, marker argument parsing, and the registry that
//! applies markers to field schemas.
//!
//! This is the only part of shapeguard that mutates anything: markers rewrite the
//! [`JsonSchemaProps`] of the field they are attached to.

#![forbid(unsafe_code)]

mod args;
mod error;
mod feature_set_enum;
mod feature_sets;
mod registry;
mod schema;

pub use args::MarkerArgs;
pub use error::MarkerError;
pub use feature_set_enum::{FEATURE_SET_ENUM_MARKER, FeatureSetEnum};
pub use feature_sets::{FEATURE_SETS_ENV, FeatureSetActivation};
pub use registry::{ApplyFn, ENUM_MARKER, MarkerDefinition, MarkerRegistry};
pub use schema::JsonSchemaProps;
