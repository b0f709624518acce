use crate::{
    FEATURE_SET_ENUM_MARKER, FeatureSetActivation, FeatureSetEnum, JsonSchemaProps, MarkerArgs,
    MarkerError,
};
use std::collections::BTreeMap;

/// `+kubebuilder:validation:Enum=<v1>;<v2>`: an unconditional enum constraint.
pub const ENUM_MARKER: &str = "kubebuilder:validation:Enum";

pub type ApplyFn =
    fn(&MarkerArgs, &FeatureSetActivation, &mut JsonSchemaProps) -> Result<(), MarkerError>;

#[derive(Clone, Debug)]
pub struct MarkerDefinition {
    pub name: &'static str,
    pub apply: ApplyFn,
}

/// Marker name → application function. Built once at startup and passed by reference.
#[derive(Clone, Debug, Default)]
pub struct MarkerRegistry {
    definitions: BTreeMap<&'static str, MarkerDefinition>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every schema marker shapeguard understands.
    pub fn builtin() -> Self {
        let definitions = [
            MarkerDefinition {
                name: ENUM_MARKER,
                apply: apply_enum,
            },
            MarkerDefinition {
                name: FEATURE_SET_ENUM_MARKER,
                apply: apply_feature_set_enum,
            },
        ]
        .into_iter()
        .map(|definition| (definition.name, definition))
        .collect();
        Self { definitions }
    }

    pub fn register(&mut self, definition: MarkerDefinition) -> Result<(), MarkerError> {
        if self.definitions.contains_key(definition.name) {
            return Err(MarkerError::Duplicate(definition.name.to_string()));
        }
        self.definitions.insert(definition.name, definition);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.keys().copied()
    }

    /// Resolve a raw directive (leading `+` optional) to its definition and parsed arguments.
    ///
    /// The longest registered name wins. A name must be followed by the end of the directive,
    /// `:` (named arguments) or `=` (positional values). Unknown directives yield `Ok(None)`.
    pub fn resolve<'a>(
        &'a self,
        raw: &str,
    ) -> Result<Option<(&'a MarkerDefinition, MarkerArgs)>, MarkerError> {
        let directive = raw.trim().trim_start_matches('+');
        let mut best: Option<(&MarkerDefinition, &str)> = None;

        for (name, definition) in &self.definitions {
            let Some(rest) = directive.strip_prefix(name) else {
                continue;
            };
            if !(rest.is_empty() || rest.starts_with(':') || rest.starts_with('=')) {
                continue;
            }
            if best.is_none_or(|(b, _)| b.name.len() < name.len()) {
                best = Some((definition, rest));
            }
        }

        let Some((definition, rest)) = best else {
            return Ok(None);
        };
        let args = if let Some(named) = rest.strip_prefix(':') {
            MarkerArgs::parse_named(definition.name, named)?
        } else if let Some(positional) = rest.strip_prefix('=') {
            MarkerArgs::parse_positional(definition.name, positional)?
        } else {
            MarkerArgs::default()
        };
        Ok(Some((definition, args)))
    }

    /// Apply every registered marker in `markers`, in order, to `schema`.
    ///
    /// Returns how many markers were applied. Unregistered markers are ignored; they belong
    /// to other tools.
    pub fn apply_all<S: AsRef<str>>(
        &self,
        markers: &[S],
        active: &FeatureSetActivation,
        schema: &mut JsonSchemaProps,
    ) -> Result<usize, MarkerError> {
        let mut applied = 0;
        for raw in markers {
            if let Some((definition, args)) = self.resolve(raw.as_ref())? {
                (definition.apply)(&args, active, schema)?;
                applied += 1;
            }
        }
        Ok(applied)
    }
}

fn apply_enum(
    args: &MarkerArgs,
    _active: &FeatureSetActivation,
    schema: &mut JsonSchemaProps,
) -> Result<(), MarkerError> {
    let Some(values) = args.positional() else {
        return Err(MarkerError::MissingArgument {
            marker: ENUM_MARKER.to_string(),
            argument: "values".to_string(),
        });
    };
    schema.enum_values = Some(
        values
            .iter()
            .map(|v| serde_json::Value::String(v.clone()))
            .collect(),
    );
    Ok(())
}

fn apply_feature_set_enum(
    args: &MarkerArgs,
    active: &FeatureSetActivation,
    schema: &mut JsonSchemaProps,
) -> Result<(), MarkerError> {
    FeatureSetEnum::<String>::from_args(args)?.apply_to_schema(active, schema)
}
