use shapeguard_types::Location;

/// Declared types of every requested package, in request order.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    pub packages: Vec<PackageModel>,
}

#[derive(Clone, Debug, Default)]
pub struct PackageModel {
    /// Import path of the package, e.g. `example.com/api/v1`.
    pub path: String,

    /// Declared types in provider order.
    pub types: Vec<DeclaredType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeKind {
    #[default]
    Struct,
    /// Aliases, named scalars, interfaces: anything without fields.
    Other,
}

#[derive(Clone, Debug, Default)]
pub struct DeclaredType {
    /// Import path of the owning package.
    pub package: String,
    pub name: String,
    pub kind: TypeKind,
    pub location: Option<Location>,
    pub fields: Vec<Field>,
}

/// How much of a field's static type the provider managed to resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Full,
    /// The signature is known syntactically but the type behind it is not
    /// (e.g. an unresolved import).
    Partial,
}

#[derive(Clone, Debug, Default)]
pub struct Field {
    pub name: String,

    /// Declared type signature as written, e.g. `*Other`, `[]string`, `map[string]int32`.
    pub type_signature: String,

    /// Raw struct tag, e.g. `json:"name,omitempty" protobuf:"bytes,1,opt,name=name"`.
    pub tag: Option<String>,

    pub location: Option<Location>,
    pub embedded: bool,
    pub resolution: Resolution,

    /// Raw marker directives attached to the field, without the leading `+`.
    pub markers: Vec<String>,
}

impl DeclaredType {
    /// `<package-path>.<TypeName>`.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Exported names start with an uppercase letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    /// Only exported struct types are subject to field policies.
    pub fn is_checked(&self) -> bool {
        self.kind == TypeKind::Struct && self.is_exported()
    }

    /// `<package-path>.<TypeName>:<FieldName>`, the key used by exclusion lists.
    pub fn field_key(&self, field: &Field) -> String {
        format!("{}:{}", self.full_name(), field.name)
    }
}

impl Field {
    pub fn is_resolved(&self) -> bool {
        self.resolution == Resolution::Full
    }

    /// True when a marker with exactly this name (and no arguments) is attached.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers
            .iter()
            .any(|m| m.trim().trim_start_matches('+') == name)
    }
}

impl PackageModel {
    pub fn checked_types(&self) -> impl Iterator<Item = &DeclaredType> {
        self.types.iter().filter(|t| t.is_checked())
    }
}
