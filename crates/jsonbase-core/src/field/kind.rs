use indexmap::IndexSet;

/// The field type selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Date,
    DateTime,
    Decimal,
    Dict,
    Float,
    Integer,
    List,

    /// A relationship to another model's schema
    Nested(Nested),

    /// Passthrough, no coercion
    Raw,

    String,
}

/// A nested field, bound to the target schema by model name.
///
/// The target does not have to be registered when the field is built; it is
/// looked up whenever the field is dumped, loaded or described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nested {
    /// Name of the target model
    pub target: String,

    /// True for to-many relationships
    pub many: bool,

    /// Fixed allow-list applied to the target schema, on top of any view
    pub only: Option<IndexSet<String>>,

    /// Fixed deny-list applied to the target schema, on top of any view
    pub exclude: IndexSet<String>,
}

impl FieldKind {
    pub fn nested(target: impl Into<String>, many: bool) -> Self {
        Self::Nested(Nested::new(target, many))
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    pub fn as_nested(&self) -> Option<&Nested> {
        match self {
            Self::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Decimal => "decimal",
            Self::Dict => "mapping",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Nested(_) => "related instance, list or query",
            Self::Raw => "raw",
            Self::String => "string",
        }
    }

    pub(crate) fn invalid_message(&self) -> String {
        match self {
            Self::Boolean => "Not a valid boolean.",
            Self::Date => "Not a valid date.",
            Self::DateTime => "Not a valid datetime.",
            Self::Decimal | Self::Float => "Not a valid number.",
            Self::Dict => "Not a valid mapping type.",
            Self::Integer => "Not a valid integer.",
            Self::List => "Not a valid list.",
            Self::Nested(_) => "Invalid input type.",
            Self::Raw => "Invalid value.",
            Self::String => "Not a valid string.",
        }
        .to_string()
    }
}

impl Nested {
    pub fn new(target: impl Into<String>, many: bool) -> Self {
        Self {
            target: target.into(),
            many,
            only: None,
            exclude: IndexSet::new(),
        }
    }

    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }
}

impl From<Nested> for FieldKind {
    fn from(value: Nested) -> Self {
        Self::Nested(value)
    }
}
