use std::fmt;

/// The declared primitive type of a stored column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Date,
    DateTime,
    Decimal,
    Float,
    Integer,
    List,
    Map,
    String,

    /// A column type with no primitive mapping, e.g. a vendor specific type.
    /// Carries the type's name for diagnostics.
    Other(String),
}

impl Type {
    pub fn other(name: impl Into<String>) -> Self {
        Self::Other(name.into())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
            Self::Decimal => f.write_str("decimal"),
            Self::Float => f.write_str("float"),
            Self::Integer => f.write_str("integer"),
            Self::List => f.write_str("list"),
            Self::Map => f.write_str("map"),
            Self::String => f.write_str("string"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
