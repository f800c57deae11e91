use super::{Column, Computed, Relationship};
use crate::field::FieldArgs;

/// One named, declared attribute of a model.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

#[derive(Debug, Clone)]
pub enum AttributeKind {
    /// Stored value, possibly carrying a foreign key
    Column(Column),

    /// Link to another model, by name
    Relationship(Relationship),

    /// Getter with an optional setter
    Computed(Computed),
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: impl Into<AttributeKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Attributes whose name starts with `_` are internal and never become
    /// fields.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }

    /// The annotation bag attached at declaration time.
    pub fn info(&self) -> &FieldArgs {
        match &self.kind {
            AttributeKind::Column(column) => &column.info,
            AttributeKind::Relationship(relationship) => &relationship.info,
            AttributeKind::Computed(computed) => &computed.info,
        }
    }
}

impl From<Column> for AttributeKind {
    fn from(value: Column) -> Self {
        Self::Column(value)
    }
}

impl From<Relationship> for AttributeKind {
    fn from(value: Relationship) -> Self {
        Self::Relationship(value)
    }
}

impl From<Computed> for AttributeKind {
    fn from(value: Computed) -> Self {
        Self::Computed(value)
    }
}
