use super::{Attribute, AttributeKind, Column, Computed, Relationship};
use crate::field::FieldArgs;
use crate::schema::Name;

use indexmap::IndexMap;

/// A model declaration: a name, an optional table, an optional base model
/// and the model's own attributes in declaration order.
#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model
    pub name: Name,

    /// Table the model maps to. Foreign keys reference models through it.
    pub table_name: Option<String>,

    /// Model this one extends. Its schema must already be built.
    pub base: Option<Name>,

    /// Attributes declared on this model, not including inherited ones
    pub attributes: Vec<Attribute>,

    /// Per-attribute caller options, layered under each attribute's own
    /// annotation bag.
    pub schema_args: IndexMap<String, FieldArgs>,
}

#[derive(Debug)]
pub struct ModelBuilder {
    model: Model,
}

impl Model {
    pub fn builder(name: &str) -> ModelBuilder {
        ModelBuilder {
            model: Model {
                name: Name::new(name),
                table_name: None,
                base: None,
                attributes: vec![],
                schema_args: IndexMap::new(),
            },
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Caller options for the named attribute, if any were given.
    pub fn schema_args(&self, name: &str) -> Option<&FieldArgs> {
        self.schema_args.get(name)
    }
}

impl ModelBuilder {
    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.model.table_name = Some(table_name.into());
        self
    }

    pub fn extends(mut self, base: &str) -> Self {
        self.model.base = Some(Name::new(base));
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, kind: impl Into<AttributeKind>) -> Self {
        self.model.attributes.push(Attribute::new(name, kind));
        self
    }

    pub fn column(self, name: impl Into<String>, column: Column) -> Self {
        self.attribute(name, column)
    }

    pub fn relationship(self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.attribute(name, relationship)
    }

    pub fn computed(self, name: impl Into<String>, computed: Computed) -> Self {
        self.attribute(name, computed)
    }

    pub fn schema_arg(mut self, name: impl Into<String>, args: impl Into<FieldArgs>) -> Self {
        self.model.schema_args.insert(name.into(), args.into());
        self
    }

    pub fn build(self) -> Model {
        self.model
    }
}
