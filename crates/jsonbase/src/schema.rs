mod builder;
pub use builder::Builder;

mod field_map;
pub use field_map::FieldMap;

use jsonbase_core::schema::Name;
use jsonbase_core::Field;

use indexmap::IndexMap;

/// The serialization schema synthesized for one model.
///
/// Contains the model's own fields and every field inherited from its base
/// that was not overridden or suppressed, in declaration order.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    /// Name of the model
    pub name: Name,

    /// Table the model maps to, if any
    pub table_name: Option<String>,

    /// Model this schema was derived from
    pub base: Option<Name>,

    pub fields: IndexMap<String, Field>,
}

impl ModelSchema {
    /// Key of the model in the registry and in JSON-Schema definitions.
    pub fn key(&self) -> String {
        self.name.upper_camel_case()
    }

    /// Conventional name of the schema type, e.g. `BookSchema`.
    pub fn schema_name(&self) -> String {
        format!("{}Schema", self.key())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Names of the fields bound to another model's schema.
    pub fn relationships(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|(_, field)| field.is_nested())
            .map(|(name, _)| name.as_str())
    }
}
