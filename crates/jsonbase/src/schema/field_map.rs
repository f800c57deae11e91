use jsonbase_core::field::FieldKind;
use jsonbase_core::Type;

use std::collections::HashMap;

/// Maps a column's primitive type to the kind of field synthesized for it.
///
/// Types without an entry get a raw passthrough field.
#[derive(Debug, Clone)]
pub struct FieldMap {
    kinds: HashMap<Type, FieldKind>,
}

impl FieldMap {
    /// A map with no entries; every column becomes a raw field.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Adds or replaces the mapping for `ty`, returning the previous kind.
    pub fn insert(&mut self, ty: Type, kind: FieldKind) -> Option<FieldKind> {
        self.kinds.insert(ty, kind)
    }

    pub fn with(mut self, ty: Type, kind: FieldKind) -> Self {
        self.insert(ty, kind);
        self
    }

    pub fn get(&self, ty: &Type) -> FieldKind {
        self.kinds.get(ty).cloned().unwrap_or(FieldKind::Raw)
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::empty()
            .with(Type::Bool, FieldKind::Boolean)
            .with(Type::Date, FieldKind::Date)
            .with(Type::DateTime, FieldKind::DateTime)
            .with(Type::Decimal, FieldKind::Decimal)
            .with(Type::Float, FieldKind::Float)
            .with(Type::Integer, FieldKind::Integer)
            .with(Type::List, FieldKind::List)
            .with(Type::Map, FieldKind::Dict)
            .with(Type::String, FieldKind::String)
    }
}
