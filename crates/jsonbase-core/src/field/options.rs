use super::Validator;
use crate::Value;

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Construction options shared by every field kind.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Loading without the field fails, unless the load is partial.
    pub required: bool,

    /// `null` is accepted when loading.
    pub allow_none: bool,

    /// Never read from incoming documents.
    pub dump_only: bool,

    /// Never written to dumped documents.
    pub load_only: bool,

    /// Dumped when the instance does not carry the attribute.
    pub default: Option<DefaultValue>,

    /// Loaded when the document does not carry the field.
    pub missing: Option<DefaultValue>,

    pub validate: Vec<Validator>,

    /// Human readable title
    pub label: Option<String>,

    /// Overrides the format emitted in the JSON-Schema
    pub format: Option<String>,

    /// Free-form keys passed through to the JSON-Schema property.
    pub metadata: IndexMap<String, serde_json::Value>,
}

/// A default rule: either a constant or a producer invoked on every use.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Func(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn func(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// Produces the default value.
    pub fn get(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Func(f) => f(),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Func(_))
    }

    /// The constant, if this default is not a producer.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Func(_) => None,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}
