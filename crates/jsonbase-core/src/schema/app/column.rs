use super::ForeignKey;
use crate::field::{DefaultValue, FieldArgs};
use crate::{Type, Value};

/// A stored value.
#[derive(Debug, Clone)]
pub struct Column {
    /// The column's primitive type
    pub ty: Type,

    /// True if the column accepts null. Columns are nullable unless declared
    /// otherwise or part of the primary key.
    pub nullable: bool,

    pub primary_key: bool,

    /// Value used when a row is created without this column
    pub default: Option<DefaultValue>,

    /// Foreign keys declared on the column. Only one is supported; more is
    /// rejected when the schema is built.
    pub foreign_keys: Vec<ForeignKey>,

    /// Annotation bag
    pub info: FieldArgs,
}

impl Column {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            nullable: true,
            primary_key: false,
            default: None,
            foreign_keys: vec![],
            info: FieldArgs::default(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn not_null(self) -> Self {
        self.nullable(false)
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::value(value));
        self
    }

    pub fn default_fn(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultValue::func(f));
        self
    }

    pub fn foreign_key(mut self, target: impl Into<ForeignKey>) -> Self {
        self.foreign_keys.push(target.into());
        self
    }

    pub fn info(mut self, info: FieldArgs) -> Self {
        self.info = info;
        self
    }
}
