use super::{DefaultValue, Field, FieldKind, FieldOptions, Validator};
use crate::Value;

use indexmap::IndexMap;

/// Per-attribute field configuration.
///
/// Used both as the annotation bag attached to an attribute at declaration
/// time and as the per-model table of caller options. Every entry is
/// optional; unset entries leave the type-driven defaults in place.
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    /// Explicit field selection
    pub field: Option<FieldOverride>,

    pub required: Option<bool>,
    pub allow_none: Option<bool>,
    pub dump_only: Option<bool>,
    pub load_only: Option<bool>,
    pub default: Option<DefaultValue>,
    pub missing: Option<DefaultValue>,
    pub validate: Vec<Validator>,
    pub label: Option<String>,
    pub format: Option<String>,
    pub metadata: IndexMap<String, serde_json::Value>,
}

/// How the `field` entry of a [`FieldArgs`] selects the field.
#[derive(Debug, Clone)]
pub enum FieldOverride {
    /// Use this field verbatim.
    Instance(Box<Field>),

    /// Produce no field for the attribute.
    Suppress,

    /// Build a field of this kind with the merged options.
    Kind(FieldKind),
}

impl FieldArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.field = Some(FieldOverride::Instance(Box::new(field)));
        self
    }

    pub fn suppress(mut self) -> Self {
        self.field = Some(FieldOverride::Suppress);
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.field = Some(FieldOverride::Kind(kind));
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = Some(allow_none);
        self
    }

    pub fn dump_only(mut self, dump_only: bool) -> Self {
        self.dump_only = Some(dump_only);
        self
    }

    pub fn load_only(mut self, load_only: bool) -> Self {
        self.load_only = Some(load_only);
        self
    }

    pub fn dump_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::value(value));
        self
    }

    pub fn missing(mut self, missing: DefaultValue) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validate.push(validator);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// True if any entry other than `field` is set.
    pub fn has_options(&self) -> bool {
        self.required.is_some()
            || self.allow_none.is_some()
            || self.dump_only.is_some()
            || self.load_only.is_some()
            || self.default.is_some()
            || self.missing.is_some()
            || !self.validate.is_empty()
            || self.label.is_some()
            || self.format.is_some()
            || !self.metadata.is_empty()
    }

    /// True if nothing at all is set.
    pub fn is_empty(&self) -> bool {
        self.field.is_none() && !self.has_options()
    }

    /// Overlays the set entries onto `options`. Set entries win; a non-empty
    /// validator list replaces the existing one; metadata merges by key.
    pub fn merge_into(&self, options: &mut FieldOptions) {
        if let Some(required) = self.required {
            options.required = required;
        }

        if let Some(allow_none) = self.allow_none {
            options.allow_none = allow_none;
        }

        if let Some(dump_only) = self.dump_only {
            options.dump_only = dump_only;
        }

        if let Some(load_only) = self.load_only {
            options.load_only = load_only;
        }

        if let Some(default) = &self.default {
            options.default = Some(default.clone());
        }

        if let Some(missing) = &self.missing {
            options.missing = Some(missing.clone());
        }

        if !self.validate.is_empty() {
            options.validate = self.validate.clone();
        }

        if let Some(label) = &self.label {
            options.label = Some(label.clone());
        }

        if let Some(format) = &self.format {
            options.format = Some(format.clone());
        }

        for (key, value) in &self.metadata {
            options.metadata.insert(key.clone(), value.clone());
        }
    }
}

impl From<Field> for FieldArgs {
    fn from(field: Field) -> Self {
        Self::new().field(field)
    }
}

impl From<FieldKind> for FieldArgs {
    fn from(kind: FieldKind) -> Self {
        Self::new().kind(kind)
    }
}
