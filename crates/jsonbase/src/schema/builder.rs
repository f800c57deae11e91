use super::{FieldMap, ModelSchema};
use jsonbase_core::field::{Field, FieldKind, FieldOptions, FieldOverride};
use jsonbase_core::schema::app::{Attribute, AttributeKind, Column, Computed, Model, Relationship};
use jsonbase_core::{Error, Result};

/// Synthesizes a [`ModelSchema`] from a model declaration.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    /// Column type to field kind table
    field_map: FieldMap,
}

/// Used to track state while one model is being built
struct BuildSchema<'a> {
    builder: &'a Builder,
    model: &'a Model,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_map(&mut self, field_map: FieldMap) -> &mut Self {
        self.field_map = field_map;
        self
    }

    /// Builds the schema for `model`, on top of a copy of `base`'s schema.
    ///
    /// `base` must be the schema of `model.base` when the model extends
    /// another one. The base schema itself is never modified.
    pub fn build(&self, model: &Model, base: Option<&ModelSchema>) -> Result<ModelSchema> {
        let cx = BuildSchema {
            builder: self,
            model,
        };

        let mut fields = base.map(|base| base.fields.clone()).unwrap_or_default();

        for attr in &model.attributes {
            if attr.is_private() {
                continue;
            }

            match cx.make_field(attr)? {
                Some(field) => {
                    fields.insert(attr.name.clone(), field);
                }
                None => {
                    fields.shift_remove(&attr.name);
                }
            }
        }

        Ok(ModelSchema {
            name: model.name.clone(),
            table_name: model.table_name.clone(),
            base: model.base.clone(),
            fields,
        })
    }
}

impl BuildSchema<'_> {
    /// Creates the field for one attribute, or `None` if the attribute is
    /// suppressed.
    ///
    /// The field is selected by the first of: the annotation bag's `field`,
    /// the caller options' `field`, the attribute kind's default. An explicit
    /// instance is used verbatim. Otherwise the options are the type-driven
    /// defaults, overlaid by the caller options, overlaid by the annotation
    /// bag.
    fn make_field(&self, attr: &Attribute) -> Result<Option<Field>> {
        if let AttributeKind::Column(column) = &attr.kind {
            if column.foreign_keys.len() > 1 {
                return Err(Error::invalid_schema(format!(
                    "column `{}.{}` declares {} foreign keys; at most one is supported",
                    self.model.name,
                    attr.name,
                    column.foreign_keys.len()
                )));
            }
        }

        let info = attr.info();
        let opts = self.model.schema_args(&attr.name);

        let selected = match (&info.field, opts.and_then(|opts| opts.field.as_ref())) {
            (Some(field), _) => Some((field, info)),
            (None, Some(field)) => opts.map(|opts| (field, opts)),
            (None, None) => None,
        };

        let kind = match selected {
            Some((FieldOverride::Instance(field), source)) => {
                if source.has_options() {
                    return Err(Error::invalid_schema(format!(
                        "attribute `{}.{}` combines an explicit field instance with other field options",
                        self.model.name, attr.name
                    )));
                }
                return Ok(Some((**field).clone()));
            }
            Some((FieldOverride::Suppress, _)) => return Ok(None),
            Some((FieldOverride::Kind(kind), _)) => Some(kind.clone()),
            None => None,
        };

        let mut field = match &attr.kind {
            AttributeKind::Column(column) => self.column_to_field(column, kind),
            AttributeKind::Relationship(relationship) => {
                self.relationship_to_field(relationship, kind)
            }
            AttributeKind::Computed(computed) => self.computed_to_field(computed, kind),
        };

        if let Some(opts) = opts {
            opts.merge_into(&mut field.options);
        }
        info.merge_into(&mut field.options);

        Ok(Some(field))
    }

    fn column_to_field(&self, column: &Column, kind: Option<FieldKind>) -> Field {
        let kind = kind.unwrap_or_else(|| self.builder.field_map.get(&column.ty));

        let options = FieldOptions {
            required: !column.nullable,
            allow_none: column.nullable,
            dump_only: column.primary_key,
            missing: column.default.clone(),
            ..FieldOptions::default()
        };

        let mut field = Field::with_options(kind, options);
        field.foreign_key = column.foreign_keys.first().cloned();
        field
    }

    fn relationship_to_field(&self, relationship: &Relationship, kind: Option<FieldKind>) -> Field {
        let kind = kind.unwrap_or_else(|| {
            FieldKind::nested(relationship.target.upper_camel_case(), relationship.many)
        });

        let options = FieldOptions {
            allow_none: !relationship.many,
            ..FieldOptions::default()
        };

        Field::with_options(kind, options)
    }

    fn computed_to_field(&self, computed: &Computed, kind: Option<FieldKind>) -> Field {
        let options = FieldOptions {
            allow_none: true,
            dump_only: !computed.setter,
            ..FieldOptions::default()
        };

        Field::with_options(kind.unwrap_or(FieldKind::Raw), options)
    }
}

impl From<FieldMap> for Builder {
    fn from(field_map: FieldMap) -> Self {
        Self { field_map }
    }
}
