use crate::dump::restrict;
use crate::schema::ModelSchema;
use crate::Registry;
use jsonbase_core::field::{Field, FieldKind, Nested, Validator};
use jsonbase_core::schema::Name;
use jsonbase_core::{Result, View};

use indexmap::IndexMap;
use serde_json::{json, Map, Value as Json};

/// The JSON-Schema dialect of emitted documents.
pub const DRAFT: &str = "http://json-schema.org/draft-07/schema#";

const LOCAL_PREFIX: &str = "#/definitions/";

/// Per-call emission state. Never shared between calls.
struct Emitter<'a> {
    registry: &'a Registry,

    /// Key of the model the document is emitted for
    root: String,

    /// Definitions emitted so far, keyed by model. A `Null` body marks a
    /// definition that is still being built.
    definitions: IndexMap<String, Json>,
}

impl Registry {
    /// Describes the named model's schema as a JSON-Schema document.
    ///
    /// Relationships named by the view's `follow` (or with a nested context
    /// entry) get a definition of their own in the document, built with the
    /// nested view; every other relationship points at the target model's
    /// own document. Each model is defined at most once per document.
    pub fn json_schema(&self, model: &str, view: &Json) -> Result<Json> {
        self.json_schema_with(model, &View::parse(view))
    }

    pub fn json_schema_with(&self, model: &str, view: &View) -> Result<Json> {
        let schema = self.schema(model)?;
        let root = schema.key();

        let mut emitter = Emitter {
            registry: self,
            root: root.clone(),
            definitions: IndexMap::new(),
        };

        emitter.definitions.insert(root.clone(), Json::Null);
        let body = emitter.definition(&schema, view)?;
        emitter.definitions.insert(root.clone(), body);

        let mut doc = json!({
            "$schema": DRAFT,
            "$ref": format!("{LOCAL_PREFIX}{root}"),
            "definitions": Json::Object(emitter.definitions.clone().into_iter().collect()),
        });

        emitter.rewrite_refs(&mut doc);

        log::trace!(
            "emitted JSON-Schema for `{}` with definitions {:?}",
            root,
            emitter.definitions.keys().collect::<Vec<_>>()
        );

        Ok(doc)
    }
}

impl Emitter<'_> {
    fn definition(&mut self, schema: &ModelSchema, view: &View) -> Result<Json> {
        let mut properties = Map::new();
        let mut required = vec![];

        for (name, field) in &schema.fields {
            if !view.includes(name) {
                continue;
            }

            let property = match field.as_nested() {
                Some(nested) => self.relationship(name, field, nested, view)?,
                None => self.property(name, field),
            };

            if field.options.required && !field.options.dump_only {
                required.push(Json::String(name.clone()));
            }

            properties.insert(name.clone(), property);
        }

        let mut body = Map::new();
        body.insert("type".into(), "object".into());
        body.insert("title".into(), schema.key().into());
        body.insert("properties".into(), Json::Object(properties));
        if !required.is_empty() {
            body.insert("required".into(), Json::Array(required));
        }

        Ok(Json::Object(body))
    }

    fn relationship(
        &mut self,
        name: &str,
        field: &Field,
        nested: &Nested,
        view: &View,
    ) -> Result<Json> {
        let target = Name::new(&nested.target).upper_camel_case();

        if view.follows(name) && target != self.root && !self.definitions.contains_key(&target) {
            let schema = self.registry.schema(&target)?;

            // Reserve the slot first so a relationship leading back here
            // becomes a reference.
            self.definitions.insert(target.clone(), Json::Null);
            let body = self.definition(&schema, &restrict(&view.nested(name), nested))?;
            self.definitions.insert(target.clone(), body);
        }

        // Bare model name; turned into a local or external pointer once the
        // whole document is known.
        let reference = json!({ "$ref": target });

        if !nested.many {
            return Ok(reference);
        }

        let mut property = Map::new();
        property.insert("title".into(), title(name, field).into());
        property.insert("type".into(), nullable("array", field.options.allow_none));
        property.insert("items".into(), reference);
        Ok(Json::Object(property))
    }

    fn property(&self, name: &str, field: &Field) -> Json {
        let options = &field.options;
        let mut property = Map::new();

        property.insert("title".into(), title(name, field).into());

        let (ty, format) = match &field.kind {
            FieldKind::Boolean => (Some("boolean"), None),
            FieldKind::Date => (Some("string"), Some("date")),
            FieldKind::DateTime => (Some("string"), Some("date-time")),
            FieldKind::Decimal => (Some("number"), Some("decimal")),
            FieldKind::Dict => (Some("object"), None),
            FieldKind::Float => (Some("number"), None),
            FieldKind::Integer => (Some("integer"), None),
            FieldKind::List => (Some("array"), None),
            FieldKind::String => (Some("string"), None),
            FieldKind::Raw | FieldKind::Nested(_) => (None, None),
        };

        if let Some(ty) = ty {
            property.insert("type".into(), nullable(ty, options.allow_none));
        }

        if let Some(format) = options.format.as_deref().or(format) {
            property.insert("format".into(), format.into());
        }

        if let Some(default) = options.missing.as_ref().and_then(|d| d.as_value()) {
            property.insert("default".into(), default.to_json());
        }

        if options.dump_only {
            property.insert("readOnly".into(), true.into());
        }

        if options.load_only {
            property.insert("writeOnly".into(), true.into());
        }

        for validator in &options.validate {
            describe_validator(&field.kind, validator, &mut property);
        }

        if let Some(fk) = &field.foreign_key {
            match self.registry.model_for_table(&fk.table) {
                Some(target) => {
                    property.insert("foreignModel".into(), target.key().into());
                }
                None => log::warn!(
                    "field `{}` references table `{}`, which no registered model maps to",
                    name,
                    fk.table
                ),
            }
        }

        for (key, value) in &options.metadata {
            property.insert(key.clone(), value.clone());
        }

        Json::Object(property)
    }

    /// Points every `$ref` at a local definition when the document defines
    /// the model, and at the model's own document otherwise.
    fn rewrite_refs(&self, json: &mut Json) {
        match json {
            Json::Object(map) => {
                for (key, value) in map.iter_mut() {
                    if key == "$ref" {
                        if let Json::String(reference) = value {
                            *reference = self.pointer(reference);
                        }
                    } else {
                        self.rewrite_refs(value);
                    }
                }
            }
            Json::Array(items) => {
                for item in items {
                    self.rewrite_refs(item);
                }
            }
            _ => {}
        }
    }

    fn pointer(&self, reference: &str) -> String {
        let name = match reference.strip_prefix(LOCAL_PREFIX) {
            Some(name) => name,
            None if reference.contains('#') => return reference.to_string(),
            None => reference,
        };

        if name == self.root || self.definitions.contains_key(name) {
            format!("{LOCAL_PREFIX}{name}")
        } else {
            format!("{}{name}{LOCAL_PREFIX}{name}", self.registry.ref_prefix)
        }
    }
}

fn title(name: &str, field: &Field) -> String {
    field
        .options
        .label
        .clone()
        .unwrap_or_else(|| name.to_string())
}

fn nullable(ty: &str, allow_none: bool) -> Json {
    if allow_none {
        json!([ty, "null"])
    } else {
        json!(ty)
    }
}

fn describe_validator(kind: &FieldKind, validator: &Validator, property: &mut Map<String, Json>) {
    match validator {
        Validator::Length { min, max } => {
            let (min_key, max_key) = match kind {
                FieldKind::List => ("minItems", "maxItems"),
                FieldKind::Dict => ("minProperties", "maxProperties"),
                _ => ("minLength", "maxLength"),
            };

            if let Some(min) = min {
                property.insert(min_key.into(), (*min).into());
            }
            if let Some(max) = max {
                property.insert(max_key.into(), (*max).into());
            }
        }
        Validator::Range { min, max } => {
            if let Some(min) = min {
                property.insert("minimum".into(), (*min).into());
            }
            if let Some(max) = max {
                property.insert("maximum".into(), (*max).into());
            }
        }
        Validator::OneOf(choices) => {
            property.insert(
                "enum".into(),
                Json::Array(choices.iter().map(|choice| choice.to_json()).collect()),
            );
        }
        Validator::Predicate { .. } => {}
    }
}
