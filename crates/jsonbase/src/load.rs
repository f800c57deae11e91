use crate::dump::restrict;
use crate::schema::ModelSchema;
use crate::{Instance, Registry};
use jsonbase_core::field::{Field, Nested};
use jsonbase_core::{Error, Result, Value, View};

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

/// The outcome of loading a document against a model schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    /// Validated values, keyed by field name, ready to be applied
    pub values: IndexMap<String, Value>,

    /// Input keys that do not name a loadable field, untouched
    pub unrecognized: Map<String, Json>,
}

type FieldResult = core::result::Result<Value, Vec<String>>;

impl Registry {
    /// Parses and validates a document for the named model.
    ///
    /// Every key that does not name a loadable field is returned in
    /// [`Loaded::unrecognized`]. Failures of all fields are collected into a
    /// single validation error. With `partial`, absent required fields are not
    /// an error and load defaults are not filled in.
    pub fn load(&self, model: &str, data: &Map<String, Json>, partial: bool) -> Result<Loaded> {
        let schema = self.schema(model)?;
        let (loaded, errors) = self.load_schema(&schema, data, partial)?;

        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        Ok(loaded)
    }

    /// Validates a document without producing values. Returns the per-field
    /// messages; an empty map means the document is valid.
    pub fn validate(
        &self,
        model: &str,
        data: &Map<String, Json>,
        partial: bool,
    ) -> Result<IndexMap<String, Vec<String>>> {
        let schema = self.schema(model)?;
        let (_, errors) = self.load_schema(&schema, data, partial)?;
        Ok(errors)
    }

    /// Writes loaded values onto an instance, one assignment per field.
    ///
    /// Every value is attempted; the failed assignments are reported together
    /// as one validation error.
    pub fn apply(
        &self,
        instance: &mut dyn Instance,
        values: IndexMap<String, Value>,
    ) -> Result<()> {
        let mut errors = IndexMap::new();

        for (name, value) in values {
            if let Err(err) = instance.set(&name, value) {
                errors.insert(name, vec![err.to_string()]);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }

    /// Loads a partial document for the instance's model and applies it.
    /// Returns the unrecognized keys.
    pub fn update(
        &self,
        instance: &mut dyn Instance,
        data: &Map<String, Json>,
    ) -> Result<Map<String, Json>> {
        let loaded = self.load(instance.model(), data, true)?;
        self.apply(instance, loaded.values)?;
        Ok(loaded.unrecognized)
    }

    fn load_schema(
        &self,
        schema: &ModelSchema,
        data: &Map<String, Json>,
        partial: bool,
    ) -> Result<(Loaded, IndexMap<String, Vec<String>>)> {
        let mut loaded = Loaded::default();
        let mut errors = IndexMap::new();

        for (key, json) in data {
            let field = match schema.field(key) {
                Some(field) if field.is_loadable() => field,
                _ => {
                    loaded.unrecognized.insert(key.clone(), json.clone());
                    continue;
                }
            };

            let result = match field.as_nested() {
                Some(nested) => self.load_related(field, nested, json, partial)?,
                None => field.deserialize(json),
            };

            match result {
                Ok(value) => {
                    loaded.values.insert(key.clone(), value);
                }
                Err(messages) => {
                    errors.insert(key.clone(), messages);
                }
            }
        }

        if !partial {
            for (name, field) in &schema.fields {
                if !field.is_loadable() || data.contains_key(name) {
                    continue;
                }

                if let Some(missing) = &field.options.missing {
                    loaded.values.insert(name.clone(), missing.get());
                } else if field.options.required {
                    errors.insert(
                        name.clone(),
                        vec!["Missing data for required field.".to_string()],
                    );
                }
            }
        }

        if !loaded.unrecognized.is_empty() {
            log::trace!(
                "`{}`: unrecognized keys {:?}",
                schema.key(),
                loaded.unrecognized.keys().collect::<Vec<_>>()
            );
        }

        Ok((loaded, errors))
    }

    /// Loads the nested document(s) of a relationship field against the
    /// target schema. Failures inside a nested document are reported under
    /// the relationship's name, prefixed with their path.
    fn load_related(
        &self,
        field: &Field,
        nested: &Nested,
        json: &Json,
        partial: bool,
    ) -> Result<FieldResult> {
        if json.is_null() {
            return Ok(field.deserialize(json));
        }

        let target = self.schema(&nested.target)?;
        let view = restrict(&View::default(), nested);

        let value = if nested.many {
            let Json::Array(items) = json else {
                return Ok(Err(vec!["Not a valid list.".to_string()]));
            };

            let mut values = vec![];
            let mut messages = vec![];

            for (index, item) in items.iter().enumerate() {
                match self.load_object(&target, &view, item, partial)? {
                    Ok(value) => values.push(value),
                    Err(errors) => messages.extend(prefixed(index.to_string(), errors)),
                }
            }

            if !messages.is_empty() {
                return Ok(Err(messages));
            }

            Value::List(values)
        } else {
            match self.load_object(&target, &view, json, partial)? {
                Ok(value) => value,
                Err(messages) => return Ok(Err(messages)),
            }
        };

        let messages: Vec<_> = field
            .options
            .validate
            .iter()
            .filter_map(|validator| validator.check(&value).err())
            .collect();

        Ok(if messages.is_empty() {
            Ok(value)
        } else {
            Err(messages)
        })
    }

    fn load_object(
        &self,
        target: &ModelSchema,
        view: &View,
        json: &Json,
        partial: bool,
    ) -> Result<FieldResult> {
        let Json::Object(data) = json else {
            return Ok(Err(vec!["Invalid input type.".to_string()]));
        };

        let data: Map<String, Json> = data
            .iter()
            .filter(|(key, _)| view.includes(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let (loaded, errors) = self.load_schema(target, &data, partial)?;

        if errors.is_empty() {
            Ok(Ok(Value::Map(loaded.values)))
        } else {
            Ok(Err(errors
                .into_iter()
                .flat_map(|(name, messages)| prefixed(name, messages))
                .collect()))
        }
    }
}

fn prefixed(path: String, messages: Vec<String>) -> impl Iterator<Item = String> {
    messages
        .into_iter()
        .map(move |message| format!("{path}: {message}"))
}
