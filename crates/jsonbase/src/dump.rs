use crate::schema::ModelSchema;
use crate::{Attr, Instance, Registry};
use jsonbase_core::field::Nested;
use jsonbase_core::{err, Error, Result, Value, View};

use serde_json::{Map, Value as Json};

impl Registry {
    /// Serializes an instance under a view specification.
    ///
    /// Relationships are only traversed when the view opts into them; see
    /// [`View::resolve`].
    pub fn dump(&self, instance: &dyn Instance, view: &Json) -> Result<Map<String, Json>> {
        self.dump_with(instance, &View::parse(view))
    }

    /// Serializes an instance under an already parsed view.
    pub fn dump_with(&self, instance: &dyn Instance, view: &View) -> Result<Map<String, Json>> {
        let schema = self.schema(instance.model())?;
        let view = view.resolve(schema.relationships());

        log::trace!(
            "dumping `{}`; only={:?} exclude={:?}",
            schema.key(),
            view.only,
            view.exclude
        );

        self.dump_resolved(instance, &schema, &view)
    }

    fn dump_resolved(
        &self,
        instance: &dyn Instance,
        schema: &ModelSchema,
        view: &View,
    ) -> Result<Map<String, Json>> {
        let mut out = Map::new();

        for (name, field) in &schema.fields {
            if !field.is_dumpable() || !view.includes(name) {
                continue;
            }

            let attr = match instance.get(name) {
                Some(attr) => attr,
                None => match &field.options.default {
                    Some(default) => Attr::Value(default.get()),
                    None if field.is_nested() => Attr::Value(Value::Null),
                    None => continue,
                },
            };

            let json = match field.as_nested() {
                Some(nested) => self.dump_related(attr, nested, &view.nested(name)),
                None => match attr {
                    Attr::Value(value) => field.serialize(&value),
                    other => Err(Error::type_conversion(other.kind_name(), "plain value")),
                },
            }
            .map_err(|e| e.context(err!("dumping field `{}.{}`", schema.key(), name)))?;

            out.insert(name.clone(), json);
        }

        Ok(out)
    }

    fn dump_related(&self, attr: Attr<'_>, nested: &Nested, view: &View) -> Result<Json> {
        match attr {
            Attr::Value(Value::Null) => Ok(Json::Null),
            Attr::One(instance) => Ok(Json::Object(self.dump_nested(instance, nested, view)?)),
            Attr::Many(instances) => instances
                .into_iter()
                .map(|instance| self.dump_nested(instance, nested, view).map(Json::Object))
                .collect::<Result<Vec<_>>>()
                .map(Json::Array),
            Attr::Query(query) => query
                .fetch(self.query_limit)?
                .iter()
                .take(self.query_limit)
                .map(|instance| {
                    self.dump_nested(instance.as_ref(), nested, view)
                        .map(Json::Object)
                })
                .collect::<Result<Vec<_>>>()
                .map(Json::Array),
            Attr::Value(other) => Err(Error::type_conversion(
                other.kind_name(),
                "related instance, list or query",
            )),
        }
    }

    /// Dumps one related instance with its own model's schema, under the
    /// relationship's nested view.
    fn dump_nested(
        &self,
        instance: &dyn Instance,
        nested: &Nested,
        view: &View,
    ) -> Result<Map<String, Json>> {
        let schema = self.schema(instance.model())?;
        let view = restrict(view, nested).resolve(schema.relationships());
        self.dump_resolved(instance, &schema, &view)
    }
}

/// Applies a nested field's fixed `only` / `exclude` on top of a view.
pub(crate) fn restrict(view: &View, nested: &Nested) -> View {
    let mut view = view.clone();

    if let Some(fixed) = &nested.only {
        view.only = Some(match view.only.take() {
            Some(only) => only.intersection(fixed).cloned().collect(),
            None => fixed.clone(),
        });
    }

    view.exclude.extend(nested.exclude.iter().cloned());
    view
}
