mod builder;
pub use builder::Builder;

use crate::schema::{self, ModelSchema};
use jsonbase_core::schema::app::Model;
use jsonbase_core::schema::Name;
use jsonbase_core::{Error, Result};

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Cap applied to lazily materialized to-many relationships.
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Holds the schema of every registered model, keyed by model name.
///
/// A model's schema is built when the model is registered. Relationship and
/// foreign key targets are looked up by name only when a document is dumped,
/// loaded or described, so related models may be registered in any order.
/// A model extending another must be registered after its base.
///
/// Registration takes a write lock; every other operation only reads, so a
/// registry may be shared across threads once models are registered.
#[derive(Debug)]
pub struct Registry {
    /// Synthesizes schemas from declarations
    builder: schema::Builder,

    /// Cap for lazily materialized to-many relationships
    pub(crate) query_limit: usize,

    /// Prefix of `$ref`s pointing at another model's own document
    pub(crate) ref_prefix: String,

    models: RwLock<IndexMap<String, Arc<ModelSchema>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::builder().build_empty()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn from_parts(
        builder: schema::Builder,
        query_limit: usize,
        ref_prefix: String,
    ) -> Self {
        Self {
            builder,
            query_limit,
            ref_prefix,
            models: RwLock::new(IndexMap::new()),
        }
    }

    /// Builds the model's schema and makes it available by name.
    ///
    /// Fails if the model's name is already taken, if its base model is not
    /// registered, or if the declaration is invalid.
    pub fn register(&self, model: Model) -> Result<Arc<ModelSchema>> {
        let key = model.name.upper_camel_case();

        let base = match &model.base {
            Some(base) => Some(self.schema_for(base).map_err(|_| {
                Error::invalid_schema(format!(
                    "model `{key}` extends `{base}`, which is not registered"
                ))
            })?),
            None => None,
        };

        let schema = Arc::new(
            self.builder
                .build(&model, base.as_deref())
                .map_err(|err| err.context(jsonbase_core::err!("building schema for `{key}`")))?,
        );

        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);

        if models.contains_key(&key) {
            return Err(Error::invalid_schema(format!(
                "model `{key}` is already registered"
            )));
        }

        log::debug!(
            "registered model `{}` ({} fields{})",
            key,
            schema.fields.len(),
            base.map(|base| format!(", extends `{}`", base.key()))
                .unwrap_or_default()
        );

        models.insert(key, schema.clone());
        Ok(schema)
    }

    /// The schema registered under `name`. Any spelling of the name works:
    /// `BlogPost`, `blog_post`.
    pub fn schema(&self, name: &str) -> Result<Arc<ModelSchema>> {
        self.schema_for(&Name::new(name))
    }

    pub(crate) fn schema_for(&self, name: &Name) -> Result<Arc<ModelSchema>> {
        let key = name.upper_camel_case();
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::unknown_model(key))
    }

    /// The model mapped to `table`, if one is registered.
    pub fn model_for_table(&self, table: &str) -> Option<Arc<ModelSchema>> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|schema| schema.table_name.as_deref() == Some(table))
            .cloned()
    }

    /// Every registered schema, in registration order.
    pub fn models(&self) -> Vec<Arc<ModelSchema>> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schema(name).is_ok()
    }

    pub fn query_limit(&self) -> usize {
        self.query_limit
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
