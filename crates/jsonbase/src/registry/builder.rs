use super::{Registry, DEFAULT_QUERY_LIMIT};
use crate::schema::{self, FieldMap};
use jsonbase_core::schema::app::Model;
use jsonbase_core::Result;

/// Configures a [`Registry`] and, optionally, the models it starts with.
#[derive(Debug)]
pub struct Builder {
    /// Models registered by `build`, in order
    models: Vec<Model>,

    /// Schema builder
    core: schema::Builder,

    query_limit: usize,

    ref_prefix: String,
}

impl Builder {
    /// Queues a model for registration. Models are registered in the order
    /// they are queued, so bases must come before the models extending them.
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Maximum number of items drawn from a lazily materialized to-many
    /// relationship when dumping.
    pub fn query_limit(&mut self, limit: usize) -> &mut Self {
        self.query_limit = limit;
        self
    }

    /// Prefix of `$ref`s pointing at another model's own JSON-Schema document.
    pub fn ref_prefix(&mut self, prefix: &str) -> &mut Self {
        self.ref_prefix = prefix.to_string();
        self
    }

    /// Column type to field kind table used when synthesizing fields.
    pub fn field_map(&mut self, field_map: FieldMap) -> &mut Self {
        self.core.field_map(field_map);
        self
    }

    /// Creates the registry and registers every queued model.
    pub fn build(&self) -> Result<Registry> {
        let registry = self.build_empty();

        for model in &self.models {
            registry.register(model.clone())?;
        }

        Ok(registry)
    }

    pub(super) fn build_empty(&self) -> Registry {
        Registry::from_parts(
            self.core.clone(),
            self.query_limit,
            self.ref_prefix.clone(),
        )
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            models: vec![],
            core: schema::Builder::default(),
            query_limit: DEFAULT_QUERY_LIMIT,
            ref_prefix: String::new(),
        }
    }
}
