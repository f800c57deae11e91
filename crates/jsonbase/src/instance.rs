use jsonbase_core::{Result, Value};

/// A model instance, as exposed by the persistence layer.
pub trait Instance {
    /// Name of the instance's model. Selects the schema used to dump it.
    fn model(&self) -> &str;

    /// Reads an attribute. `None` means the instance does not carry it.
    fn get(&self, name: &str) -> Option<Attr<'_>>;

    /// Assigns an attribute.
    ///
    /// Relationship fields receive the loaded nested document(s) as
    /// [`Value::Map`] or a [`Value::List`] of maps; wiring them to related
    /// instances is up to the implementation.
    fn set(&mut self, name: &str, value: Value) -> Result<()>;
}

/// An attribute read from an [`Instance`].
pub enum Attr<'a> {
    /// A plain value. `Null` also stands for an absent related instance.
    Value(Value),

    /// A single related instance
    One(&'a dyn Instance),

    /// A materialized collection of related instances
    Many(Vec<&'a dyn Instance>),

    /// A lazily materialized collection of related instances
    Query(Box<dyn Query + 'a>),
}

/// A lazily materialized to-many relationship.
pub trait Query {
    /// Materializes at most `limit` related instances, in source order.
    fn fetch(&self, limit: usize) -> Result<Vec<Box<dyn Instance>>>;
}

impl Attr<'_> {
    /// Short name of the attribute's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Attr::Value(value) => value.kind_name(),
            Attr::One(_) => "related instance",
            Attr::Many(_) => "list of related instances",
            Attr::Query(_) => "query",
        }
    }
}

impl From<Value> for Attr<'_> {
    fn from(value: Value) -> Self {
        Attr::Value(value)
    }
}
