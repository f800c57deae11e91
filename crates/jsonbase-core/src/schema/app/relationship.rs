use crate::field::FieldArgs;
use crate::schema::Name;

/// A link to another model.
///
/// The target is referenced by name only; it may be declared after this
/// relationship.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub target: Name,

    /// True for to-many relationships
    pub many: bool,

    /// Annotation bag
    pub info: FieldArgs,
}

impl Relationship {
    pub fn to_one(target: &str) -> Self {
        Self {
            target: Name::new(target),
            many: false,
            info: FieldArgs::default(),
        }
    }

    pub fn to_many(target: &str) -> Self {
        Self {
            target: Name::new(target),
            many: true,
            info: FieldArgs::default(),
        }
    }

    pub fn info(mut self, info: FieldArgs) -> Self {
        self.info = info;
        self
    }
}
