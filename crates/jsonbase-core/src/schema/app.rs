//! Declared model metadata, as supplied by the persistence layer.

mod attribute;
pub use attribute::{Attribute, AttributeKind};

mod column;
pub use column::Column;

mod computed;
pub use computed::Computed;

mod fk;
pub use fk::ForeignKey;

mod model;
pub use model::{Model, ModelBuilder};

mod relationship;
pub use relationship::Relationship;
