//! Bidirectional JSON conversion for declared data models.
//!
//! Models are declared with [`jsonbase_core::schema::app::Model`] and
//! registered with a [`Registry`], which synthesizes one [`ModelSchema`] per
//! model. The registry then dumps instances under a view specification,
//! loads documents back into validated values, and describes each schema as
//! a JSON-Schema document.

mod dump;

mod instance;
pub use instance::{Attr, Instance, Query};

pub mod json_schema;

mod load;
pub use load::Loaded;

pub mod registry;
pub use registry::Registry;

pub mod schema;
pub use schema::{FieldMap, ModelSchema};

pub use jsonbase_core::field::{
    DefaultValue, Field, FieldArgs, FieldKind, FieldOptions, FieldOverride, Nested, Validator,
};
pub use jsonbase_core::schema::app::{Column, Computed, ForeignKey, Model, Relationship};
pub use jsonbase_core::schema::Name;
pub use jsonbase_core::{bail, err, Error, Result, Type, Value, View};
