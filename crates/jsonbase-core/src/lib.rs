mod error;
pub use error::{Error, IntoError};

pub mod field;
pub use field::Field;

pub mod schema;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

pub mod view;
pub use view::View;

/// A Result type alias that uses jsonbase's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
