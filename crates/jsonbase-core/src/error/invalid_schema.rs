use super::{Error, ErrorKind};

/// Error when a model declaration cannot be turned into a schema.
///
/// These errors surface when the model is registered, never later.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    ///
    /// Raised while a model declaration is turned into a schema: multiple
    /// foreign keys on one column, an explicit field instance combined with
    /// other options, an unregistered base model, a duplicate registration.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::InvalidSchema(InvalidSchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::InvalidSchema(_)))
    }
}
