use super::{Error, ErrorKind};

/// Error when a model name is looked up but no schema is registered for it.
#[derive(Debug)]
pub(super) struct UnknownModelError {
    name: Box<str>,
}

impl std::error::Error for UnknownModelError {}

impl core::fmt::Display for UnknownModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model `{}` is not registered", self.name)
    }
}

impl Error {
    /// Creates an error for a model name that has no registered schema.
    pub fn unknown_model(name: impl Into<String>) -> Error {
        Error::from(ErrorKind::UnknownModel(UnknownModelError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error (or any cause) is an unknown model error.
    pub fn is_unknown_model(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::UnknownModel(_)))
    }
}
