use super::{Error, ErrorKind};

/// Error when a value does not have the shape a field requires.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    found: Box<str>,
    expected: &'static str,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.found, self.expected)
    }
}

impl Error {
    /// Creates a type conversion error.
    ///
    /// `found` names the shape that was encountered, `expected` the shape
    /// that was required.
    pub fn type_conversion(found: impl Into<String>, expected: &'static str) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            found: found.into().into(),
            expected,
        }))
    }

    /// Returns `true` if this error (or any cause) is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::TypeConversion(_)))
    }
}
