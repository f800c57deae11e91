use super::{Error, ErrorKind};
use indexmap::IndexMap;

/// Error when one or more fields fail validation.
///
/// Every failing field is listed, in input order, with all of its messages.
#[derive(Debug)]
pub(super) struct ValidationError {
    errors: IndexMap<String, Vec<String>>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed")?;

        for (i, (field, messages)) in self.errors.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates a validation error from the per-field failure messages.
    pub fn validation(errors: IndexMap<String, Vec<String>>) -> Error {
        Error::from(ErrorKind::Validation(ValidationError { errors }))
    }

    /// Returns `true` if this error (or any cause) is a validation error.
    pub fn is_validation(&self) -> bool {
        self.validation_errors().is_some()
    }

    /// The per-field messages of a validation error.
    pub fn validation_errors(&self) -> Option<&IndexMap<String, Vec<String>>> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::Validation(validation) => Some(&validation.errors),
            _ => None,
        })
    }
}
