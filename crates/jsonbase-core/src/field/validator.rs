use crate::Value;

use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use std::sync::Arc;

/// A validation rule checked after a value has been coerced on load.
#[derive(Clone)]
pub enum Validator {
    /// Length bounds for strings (in characters), lists and mappings.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Inclusive bounds for numbers.
    Range { min: Option<f64>, max: Option<f64> },

    /// The value must equal one of the choices.
    OneOf(Vec<Value>),

    /// Arbitrary check; `description` is reported when it fails.
    Predicate {
        description: String,
        check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    },
}

impl Validator {
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::Length { min, max }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range { min, max }
    }

    pub fn one_of<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(choices.into_iter().map(Into::into).collect())
    }

    pub fn predicate(
        description: impl Into<String>,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Predicate {
            description: description.into(),
            check: Arc::new(check),
        }
    }

    /// Checks the value, returning the failure message if the rule is
    /// violated. Values the rule does not apply to pass.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::Length { min, max } => {
                let len = match value {
                    Value::String(v) => v.chars().count(),
                    Value::List(v) => v.len(),
                    Value::Map(v) => v.len(),
                    _ => return Ok(()),
                };

                if min.is_some() && min == max && Some(len) != *min {
                    return Err(format!(
                        "value length {len} does not match required length {}",
                        min.unwrap_or_default()
                    ));
                }

                if let Some(min) = min.filter(|min| len < *min) {
                    return Err(format!("value length {len} is too short (minimum: {min})"));
                }

                if let Some(max) = max.filter(|max| len > *max) {
                    return Err(format!("value length {len} is too long (maximum: {max})"));
                }

                Ok(())
            }
            Self::Range { min, max } => {
                let n = match value {
                    Value::I64(v) => *v as f64,
                    Value::F64(v) => *v,
                    Value::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
                    _ => return Ok(()),
                };

                if let Some(min) = min.filter(|min| n < *min) {
                    return Err(format!("value {n} is less than minimum {min}"));
                }

                if let Some(max) = max.filter(|max| n > *max) {
                    return Err(format!("value {n} is greater than maximum {max}"));
                }

                Ok(())
            }
            Self::OneOf(choices) => {
                if choices.contains(value) {
                    return Ok(());
                }

                let choices: Vec<_> = choices.iter().map(|c| c.to_json().to_string()).collect();
                Err(format!("value must be one of: {}", choices.join(", ")))
            }
            Self::Predicate { description, check } => {
                if check(value) {
                    Ok(())
                } else {
                    Err(description.clone())
                }
            }
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { min, max } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Range { min, max } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::OneOf(choices) => f.debug_tuple("OneOf").field(choices).finish(),
            Self::Predicate { description, .. } => {
                f.debug_tuple("Predicate").field(description).finish()
            }
        }
    }
}
