mod args;
pub use args::{FieldArgs, FieldOverride};

mod kind;
pub use kind::{FieldKind, Nested};

mod options;
pub use options::{DefaultValue, FieldOptions};

mod validator;
pub use validator::Validator;

use crate::schema::app::ForeignKey;
use crate::{Error, Result, Value};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::str::FromStr;

/// Describes how one model attribute is dumped to and loaded from JSON.
#[derive(Debug, Clone)]
pub struct Field {
    /// Primitive, raw or nested
    pub kind: FieldKind,

    /// Requiredness, nullability, direction, defaults, validators and
    /// pass-through metadata.
    pub options: FieldOptions,

    /// Set when the field was synthesized from a column carrying a foreign
    /// key. The target model is resolved from the key's table name when it
    /// is needed, not when the field is built.
    pub foreign_key: Option<ForeignKey>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self::with_options(kind, FieldOptions::default())
    }

    pub fn with_options(kind: FieldKind, options: FieldOptions) -> Self {
        Self {
            kind,
            options,
            foreign_key: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.options.required = required;
        self
    }

    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.options.allow_none = allow_none;
        self
    }

    pub fn dump_only(mut self, dump_only: bool) -> Self {
        self.options.dump_only = dump_only;
        self
    }

    pub fn load_only(mut self, load_only: bool) -> Self {
        self.options.load_only = load_only;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.options.label = Some(label.into());
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.options.validate.push(validator);
        self
    }

    pub fn is_nested(&self) -> bool {
        self.kind.is_nested()
    }

    pub fn as_nested(&self) -> Option<&Nested> {
        self.kind.as_nested()
    }

    /// True if incoming documents may set this field.
    pub fn is_loadable(&self) -> bool {
        !self.options.dump_only
    }

    /// True if this field appears in dumped documents.
    pub fn is_dumpable(&self) -> bool {
        !self.options.load_only
    }

    /// Serializes a value of this field into its JSON-compatible form.
    ///
    /// Nested fields are shaped by the dump engine, which knows how to reach
    /// the target schema; asking a nested field to serialize a value directly
    /// is a type error.
    pub fn serialize(&self, value: &Value) -> Result<Json> {
        if value.is_null() {
            return Ok(Json::Null);
        }

        let mismatch = || Error::type_conversion(value.kind_name(), self.kind.type_name());

        Ok(match &self.kind {
            FieldKind::String => match value {
                Value::String(v) => Json::String(v.clone()),
                Value::Map(_) | Value::List(_) => return Err(mismatch()),
                other => match other.to_json() {
                    Json::String(v) => Json::String(v),
                    json => Json::String(json.to_string()),
                },
            },
            FieldKind::Integer => match value {
                Value::I64(v) => Json::from(*v),
                Value::F64(v) => Json::from(v.trunc().to_i64().ok_or_else(mismatch)?),
                Value::Decimal(v) => Json::from(v.trunc().to_i64().ok_or_else(mismatch)?),
                Value::String(v) => Json::from(v.trim().parse::<i64>().map_err(|_| mismatch())?),
                _ => return Err(mismatch()),
            },
            FieldKind::Float => {
                let v = match value {
                    Value::I64(v) => *v as f64,
                    Value::F64(v) => *v,
                    Value::Decimal(v) => v.to_f64().ok_or_else(mismatch)?,
                    Value::String(v) => v.trim().parse::<f64>().map_err(|_| mismatch())?,
                    _ => return Err(mismatch()),
                };
                Value::F64(v).to_json()
            }
            FieldKind::Decimal => {
                let v = match value {
                    Value::Decimal(v) => *v,
                    Value::I64(v) => Decimal::from(*v),
                    Value::F64(v) => Decimal::from_f64(*v).ok_or_else(mismatch)?,
                    Value::String(v) => Decimal::from_str(v.trim()).map_err(|_| mismatch())?,
                    _ => return Err(mismatch()),
                };
                Json::String(v.to_string())
            }
            FieldKind::Boolean => match value {
                Value::Bool(v) => Json::Bool(*v),
                Value::I64(0) => Json::Bool(false),
                Value::I64(1) => Json::Bool(true),
                Value::String(v) => Json::Bool(parse_bool(v).ok_or_else(mismatch)?),
                _ => return Err(mismatch()),
            },
            FieldKind::Date => match value {
                Value::Date(v) => Value::Date(*v).to_json(),
                Value::DateTime(v) => Value::Date(v.date_naive()).to_json(),
                Value::String(v) => Value::Date(parse_date(v).ok_or_else(mismatch)?).to_json(),
                _ => return Err(mismatch()),
            },
            FieldKind::DateTime => match value {
                Value::DateTime(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
                Value::Date(v) => Value::DateTime(v.and_time(Default::default()).and_utc()).to_json(),
                Value::String(v) => Value::DateTime(parse_datetime(v).ok_or_else(mismatch)?).to_json(),
                _ => return Err(mismatch()),
            },
            FieldKind::Dict => match value {
                Value::Map(_) => value.to_json(),
                _ => return Err(mismatch()),
            },
            FieldKind::List => match value {
                Value::List(_) => value.to_json(),
                _ => return Err(mismatch()),
            },
            FieldKind::Raw => value.to_json(),
            FieldKind::Nested(_) => return Err(mismatch()),
        })
    }

    /// Parses and validates one incoming JSON value.
    ///
    /// On failure, returns every message produced for this field: the type
    /// coercion failure, or each violated validator.
    pub fn deserialize(&self, json: &Json) -> core::result::Result<Value, Vec<String>> {
        if json.is_null() {
            return if self.options.allow_none {
                Ok(Value::Null)
            } else {
                Err(vec!["Field may not be null.".to_string()])
            };
        }

        let value = self.coerce(json).ok_or_else(|| vec![self.kind.invalid_message()])?;

        let errors: Vec<_> = self
            .options
            .validate
            .iter()
            .filter_map(|validator| validator.check(&value).err())
            .collect();

        if errors.is_empty() {
            Ok(value)
        } else {
            Err(errors)
        }
    }

    fn coerce(&self, json: &Json) -> Option<Value> {
        Some(match &self.kind {
            FieldKind::String => Value::String(json.as_str()?.to_string()),
            FieldKind::Integer => match json {
                Json::Number(n) => match n.as_i64() {
                    Some(v) => Value::I64(v),
                    None => {
                        // Whole floats only, and only within the i64 range
                        let v = n.as_f64().filter(|v| v.fract() == 0.0)?;
                        Value::I64(v.to_i64()?)
                    }
                },
                Json::String(v) => Value::I64(v.trim().parse().ok()?),
                _ => return None,
            },
            FieldKind::Float => match json {
                Json::Number(n) => Value::F64(n.as_f64()?),
                Json::String(v) => Value::F64(v.trim().parse().ok()?),
                _ => return None,
            },
            FieldKind::Decimal => match json {
                Json::Number(n) => Value::Decimal(Decimal::from_str(&n.to_string()).ok()?),
                Json::String(v) => Value::Decimal(Decimal::from_str(v.trim()).ok()?),
                _ => return None,
            },
            FieldKind::Boolean => match json {
                Json::Bool(v) => Value::Bool(*v),
                Json::Number(n) => match n.as_i64()? {
                    0 => Value::Bool(false),
                    1 => Value::Bool(true),
                    _ => return None,
                },
                Json::String(v) => Value::Bool(parse_bool(v)?),
                _ => return None,
            },
            FieldKind::Date => Value::Date(parse_date(json.as_str()?)?),
            FieldKind::DateTime => Value::DateTime(parse_datetime(json.as_str()?)?),
            FieldKind::Dict => match json {
                Json::Object(_) => Value::from_json(json),
                _ => return None,
            },
            FieldKind::List => match json {
                Json::Array(_) => Value::from_json(json),
                _ => return None,
            },
            FieldKind::Raw | FieldKind::Nested(_) => Value::from_json(json),
        })
    }
}

fn parse_bool(src: &str) -> Option<bool> {
    match src.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(src: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(src.trim(), "%Y-%m-%d").ok()
}

fn parse_datetime(src: &str) -> Option<DateTime<Utc>> {
    let src = src.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(src) {
        return Some(ts.with_timezone(&Utc));
    }

    // Timestamps without an offset are taken to be UTC.
    NaiveDateTime::parse_from_str(src, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.and_utc())
}
