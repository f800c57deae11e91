use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A model attribute value, as read from or written to an instance.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Calendar date
    Date(NaiveDate),

    /// UTC timestamp
    DateTime(DateTime<Utc>),

    /// Arbitrary precision decimal
    Decimal(Decimal),

    /// Double precision float
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of values
    List(Vec<Value>),

    /// String-keyed mapping, insertion ordered
    Map(IndexMap<String, Value>),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value's variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Date(_) => "Date",
            Self::DateTime(_) => "DateTime",
            Self::Decimal(_) => "Decimal",
            Self::F64(_) => "F64",
            Self::I64(_) => "I64",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Null => "Null",
            Self::String(_) => "String",
        }
    }

    /// Converts the value to its JSON-compatible form without any field
    /// specific coercion.
    ///
    /// Dates use ISO-8601, timestamps RFC 3339, decimals their string form.
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Bool(v) => Json::Bool(*v),
            Self::Date(v) => Json::String(v.format("%Y-%m-%d").to_string()),
            Self::DateTime(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Decimal(v) => Json::String(v.to_string()),
            Self::F64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::I64(v) => Json::from(*v),
            Self::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Map(map) => Json::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Null => Json::Null,
            Self::String(v) => Json::String(v.clone()),
        }
    }

    /// Converts a JSON value without any field specific coercion.
    ///
    /// Integral numbers that fit in an `i64` become `I64`, every other number
    /// becomes `F64`. Strings stay strings.
    pub fn from_json(json: &serde_json::Value) -> Value {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(v) => Self::Bool(*v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Self::I64(v),
                None => n.as_f64().map(Self::F64).unwrap_or(Self::Null),
            },
            Json::String(v) => Self::String(v.clone()),
            Json::Array(items) => Self::List(items.iter().map(Value::from_json).collect()),
            Json::Object(map) => Self::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from_json(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Decimal> for Value {
    fn from(src: Decimal) -> Self {
        Self::Decimal(src)
    }
}

impl From<NaiveDate> for Value {
    fn from(src: NaiveDate) -> Self {
        Self::Date(src)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::DateTime(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(src: IndexMap<String, Value>) -> Self {
        Self::Map(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
