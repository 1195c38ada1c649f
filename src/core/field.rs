//! Field value types and format checks
//!
//! A [`Record`] is the plain-object view of an entity (or of a stored row)
//! that the validation runner inspects. Typed props convert into records
//! through [`ToFieldValue`]; stored JSON rows convert through
//! `FieldValue::from(&serde_json::Value)`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Ordered field name → value map
pub type Record = IndexMap<String, FieldValue>;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    List(Vec<FieldValue>),
    /// A plain object without a type tag
    Object(Record),
    /// A typed value object or entity
    Instance(Instance),
}

/// A value tagged with the name of the type it is an instance of
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub kind: &'static str,
    pub fields: Record,
}

impl Instance {
    pub fn new(kind: &'static str, fields: Record) -> Self {
        Self { kind, fields }
    }

    /// Whether this instance is of the given kind
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get any numeric value as a float
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            FieldValue::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if the value is an instance of `kind`
    pub fn is_instance_of(&self, kind: &str) -> bool {
        self.as_instance().is_some_and(|i| i.is(kind))
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(items) => FieldValue::List(items.iter().map(FieldValue::from).collect()),
            Value::Object(map) => FieldValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Conversion of typed values into their plain-object form
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for &str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String((*self).to_string())
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

/// Typed accessors over a [`Record`]
///
/// Missing fields read as [`FieldValue::Null`].
pub trait RecordExt {
    fn field(&self, name: &str) -> &FieldValue;

    fn string(&self, name: &str) -> Option<String> {
        self.field(name).as_string().map(str::to_string)
    }

    fn integer(&self, name: &str) -> Option<i64> {
        self.field(name).as_integer()
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.field(name).as_number()
    }

    fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        self.field(name).as_datetime()
    }

    fn list(&self, name: &str) -> Option<&[FieldValue]> {
        self.field(name).as_list()
    }

    fn instance(&self, name: &str, kind: &str) -> Option<&Instance> {
        self.field(name).as_instance().filter(|i| i.is(kind))
    }
}

impl RecordExt for Record {
    fn field(&self, name: &str) -> &FieldValue {
        static NULL: FieldValue = FieldValue::Null;
        self.get(name).unwrap_or(&NULL)
    }
}

/// String format checks
#[derive(Debug, Clone)]
pub enum FieldFormat {
    /// Hyphenated RFC 4122 UUID (versions 1-5) or the nil UUID
    Uuid,
    /// Optionally signed decimal number written as a string
    NumberString,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            FieldFormat::Uuid => Self::uuid_regex().is_match(value),
            FieldFormat::NumberString => Self::number_string_regex().is_match(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    /// Validate a field value; non-strings never match
    pub fn validate(&self, value: &FieldValue) -> bool {
        value.as_string().is_some_and(|s| self.is_match(s))
    }

    fn uuid_regex() -> &'static Regex {
        static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
        UUID_REGEX.get_or_init(|| {
            Regex::new(
                r"(?i)^(?:[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000)$",
            )
            .unwrap()
        })
    }

    fn number_string_regex() -> &'static Regex {
        static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
        NUMBER_REGEX.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap())
    }
}
