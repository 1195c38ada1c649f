//! Entity identity

use crate::core::error::InvalidIdError;
use crate::core::field::{FieldFormat, FieldValue, Instance, Record, ToFieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Validated UUID string identifying an entity
///
/// An absent or empty value generates a fresh v4 identifier. A given value
/// is kept exactly as passed in once it is a valid hyphenated UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueEntityId(String);

impl UniqueEntityId {
    pub const KIND: &'static str = "UniqueEntityId";

    pub fn new(id: Option<&str>) -> Result<Self, InvalidIdError> {
        match id {
            None | Some("") => Ok(Self::generate()),
            Some(value) => Self::parse(value),
        }
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate a non-generated identifier
    pub fn parse(value: &str) -> Result<Self, InvalidIdError> {
        if FieldFormat::Uuid.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidIdError {
                value: value.to_string(),
            })
        }
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UniqueEntityId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(Some(s))
    }
}

impl TryFrom<String> for UniqueEntityId {
    type Error = InvalidIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(Some(&value))
    }
}

impl From<UniqueEntityId> for String {
    fn from(id: UniqueEntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for UniqueEntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToFieldValue for UniqueEntityId {
    fn to_field_value(&self) -> FieldValue {
        let mut fields = Record::new();
        fields.insert("value".to_string(), self.0.to_field_value());
        FieldValue::Instance(Instance::new(Self::KIND, fields))
    }
}
