//! Audit fields: who created and last updated an entity, and when

use crate::core::error::AuditFieldsValidationError;
use crate::core::field::{FieldValue, Record, RecordExt, ToFieldValue};
use crate::core::validation::validators::{
    is_date, is_string, max_length, not_empty, not_older_than,
};
use crate::core::validation::{FieldsError, RuleSet, ValidatorFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for [`AuditFields::new`]; missing values get defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditFieldsProps {
    pub created_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuditFieldsProps {
    /// Audit input for a new entity created by `created_by`
    pub fn by(created_by: impl Into<String>) -> Self {
        Self {
            created_by: created_by.into(),
            ..Default::default()
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("created_by".into(), self.created_by.to_field_value());
        record.insert("created_at".into(), self.created_at.to_field_value());
        record.insert("updated_by".into(), self.updated_by.to_field_value());
        record.insert("updated_at".into(), self.updated_at.to_field_value());
        record
    }
}

/// Validated, immutable audit value
///
/// `updated_by` defaults to `created_by`, `updated_at` to `created_at`, and
/// `created_at` to the construction time. `updated_at` is never earlier
/// than `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFields {
    created_by: String,
    created_at: DateTime<Utc>,
    updated_by: String,
    updated_at: DateTime<Utc>,
}

impl AuditFields {
    pub fn new(props: AuditFieldsProps) -> Result<Self, AuditFieldsValidationError> {
        Self::from_record(&props.to_record())
    }

    /// Build from the record view of a stored row
    ///
    /// Other fields of the record are ignored.
    pub fn from_record(record: &Record) -> Result<Self, AuditFieldsValidationError> {
        let filled = with_defaults(record);

        let mut validator = ValidatorFields::new(rules());
        if !validator.validate(&filled) {
            return Err(AuditFieldsValidationError {
                error: validator.errors.unwrap_or_default(),
            });
        }

        match (
            filled.string("created_by"),
            filled.datetime("created_at"),
            filled.string("updated_by"),
            filled.datetime("updated_at"),
        ) {
            (Some(created_by), Some(created_at), Some(updated_by), Some(updated_at)) => Ok(Self {
                created_by,
                created_at,
                updated_by,
                updated_at,
            }),
            _ => Err(AuditFieldsValidationError {
                error: FieldsError::new(),
            }),
        }
    }

    /// Copy of these fields stamped by `updated_by` now
    pub fn touched(&self, updated_by: &str) -> Result<Self, AuditFieldsValidationError> {
        Self::new(AuditFieldsProps {
            created_by: self.created_by.clone(),
            created_at: Some(self.created_at),
            updated_by: Some(updated_by.to_string()),
            updated_at: Some(Utc::now()),
        })
    }

    /// The plain values
    pub fn value(&self) -> AuditFieldsProps {
        AuditFieldsProps {
            created_by: self.created_by.clone(),
            created_at: Some(self.created_at),
            updated_by: Some(self.updated_by.clone()),
            updated_at: Some(self.updated_at),
        }
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_by(&self) -> &str {
        &self.updated_by
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_record(&self) -> Record {
        self.value().to_record()
    }
}

fn rules() -> RuleSet {
    RuleSet::new()
        .field("created_by")
        .check(not_empty())
        .check(is_string())
        .check(max_length(255))
        .field("created_at")
        .check(is_date())
        .field("updated_by")
        .check(not_empty())
        .check(is_string())
        .check(max_length(255))
        .field("updated_at")
        .check(not_older_than("created_at"))
        .check(is_date())
}

fn with_defaults(record: &Record) -> Record {
    let created_by = record.field("created_by").clone();
    let created_at = match record.field("created_at") {
        FieldValue::Null => Utc::now().to_field_value(),
        other => other.clone(),
    };
    let updated_by = match record.field("updated_by") {
        FieldValue::Null => created_by.clone(),
        other => other.clone(),
    };
    let updated_at = match record.field("updated_at") {
        FieldValue::Null => created_at.clone(),
        other => other.clone(),
    };

    let mut filled = Record::new();
    filled.insert("created_by".into(), created_by);
    filled.insert("created_at".into(), created_at);
    filled.insert("updated_by".into(), updated_by);
    filled.insert("updated_at".into(), updated_at);
    filled
}
