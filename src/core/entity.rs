//! Entity abstraction shared by every domain type
//!
//! An [`Entity`] composes three parts:
//! - identity: a [`UniqueEntityId`]
//! - audit: an [`AuditFields`] value replaced on every mutation
//! - props: the domain-specific payload, validated by its [`EntityProps`] rules
//!
//! Concrete entities are aliases such as `type Budget = Entity<BudgetProps>`
//! with their mutations implemented on that parameterization.

use crate::core::audit::{AuditFields, AuditFieldsProps};
use crate::core::error::{DomainError, DomainResult, EntityValidationError};
use crate::core::field::{FieldValue, Instance, Record, ToFieldValue};
use crate::core::id::UniqueEntityId;
use crate::core::validation::{RuleSet, ValidatorFields};
use serde::{Serialize, Serializer};

/// Domain payload of an entity
///
/// `to_record` must produce every field named by `rules`, and `from_record`
/// must decode any record those rules accept.
pub trait EntityProps: Clone + Send + Sync + 'static {
    /// Type name used by instance checks ("Budget", "TeamRole", ...)
    const KIND: &'static str;

    fn rules() -> RuleSet;

    fn validator() -> ValidatorFields {
        ValidatorFields::new(Self::rules())
    }

    /// Plain-object view checked by the rules
    fn to_record(&self) -> Record;

    /// Decode a record that already passed `rules`
    fn from_record(record: &Record) -> Option<Self>;

    /// Run the rules against these props
    fn validate(&self) -> Result<(), EntityValidationError> {
        validate_record::<Self>(&self.to_record())
    }
}

fn validate_record<P: EntityProps>(record: &Record) -> Result<(), EntityValidationError> {
    let mut validator = P::validator();
    if validator.validate(record) {
        Ok(())
    } else {
        Err(EntityValidationError {
            error: validator.errors.unwrap_or_default(),
        })
    }
}

/// Read access to audit information
pub trait Auditable {
    fn audit_fields(&self) -> &AuditFields;

    fn created_by(&self) -> &str {
        self.audit_fields().created_by()
    }

    fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.audit_fields().created_at()
    }

    fn updated_by(&self) -> &str {
        self.audit_fields().updated_by()
    }

    fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.audit_fields().updated_at()
    }
}

/// Identity + audit fields + validated props
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<P> {
    unique_entity_id: UniqueEntityId,
    audit_fields: AuditFields,
    props: P,
}

impl<P: EntityProps> Entity<P> {
    /// Validate `props`, then build identity and audit fields
    ///
    /// Nothing is constructed when the props fail their rules.
    pub fn create(
        props: P,
        audit: AuditFieldsProps,
        id: Option<UniqueEntityId>,
    ) -> DomainResult<Self> {
        props.validate()?;

        Ok(Self {
            unique_entity_id: id.unwrap_or_else(UniqueEntityId::generate),
            audit_fields: AuditFields::new(audit)?,
            props,
        })
    }

    /// Load path: build an entity from its flattened record
    ///
    /// Props are checked first, then audit fields, then the id.
    pub fn from_record(record: &Record) -> DomainResult<Self> {
        validate_record::<P>(record)?;
        let audit_fields = AuditFields::from_record(record)?;
        let unique_entity_id = UniqueEntityId::new(record_id(record))?;

        let props = P::from_record(record).ok_or_else(|| {
            DomainError::Storage(format!("{} record could not be decoded", P::KIND))
        })?;

        Ok(Self {
            unique_entity_id,
            audit_fields,
            props,
        })
    }

    pub fn id(&self) -> &str {
        self.unique_entity_id.value()
    }

    pub fn unique_entity_id(&self) -> &UniqueEntityId {
        &self.unique_entity_id
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    /// Stamp the audit fields with `updated_by` and the current time
    pub fn update_audit_fields(&mut self, updated_by: &str) -> DomainResult<()> {
        self.audit_fields = self.audit_fields.touched(updated_by)?;
        Ok(())
    }

    /// Single mutation gate: validate the candidate, stamp, then commit both
    pub(crate) fn apply(&mut self, candidate: P, updated_by: &str) -> DomainResult<()> {
        candidate.validate()?;
        let audit_fields = self.audit_fields.touched(updated_by)?;

        self.props = candidate;
        self.audit_fields = audit_fields;
        Ok(())
    }

    /// Flattened `{id, audit fields..., props...}` record
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), self.id().to_field_value());
        record.extend(self.audit_fields.to_record());
        record.extend(self.props.to_record());
        record
    }
}

impl<P: EntityProps + Serialize> Entity<P> {
    /// Flattened JSON shape used for persistence
    pub fn to_json(&self) -> DomainResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn record_id(record: &Record) -> Option<&str> {
    match record.get("id") {
        Some(FieldValue::String(id)) => Some(id),
        Some(FieldValue::Instance(instance)) => instance.fields.get("value")?.as_string(),
        _ => None,
    }
}

impl<P> Auditable for Entity<P> {
    fn audit_fields(&self) -> &AuditFields {
        &self.audit_fields
    }
}

impl<P: EntityProps> ToFieldValue for Entity<P> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Instance(Instance::new(P::KIND, self.to_record()))
    }
}

#[derive(Serialize)]
struct FlatEntity<'a, P> {
    id: &'a str,
    #[serde(flatten)]
    audit_fields: &'a AuditFields,
    #[serde(flatten)]
    props: &'a P,
}

impl<P: Serialize> Serialize for Entity<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatEntity {
            id: self.unique_entity_id.value(),
            audit_fields: &self.audit_fields,
            props: &self.props,
        }
        .serialize(serializer)
    }
}
