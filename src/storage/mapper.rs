//! Row to entity mapping
//!
//! Rows are the flattened JSON produced by `Entity::to_json` (the in-memory
//! store keeps exactly that; the PostgreSQL queries select `to_jsonb` of a
//! row). Mapping wraps raw ids into reference ids, parses timestamps, maps
//! child rows through their own mapper and then runs the entity load path.
//! Only validation failures are rewrapped as `LoadEntityError`.

use crate::core::entity::{Entity, EntityProps};
use crate::core::error::{DomainError, DomainResult, InvalidIdError};
use crate::core::field::{FieldValue, Record, ToFieldValue};
use crate::entities::{
    Budget, BudgetId, Expense, Invoice, Supplier, SupplierId, Team, TeamId, TeamMember,
    TeamMemberId, TeamRole,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

const AUDIT_DATES: [&str; 2] = ["created_at", "updated_at"];

/// Conversion from a stored row into a validated entity
pub trait ModelMapper: Sized {
    fn to_entity(row: &Value) -> DomainResult<Self>;
}

/// Record view of a row with audit timestamps parsed
fn base_record(row: &Value) -> Record {
    let mut record = match FieldValue::from(row) {
        FieldValue::Object(record) => record,
        _ => Record::new(),
    };

    for field in AUDIT_DATES {
        parse_date(&mut record, field);
    }
    record
}

/// Replace an RFC 3339 string with a timestamp; anything else is left for
/// validation to report
fn parse_date(record: &mut Record, field: &str) {
    let parsed = match record.get(field) {
        Some(FieldValue::String(raw)) => DateTime::parse_from_rfc3339(raw).ok(),
        _ => None,
    };

    if let Some(parsed) = parsed {
        let parsed: DateTime<Utc> = parsed.with_timezone(&Utc);
        record.insert(field.to_string(), parsed.to_field_value());
    }
}

/// Wrap a raw id string with `wrap`; invalid ids fail the whole mapping
fn wrap_id<I, F>(record: &mut Record, field: &str, wrap: F) -> DomainResult<()>
where
    I: ToFieldValue,
    F: Fn(&str) -> Result<I, InvalidIdError>,
{
    let wrapped = match record.get(field) {
        Some(FieldValue::String(raw)) => Some(wrap(raw)?.to_field_value()),
        _ => None,
    };

    if let Some(wrapped) = wrapped {
        record.insert(field.to_string(), wrapped);
    }
    Ok(())
}

/// Map each child row with `M` and store them as instances
fn map_children<M>(record: &mut Record, row: &Value, field: &str) -> DomainResult<()>
where
    M: ModelMapper + ToFieldValue,
{
    if let Some(children) = row.get(field).and_then(Value::as_array) {
        let mapped = children
            .iter()
            .map(|child| M::to_entity(child).map(|entity| entity.to_field_value()))
            .collect::<DomainResult<Vec<_>>>()?;
        record.insert(field.to_string(), FieldValue::List(mapped));
    }
    Ok(())
}

fn load<P: EntityProps>(record: &Record) -> DomainResult<Entity<P>> {
    Entity::<P>::from_record(record).map_err(DomainError::into_load_error)
}

impl ModelMapper for Budget {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        load(&base_record(row))
    }
}

impl ModelMapper for Supplier {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        load(&base_record(row))
    }
}

impl ModelMapper for TeamMember {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        load(&base_record(row))
    }
}

impl ModelMapper for TeamRole {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        let mut record = base_record(row);
        wrap_id(&mut record, "team_member_id", TeamMemberId::new)?;
        load(&record)
    }
}

impl ModelMapper for Team {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        let mut record = base_record(row);
        map_children::<TeamRole>(&mut record, row, "roles")?;
        load(&record)
    }
}

impl ModelMapper for Invoice {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        let mut record = base_record(row);
        parse_date(&mut record, "date");
        load(&record)
    }
}

impl ModelMapper for Expense {
    fn to_entity(row: &Value) -> DomainResult<Self> {
        let mut record = base_record(row);
        wrap_id(&mut record, "team_id", TeamId::new)?;
        wrap_id(&mut record, "budget_id", BudgetId::new)?;
        wrap_id(&mut record, "supplier_id", SupplierId::new)?;
        map_children::<Invoice>(&mut record, row, "invoices")?;
        load(&record)
    }
}
