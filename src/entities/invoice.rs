//! Invoice entity, owned by an expense

use crate::core::audit::AuditFieldsProps;
use crate::core::entity::{Entity, EntityProps};
use crate::core::error::{DomainResult, UnknownVariantError};
use crate::core::field::{Record, RecordExt, ToFieldValue};
use crate::core::id::UniqueEntityId;
use crate::core::validation::validators::{
    is_date, is_in, is_string, max_decimal_places, max_length, min, not_empty,
};
use crate::core::validation::RuleSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Plan,
    Actual,
}

impl InvoiceStatus {
    pub const VALUES: &'static [&'static str] = &["plan", "actual"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Plan => "plan",
            InvoiceStatus::Actual => "actual",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(InvoiceStatus::Plan),
            "actual" => Ok(InvoiceStatus::Actual),
            other => Err(UnknownVariantError::new("invoice status", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceProps {
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub document: Option<String>,
    pub status: InvoiceStatus,
}

impl EntityProps for InvoiceProps {
    const KIND: &'static str = "Invoice";

    fn rules() -> RuleSet {
        RuleSet::new()
            .field("amount")
            .check(not_empty())
            .check(max_decimal_places(2))
            .check(min(0.01))
            .field("date")
            .check(not_empty())
            .check(is_date())
            .field("document")
            .optional()
            .check(is_string())
            .check(max_length(10))
            .field("status")
            .check(not_empty())
            .check(is_in(InvoiceStatus::VALUES))
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("amount".into(), self.amount.to_field_value());
        record.insert("date".into(), self.date.to_field_value());
        record.insert("document".into(), self.document.to_field_value());
        record.insert("status".into(), self.status.as_str().to_field_value());
        record
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            amount: record.number("amount")?,
            date: record.datetime("date")?,
            document: record.string("document"),
            status: record.string("status")?.parse().ok()?,
        })
    }
}

pub type Invoice = Entity<InvoiceProps>;

impl Entity<InvoiceProps> {
    pub fn new(
        props: InvoiceProps,
        audit: AuditFieldsProps,
        id: Option<UniqueEntityId>,
    ) -> DomainResult<Self> {
        Self::create(props, audit, id)
    }

    pub fn amount(&self) -> f64 {
        self.props().amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.props().date
    }

    pub fn document(&self) -> Option<&str> {
        self.props().document.as_deref()
    }

    pub fn status(&self) -> InvoiceStatus {
        self.props().status
    }
}
