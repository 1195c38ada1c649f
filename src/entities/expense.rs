//! Expense aggregate
//!
//! An expense belongs to a team and a budget (by id), optionally names a
//! supplier, carries its purchase documents and owns its invoices.

use crate::core::audit::AuditFieldsProps;
use crate::core::entity::{Entity, EntityProps};
use crate::core::error::{DomainResult, InvalidExpenseError, UnknownVariantError};
use crate::core::field::{FieldValue, Record, RecordExt, ToFieldValue};
use crate::core::id::UniqueEntityId;
use crate::core::validation::validators::{
    each_instance, is_array, is_enum, is_instance, is_int, is_string, length_exact, max,
    max_decimal_places, min, not_empty, not_empty_object, number_string,
};
use crate::core::validation::RuleSet;
use crate::entities::ids::{BudgetId, SupplierId, TeamId};
use crate::entities::invoice::{Invoice, InvoiceProps};
use crate::entities::name_rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Capex,
    Opex,
}

impl ExpenseType {
    pub const VALUES: &'static [&'static str] = &["capex", "opex"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Capex => "capex",
            ExpenseType::Opex => "opex",
        }
    }
}

impl FromStr for ExpenseType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capex" => Ok(ExpenseType::Capex),
            "opex" => Ok(ExpenseType::Opex),
            other => Err(UnknownVariantError::new("expense type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseProps {
    pub name: String,
    pub description: String,
    pub year: i32,
    pub amount: f64,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub supplier_id: Option<SupplierId>,
    #[serde(rename = "purchaseRequest")]
    pub purchase_request: Option<String>,
    #[serde(rename = "purchaseOrder")]
    pub purchase_order: Option<String>,
    pub team_id: TeamId,
    pub budget_id: BudgetId,
    pub invoices: Option<Vec<Invoice>>,
}

impl EntityProps for ExpenseProps {
    const KIND: &'static str = "Expense";

    fn rules() -> RuleSet {
        name_rules()
            .field("description")
            .check(not_empty())
            .check(is_string())
            .field("year")
            .check(not_empty())
            .check(max(3000.0))
            .check(min(2020.0))
            .check(is_int())
            .field("amount")
            .check(not_empty())
            .check(max_decimal_places(2))
            .check(min(0.01))
            .field("type")
            .check(not_empty())
            .check(is_enum(ExpenseType::VALUES))
            .field("supplier_id")
            .optional()
            .check(is_instance(SupplierId::KIND))
            .check(not_empty_object())
            .field("purchaseRequest")
            .optional()
            .check(number_string())
            .check(length_exact(10))
            .field("purchaseOrder")
            .optional()
            .check(number_string())
            .check(length_exact(10))
            .field("team_id")
            .check(is_instance(TeamId::KIND))
            .check(not_empty())
            .check(not_empty_object())
            .field("budget_id")
            .check(is_instance(BudgetId::KIND))
            .check(not_empty())
            .check(not_empty_object())
            .field("invoices")
            .optional()
            .check(each_instance(InvoiceProps::KIND))
            .check(is_array())
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name.to_field_value());
        record.insert("description".into(), self.description.to_field_value());
        record.insert("year".into(), self.year.to_field_value());
        record.insert("amount".into(), self.amount.to_field_value());
        record.insert("type".into(), self.expense_type.as_str().to_field_value());
        record.insert("supplier_id".into(), self.supplier_id.to_field_value());
        record.insert("purchaseRequest".into(), self.purchase_request.to_field_value());
        record.insert("purchaseOrder".into(), self.purchase_order.to_field_value());
        record.insert("team_id".into(), self.team_id.to_field_value());
        record.insert("budget_id".into(), self.budget_id.to_field_value());
        record.insert("invoices".into(), self.invoices.to_field_value());
        record
    }

    fn from_record(record: &Record) -> Option<Self> {
        let supplier_id = match record.field("supplier_id") {
            FieldValue::Null => None,
            value => Some(SupplierId::from_field_value(value)?),
        };

        let invoices = match record.field("invoices") {
            FieldValue::Null => None,
            value => Some(
                value
                    .as_list()?
                    .iter()
                    .map(|invoice| Invoice::from_record(&invoice.as_instance()?.fields).ok())
                    .collect::<Option<Vec<_>>>()?,
            ),
        };

        Some(Self {
            name: record.string("name")?,
            description: record.string("description")?,
            year: record.number("year")? as i32,
            amount: record.number("amount")?,
            expense_type: record.string("type")?.parse().ok()?,
            supplier_id,
            purchase_request: record.string("purchaseRequest"),
            purchase_order: record.string("purchaseOrder"),
            team_id: TeamId::from_field_value(record.field("team_id"))?,
            budget_id: BudgetId::from_field_value(record.field("budget_id"))?,
            invoices,
        })
    }
}

/// Optional replacements applied by [`Expense::change`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub expense_type: Option<ExpenseType>,
    pub team_id: Option<TeamId>,
    pub budget_id: Option<BudgetId>,
}

pub type Expense = Entity<ExpenseProps>;

impl Entity<ExpenseProps> {
    pub fn new(
        props: ExpenseProps,
        audit: AuditFieldsProps,
        id: Option<UniqueEntityId>,
    ) -> DomainResult<Self> {
        Self::create(props, audit, id)
    }

    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn description(&self) -> &str {
        &self.props().description
    }

    pub fn year(&self) -> i32 {
        self.props().year
    }

    pub fn amount(&self) -> f64 {
        self.props().amount
    }

    pub fn expense_type(&self) -> ExpenseType {
        self.props().expense_type
    }

    pub fn supplier_id(&self) -> Option<&SupplierId> {
        self.props().supplier_id.as_ref()
    }

    pub fn purchase_request(&self) -> Option<&str> {
        self.props().purchase_request.as_deref()
    }

    pub fn purchase_order(&self) -> Option<&str> {
        self.props().purchase_order.as_deref()
    }

    pub fn team_id(&self) -> &TeamId {
        &self.props().team_id
    }

    pub fn budget_id(&self) -> &BudgetId {
        &self.props().budget_id
    }

    pub fn invoices(&self) -> Option<&[Invoice]> {
        self.props().invoices.as_deref()
    }

    /// Replace any of the core fields; unset fields keep their value
    pub fn change(&mut self, changes: ExpenseChanges, updated_by: &str) -> DomainResult<()> {
        let mut candidate = self.props().clone();
        let ExpenseChanges {
            name,
            description,
            year,
            amount,
            expense_type,
            team_id,
            budget_id,
        } = changes;

        if let Some(name) = name {
            candidate.name = name;
        }
        if let Some(description) = description {
            candidate.description = description;
        }
        if let Some(year) = year {
            candidate.year = year;
        }
        if let Some(amount) = amount {
            candidate.amount = amount;
        }
        if let Some(expense_type) = expense_type {
            candidate.expense_type = expense_type;
        }
        if let Some(team_id) = team_id {
            candidate.team_id = team_id;
        }
        if let Some(budget_id) = budget_id {
            candidate.budget_id = budget_id;
        }

        self.apply(candidate, updated_by)
    }

    pub fn add_supplier(
        &mut self,
        supplier_id: Option<SupplierId>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let Some(supplier_id) = supplier_id else {
            return Err(InvalidExpenseError::new("SupplierId must be provided").into());
        };
        self.update_supplier(Some(supplier_id), updated_by)
    }

    /// Set or clear the supplier
    pub fn update_supplier(
        &mut self,
        supplier_id: Option<SupplierId>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let mut candidate = self.props().clone();
        candidate.supplier_id = supplier_id;
        self.apply(candidate, updated_by)
    }

    pub fn add_purchase_request(
        &mut self,
        purchase_request: &str,
        updated_by: &str,
    ) -> DomainResult<()> {
        if purchase_request.is_empty() {
            return Err(InvalidExpenseError::new("Purchase Request must be provided").into());
        }
        if self.has_purchase_request() {
            return Err(InvalidExpenseError::new("Expense has Purchase Request already").into());
        }
        self.update_purchase_request(Some(purchase_request), updated_by)
    }

    /// Set or clear the purchase request
    pub fn update_purchase_request(
        &mut self,
        purchase_request: Option<&str>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let mut candidate = self.props().clone();
        candidate.purchase_request = purchase_request.map(str::to_string);
        self.apply(candidate, updated_by)
    }

    pub fn add_purchase_order(
        &mut self,
        purchase_order: &str,
        updated_by: &str,
    ) -> DomainResult<()> {
        if purchase_order.is_empty() {
            return Err(InvalidExpenseError::new("Purchase Order must be provided").into());
        }
        if self.has_purchase_order() {
            return Err(InvalidExpenseError::new("Expense has Purchase Order already").into());
        }
        self.update_purchase_order(Some(purchase_order), updated_by)
    }

    /// Set or clear the purchase order
    pub fn update_purchase_order(
        &mut self,
        purchase_order: Option<&str>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let mut candidate = self.props().clone();
        candidate.purchase_order = purchase_order.map(str::to_string);
        self.apply(candidate, updated_by)
    }

    /// Attach request and order in one step; neither may be set yet
    pub fn add_purchase_docs(
        &mut self,
        purchase_request: &str,
        purchase_order: &str,
        updated_by: &str,
    ) -> DomainResult<()> {
        if purchase_request.is_empty() || purchase_order.is_empty() {
            return Err(InvalidExpenseError::new(
                "Purchase Request and Purchase Order must be provided",
            )
            .into());
        }
        if self.has_purchase_request() {
            return Err(InvalidExpenseError::new("Expense has Purchase Request already").into());
        }
        if self.has_purchase_order() {
            return Err(InvalidExpenseError::new("Expense has Purchase Order already").into());
        }

        let mut candidate = self.props().clone();
        candidate.purchase_request = Some(purchase_request.to_string());
        candidate.purchase_order = Some(purchase_order.to_string());
        self.apply(candidate, updated_by)
    }

    /// Replace the owned invoices
    pub fn update_invoices(
        &mut self,
        invoices: Vec<Invoice>,
        updated_by: &str,
    ) -> DomainResult<()> {
        let mut candidate = self.props().clone();
        candidate.invoices = Some(invoices);
        self.apply(candidate, updated_by)
    }

    fn has_purchase_request(&self) -> bool {
        self.purchase_request().is_some_and(|pr| !pr.is_empty())
    }

    fn has_purchase_order(&self) -> bool {
        self.purchase_order().is_some_and(|po| !po.is_empty())
    }
}
