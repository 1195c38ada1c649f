//! Shared test harness for storage backend testing
//!
//! Provides builders for every aggregate with whole-second timestamps (so
//! rows survive backends that store microseconds) and the
//! `repository_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_tests;

use budget_core::prelude::*;
use chrono::TimeZone;

pub const TEAM_ID: &str = "25a68560-05cb-4608-91b3-0c9e9daf0bb9";
pub const BUDGET_ID: &str = "96e91752-98fc-411f-8fc7-be7f1739e713";
pub const MEMBER_IDS: [&str; 3] = [
    "d2b1a3c4-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
    "7c0f8e36-3d4f-4c1a-9d2e-1b5a6c7d8e9f",
    "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d",
];

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// `offset` seconds after a fixed base instant
pub fn at(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap()
}

pub fn audit_at(offset: i64) -> AuditFieldsProps {
    AuditFieldsProps {
        created_by: "system".to_string(),
        created_at: Some(at(offset)),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Aggregate builders
// ---------------------------------------------------------------------------

pub fn create_budget(name: &str, offset: i64) -> Budget {
    Budget::new(
        BudgetProps {
            name: name.to_string(),
        },
        audit_at(offset),
        None,
    )
    .unwrap()
}

/// Budgets named `names[i]`, each created one second after the previous
pub fn budget_batch(names: &[&str]) -> Vec<Budget> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| create_budget(name, i as i64))
        .collect()
}

pub fn create_role(name: RoleName, member: usize, offset: i64) -> TeamRole {
    TeamRole::new(
        TeamRoleProps {
            name,
            team_member_id: TeamMemberId::new(MEMBER_IDS[member]).unwrap(),
        },
        audit_at(offset),
        None,
    )
    .unwrap()
}

/// One role of each kind, each held by a different member
pub fn full_roles() -> Vec<TeamRole> {
    RoleName::ALL
        .into_iter()
        .enumerate()
        .map(|(i, name)| create_role(name, i, i as i64))
        .collect()
}

pub fn create_team(name: &str) -> Team {
    Team::new(
        TeamProps {
            name: name.to_string(),
            roles: full_roles(),
        },
        audit_at(0),
        None,
    )
    .unwrap()
}

pub fn create_invoice(amount: f64, status: InvoiceStatus, offset: i64) -> Invoice {
    Invoice::new(
        InvoiceProps {
            amount,
            date: at(offset),
            document: Some(format!("DOC-{}", offset)),
            status,
        },
        audit_at(offset),
        None,
    )
    .unwrap()
}

pub fn create_expense(name: &str, invoices: Option<Vec<Invoice>>) -> Expense {
    Expense::new(
        ExpenseProps {
            name: name.to_string(),
            description: "some description".to_string(),
            year: 2024,
            amount: 1500.5,
            expense_type: ExpenseType::Opex,
            supplier_id: None,
            purchase_request: Some("1234567890".to_string()),
            purchase_order: None,
            team_id: TeamId::new(TEAM_ID).unwrap(),
            budget_id: BudgetId::new(BUDGET_ID).unwrap(),
            invoices,
        },
        audit_at(0),
        None,
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert the names of a search page, in order
pub fn assert_names<P: EntityProps>(result: &SearchResult<Entity<P>>, expected: &[&str])
where
    Entity<P>: Named,
{
    let names: Vec<&str> = result.items().iter().map(|e| e.entity_name()).collect();
    assert_eq!(names, expected, "unexpected search page");
}

pub fn assert_not_found(err: &DomainError, id: &str) {
    assert!(
        matches!(err, DomainError::NotFound(_)),
        "expected NotFound, got {:?}",
        err
    );
    assert_eq!(err.to_string(), format!("Entity not found using ID {}", id));
}

/// Name accessor shared by the aggregates under test
pub trait Named {
    fn entity_name(&self) -> &str;
}

impl Named for Budget {
    fn entity_name(&self) -> &str {
        self.name()
    }
}

impl Named for Team {
    fn entity_name(&self) -> &str {
        self.name()
    }
}

impl Named for Expense {
    fn entity_name(&self) -> &str {
        self.name()
    }
}
