//! Domain entities
//!
//! Every entity is an [`Entity`](crate::core::entity::Entity) over its own
//! props type. References between entities are by id only
//! ([`TeamId`], [`BudgetId`], ...); aggregates own their children by value
//! (a [`Team`] its [`TeamRole`]s, an [`Expense`] its [`Invoice`]s).

pub mod macros;

pub mod budget;
pub mod expense;
pub mod ids;
pub mod invoice;
pub mod supplier;
pub mod team;
pub mod team_member;

pub use budget::{Budget, BudgetProps};
pub use expense::{Expense, ExpenseChanges, ExpenseProps, ExpenseType};
pub use ids::{BudgetId, SupplierId, TeamId, TeamMemberId};
pub use invoice::{Invoice, InvoiceProps, InvoiceStatus};
pub use supplier::{Supplier, SupplierProps};
pub use team::{RoleName, Team, TeamProps, TeamRole, TeamRoleProps};
pub use team_member::{TeamMember, TeamMemberProps};

use crate::core::validation::validators::{is_string, max_length, not_empty};
use crate::core::validation::RuleSet;

/// `name`: not empty, string, at most 255 characters
pub fn name_rules() -> RuleSet {
    RuleSet::new()
        .field("name")
        .check(not_empty())
        .check(is_string())
        .check(max_length(255))
}
