//! # Budget Core
//!
//! Domain layer for budget and expense tracking.
//!
//! ## Features
//!
//! - **Validated Entities**: every entity is checked against its rule table on
//!   creation and on every mutation; failures report all messages per field
//! - **Audit Fields**: `created_by` / `created_at` / `updated_by` /
//!   `updated_at` defaulted, validated and stamped on change
//! - **Typed Ids**: UUID identifiers with typed references between entities
//! - **Searchable Repositories**: filter, sort and paginate over an in-memory
//!   store or PostgreSQL (`postgres` feature)
//! - **Configuration-Based**: pagination, storage and logging from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use budget_core::prelude::*;
//!
//! let repos = Repositories::in_memory();
//!
//! let mut budget = Budget::new(
//!     BudgetProps { name: "Marketing".into() },
//!     AuditFieldsProps::by("alice"),
//!     None,
//! )?;
//! repos.budgets.insert(&budget).await?;
//!
//! budget.change("Sales", "bob")?;
//! repos.budgets.update(&budget).await?;
//!
//! let page = repos
//!     .budgets
//!     .search(&SearchParams::new(SearchInput::default().filter("sal")))
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuditFields, AuditFieldsProps, Auditable, DomainError, DomainResult, Entity, EntityProps,
        FieldsError, NotFoundError, Repository, SearchInput, SearchParams, SearchResult,
        SearchableRepository, SortDirection, UniqueEntityId,
    };

    // === Entities ===
    pub use crate::entities::{
        Budget, BudgetId, BudgetProps, Expense, ExpenseChanges, ExpenseProps, ExpenseType,
        Invoice, InvoiceProps, InvoiceStatus, RoleName, Supplier, SupplierId, SupplierProps, Team,
        TeamId, TeamMember, TeamMemberId, TeamMemberProps, TeamProps, TeamRole, TeamRoleProps,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, ModelMapper, Repositories};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresRepository;

    // === Config ===
    pub use crate::config::{AppConfig, LoggingConfig, SearchConfig, StorageConfig};
    pub use crate::telemetry::init_tracing;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
