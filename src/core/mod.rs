//! Core module containing the building blocks every entity is made of

pub mod audit;
pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod repository;
pub mod search;
pub mod validation;

pub use audit::{AuditFields, AuditFieldsProps};
pub use entity::{Auditable, Entity, EntityProps};
pub use error::{
    AuditFieldsValidationError, DomainError, DomainResult, EntityValidationError,
    InvalidExpenseError, InvalidIdError, LoadEntityError, NotFoundError, UnknownVariantError,
};
pub use field::{FieldFormat, FieldValue, Instance, Record, RecordExt, ToFieldValue};
pub use id::UniqueEntityId;
pub use repository::{Repository, SearchableRepository};
pub use search::{SearchInput, SearchParams, SearchResult, SortDirection};
pub use validation::{FieldsError, RuleSet, ValidatorFields};
