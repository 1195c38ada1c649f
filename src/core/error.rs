//! Typed error handling for the domain layer
//!
//! Every failure the core can produce has its own type so callers can tell
//! "bad input from a caller" apart from "bad data already at rest".
//!
//! # Error Categories
//!
//! - [`InvalidIdError`]: malformed identifier string
//! - [`EntityValidationError`]: entity props failed their rule set
//! - [`AuditFieldsValidationError`]: audit fields failed their rule set
//! - [`LoadEntityError`]: a stored row no longer passes validation
//! - [`NotFoundError`]: repository lookup on an unknown identifier
//! - [`InvalidExpenseError`]: an expense mutation guard rejected the call
//!
//! [`DomainError`] wraps all of them for APIs that can fail in several ways.
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.find_by_id(&id).await {
//!     Ok(budget) => println!("Found: {}", budget.name()),
//!     Err(DomainError::NotFound(e)) => println!("{}", e),
//!     Err(DomainError::LoadEntity(e)) => println!("corrupt row: {}", e.error),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::validation::FieldsError;
use thiserror::Error;

/// Result alias used throughout the crate
pub type DomainResult<T> = Result<T, DomainError>;

/// A non-empty identifier that is not a valid UUID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must be a valid UUID")]
pub struct InvalidIdError {
    /// The rejected value
    pub value: String,
}

/// One or more entity rules failed during construction or mutation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Entity Validation Error")]
pub struct EntityValidationError {
    pub error: FieldsError,
}

/// Audit fields failed validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("AuditFields are not valid")]
pub struct AuditFieldsValidationError {
    pub error: FieldsError,
}

/// A row loaded from storage does not pass the current rules
#[derive(Debug, Clone, PartialEq, Error)]
#[error("An entity could not be loaded")]
pub struct LoadEntityError {
    pub error: FieldsError,
}

impl From<EntityValidationError> for LoadEntityError {
    fn from(err: EntityValidationError) -> Self {
        Self { error: err.error }
    }
}

/// Requested identifier does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NotFoundError {
    pub message: String,
}

impl NotFoundError {
    /// The standard message used by every repository
    pub fn entity(id: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Entity not found using ID {}", id),
        }
    }
}

/// Expense mutation guard failure (missing argument, document already set)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidExpenseError {
    pub message: String,
}

impl InvalidExpenseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for InvalidExpenseError {
    fn default() -> Self {
        Self::new("Invalid params to update Expense")
    }
}

/// A string that names none of an enum's variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariantError {
    /// What was being parsed, e.g. "role name"
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariantError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Umbrella error for operations that can fail in more than one way
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    #[error(transparent)]
    EntityValidation(#[from] EntityValidationError),

    #[error(transparent)]
    AuditFieldsValidation(#[from] AuditFieldsValidationError),

    #[error(transparent)]
    LoadEntity(#[from] LoadEntityError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    InvalidExpense(#[from] InvalidExpenseError),

    /// Storage backend failure (connection, query, lock poisoning)
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Field messages carried by validation and load errors
    pub fn fields(&self) -> Option<&FieldsError> {
        match self {
            DomainError::EntityValidation(e) => Some(&e.error),
            DomainError::AuditFieldsValidation(e) => Some(&e.error),
            DomainError::LoadEntity(e) => Some(&e.error),
            _ => None,
        }
    }

    /// Short machine-readable code for the error category
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::InvalidId(_) => "INVALID_ID",
            DomainError::EntityValidation(_) => "ENTITY_VALIDATION_ERROR",
            DomainError::AuditFieldsValidation(_) => "AUDIT_FIELDS_VALIDATION_ERROR",
            DomainError::LoadEntity(_) => "LOAD_ENTITY_ERROR",
            DomainError::NotFound(_) => "ENTITY_NOT_FOUND",
            DomainError::InvalidExpense(_) => "INVALID_EXPENSE",
            DomainError::Storage(_) => "STORAGE_ERROR",
            DomainError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Rewrap an entity validation failure as a load failure.
    ///
    /// Every other error passes through unchanged.
    pub fn into_load_error(self) -> Self {
        match self {
            DomainError::EntityValidation(e) => DomainError::LoadEntity(e.into()),
            other => other,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}
