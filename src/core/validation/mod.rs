//! Validation system
//!
//! Entities declare their rules with a [`RuleSet`]; a [`ValidatorFields`]
//! runs them against the record view of the props and collects every
//! violation into a [`FieldsError`].

pub mod fields;
pub mod validators;

pub use fields::{FieldsError, RuleSet, ValidatorFields};
pub use validators::FieldRule;
