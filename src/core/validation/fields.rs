//! Rule sets and the validation runner

use crate::core::field::{FieldValue, Record, RecordExt};
use crate::core::validation::validators::FieldRule;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Ordered map of field name to violated-rule messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldsError(IndexMap<String, Vec<String>>);

impl FieldsError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field, creating the field entry if needed
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.get(field)
            .is_some_and(|messages| messages.iter().any(|m| m == message))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

impl From<IndexMap<String, Vec<String>>> for FieldsError {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for FieldsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

type Rule = Arc<dyn Fn(&str, &FieldValue, &Record) -> Result<(), String> + Send + Sync>;

#[derive(Clone)]
struct FieldRules {
    name: String,
    optional: bool,
    rules: Vec<Rule>,
}

/// Declarative list of fields and their rules
///
/// ```rust,ignore
/// let rules = RuleSet::new()
///     .field("name")
///     .check(not_empty())
///     .check(is_string())
///     .check(max_length(255))
///     .field("document")
///     .optional()
///     .check(max_length(10));
/// ```
///
/// Messages come out in field declaration order, then rule declaration
/// order. An optional field skips all of its rules when absent or null.
#[derive(Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring rules for `name`
    pub fn field(mut self, name: &str) -> Self {
        self.fields.push(FieldRules {
            name: name.to_string(),
            optional: false,
            rules: Vec::new(),
        });
        self
    }

    /// Mark the current field optional
    pub fn optional(mut self) -> Self {
        if let Some(current) = self.fields.last_mut() {
            current.optional = true;
        }
        self
    }

    /// Add a rule to the current field
    pub fn check<R>(mut self, rule: R) -> Self
    where
        R: FieldRule + 'static,
    {
        match self.fields.last_mut() {
            Some(current) => current.rules.push(Arc::new(rule)),
            None => tracing::warn!("rule added before any field was declared; ignored"),
        }
        self
    }

    /// Names of the declared fields, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Run every rule and collect the violations
    pub fn check_all(&self, record: &Record) -> FieldsError {
        let mut errors = FieldsError::new();

        for field in &self.fields {
            let value = record.field(&field.name);
            if field.optional && value.is_null() {
                continue;
            }

            for rule in &field.rules {
                if let Err(message) = rule(&field.name, value, record) {
                    errors.push(&field.name, message);
                }
            }
        }

        errors
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Runs a [`RuleSet`] and keeps the outcome of the last run
#[derive(Debug, Clone)]
pub struct ValidatorFields {
    rules: RuleSet,
    pub errors: Option<FieldsError>,
    pub validated_data: Option<Record>,
}

impl ValidatorFields {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            errors: None,
            validated_data: None,
        }
    }

    /// Validate `data`, storing either the data or the collected errors
    pub fn validate(&mut self, data: &Record) -> bool {
        let errors = self.rules.check_all(data);

        if errors.is_empty() {
            self.errors = None;
            self.validated_data = Some(data.clone());
            true
        } else {
            self.errors = Some(errors);
            self.validated_data = None;
            false
        }
    }
}
