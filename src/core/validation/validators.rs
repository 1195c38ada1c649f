//! Reusable field rules
//!
//! Each function returns a closure checked by a [`RuleSet`](super::RuleSet).
//! A rule receives the field name, the field value and the whole record, so
//! cross-field rules are ordinary rules. Messages follow the wording the
//! stored error payloads already use ("name should not be empty", ...).

use crate::core::field::{FieldFormat, FieldValue, Record, RecordExt};

/// Signature shared by every rule
pub trait FieldRule: Fn(&str, &FieldValue, &Record) -> Result<(), String> + Send + Sync {}

impl<F> FieldRule for F where
    F: Fn(&str, &FieldValue, &Record) -> Result<(), String> + Send + Sync
{
}

/// Rule: value is present and not an empty string
pub fn not_empty() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| match value {
        FieldValue::Null => Err(format!("{} should not be empty", field)),
        FieldValue::String(s) if s.is_empty() => Err(format!("{} should not be empty", field)),
        _ => Ok(()),
    }
}

/// Rule: value is a string
pub fn is_string() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| {
        if value.as_string().is_some() {
            Ok(())
        } else {
            Err(format!("{} must be a string", field))
        }
    }
}

/// Rule: string is at most `max` characters; non-strings fail
pub fn max_length(max: usize) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_string() {
        Some(s) if s.chars().count() <= max => Ok(()),
        _ => Err(format!(
            "{} must be shorter than or equal to {} characters",
            field, max
        )),
    }
}

/// Rule: string is exactly `len` characters; non-strings fail
pub fn length_exact(len: usize) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_string() {
        Some(s) if s.chars().count() == len => Ok(()),
        _ => Err(format!("{} must be {} characters", field, len)),
    }
}

/// Rule: value is a timestamp
pub fn is_date() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| {
        if value.as_datetime().is_some() {
            Ok(())
        } else {
            Err(format!("{} must be a Date instance", field))
        }
    }
}

/// Rule: value is a whole number (a float without fraction counts)
pub fn is_int() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| match value {
        FieldValue::Integer(_) => Ok(()),
        FieldValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(()),
        _ => Err(format!("{} must be an integer number", field)),
    }
}

/// Rule: number is not below `min`; non-numbers fail
pub fn min(min: f64) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_number() {
        Some(n) if n >= min => Ok(()),
        _ => Err(format!("{} must not be less than {}", field, min)),
    }
}

/// Rule: number is not above `max`; non-numbers fail
pub fn max(max: f64) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_number() {
        Some(n) if n <= max => Ok(()),
        _ => Err(format!("{} must not be greater than {}", field, max)),
    }
}

/// Rule: number has at most `places` decimals; non-numbers fail
pub fn max_decimal_places(places: usize) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| {
        let ok = match value {
            FieldValue::Integer(_) => true,
            FieldValue::Float(f) if f.is_finite() => decimal_places(*f) <= places,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(format!(
                "{} must have max {} decimal places",
                field,
                spelled(places)
            ))
        }
    }
}

fn decimal_places(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, decimals)| decimals.len())
}

fn spelled(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        other => other.to_string(),
    }
}

/// Rule: string is one of the enum's wire values
pub fn is_enum(values: &'static [&'static str]) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_string() {
        Some(s) if values.contains(&s) => Ok(()),
        _ => Err(format!("{} must be a valid enum value", field)),
    }
}

/// Rule: string is in the allowed list, listing the choices on failure
pub fn is_in(values: &'static [&'static str]) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| match value.as_string() {
        Some(s) if values.contains(&s) => Ok(()),
        _ => Err(format!(
            "{} must be one of the following values: {}",
            field,
            values.join(", ")
        )),
    }
}

/// Rule: value is an instance of `kind`
pub fn is_instance(kind: &'static str) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| {
        if value.is_instance_of(kind) {
            Ok(())
        } else {
            Err(format!("{} must be an instance of {}", field, kind))
        }
    }
}

/// Rule: every element is an instance of `kind`
///
/// A non-list value is checked as a single element.
pub fn each_instance(kind: &'static str) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, _: &Record| {
        let ok = match value {
            FieldValue::List(items) => items.iter().all(|item| item.is_instance_of(kind)),
            other => other.is_instance_of(kind),
        };

        if ok {
            Ok(())
        } else {
            Err(format!("each value in {} must be an instance of {}", field, kind))
        }
    }
}

/// Rule: value is an object (plain or typed) with at least one field
pub fn not_empty_object() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| {
        let ok = match value {
            FieldValue::Object(fields) => !fields.is_empty(),
            FieldValue::Instance(instance) => !instance.fields.is_empty(),
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(format!("{} must be a non-empty object", field))
        }
    }
}

/// Rule: string holds a decimal number
pub fn number_string() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| {
        if FieldFormat::NumberString.validate(value) {
            Ok(())
        } else {
            Err(format!("{} must be a number string", field))
        }
    }
}

/// Rule: value is a list
pub fn is_array() -> impl FieldRule + Clone {
    |field: &str, value: &FieldValue, _: &Record| {
        if value.as_list().is_some() {
            Ok(())
        } else {
            Err(format!("{} must be an array", field))
        }
    }
}

/// Rule: this date is not earlier than the date in field `other`
///
/// Fails when either side is not a date.
pub fn not_older_than(other: &'static str) -> impl FieldRule + Clone {
    move |field: &str, value: &FieldValue, record: &Record| {
        match (value.as_datetime(), record.datetime(other)) {
            (Some(this), Some(that)) if this >= that => Ok(()),
            _ => Err(format!("{} cannot be older than {}", field, other)),
        }
    }
}

/// Rule: arbitrary predicate with a fixed message
pub fn custom<P>(message: &'static str, predicate: P) -> impl FieldRule + Clone
where
    P: Fn(&FieldValue, &Record) -> bool + Send + Sync + Clone,
{
    move |_: &str, value: &FieldValue, record: &Record| {
        if predicate(value, record) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}
