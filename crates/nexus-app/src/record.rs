// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::macros::format_description;

/// A scalar addressable by field name inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(OffsetDateTime),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form used by search. Falsy values (`Null`, `false`, zero and
    /// empty text) never participate in matching.
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Bool(false) | Self::Int(0) => None,
            Self::Float(value) if *value == 0.0 || value.is_nan() => None,
            Self::Text(value) if value.is_empty() => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Text(value) => Some(value.clone()),
            Self::Timestamp(value) => Some(format_timestamp(*value)),
            Self::List(values) => Some(values.join(",")),
        }
    }

    /// Total order over field values.
    ///
    /// Values of the same kind use their natural ordering; integers and floats
    /// compare numerically with each other. Mixed kinds order by kind rank so
    /// a heterogeneous column still sorts deterministically. `Null` ranks
    /// lowest here; callers that want nulls last handle them before comparing.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            (Self::Int(left), Self::Float(right)) => (*left as f64).total_cmp(right),
            (Self::Float(left), Self::Int(right)) => left.total_cmp(&(*right as f64)),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Timestamp(left), Self::Timestamp(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) => left.cmp(right),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Text(_) => 4,
            Self::List(_) => 5,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(*value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Int(value),
                None => number.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            serde_json::Value::String(value) => Self::Text(value.clone()),
            serde_json::Value::Array(items) => Self::List(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| value.to_string())
}

/// A keyed structure whose fields the table engine can address by name.
///
/// The engine never learns a record's shape beyond this trait: search reads
/// [`Record::field_values`] (or the fields named by filterable columns) and
/// sorting reads [`Record::field`] with the active column id.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue>;

    fn field_values(&self) -> Vec<FieldValue>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }

    fn field_values(&self) -> Vec<FieldValue> {
        (**self).field_values()
    }
}

impl Record for BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }

    fn field_values(&self) -> Vec<FieldValue> {
        self.values().cloned().collect()
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).map(FieldValue::from)
    }

    fn field_values(&self) -> Vec<FieldValue> {
        self.values().map(FieldValue::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, Record, format_timestamp};
    use serde_json::json;
    use std::cmp::Ordering;
    use time::macros::datetime;

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(
            FieldValue::Int(2).compare(&FieldValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Float(10.0).compare(&FieldValue::Int(9)),
            Ordering::Greater
        );
    }

    #[test]
    fn text_compares_lexicographically_and_case_sensitively() {
        let lower = FieldValue::from("apple");
        let upper = FieldValue::from("Banana");
        assert_eq!(upper.compare(&lower), Ordering::Less);
        assert_eq!(lower.compare(&FieldValue::from("apricot")), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_order_by_rank() {
        assert_eq!(
            FieldValue::Int(999).compare(&FieldValue::from("1")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Bool(true).compare(&FieldValue::Int(0)),
            Ordering::Less
        );
    }

    #[test]
    fn falsy_values_have_no_search_text() {
        assert_eq!(FieldValue::Null.search_text(), None);
        assert_eq!(FieldValue::Bool(false).search_text(), None);
        assert_eq!(FieldValue::Int(0).search_text(), None);
        assert_eq!(FieldValue::Float(0.0).search_text(), None);
        assert_eq!(FieldValue::from("").search_text(), None);
        assert_eq!(FieldValue::Bool(true).search_text(), Some("true".to_owned()));
        assert_eq!(FieldValue::Int(10).search_text(), Some("10".to_owned()));
        assert_eq!(
            FieldValue::List(vec!["Admin".to_owned(), "HR".to_owned()]).search_text(),
            Some("Admin,HR".to_owned())
        );
    }

    #[test]
    fn timestamps_render_to_minutes() {
        assert_eq!(
            format_timestamp(datetime!(2026-02-19 12:34:56 UTC)),
            "2026-02-19 12:34"
        );
    }

    #[test]
    fn json_objects_are_records() {
        let value = json!({"name": "Al", "age": 25, "score": 1.5, "tags": ["a", 1], "gone": null});
        let record = value.as_object().expect("object literal");
        assert_eq!(record.field("age"), Some(FieldValue::Int(25)));
        assert_eq!(record.field("score"), Some(FieldValue::Float(1.5)));
        assert_eq!(
            record.field("tags"),
            Some(FieldValue::List(vec!["a".to_owned(), "1".to_owned()]))
        );
        assert_eq!(record.field("gone"), Some(FieldValue::Null));
        assert_eq!(record.field("missing"), None);
        assert_eq!(record.field_values().len(), 5);
    }
}
