//! Card field values and the per-kind default-value initializer.
//!
//! Values are stored by the hosted service as plain JSON (one `card_data`
//! row per populated key), so [`FieldValue`] is untagged on the wire.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field_schema::{FieldKind, FieldSchema};

/// Default value for color fields.
pub const DEFAULT_COLOR: &str = "#000000";

/// The value of one card field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value counts as "not filled in" for required-field checks.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Convert a stored JSON value. Returns `None` for shapes a card field
    /// can never hold (null, objects, arrays with non-string items).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

/// Field values keyed by field key, in schema order.
pub type FieldValues = IndexMap<String, FieldValue>;

/// The fixed default for one field, chosen by its kind.
///
/// number defaults to the declared minimum (or 0), select to its first
/// option, multi_select to an empty list, boolean to false and color to
/// black. Everything else, unknown kinds included, starts as an empty string.
pub fn default_for(field: &FieldSchema) -> FieldValue {
    match &field.kind {
        FieldKind::Number => FieldValue::Number(field.min().unwrap_or(0.0)),
        FieldKind::Boolean => FieldValue::Bool(false),
        FieldKind::Select => FieldValue::Text(field.options().first().cloned().unwrap_or_default()),
        FieldKind::MultiSelect => FieldValue::List(Vec::new()),
        FieldKind::Color => FieldValue::text(DEFAULT_COLOR),
        FieldKind::Text
        | FieldKind::LongText
        | FieldKind::RichText
        | FieldKind::Date
        | FieldKind::Datetime
        | FieldKind::Url
        | FieldKind::Email
        | FieldKind::Image
        | FieldKind::File
        | FieldKind::Reference
        | FieldKind::Location
        | FieldKind::Unknown(_) => FieldValue::text(""),
    }
}

/// Build the initial value map for a card of the given schema.
pub fn initial_values(schema: &[FieldSchema]) -> FieldValues {
    schema
        .iter()
        .map(|field| (field.key.clone(), default_for(field)))
        .collect()
}
