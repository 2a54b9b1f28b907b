//! Card field value rows.

use serde::{Deserialize, Serialize};
use worldweaver_core::card_form::FieldEdit;
use worldweaver_core::field_value::{FieldValue, FieldValues};
use worldweaver_core::types::{EntityId, Timestamp};

/// A row from the `card_data` table: one populated field of one card.
/// Unique on `(card_id, field_key)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    pub id: EntityId,
    pub card_id: EntityId,
    pub field_key: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Upsert body for one field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDataWrite {
    pub card_id: EntityId,
    pub field_key: String,
    pub value: serde_json::Value,
    pub updated_at: Timestamp,
}

/// One control edit addressed to a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyedEdit {
    pub key: String,
    pub edit: FieldEdit,
}

/// Body of `PUT /cards/{id}/fields`. `values` overwrite stored values
/// first; `edits` are then applied in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCardFields {
    #[serde(default)]
    pub values: FieldValues,
    #[serde(default)]
    pub edits: Vec<KeyedEdit>,
}

/// Collect stored rows into a value map. Rows holding JSON no field can
/// hold are skipped with a warning.
pub fn values_from_rows(rows: Vec<CardData>) -> FieldValues {
    let mut values = FieldValues::with_capacity(rows.len());
    for row in rows {
        match FieldValue::from_json(&row.value) {
            Some(value) => {
                values.insert(row.field_key, value);
            }
            None => tracing::warn!(
                card_id = %row.card_id,
                field_key = %row.field_key,
                "Skipping card_data row with unsupported value shape",
            ),
        }
    }
    values
}
