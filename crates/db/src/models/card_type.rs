//! Card type model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::field_schema::FieldSchema;
use worldweaver_core::schema_builder::{CardTypeDraft, SchemaBuilder};
use worldweaver_core::types::{EntityId, Timestamp};

use super::nullable;

/// A row from the `card_types` table. `schema` is stored as an ordered
/// JSON array of field definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardType {
    pub id: EntityId,
    pub world_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub schema: Vec<FieldSchema>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The columns of a card type embedded in card rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTypeSummary {
    pub id: EntityId,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CardType {
    /// The editable draft of this card type.
    pub fn to_draft(&self) -> CardTypeDraft {
        CardTypeDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone().unwrap_or_default(),
            color: self.color.clone().unwrap_or_default(),
            schema: self.schema.clone(),
        }
    }
}

/// DTO for creating a card type. Missing `icon` and `color` get the
/// editor defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub schema: Vec<FieldSchema>,
}

impl CreateCardType {
    /// An editor holding this request, ready to [`submit`](SchemaBuilder::submit).
    pub fn into_builder(self) -> SchemaBuilder {
        let defaults = SchemaBuilder::new();
        SchemaBuilder::from_draft(CardTypeDraft {
            name: self.name,
            description: self.description,
            icon: self.icon.unwrap_or(defaults.icon),
            color: self.color.unwrap_or(defaults.color),
            schema: self.schema,
        })
    }
}

/// DTO for updating a card type. A new `schema` replaces the old one whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCardType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<FieldSchema>>,
}

impl UpdateCardType {
    /// Apply this patch to `current` and return the merged draft, so the
    /// whole card type can be validated before it is written.
    pub fn merged_with(&self, current: &CardType) -> CardTypeDraft {
        let mut draft = current.to_draft();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(icon) = &self.icon {
            draft.icon = icon.clone();
        }
        if let Some(color) = &self.color {
            draft.color = color.clone();
        }
        if let Some(schema) = &self.schema {
            draft.schema = schema.clone();
        }
        draft
    }
}

/// DTO for instantiating a card type from a catalog template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFromTemplate {
    pub template_id: EntityId,
    /// Overrides the template's name.
    #[validate(length(min = 1, max = 50, message = "Card type name must be 1-50 characters"))]
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;
    use worldweaver_core::field_schema::FieldKind;

    use super::*;

    fn card_type() -> CardType {
        CardType {
            id: Uuid::new_v4(),
            world_id: Uuid::new_v4(),
            name: "Character".into(),
            description: Some("People".into()),
            icon: None,
            color: Some("#3B82F6".into()),
            schema: vec![FieldSchema::new("name", "Name", FieldKind::Text)],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn patch_merges_over_current() {
        let patch: UpdateCardType = serde_json::from_value(serde_json::json!({
            "description": null,
            "schema": [{"key": "title", "label": "Title", "kind": "text"}]
        }))
        .unwrap();
        let draft = patch.merged_with(&card_type());
        assert_eq!(draft.name, "Character");
        assert_eq!(draft.description, None);
        assert_eq!(draft.icon, "");
        assert_eq!(draft.schema[0].key, "title");
    }

    #[test]
    fn create_fills_editor_defaults() {
        let dto: CreateCardType = serde_json::from_value(serde_json::json!({
            "name": "Location",
            "schema": [{"key": "region", "label": "Region", "kind": "text"}]
        }))
        .unwrap();
        let builder = dto.into_builder();
        assert_eq!(builder.icon, worldweaver_core::schema_builder::DEFAULT_ICON);
        assert!(worldweaver_core::schema_builder::CARD_TYPE_COLORS.contains(&builder.color.as_str()));
        assert_eq!(builder.fields().len(), 1);
    }

    #[test]
    fn create_without_schema_fails_submit() {
        let dto: CreateCardType = serde_json::from_value(serde_json::json!({"name": "Empty"})).unwrap();
        assert!(dto.into_builder().submit().is_err());
    }

    #[test]
    fn schema_round_trips_as_array() {
        let json = serde_json::to_value(card_type()).unwrap();
        assert_eq!(json["schema"][0]["kind"], "text");
    }
}
