//! World model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::types::{EntityId, Timestamp};

use super::nullable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Shared,
    Public,
}

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A row from the `worlds` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub visibility: Visibility,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a world. The owner is always the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorld {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

/// DTO for updating a world. `null` clears a nullable member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateWorld {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<Option<String>>,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_to_private() {
        let dto: CreateWorld = serde_json::from_value(serde_json::json!({"title": "Eldoria"})).unwrap();
        assert_eq!(dto.visibility, Visibility::Private);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn title_bounds() {
        let empty: CreateWorld = serde_json::from_value(serde_json::json!({"title": ""})).unwrap();
        assert!(empty.validate().is_err());
        let long: CreateWorld =
            serde_json::from_value(serde_json::json!({"title": "t".repeat(101)})).unwrap();
        assert!(long.validate().is_err());
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let dto: UpdateWorld = serde_json::from_value(serde_json::json!({"summary": null})).unwrap();
        assert_eq!(dto.summary, Some(None));
        assert_eq!(dto.genre, None);
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({"summary": null})
        );
    }
}
