//! Folder model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::folder_tree::{Hierarchical, DEFAULT_FOLDER_COLOR};
use worldweaver_core::types::{EntityId, Timestamp};

use super::nullable;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A row from the `folders` table.
///
/// `card_count` is not stored; the repository fills it in on list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: EntityId,
    pub world_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<EntityId>,
    pub color: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub card_count: u64,
}

impl Hierarchical for Folder {
    fn id(&self) -> EntityId {
        self.id
    }

    fn parent_id(&self) -> Option<EntityId> {
        self.parent_id
    }

    fn position(&self) -> i32 {
        self.position
    }
}

/// The columns of a folder embedded in card rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub id: EntityId,
    pub name: String,
    pub color: String,
}

impl From<&Folder> for FolderSummary {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            color: folder.color.clone(),
        }
    }
}

/// A folder offered in the parent selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentOption {
    pub id: EntityId,
    pub name: String,
    pub parent_id: Option<EntityId>,
}

impl From<&Folder> for ParentOption {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            parent_id: folder.parent_id,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

fn default_color() -> String {
    DEFAULT_FOLDER_COLOR.to_string()
}

/// DTO for creating a folder in a world.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolder {
    #[validate(length(min = 1, max = 100, message = "Folder name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<EntityId>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub position: i32,
}

/// DTO for updating a folder. `parent_id: null` moves it to the top level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFolder {
    #[validate(length(min = 1, max = 100, message = "Folder name must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// Query parameters for the folder listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderView {
    #[default]
    Tree,
    Flat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults() {
        let dto: CreateFolder = serde_json::from_value(serde_json::json!({"name": "Places"})).unwrap();
        assert_eq!(dto.color, "blue");
        assert_eq!(dto.position, 0);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn description_limit() {
        let dto = CreateFolder {
            name: "Places".into(),
            description: Some("d".repeat(201)),
            parent_id: None,
            color: default_color(),
            position: 0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_parent_null_moves_to_root() {
        let dto: UpdateFolder = serde_json::from_value(serde_json::json!({"parent_id": null})).unwrap();
        assert_eq!(dto.parent_id, Some(None));
        let keep: UpdateFolder = serde_json::from_value(serde_json::json!({"name": "X"})).unwrap();
        assert_eq!(keep.parent_id, None);
    }
}
