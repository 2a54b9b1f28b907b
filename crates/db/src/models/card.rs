//! Card model, DTOs and bulk operation payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::field_value::FieldValues;
use worldweaver_core::types::{EntityId, Timestamp};

use super::card_link::CardLinkView;
use super::card_type::{CardType, CardTypeSummary};
use super::folder::FolderSummary;
use super::nullable;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A row from the `cards` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub world_id: EntityId,
    pub type_id: EntityId,
    pub folder_id: Option<EntityId>,
    pub name: String,
    pub slug: String,
    pub cover_image_url: Option<String>,
    pub summary: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A card row with its type and folder embedded, as the card grid shows it.
/// `folder` is `None` for uncategorized cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardListItem {
    #[serde(flatten)]
    pub card: Card,
    #[serde(rename = "type", default)]
    pub card_type: Option<CardTypeSummary>,
    #[serde(default)]
    pub folder: Option<FolderSummary>,
}

/// A card with its type, folder, field values and links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub folder: Option<FolderSummary>,
    pub values: FieldValues,
    pub links_from: Vec<CardLinkView>,
    pub links_to: Vec<CardLinkView>,
}

/// One page of a world's card list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPage {
    pub data: Vec<CardListItem>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a card. The slug is derived from `name`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCard {
    pub type_id: EntityId,
    #[serde(default)]
    pub folder_id: Option<EntityId>,
    #[validate(length(min = 1, max = 200, message = "Card name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    #[serde(default)]
    pub summary: Option<String>,
    #[validate(url(message = "Cover image must be a valid URL"))]
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    /// Initial field values. Missing keys start at their kind default.
    #[serde(default)]
    pub values: Option<FieldValues>,
}

/// DTO for updating a card's own columns. Field values go through
/// `PUT /cards/{id}/fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCard {
    #[validate(length(min = 1, max = 200, message = "Card name must be 1-200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub folder_id: Option<Option<EntityId>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// DTO for moving many cards into one folder (`None` = uncategorized).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkMoveRequest {
    #[validate(length(min = 1, message = "At least one card must be selected"))]
    pub card_ids: Vec<EntityId>,
    #[serde(default)]
    pub folder_id: Option<EntityId>,
}

/// DTO for deleting many cards.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "At least one card must be selected"))]
    pub card_ids: Vec<EntityId>,
}

/// Why one card in a bulk operation failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkFailure {
    pub card_id: EntityId,
    pub error: String,
}

/// Per-card outcome of a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkResult {
    pub succeeded: Vec<EntityId>,
    pub failed: Vec<BulkFailure>,
}

impl BulkResult {
    pub fn record<E: std::fmt::Display>(&mut self, card_id: EntityId, outcome: Result<bool, E>) {
        match outcome {
            Ok(true) => self.succeeded.push(card_id),
            Ok(false) => self.failed.push(BulkFailure {
                card_id,
                error: "Card not found".into(),
            }),
            Err(e) => self.failed.push(BulkFailure {
                card_id,
                error: e.to_string(),
            }),
        }
    }
}
