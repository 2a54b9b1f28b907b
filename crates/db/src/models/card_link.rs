//! Card link rows, read alongside card detail.

use serde::{Deserialize, Serialize};
use worldweaver_core::types::{EntityId, Timestamp};

use super::card_type::CardTypeSummary;

/// A row from the `card_links` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLink {
    pub id: EntityId,
    pub from_card_id: EntityId,
    pub to_card_id: EntityId,
    pub relationship_type: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// The card at the other end of a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedCard {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub card_type: Option<CardTypeSummary>,
}

/// A link with the card at its other end embedded: `to_card` on outgoing
/// links, `from_card` on incoming ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLinkView {
    #[serde(flatten)]
    pub link: CardLink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_card: Option<LinkedCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_card: Option<LinkedCard>,
}
