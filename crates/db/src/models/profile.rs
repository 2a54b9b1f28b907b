//! User profile model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::types::{EntityId, Timestamp};

/// A row from the `profiles` table. `id` matches the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: String,
    pub ai_credits_used: i64,
    pub storage_bytes_used: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating the caller's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[validate(url(message = "Avatar URL must be a valid URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
