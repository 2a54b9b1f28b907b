//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&ServiceConn` as the first argument.

use serde::Serialize;
use worldweaver_core::types::Timestamp;

pub mod card_data_repo;
pub mod card_repo;
pub mod card_type_repo;
pub mod folder_repo;
pub mod profile_repo;
pub mod saved_search_repo;
pub mod search_repo;
pub mod world_repo;

pub use card_data_repo::CardDataRepo;
pub use card_repo::CardRepo;
pub use card_type_repo::CardTypeRepo;
pub use folder_repo::FolderRepo;
pub use profile_repo::ProfileRepo;
pub use saved_search_repo::SavedSearchRepo;
pub use search_repo::SearchRepo;
pub use world_repo::WorldRepo;

/// A write body with `updated_at` set to the write time.
#[derive(Debug, Serialize)]
pub(crate) struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    pub fields: &'a T,
    pub updated_at: Timestamp,
}

impl<'a, T: Serialize> Stamped<'a, T> {
    pub fn now(fields: &'a T) -> Self {
        Self {
            fields,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// An insert body with both timestamps set to the write time.
#[derive(Debug, Serialize)]
pub(crate) struct Created<'a, T: Serialize> {
    #[serde(flatten)]
    pub fields: &'a T,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'a, T: Serialize> Created<'a, T> {
    pub fn now(fields: &'a T) -> Self {
        let now = chrono::Utc::now();
        Self {
            fields,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_flatten_into_body() {
        let body = serde_json::json!({"name": "Places"});
        let json = serde_json::to_value(Created::now(&body)).unwrap();
        assert_eq!(json["name"], "Places");
        assert_eq!(json["created_at"], json["updated_at"]);

        let json = serde_json::to_value(Stamped::now(&body)).unwrap();
        assert!(json.get("created_at").is_none());
        assert!(json.get("updated_at").is_some());
    }
}
