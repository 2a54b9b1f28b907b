//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` struct matching the hosted table's row
//! - A `Deserialize` create DTO for inserts, with `validator` length rules
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod card;
pub mod card_data;
pub mod card_link;
pub mod card_type;
pub mod folder;
pub mod profile;
pub mod saved_search;
pub mod search;
pub mod template;
pub mod world;

/// Deserialize a nullable patch member so that an absent key, `null` and a
/// value stay distinguishable: absent is `None` (needs `#[serde(default)]`),
/// `null` is `Some(None)`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
