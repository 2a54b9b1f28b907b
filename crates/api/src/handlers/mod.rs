pub mod card_types;
pub mod cards;
pub mod folders;
pub mod profile;
pub mod saved_searches;
pub mod search;
pub mod worlds;
