//! Domain logic for WorldWeaver.
//!
//! Everything here is pure and in-memory: the card type field schema, the
//! form model that renders and validates card values, the schema builder,
//! the folder tree, search filter state and the toast store. The data access
//! and HTTP layers build on top of these types.

pub mod card_form;
pub mod error;
pub mod field_schema;
pub mod field_value;
pub mod folder_tree;
pub mod limits;
pub mod naming;
pub mod notifications;
pub mod schema_builder;
pub mod search;
pub mod types;
