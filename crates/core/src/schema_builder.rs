//! Card type editor: an ordered draft list of field definitions plus the
//! type's display attributes, validated as a whole on submit.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field_schema::{validate_schema, FieldKind, FieldSchema, FieldValidation, MAX_FIELD_KEY_LEN};
use crate::limits::{self, CARD_TYPE_DESCRIPTION_MAX, CARD_TYPE_NAME_MAX};

/// Icon a new card type starts with.
pub const DEFAULT_ICON: &str = "📄";

/// Colors a new card type picks from.
pub const CARD_TYPE_COLORS: &[&str] = &[
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
];

/// Pick a random color from [`CARD_TYPE_COLORS`].
pub fn random_color() -> String {
    CARD_TYPE_COLORS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CARD_TYPE_COLORS[0])
        .to_string()
}

/// The field every new card type starts with.
pub fn seed_field() -> FieldSchema {
    FieldSchema {
        required: true,
        description: Some("The name of this item".into()),
        ..FieldSchema::new("name", "Name", FieldKind::Text)
    }
}

/// Derive a field key from a label.
///
/// Lower-cases, drops every character other than `[a-z0-9]` and whitespace,
/// turns whitespace runs into `_` and keeps the first 50 characters.
/// `"Full Name!"` becomes `full_name`; a label of only symbols gives `""`.
pub fn derive_field_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_space = false;

    for c in label.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
                in_space = true;
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            key.push(c);
            in_space = false;
        }
    }

    key.chars().take(MAX_FIELD_KEY_LEN).collect()
}

/// Parse the options textarea: one option per line, trimmed, blanks dropped.
pub fn parse_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A card type ready to persist, or a template to start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct CardTypeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub schema: Vec<FieldSchema>,
}

/// Partial changes to one field. `None` leaves the member untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct FieldPatch {
    #[ts(optional)]
    pub key: Option<String>,
    #[ts(optional)]
    pub label: Option<String>,
    #[ts(optional, type = "string")]
    pub kind: Option<FieldKind>,
    #[ts(optional)]
    pub required: Option<bool>,
    #[ts(optional)]
    pub description: Option<String>,
    #[ts(optional)]
    pub options: Option<Vec<String>>,
    #[ts(optional)]
    pub validation: Option<FieldValidation>,
    #[ts(optional)]
    pub ref_type: Option<String>,
    #[ts(optional)]
    pub ai_prompt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Editable card type draft.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    fields: Vec<FieldSchema>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// A blank editor seeded with the `name` field.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            icon: DEFAULT_ICON.to_string(),
            color: random_color(),
            fields: vec![seed_field()],
        }
    }

    /// An editor opened on an existing card type or template.
    pub fn from_draft(draft: CardTypeDraft) -> Self {
        let mut builder = Self::new();
        builder.apply_template(draft);
        builder
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Replace name, description, icon, color and fields with a template's.
    pub fn apply_template(&mut self, template: CardTypeDraft) {
        self.name = template.name;
        self.description = template.description.unwrap_or_default();
        self.icon = template.icon;
        self.color = template.color;
        self.fields = template.schema;
    }

    /// Append a blank text field.
    pub fn add_field(&mut self) {
        self.fields.push(FieldSchema {
            description: Some(String::new()),
            ..FieldSchema::new("", "", FieldKind::Text)
        });
    }

    /// Merge `patch` into the field at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn update_field(&mut self, index: usize, patch: FieldPatch) {
        let field = &mut self.fields[index];
        if let Some(key) = patch.key {
            field.key = key;
        }
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(kind) = patch.kind {
            field.kind = kind;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(description) = patch.description {
            field.description = Some(description);
        }
        if let Some(options) = patch.options {
            field.options = Some(options);
        }
        if let Some(validation) = patch.validation {
            field.validation = Some(validation);
        }
        if let Some(ref_type) = patch.ref_type {
            field.ref_type = Some(ref_type);
        }
        if let Some(ai_prompt) = patch.ai_prompt {
            field.ai_prompt = Some(ai_prompt);
        }
    }

    /// Set a field's label, deriving its key while the key is still empty.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_label(&mut self, index: usize, label: &str) {
        let key = self.fields[index]
            .key
            .is_empty()
            .then(|| derive_field_key(label));
        self.update_field(
            index,
            FieldPatch {
                label: Some(label.to_string()),
                key,
                ..Default::default()
            },
        );
    }

    /// Remove the field at `index`. The last remaining field cannot be removed.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldSchema, CoreError> {
        if self.fields.len() <= 1 {
            return Err(CoreError::Validation("At least one field is required".into()));
        }
        if index >= self.fields.len() {
            return Err(CoreError::Validation(format!("No field at position {index}")));
        }
        Ok(self.fields.remove(index))
    }

    /// Swap the field with its neighbour. Moving past either end does nothing.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        if let Some(target) = target {
            if index < self.fields.len() && target < self.fields.len() {
                self.fields.swap(index, target);
            }
        }
    }

    /// Validate the whole draft and produce the record to persist.
    pub fn submit(&self) -> Result<CardTypeDraft, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Card type name is required".into()));
        }
        if self.fields.is_empty() {
            return Err(CoreError::Validation("At least one field is required".into()));
        }
        limits::validate_required("Card type name", name, CARD_TYPE_NAME_MAX)?;

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        limits::validate_optional(
            "Card type description",
            description.as_deref(),
            CARD_TYPE_DESCRIPTION_MAX,
        )?;

        validate_schema(&self.fields)?;

        Ok(CardTypeDraft {
            name: name.to_string(),
            description,
            icon: self.icon.clone(),
            color: self.color.clone(),
            schema: self.fields.clone(),
        })
    }
}
