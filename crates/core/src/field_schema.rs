//! Card type field schema: field kinds, validation bounds and schema checks.
//!
//! A card type's `schema` is an ordered array of [`FieldSchema`] entries that
//! the hosted service stores verbatim. Order is display order.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldViolation};

/// Maximum length of a field key.
pub const MAX_FIELD_KEY_LEN: usize = 50;

/// Pattern every field key must match.
pub const FIELD_KEY_PATTERN: &str = "^[a-z][a-z0-9_]*$";

static FIELD_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIELD_KEY_PATTERN).expect("field key pattern is valid"));

// ---------------------------------------------------------------------------
// Field kind
// ---------------------------------------------------------------------------

/// The data type of a field.
///
/// Serialized as its snake_case tag. Tags this build does not know are kept
/// in [`FieldKind::Unknown`] so they survive a read/write cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    LongText,
    RichText,
    Number,
    Boolean,
    Select,
    MultiSelect,
    Date,
    Datetime,
    Url,
    Email,
    Image,
    File,
    Reference,
    Location,
    Color,
    Unknown(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Url => "url",
            Self::Email => "email",
            Self::Image => "image",
            Self::File => "file",
            Self::Reference => "reference",
            Self::Location => "location",
            Self::Color => "color",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this kind draws its values from the field's `options`.
    pub fn uses_options(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }

    /// Whether this kind stores free text, so that `validation.max` is a
    /// character limit and `validation.pattern` applies.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::LongText | Self::RichText | Self::Url | Self::Email
        )
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => Self::Text,
            "long_text" => Self::LongText,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "url" => Self::Url,
            "email" => Self::Email,
            "image" => Self::Image,
            "file" => Self::File,
            "reference" => Self::Reference,
            "location" => Self::Location,
            "color" => Self::Color,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field kind offered in the card type editor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KindChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// The kinds the card type editor lets users pick, in menu order.
pub const EDITOR_KINDS: &[KindChoice] = &[
    KindChoice { value: "text", label: "Text", description: "Single line text input" },
    KindChoice { value: "long_text", label: "Long Text", description: "Multi-line text area" },
    KindChoice { value: "number", label: "Number", description: "Numeric input" },
    KindChoice { value: "boolean", label: "Yes/No", description: "True/false checkbox" },
    KindChoice { value: "select", label: "Dropdown", description: "Select from predefined options" },
    KindChoice { value: "multi_select", label: "Multi-Select", description: "Choose multiple options" },
    KindChoice { value: "date", label: "Date", description: "Date picker" },
    KindChoice { value: "image", label: "Image", description: "Image upload" },
    KindChoice { value: "color", label: "Color", description: "Color picker" },
];

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// Optional bounds attached to a field.
///
/// `min`/`max` are numeric bounds for `number` fields and maximum character
/// counts for text fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

/// Declarative definition of one card attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    #[ts(type = "string")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ref_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ai_prompt: Option<String>,
}

impl FieldSchema {
    /// A field with only the mandatory members set.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            description: None,
            default_value: None,
            validation: None,
            options: None,
            ref_type: None,
            ai_prompt: None,
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    pub fn min(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.max)
    }

    /// `validation.max` as a character limit, for text kinds.
    pub fn max_length(&self) -> Option<usize> {
        self.max()
            .filter(|m| m.is_finite() && *m >= 0.0)
            .map(|m| m as usize)
    }

    /// Custom violation message, if the schema author supplied one.
    pub fn custom_message(&self) -> Option<&str> {
        self.validation
            .as_ref()
            .and_then(|v| v.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a single field key against [`FIELD_KEY_PATTERN`] and the length cap.
pub fn is_valid_field_key(key: &str) -> bool {
    key.len() <= MAX_FIELD_KEY_LEN && FIELD_KEY_RE.is_match(key)
}

/// Validate a whole schema array before it is persisted.
///
/// Collects every problem rather than stopping at the first:
/// - the schema must have at least one field;
/// - keys must match the key pattern and be unique;
/// - labels must not be blank;
/// - kinds must be known;
/// - select kinds must declare at least one option;
/// - `validation.min` must not exceed `validation.max`;
/// - `validation.pattern` must compile.
pub fn validate_schema(fields: &[FieldSchema]) -> Result<(), CoreError> {
    if fields.is_empty() {
        return Err(CoreError::Validation(
            "At least one field is required".into(),
        ));
    }

    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let name = if field.key.is_empty() {
            format!("fields[{index}]")
        } else {
            field.key.clone()
        };

        if !is_valid_field_key(&field.key) {
            violations.push(FieldViolation::new(
                &name,
                "Field key must start with a letter and contain only lowercase letters, \
                 numbers, and underscores",
            ));
        } else if !seen.insert(field.key.as_str()) {
            violations.push(FieldViolation::new(
                &name,
                format!("Duplicate field key '{}'", field.key),
            ));
        }

        if field.label.trim().is_empty() {
            violations.push(FieldViolation::new(&name, "Field label is required"));
        }

        if let FieldKind::Unknown(tag) = &field.kind {
            violations.push(FieldViolation::new(
                &name,
                format!("Unknown field kind '{tag}'"),
            ));
        }

        if field.kind.uses_options() && field.options().is_empty() {
            violations.push(FieldViolation::new(
                &name,
                format!("Field '{}' needs at least one option", field.label),
            ));
        }

        if let (Some(min), Some(max)) = (field.min(), field.max()) {
            if min > max {
                violations.push(FieldViolation::new(
                    &name,
                    format!("Minimum ({min}) must not exceed maximum ({max})"),
                ));
            }
        }

        if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
            if let Err(e) = Regex::new(pattern) {
                violations.push(FieldViolation::new(
                    &name,
                    format!("Invalid validation pattern: {e}"),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(violations))
    }
}
