//! Schema-driven card form: control descriptions, edit dispatch and
//! submission checks.
//!
//! [`render_control`] turns one [`FieldSchema`] plus the current values into
//! a [`FieldControl`] the frontend draws. Edits come back as [`FieldEdit`]s
//! and are written into the value map by [`CardForm::apply`]. Required-field
//! and bound checks run only on [`CardForm::validate`], never while
//! rendering.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldViolation};
use crate::field_schema::{FieldKind, FieldSchema};
use crate::field_value::{initial_values, FieldValue, FieldValues, DEFAULT_COLOR};

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Whether `value` is a `#rrggbb` color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// HTML input flavour for single-line text controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TextInputType {
    Text,
    Url,
    Email,
}

/// One checkbox of a multi-select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct OptionState {
    pub label: String,
    pub checked: bool,
}

/// The input control for one field, with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(tag = "control", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldControl {
    TextInput {
        multiline: bool,
        input_type: TextInputType,
        max_length: Option<usize>,
        value: String,
    },
    /// `min`/`max` are native input bounds; the value is never clamped.
    NumberInput {
        min: Option<f64>,
        max: Option<f64>,
        value: Option<f64>,
    },
    Toggle {
        caption: String,
        checked: bool,
    },
    Select {
        options: Vec<String>,
        /// True when nothing is selected and the empty placeholder shows.
        placeholder: bool,
        value: Option<String>,
    },
    MultiSelect {
        options: Vec<OptionState>,
    },
    DatePicker {
        include_time: bool,
        value: String,
    },
    /// Swatch and hex text read the same stored value. The swatch falls back
    /// to black while the text is not yet a complete `#rrggbb`.
    ColorPicker {
        swatch: String,
        hex_text: String,
    },
    ImageUrl {
        url: String,
    },
}

/// A field definition paired with the control that edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct RenderedField {
    pub key: String,
    pub label: String,
    pub required: bool,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub control: FieldControl,
}

fn display_text(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::Number(n)) => n.to_string(),
        Some(FieldValue::Bool(b)) => b.to_string(),
        Some(FieldValue::List(items)) => items.join(", "),
        None => String::new(),
    }
}

fn text_input(field: &FieldSchema, value: Option<&FieldValue>, multiline: bool, input_type: TextInputType) -> FieldControl {
    FieldControl::TextInput {
        multiline,
        input_type,
        max_length: field.max_length(),
        value: display_text(value),
    }
}

/// Select the control for `field` and configure it from the current values.
pub fn render_control(field: &FieldSchema, values: &FieldValues) -> FieldControl {
    let current = values.get(&field.key);

    match &field.kind {
        FieldKind::Text => text_input(field, current, false, TextInputType::Text),
        FieldKind::LongText | FieldKind::RichText => {
            text_input(field, current, true, TextInputType::Text)
        }
        FieldKind::Url => text_input(field, current, false, TextInputType::Url),
        FieldKind::Email => text_input(field, current, false, TextInputType::Email),
        FieldKind::Number => FieldControl::NumberInput {
            min: field.min(),
            max: field.max(),
            value: match current {
                Some(FieldValue::Number(n)) => Some(*n),
                Some(FieldValue::Text(s)) => s.trim().parse().ok(),
                _ => None,
            },
        },
        FieldKind::Boolean => FieldControl::Toggle {
            caption: field
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(&field.label)
                .to_string(),
            checked: current.and_then(FieldValue::as_bool).unwrap_or(false),
        },
        FieldKind::Select => {
            let value = current
                .and_then(FieldValue::as_text)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            FieldControl::Select {
                options: field.options().to_vec(),
                placeholder: value.is_none(),
                value,
            }
        }
        FieldKind::MultiSelect => {
            let checked = current.and_then(FieldValue::as_list).unwrap_or(&[]);
            FieldControl::MultiSelect {
                options: field
                    .options()
                    .iter()
                    .map(|label| OptionState {
                        label: label.clone(),
                        checked: checked.contains(label),
                    })
                    .collect(),
            }
        }
        FieldKind::Date => FieldControl::DatePicker {
            include_time: false,
            value: display_text(current),
        },
        FieldKind::Datetime => FieldControl::DatePicker {
            include_time: true,
            value: display_text(current),
        },
        FieldKind::Color => {
            let hex_text = display_text(current);
            let swatch = if is_hex_color(&hex_text) {
                hex_text.clone()
            } else {
                DEFAULT_COLOR.to_string()
            };
            FieldControl::ColorPicker { swatch, hex_text }
        }
        FieldKind::Image => FieldControl::ImageUrl {
            url: display_text(current),
        },
        FieldKind::File | FieldKind::Reference | FieldKind::Location | FieldKind::Unknown(_) => {
            text_input(field, current, false, TextInputType::Text)
        }
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// A user edit to one field, as sent by a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldEdit {
    SetText(String),
    /// `None` clears the number input.
    SetNumber(Option<f64>),
    SetBool(bool),
    /// `None` picks the empty placeholder.
    Select(Option<String>),
    ToggleOption(String),
    SetColor(String),
}

impl FieldEdit {
    fn name(&self) -> &'static str {
        match self {
            Self::SetText(_) => "set_text",
            Self::SetNumber(_) => "set_number",
            Self::SetBool(_) => "set_bool",
            Self::Select(_) => "select",
            Self::ToggleOption(_) => "toggle_option",
            Self::SetColor(_) => "set_color",
        }
    }

    /// Compute the field's new value. `Ok(None)` means the value is cleared.
    pub fn resolve(
        self,
        field: &FieldSchema,
        current: Option<&FieldValue>,
    ) -> Result<Option<FieldValue>, CoreError> {
        let op = self.name();
        let mismatch = || {
            CoreError::Validation(format!(
                "Field '{}' ({}) does not accept {op}",
                field.key, field.kind
            ))
        };

        match (self, &field.kind) {
            (Self::SetNumber(n), FieldKind::Number) => Ok(n.map(FieldValue::Number)),
            (Self::SetBool(b), FieldKind::Boolean) => Ok(Some(FieldValue::Bool(b))),
            (Self::Select(choice), FieldKind::Select) => {
                Ok(Some(FieldValue::Text(choice.unwrap_or_default())))
            }
            (Self::ToggleOption(option), FieldKind::MultiSelect) => {
                if !field.options().contains(&option) {
                    return Err(CoreError::Validation(format!(
                        "'{option}' is not an option of field '{}'",
                        field.key
                    )));
                }
                let mut selected = current
                    .and_then(FieldValue::as_list)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                if selected.contains(&option) {
                    selected.retain(|s| s != &option);
                } else {
                    selected.push(option);
                }
                Ok(Some(FieldValue::List(selected)))
            }
            (Self::SetColor(hex), FieldKind::Color) => Ok(Some(FieldValue::Text(hex))),
            (Self::SetText(mut text), kind) if accepts_text(kind) => {
                if kind.is_textual() {
                    if let Some(max) = field.max_length() {
                        if let Some((cut, _)) = text.char_indices().nth(max) {
                            text.truncate(cut);
                        }
                    }
                }
                Ok(Some(FieldValue::Text(text)))
            }
            _ => Err(mismatch()),
        }
    }
}

fn accepts_text(kind: &FieldKind) -> bool {
    kind.is_textual()
        || matches!(
            kind,
            FieldKind::Date
                | FieldKind::Datetime
                | FieldKind::Image
                | FieldKind::File
                | FieldKind::Reference
                | FieldKind::Location
                | FieldKind::Unknown(_)
        )
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Editable form state for one card: its type's schema plus a value map.
#[derive(Debug, Clone)]
pub struct CardForm {
    schema: Vec<FieldSchema>,
    values: FieldValues,
}

impl CardForm {
    /// A blank form with every field at its kind default.
    pub fn new(schema: Vec<FieldSchema>) -> Self {
        let values = initial_values(&schema);
        Self { schema, values }
    }

    /// A form pre-filled with stored values. Values for keys the schema no
    /// longer has are dropped.
    pub fn with_values(schema: Vec<FieldSchema>, stored: FieldValues) -> Self {
        let mut form = Self::new(schema);
        for (key, value) in stored {
            if form.field(&key).is_some() {
                form.values.insert(key, value);
            }
        }
        form
    }

    pub fn schema(&self) -> &[FieldSchema] {
        &self.schema
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn into_values(self) -> FieldValues {
        self.values
    }

    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.schema.iter().find(|f| f.key == key)
    }

    /// Render every field in schema order.
    pub fn controls(&self) -> Vec<RenderedField> {
        self.schema
            .iter()
            .map(|field| RenderedField {
                key: field.key.clone(),
                label: field.label.clone(),
                required: field.required,
                description: field.description.clone(),
                control: render_control(field, &self.values),
            })
            .collect()
    }

    /// Apply one control edit and write the result back under `key`.
    pub fn apply(&mut self, key: &str, edit: FieldEdit) -> Result<(), CoreError> {
        let field = self
            .field(key)
            .ok_or_else(|| CoreError::Validation(format!("Unknown field '{key}'")))?;

        match edit.resolve(field, self.values.get(key))? {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.shift_remove(key);
            }
        }
        Ok(())
    }

    /// Overwrite values wholesale, as when a client submits the full map.
    ///
    /// Unknown keys are rejected together; nothing is written when any key is
    /// unknown.
    pub fn merge(&mut self, incoming: FieldValues) -> Result<(), CoreError> {
        let unknown: Vec<FieldViolation> = incoming
            .keys()
            .filter(|key| self.field(key).is_none())
            .map(|key| FieldViolation::new(key.as_str(), format!("Unknown field '{key}'")))
            .collect();
        if !unknown.is_empty() {
            return Err(CoreError::InvalidFields(unknown));
        }
        self.values.extend(incoming);
        Ok(())
    }

    /// Submission-time checks over every field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let violations = validate_values(&self.schema, &self.values);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(violations))
        }
    }
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Check a value map against its schema and return every violation.
///
/// Blank optional fields are skipped. A field's `validation.message`
/// replaces the default wording of its non-required violations.
pub fn validate_values(schema: &[FieldSchema], values: &FieldValues) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for field in schema {
        let value = values.get(&field.key).filter(|v| !v.is_blank());

        let Some(value) = value else {
            if field.required {
                violations.push(FieldViolation::new(
                    &field.key,
                    format!("{} is required", field.label),
                ));
            }
            continue;
        };

        if let Some(message) = check_value(field, value) {
            let message = field
                .custom_message()
                .map(str::to_string)
                .unwrap_or(message);
            violations.push(FieldViolation::new(&field.key, message));
        }
    }

    violations
}

fn check_value(field: &FieldSchema, value: &FieldValue) -> Option<String> {
    match &field.kind {
        kind if kind.is_textual() => {
            let Some(text) = value.as_text() else {
                return Some("Must be text".into());
            };
            if let Some(max) = field.max_length() {
                if text.chars().count() > max {
                    return Some(format!("Must be no more than {max} characters"));
                }
            }
            if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
                match Regex::new(pattern) {
                    Ok(re) if !re.is_match(text) => return Some("Invalid format".into()),
                    Err(_) => return Some(format!("Invalid validation pattern '{pattern}'")),
                    Ok(_) => {}
                }
            }
            None
        }
        FieldKind::Number => {
            let Some(n) = value.as_number().filter(|n| n.is_finite()) else {
                return Some("Must be a number".into());
            };
            if let Some(min) = field.min() {
                if n < min {
                    return Some(format!("Must be at least {min}"));
                }
            }
            if let Some(max) = field.max() {
                if n > max {
                    return Some(format!("Must be at most {max}"));
                }
            }
            None
        }
        FieldKind::Boolean => value.as_bool().map_or(Some("Must be true or false".into()), |_| None),
        FieldKind::Select => {
            let Some(choice) = value.as_text() else {
                return Some("Must be a single option".into());
            };
            let options = field.options();
            (!options.is_empty() && !options.iter().any(|o| o == choice))
                .then(|| format!("'{choice}' is not one of the allowed options"))
        }
        FieldKind::MultiSelect => {
            let Some(chosen) = value.as_list() else {
                return Some("Must be a list of options".into());
            };
            let options = field.options();
            chosen
                .iter()
                .find(|c| !options.contains(c))
                .map(|c| format!("'{c}' is not one of the allowed options"))
        }
        FieldKind::Date => {
            let ok = value
                .as_text()
                .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
            (!ok).then(|| "Must be a date (YYYY-MM-DD)".into())
        }
        FieldKind::Datetime => {
            let ok = value.as_text().is_some_and(|s| {
                chrono::DateTime::parse_from_rfc3339(s).is_ok()
                    || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
                    || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
            });
            (!ok).then(|| "Must be a date and time".into())
        }
        FieldKind::Color => {
            let ok = value.as_text().is_some_and(is_hex_color);
            (!ok).then(|| "Must be a hex color like #a1b2c3".into())
        }
        _ => value.as_text().map_or(Some("Must be text".into()), |_| None),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::field_schema::FieldValidation;

    fn field(key: &str, kind: FieldKind) -> FieldSchema {
        FieldSchema::new(key, key.to_uppercase(), kind)
    }

    fn with_options(mut f: FieldSchema, options: &[&str]) -> FieldSchema {
        f.options = Some(options.iter().map(|s| s.to_string()).collect());
        f
    }

    fn bounded(mut f: FieldSchema, min: Option<f64>, max: Option<f64>) -> FieldSchema {
        f.validation = Some(FieldValidation {
            min,
            max,
            ..Default::default()
        });
        f
    }

    // --- Rendering ---

    #[test]
    fn text_control_carries_max_length() {
        let f = bounded(field("name", FieldKind::Text), None, Some(20.0));
        let control = render_control(&f, &FieldValues::new());
        assert_eq!(
            control,
            FieldControl::TextInput {
                multiline: false,
                input_type: TextInputType::Text,
                max_length: Some(20),
                value: String::new(),
            }
        );
    }

    #[test]
    fn long_text_is_multiline() {
        let control = render_control(&field("bio", FieldKind::LongText), &FieldValues::new());
        assert_matches!(control, FieldControl::TextInput { multiline: true, .. });
    }

    #[test]
    fn number_control_exposes_bounds_without_correcting() {
        let f = bounded(field("age", FieldKind::Number), Some(0.0), Some(120.0));
        let mut values = FieldValues::new();
        values.insert("age".into(), FieldValue::Number(500.0));
        assert_eq!(
            render_control(&f, &values),
            FieldControl::NumberInput {
                min: Some(0.0),
                max: Some(120.0),
                value: Some(500.0)
            }
        );
    }

    #[test]
    fn toggle_caption_prefers_description() {
        let mut f = field("alive", FieldKind::Boolean);
        assert_matches!(
            render_control(&f, &FieldValues::new()),
            FieldControl::Toggle { caption, checked: false } if caption == "ALIVE"
        );
        f.description = Some("Still breathing?".into());
        assert_matches!(
            render_control(&f, &FieldValues::new()),
            FieldControl::Toggle { caption, .. } if caption == "Still breathing?"
        );
    }

    #[test]
    fn select_shows_placeholder_when_empty() {
        let f = with_options(field("race", FieldKind::Select), &["Elf", "Orc"]);
        let mut values = FieldValues::new();
        values.insert("race".into(), FieldValue::text(""));
        assert_matches!(
            render_control(&f, &values),
            FieldControl::Select { placeholder: true, value: None, .. }
        );
        values.insert("race".into(), FieldValue::text("Orc"));
        assert_matches!(
            render_control(&f, &values),
            FieldControl::Select { placeholder: false, value: Some(v), .. } if v == "Orc"
        );
    }

    #[test]
    fn multi_select_marks_checked_options() {
        let f = with_options(field("tags", FieldKind::MultiSelect), &["a", "b", "c"]);
        let mut values = FieldValues::new();
        values.insert("tags".into(), FieldValue::List(vec!["c".into(), "a".into()]));
        let FieldControl::MultiSelect { options } = render_control(&f, &values) else {
            panic!("expected multi-select");
        };
        let checked: Vec<bool> = options.iter().map(|o| o.checked).collect();
        assert_eq!(checked, [true, false, true]);
    }

    #[test]
    fn color_swatch_falls_back_while_text_is_partial() {
        let f = field("hue", FieldKind::Color);
        let mut values = FieldValues::new();
        values.insert("hue".into(), FieldValue::text("#ff00"));
        assert_eq!(
            render_control(&f, &values),
            FieldControl::ColorPicker {
                swatch: "#000000".into(),
                hex_text: "#ff00".into()
            }
        );
    }

    #[test]
    fn image_and_datetime_controls() {
        let values = FieldValues::new();
        assert_matches!(
            render_control(&field("portrait", FieldKind::Image), &values),
            FieldControl::ImageUrl { .. }
        );
        assert_matches!(
            render_control(&field("at", FieldKind::Datetime), &values),
            FieldControl::DatePicker { include_time: true, .. }
        );
    }

    // --- Edits ---

    #[test]
    fn toggling_checked_option_removes_only_that_option() {
        let f = with_options(field("tags", FieldKind::MultiSelect), &["a", "b", "c", "d"]);
        let mut form = CardForm::new(vec![f]);
        for o in ["a", "b", "c", "d"] {
            form.apply("tags", FieldEdit::ToggleOption(o.into())).unwrap();
        }
        form.apply("tags", FieldEdit::ToggleOption("b".into())).unwrap();
        assert_eq!(
            form.values()["tags"],
            FieldValue::List(vec!["a".into(), "c".into(), "d".into()])
        );
    }

    #[test]
    fn toggling_undeclared_option_is_rejected() {
        let f = with_options(field("tags", FieldKind::MultiSelect), &["a"]);
        let mut form = CardForm::new(vec![f]);
        assert_matches!(
            form.apply("tags", FieldEdit::ToggleOption("z".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn text_edit_is_cut_at_max_length() {
        let f = bounded(field("name", FieldKind::Text), None, Some(3.0));
        let mut form = CardForm::new(vec![f]);
        form.apply("name", FieldEdit::SetText("héllo".into())).unwrap();
        assert_eq!(form.values()["name"], FieldValue::text("hél"));
    }

    #[test]
    fn color_edit_updates_both_inputs() {
        let mut form = CardForm::new(vec![field("hue", FieldKind::Color)]);
        form.apply("hue", FieldEdit::SetColor("#12ab34".into())).unwrap();
        let control = &form.controls()[0].control;
        assert_eq!(
            control,
            &FieldControl::ColorPicker {
                swatch: "#12ab34".into(),
                hex_text: "#12ab34".into()
            }
        );
    }

    #[test]
    fn clearing_number_removes_value() {
        let mut form = CardForm::new(vec![field("age", FieldKind::Number)]);
        form.apply("age", FieldEdit::SetNumber(None)).unwrap();
        assert!(form.values().get("age").is_none());
    }

    #[test]
    fn mismatched_edit_and_unknown_key_are_rejected() {
        let mut form = CardForm::new(vec![field("age", FieldKind::Number)]);
        assert_matches!(
            form.apply("age", FieldEdit::SetText("old".into())),
            Err(CoreError::Validation(msg)) if msg.contains("set_text")
        );
        assert_matches!(
            form.apply("nope", FieldEdit::SetBool(true)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn stored_values_for_removed_fields_are_dropped() {
        let mut stored = FieldValues::new();
        stored.insert("name".into(), FieldValue::text("Aria"));
        stored.insert("gone".into(), FieldValue::text("x"));
        let form = CardForm::with_values(vec![field("name", FieldKind::Text)], stored);
        assert_eq!(form.values().len(), 1);
        assert_eq!(form.values()["name"], FieldValue::text("Aria"));
    }

    #[test]
    fn merge_rejects_unknown_keys_atomically() {
        let mut form = CardForm::new(vec![field("name", FieldKind::Text)]);
        let mut incoming = FieldValues::new();
        incoming.insert("name".into(), FieldValue::text("Aria"));
        incoming.insert("ghost".into(), FieldValue::text("boo"));
        assert_matches!(form.merge(incoming), Err(CoreError::InvalidFields(v)) if v[0].field == "ghost");
        assert_eq!(form.values()["name"], FieldValue::text(""));
    }

    // --- Validation ---

    #[test]
    fn required_text_must_be_filled() {
        let mut name = field("name", FieldKind::Text);
        name.required = true;
        let form = CardForm::new(vec![name, field("notes", FieldKind::Text)]);
        let err = form.validate().unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(v) if v.len() == 1 && v[0].message == "NAME is required");
    }

    #[test]
    fn number_bounds_are_checked_on_submit() {
        let f = bounded(field("age", FieldKind::Number), Some(0.0), Some(120.0));
        let mut values = FieldValues::new();
        values.insert("age".into(), FieldValue::Number(130.0));
        let violations = validate_values(&[f], &values);
        assert_eq!(violations, [FieldViolation::new("age", "Must be at most 120")]);
    }

    #[test]
    fn custom_message_replaces_default() {
        let mut f = field("code", FieldKind::Text);
        f.validation = Some(FieldValidation {
            pattern: Some("^[A-Z]{3}$".into()),
            message: Some("Use three capitals".into()),
            ..Default::default()
        });
        let mut values = FieldValues::new();
        values.insert("code".into(), FieldValue::text("abc"));
        assert_eq!(validate_values(&[f], &values)[0].message, "Use three capitals");
    }

    #[test]
    fn option_membership_dates_and_colors() {
        let schema = vec![
            with_options(field("race", FieldKind::Select), &["Elf"]),
            with_options(field("tags", FieldKind::MultiSelect), &["a"]),
            field("born", FieldKind::Date),
            field("hue", FieldKind::Color),
        ];
        let mut values = FieldValues::new();
        values.insert("race".into(), FieldValue::text("Troll"));
        values.insert("tags".into(), FieldValue::List(vec!["a".into(), "q".into()]));
        values.insert("born".into(), FieldValue::text("2024-13-01"));
        values.insert("hue".into(), FieldValue::text("red"));
        let fields: Vec<String> = validate_values(&schema, &values)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, ["race", "tags", "born", "hue"]);
    }

    #[test]
    fn default_form_with_no_required_fields_is_valid() {
        let schema = vec![
            field("name", FieldKind::Text),
            bounded(field("level", FieldKind::Number), Some(1.0), Some(10.0)),
            field("hue", FieldKind::Color),
        ];
        assert!(CardForm::new(schema).validate().is_ok());
    }
}
