//! A single editable field and its cached validation result

use crate::error::ValidationFailure;
use crate::types::{FieldKind, RecordId};
use crate::validators;

/// Normalized value of a text field that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Id(RecordId),
    Name(String),
    Phone(u64),
    Age(u32),
}

/// Run the validator that belongs to `kind`
pub fn validate_field(kind: FieldKind, text: &str) -> Result<FieldValue, ValidationFailure> {
    match kind {
        FieldKind::Id => validators::validate_id(text).map(FieldValue::Id),
        FieldKind::Name => validators::validate_name(text).map(FieldValue::Name),
        FieldKind::Phone => validators::validate_phone(text).map(FieldValue::Phone),
        FieldKind::Age => validators::validate_age(text).map(FieldValue::Age),
    }
}

/// Raw text plus the result of validating it.
///
/// The result is computed once per text change and cached; consumers read
/// `value()` instead of re-parsing `text()`. The error message is kept
/// separately because a field can be invalid without showing an error yet
/// (freshly reset), and can show a lookup message while its text is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    kind: FieldKind,
    text: String,
    value: Result<FieldValue, ValidationFailure>,
    error_message: String,
}

impl FormField {
    /// Empty field: invalid, but with no message shown
    pub fn empty(kind: FieldKind) -> Self {
        Self {
            kind,
            text: String::new(),
            value: validate_field(kind, ""),
            error_message: String::new(),
        }
    }

    /// Store new text and revalidate it
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.value = validate_field(self.kind, &self.text);
        self.error_message = match &self.value {
            Ok(_) => String::new(),
            Err(failure) => failure.to_string(),
        };
    }

    /// Fill from trusted data without running the validator
    pub(crate) fn load(&mut self, text: String, value: FieldValue) {
        self.text = text;
        self.value = Ok(value);
        self.error_message.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::empty(self.kind);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
    }

    pub fn clear_error(&mut self) {
        self.error_message.clear();
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Result<&FieldValue, ValidationFailure> {
        self.value.as_ref().map_err(|failure| *failure)
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_ok()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Empty string means nothing to show
    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_is_invalid_but_silent() {
        let field = FormField::empty(FieldKind::Age);
        assert!(!field.is_valid());
        assert!(field.is_blank());
        assert_eq!(field.error_message(), "");
    }

    #[test]
    fn set_text_caches_value_and_message() {
        let mut field = FormField::empty(FieldKind::Age);
        field.set_text("0");
        assert_eq!(field.value(), Err(ValidationFailure::NonPositiveAge));
        assert_eq!(field.error_message(), "The age must be greater than zero");

        field.set_text("21");
        assert_eq!(field.value(), Ok(&FieldValue::Age(21)));
        assert_eq!(field.error_message(), "");
    }

    #[test]
    fn clearing_text_shows_empty_id_message() {
        let mut field = FormField::empty(FieldKind::Id);
        field.set_text("65f0");
        assert_eq!(field.value(), Err(ValidationFailure::MalformedId));
        field.set_text("");
        assert_eq!(field.error_message(), "The ID field is empty");
    }

    #[test]
    fn lookup_message_does_not_change_validity() {
        let mut field = FormField::empty(FieldKind::Id);
        field.set_text("65f0c0ffee0000000000beef");
        field.set_error("not found");
        assert!(field.is_valid());
        assert_eq!(field.error_message(), "not found");
    }
}
