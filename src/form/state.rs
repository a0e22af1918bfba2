//! Form state: one field per record attribute plus the identifier

use tracing::debug;

use super::field::{FieldValue, FormField};
use crate::types::{Class, FieldKind, NewRecord, Record, RecordId, Sex};

/// Normalized values of whichever fields are currently valid.
///
/// Invalid fields are `None`; callers that need a complete record use
/// [`FormSnapshot::into_new_record`] and consult the field errors when it
/// returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub phone: Option<u64>,
    pub age: Option<u32>,
    pub sex: Sex,
    pub class: Class,
}

impl FormSnapshot {
    pub fn into_new_record(self) -> Option<NewRecord> {
        Some(NewRecord {
            name: self.name?,
            phone: self.phone?,
            sex: self.sex,
            class: self.class,
            age: self.age?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    id: FormField,
    name: FormField,
    phone: FormField,
    age: FormField,
    sex: Sex,
    class: Class,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// All text fields empty, selections at their defaults
    pub fn new() -> Self {
        Self {
            id: FormField::empty(FieldKind::Id),
            name: FormField::empty(FieldKind::Name),
            phone: FormField::empty(FieldKind::Phone),
            age: FormField::empty(FieldKind::Age),
            sex: Sex::default(),
            class: Class::default(),
        }
    }

    pub fn field(&self, kind: FieldKind) -> &FormField {
        match kind {
            FieldKind::Id => &self.id,
            FieldKind::Name => &self.name,
            FieldKind::Phone => &self.phone,
            FieldKind::Age => &self.age,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut FormField {
        match kind {
            FieldKind::Id => &mut self.id,
            FieldKind::Name => &mut self.name,
            FieldKind::Phone => &mut self.phone,
            FieldKind::Age => &mut self.age,
        }
    }

    /// Store raw text for a field and revalidate it
    pub fn set_text(&mut self, kind: FieldKind, text: impl Into<String>) {
        let field = self.field_mut(kind);
        field.set_text(text);
        debug!(
            field = %kind,
            valid = field.is_valid(),
            error = field.error_message(),
            "field revalidated"
        );
    }

    pub fn select_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    pub fn select_class(&mut self, class: Class) {
        self.class = class;
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn is_valid(&self, kind: FieldKind) -> bool {
        self.field(kind).is_valid()
    }

    pub fn all_valid(&self, kinds: &[FieldKind]) -> bool {
        kinds.iter().all(|kind| self.is_valid(*kind))
    }

    pub fn any_blank(&self, kinds: &[FieldKind]) -> bool {
        kinds.iter().any(|kind| self.field(*kind).is_blank())
    }

    /// Identifier, if the id field currently holds a well-formed one
    pub fn record_id(&self) -> Option<RecordId> {
        match self.id.value() {
            Ok(FieldValue::Id(id)) => Some(id.clone()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            id: self.record_id(),
            name: match self.name.value() {
                Ok(FieldValue::Name(name)) => Some(name.clone()),
                _ => None,
            },
            phone: match self.phone.value() {
                Ok(FieldValue::Phone(phone)) => Some(*phone),
                _ => None,
            },
            age: match self.age.value() {
                Ok(FieldValue::Age(age)) => Some(*age),
                _ => None,
            },
            sex: self.sex,
            class: self.class,
        }
    }

    /// Empty every field, identifier included, and restore default selections
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Empty the attributes that depend on the identifier, keeping its text
    pub fn clear_dependent(&mut self) {
        self.name.reset();
        self.phone.reset();
        self.age.reset();
        self.sex = Sex::default();
        self.class = Class::default();
    }

    /// Drop the error messages of the attribute fields (not the identifier)
    pub fn clear_dependent_errors(&mut self) {
        self.name.clear_error();
        self.phone.clear_error();
        self.age.clear_error();
    }

    pub fn set_error(&mut self, kind: FieldKind, message: impl Into<String>) {
        self.field_mut(kind).set_error(message);
    }

    /// Populate every field from a stored record without revalidating.
    ///
    /// The id field's text becomes the record's canonical lowercase
    /// identifier, replacing whatever casing was typed to find it.
    pub fn load_record(&mut self, record: &Record) {
        self.id
            .load(record.id.to_string(), FieldValue::Id(record.id.clone()));
        self.name.load(
            record.fields.name.clone(),
            FieldValue::Name(record.fields.name.clone()),
        );
        self.phone
            .load(record.phone_text(), FieldValue::Phone(record.fields.phone));
        self.age
            .load(record.fields.age.to_string(), FieldValue::Age(record.fields.age));
        self.sex = record.fields.sex;
        self.class = record.fields.class;
    }

    /// `(field, message)` for each text field, empty message meaning valid
    pub fn errors(&self) -> Vec<(FieldKind, String)> {
        FieldKind::ALL
            .iter()
            .map(|kind| (*kind, self.field(*kind).error_message().to_string()))
            .collect()
    }
}
