//! Core record types
//!
//! `Record` is what the store holds; `NewRecord` is the same attribute set
//! before the store has assigned an identifier. Documents keep the field
//! names the store has always used (`_id`, `Nombre`, `Telefono`, ...), so
//! the serde names differ from the Rust names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationFailure;
use crate::validators;

// ============================================================================
// Identifier
// ============================================================================

/// Store-assigned identifier: 24 lowercase hex characters (12 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Length of the textual form
    pub const LEN: usize = 24;

    /// Build from raw bytes minted by a store
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        RecordId(hex::encode(bytes))
    }

    /// Wrap text that has already passed [`validators::validate_id`]
    pub(crate) fn from_validated(text: &str) -> Self {
        RecordId(text.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validators::validate_id(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationFailure;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validators::validate_id(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Enumerated attributes
// ============================================================================

/// Error returned when a selection value names no known member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectionError(String);

impl fmt::Display for ParseSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseSelectionError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "Masculino")]
    Masculine,
    #[serde(rename = "Femenino")]
    Feminine,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Masculine, Sex::Feminine];

    pub fn name(&self) -> &'static str {
        match self {
            Sex::Masculine => "Masculine",
            Sex::Feminine => "Feminine",
        }
    }
}

impl FromStr for Sex {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "masculine" | "masculino" | "m" => Ok(Sex::Masculine),
            "feminine" | "femenino" | "f" => Ok(Sex::Feminine),
            other => Err(ParseSelectionError(format!(
                "Unknown sex '{}'. Valid values: masculine, feminine",
                other
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    #[default]
    #[serde(rename = "Sistemas")]
    Systems,
    #[serde(rename = "Industrial")]
    Industrial,
    #[serde(rename = "Ciencias")]
    Sciences,
}

impl Class {
    pub const ALL: [Class; 3] = [Class::Systems, Class::Industrial, Class::Sciences];

    pub fn name(&self) -> &'static str {
        match self {
            Class::Systems => "Systems",
            Class::Industrial => "Industrial",
            Class::Sciences => "Sciences",
        }
    }
}

impl FromStr for Class {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "systems" | "sistemas" => Ok(Class::Systems),
            "industrial" => Ok(Class::Industrial),
            "sciences" | "ciencias" => Ok(Class::Sciences),
            other => Err(ParseSelectionError(format!(
                "Unknown class '{}'. Valid values: systems, industrial, sciences",
                other
            ))),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Records
// ============================================================================

/// Student attributes without an identifier (create/update payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Telefono")]
    pub phone: u64,
    #[serde(rename = "Sexo", default)]
    pub sex: Sex,
    #[serde(rename = "Clase", default)]
    pub class: Class,
    #[serde(rename = "Edad")]
    pub age: u32,
}

impl NewRecord {
    /// Check the attributes against the same rules the form applies
    pub fn check(&self) -> Result<(), ValidationFailure> {
        if validators::validate_name(&self.name)? != self.name {
            return Err(ValidationFailure::InvalidName);
        }
        validators::validate_phone(&format!("{:010}", self.phone))?;
        if self.age == 0 {
            return Err(ValidationFailure::NonPositiveAge);
        }
        Ok(())
    }
}

/// A persisted student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: NewRecord,
}

impl Record {
    pub fn new(id: RecordId, fields: NewRecord) -> Self {
        Self { id, fields }
    }

    /// Phone as form text; phones are stored as integers, so leading zeros
    /// are restored by padding to ten digits
    pub fn phone_text(&self) -> String {
        format!("{:010}", self.fields.phone)
    }
}

/// One listing line: `<id>: <name> - <phone> - <sex> - <class> - <age>`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {} - {} - {} - {}",
            self.id,
            self.fields.name,
            self.fields.phone,
            self.fields.sex,
            self.fields.class,
            self.fields.age
        )
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Free-text form fields (sex and class are selections, not text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Id,
    Name,
    Phone,
    Age,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Id,
        FieldKind::Name,
        FieldKind::Phone,
        FieldKind::Age,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Id => "id",
            FieldKind::Name => "name",
            FieldKind::Phone => "phone",
            FieldKind::Age => "age",
        }
    }
}

impl FromStr for FieldKind {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(FieldKind::Id),
            "name" | "nombre" => Ok(FieldKind::Name),
            "phone" | "telefono" => Ok(FieldKind::Phone),
            "age" | "edad" => Ok(FieldKind::Age),
            other => Err(ParseSelectionError(format!("Unknown field '{}'", other))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
