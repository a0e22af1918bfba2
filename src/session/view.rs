//! What the presentation layer renders after every change

use serde::Serialize;
use std::fmt;

use super::SessionState;
use crate::form::{FormState, OperationGate};
use crate::types::{Class, FieldKind, Sex};

/// Outcome line shown under the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Info(message) | Status::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: FieldKind,
    pub text: String,
    /// Empty when there is nothing to show
    pub error: String,
}

/// Snapshot of the session for rendering: field text and errors, the
/// operation gate, the current status and the record listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub state: SessionState,
    pub fields: Vec<FieldView>,
    pub sex: Sex,
    pub class: Class,
    pub gate: OperationGate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub listing: Vec<String>,
}

impl FormView {
    pub(crate) fn build(
        state: SessionState,
        form: &FormState,
        gate: OperationGate,
        status: Option<Status>,
        listing: Vec<String>,
    ) -> Self {
        let fields = FieldKind::ALL
            .iter()
            .map(|kind| {
                let field = form.field(*kind);
                FieldView {
                    field: *kind,
                    text: field.text().to_string(),
                    error: field.error_message().to_string(),
                }
            })
            .collect();

        Self {
            state,
            fields,
            sex: form.sex(),
            class: form.class(),
            gate,
            status,
            listing,
        }
    }

    pub fn field(&self, kind: FieldKind) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == kind)
    }

    /// Error text for a field, empty when valid or not yet shown
    pub fn error(&self, kind: FieldKind) -> &str {
        self.field(kind).map(|view| view.error.as_str()).unwrap_or("")
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for view in &self.fields {
            write!(f, "{:>6}: {}", view.field.name(), view.text)?;
            if !view.error.is_empty() {
                write!(f, "    [{}]", view.error)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{:>6}: {}", "sex", self.sex)?;
        writeln!(f, "{:>6}: {}", "class", self.class)?;

        let flag = |on: bool| if on { "on" } else { "off" };
        writeln!(
            f,
            "create={} update={} delete={} search={}",
            flag(self.gate.can_create),
            flag(self.gate.can_update),
            flag(self.gate.can_delete),
            flag(self.gate.can_search)
        )?;

        if let Some(status) = &self.status {
            let prefix = if status.is_error() { "error" } else { "ok" };
            writeln!(f, "{}: {}", prefix, status.message())?;
        }
        Ok(())
    }
}
