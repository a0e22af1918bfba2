//! Operation gating
//!
//! Decides which operations are currently legal from field validity alone:
//!
//! ```text
//! Create  <- name, phone, age
//! Update  <- id, name, phone, age
//! Delete  <- id
//! Search  <- id
//! ```
//!
//! The gate is always derived through [`recompute`]; nothing stores it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::FormState;
use crate::types::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Search,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Search,
    ];

    /// Fields that must be valid for this operation to be enabled
    pub fn required_fields(&self) -> &'static [FieldKind] {
        match self {
            Operation::Create => &[FieldKind::Name, FieldKind::Phone, FieldKind::Age],
            Operation::Update => &[
                FieldKind::Id,
                FieldKind::Name,
                FieldKind::Phone,
                FieldKind::Age,
            ],
            Operation::Delete | Operation::Search => &[FieldKind::Id],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Search => "Search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enabled/disabled state of the four operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationGate {
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub can_search: bool,
}

impl OperationGate {
    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Create => self.can_create,
            Operation::Update => self.can_update,
            Operation::Delete => self.can_delete,
            Operation::Search => self.can_search,
        }
    }

    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.allows(*op))
            .collect()
    }
}

/// Compute all four flags together from the current form
pub fn recompute(form: &FormState) -> OperationGate {
    let allowed = |op: Operation| form.all_valid(op.required_fields());
    OperationGate {
        can_create: allowed(Operation::Create),
        can_update: allowed(Operation::Update),
        can_delete: allowed(Operation::Delete),
        can_search: allowed(Operation::Search),
    }
}
