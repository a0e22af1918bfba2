//! Form model
//!
//! Raw input flows one way: text -> validator -> [`FormField`] -> [`recompute`]
//! -> [`OperationGate`].

pub mod field;
pub mod gate;
pub mod state;

pub use field::{validate_field, FieldValue, FormField};
pub use gate::{recompute, Operation, OperationGate};
pub use state::{FormSnapshot, FormState};
