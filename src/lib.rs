//! Student registry
//!
//! A single-user record editor over a document store. The interesting part
//! is the form model: every keystroke revalidates one field, and the set of
//! legal operations (create/update/delete/search) is derived from the
//! validity of all fields together.
//!
//! - [`validators`]: pure format rules for identifier, name, phone and age
//! - [`form`]: field state, cached validation results and the operation gate
//! - [`gateway`]: the persistence boundary and its in-memory / JSON-file stores
//! - [`session`]: the controller that ties input, gating and the store together

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod session;
pub mod telemetry;
pub mod types;
pub mod validators;

pub use config::{RegistryConfig, StoreBackend};
pub use error::{GatewayError, SessionError, ValidationFailure};
pub use form::{recompute, FormState, Operation, OperationGate};
pub use gateway::{InMemoryGateway, JsonFileGateway, RecordGateway};
pub use session::{FormView, SessionController, SessionState, Status};
pub use types::{Class, FieldKind, NewRecord, Record, RecordId, Sex};
