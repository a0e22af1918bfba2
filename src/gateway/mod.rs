//! Record gateway: the persistence boundary
//!
//! The session never calls a gateway unless the operation gate currently
//! allows the operation, so implementations may assume well-formed input.
//! Calls are blocking; there is no timeout or cancellation.

mod collection;
pub mod json_file;
pub mod memory;

pub use collection::{Collection, ObjectIdMinter};
pub use json_file::JsonFileGateway;
pub use memory::InMemoryGateway;

use crate::error::GatewayResult;
use crate::types::{NewRecord, Record, RecordId};

/// Create/read/update/delete/list over student records
pub trait RecordGateway {
    /// Insert a record and return the identifier the store assigned
    fn create(&mut self, record: NewRecord) -> GatewayResult<RecordId>;

    fn find_by_id(&self, id: &RecordId) -> GatewayResult<Record>;

    /// Overwrite every attribute of an existing record
    fn update(&mut self, id: &RecordId, record: NewRecord) -> GatewayResult<()>;

    fn delete(&mut self, id: &RecordId) -> GatewayResult<()>;

    /// All records in store order
    fn list_all(&self) -> GatewayResult<Vec<Record>>;
}

impl<G: RecordGateway + ?Sized> RecordGateway for Box<G> {
    fn create(&mut self, record: NewRecord) -> GatewayResult<RecordId> {
        (**self).create(record)
    }

    fn find_by_id(&self, id: &RecordId) -> GatewayResult<Record> {
        (**self).find_by_id(id)
    }

    fn update(&mut self, id: &RecordId, record: NewRecord) -> GatewayResult<()> {
        (**self).update(id, record)
    }

    fn delete(&mut self, id: &RecordId) -> GatewayResult<()> {
        (**self).delete(id)
    }

    fn list_all(&self) -> GatewayResult<Vec<Record>> {
        (**self).list_all()
    }
}
