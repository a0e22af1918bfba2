//! Volatile record store

use tracing::debug;

use super::collection::Collection;
use super::RecordGateway;
use crate::error::GatewayResult;
use crate::types::{NewRecord, Record, RecordId};

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    collection: Collection,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            collection: Collection::from_records(records),
        }
    }

    pub fn len(&self) -> usize {
        self.collection.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.records().is_empty()
    }
}

impl RecordGateway for InMemoryGateway {
    fn create(&mut self, record: NewRecord) -> GatewayResult<RecordId> {
        let id = self.collection.insert(record);
        debug!(%id, "memory store: inserted");
        Ok(id)
    }

    fn find_by_id(&self, id: &RecordId) -> GatewayResult<Record> {
        self.collection.get(id)
    }

    fn update(&mut self, id: &RecordId, record: NewRecord) -> GatewayResult<()> {
        self.collection.replace(id, record)?;
        debug!(%id, "memory store: updated");
        Ok(())
    }

    fn delete(&mut self, id: &RecordId) -> GatewayResult<()> {
        self.collection.remove(id)?;
        debug!(%id, "memory store: deleted");
        Ok(())
    }

    fn list_all(&self) -> GatewayResult<Vec<Record>> {
        Ok(self.collection.records().to_vec())
    }
}
