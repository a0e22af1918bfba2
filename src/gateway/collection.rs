//! In-process record collection shared by the gateway implementations

use chrono::Utc;
use rand::Rng;

use crate::error::{GatewayError, GatewayResult};
use crate::types::{NewRecord, Record, RecordId};

/// Mints 12-byte object identifiers:
/// 4-byte big-endian seconds, 5 bytes fixed per minter, 3-byte counter
#[derive(Debug, Clone)]
pub struct ObjectIdMinter {
    instance: [u8; 5],
    counter: u32,
}

impl Default for ObjectIdMinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectIdMinter {
    const COUNTER_MASK: u32 = 0x00ff_ffff;

    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            instance: rng.gen(),
            counter: rng.gen::<u32>() & Self::COUNTER_MASK,
        }
    }

    pub fn next_id(&mut self) -> RecordId {
        let seconds = Utc::now().timestamp() as u32;
        self.counter = (self.counter + 1) & Self::COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.instance);
        bytes[9..].copy_from_slice(&self.counter.to_be_bytes()[1..]);
        RecordId::from_bytes(bytes)
    }
}

/// Records kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Record>,
    minter: ObjectIdMinter,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            minter: ObjectIdMinter::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn position(&self, id: &RecordId) -> GatewayResult<usize> {
        self.records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| GatewayError::not_found(id.as_str()))
    }

    pub fn insert(&mut self, fields: NewRecord) -> RecordId {
        let mut id = self.minter.next_id();
        while self.records.iter().any(|record| record.id == id) {
            id = self.minter.next_id();
        }
        self.records.push(Record::new(id.clone(), fields));
        id
    }

    pub fn get(&self, id: &RecordId) -> GatewayResult<Record> {
        self.position(id).map(|index| self.records[index].clone())
    }

    pub fn replace(&mut self, id: &RecordId, fields: NewRecord) -> GatewayResult<()> {
        let index = self.position(id)?;
        self.records[index].fields = fields;
        Ok(())
    }

    pub fn remove(&mut self, id: &RecordId) -> GatewayResult<Record> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }
}
