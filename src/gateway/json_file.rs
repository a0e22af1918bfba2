//! Record store persisted as a JSON document array on disk
//!
//! The whole collection is loaded on open and rewritten after every
//! mutation (temp file + rename). A mutation that cannot be written is
//! rolled back in memory and reported as an I/O failure. A file holding a
//! record that breaks a field rule is refused on open, since records read
//! from the store are loaded into the form without revalidation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::collection::Collection;
use super::RecordGateway;
use crate::error::{GatewayError, GatewayResult};
use crate::types::{NewRecord, Record, RecordId};

#[derive(Debug)]
pub struct JsonFileGateway {
    path: PathBuf,
    collection: Collection,
}

impl JsonFileGateway {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> GatewayResult<Self> {
        let path = path.into();
        let records: Vec<Record> = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no store file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        for record in &records {
            record
                .fields
                .check()
                .map_err(|reason| GatewayError::InvalidDocument {
                    id: record.id.to_string(),
                    reason,
                })?;
        }
        debug!(path = %path.display(), count = records.len(), "store file loaded");

        Ok(Self {
            path,
            collection: Collection::from_records(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> GatewayResult<()> {
        let content = serde_json::to_string_pretty(self.collection.records())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply a mutation and write it out, restoring the previous state if
    /// the write fails
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Collection) -> GatewayResult<T>,
    ) -> GatewayResult<T> {
        let before = self.collection.clone();
        let result = mutate(&mut self.collection)?;
        if let Err(e) = self.persist() {
            warn!(path = %self.path.display(), error = %e, "store write failed, rolling back");
            self.collection = before;
            return Err(e);
        }
        Ok(result)
    }
}

impl RecordGateway for JsonFileGateway {
    fn create(&mut self, record: NewRecord) -> GatewayResult<RecordId> {
        self.commit(|collection| Ok(collection.insert(record)))
    }

    fn find_by_id(&self, id: &RecordId) -> GatewayResult<Record> {
        self.collection.get(id)
    }

    fn update(&mut self, id: &RecordId, record: NewRecord) -> GatewayResult<()> {
        self.commit(|collection| collection.replace(id, record))
    }

    fn delete(&mut self, id: &RecordId) -> GatewayResult<()> {
        self.commit(|collection| collection.remove(id).map(|_| ()))
    }

    fn list_all(&self) -> GatewayResult<Vec<Record>> {
        Ok(self.collection.records().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;
    use crate::types::{Class, Sex};

    fn maria() -> NewRecord {
        NewRecord {
            name: "María".to_string(),
            phone: 5559876543,
            sex: Sex::Feminine,
            class: Class::Sciences,
            age: 22,
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileGateway::open(dir.path().join("students.json")).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");

        let id = {
            let mut store = JsonFileGateway::open(&path).unwrap();
            store.create(maria()).unwrap()
        };

        let store = JsonFileGateway::open(&path).unwrap();
        let found = store.find_by_id(&id).unwrap();
        assert_eq!(found.fields, maria());
    }

    #[test]
    fn file_uses_store_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let mut store = JsonFileGateway::open(&path).unwrap();
        store.create(maria()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Nombre\": \"María\""));
        assert!(content.contains("\"Clase\": \"Ciencias\""));
    }

    #[test]
    fn delete_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let mut store = JsonFileGateway::open(&path).unwrap();
        let id = store.create(maria()).unwrap();
        store.delete(&id).unwrap();

        let reopened = JsonFileGateway::open(&path).unwrap();
        assert!(matches!(
            reopened.find_by_id(&id),
            Err(GatewayError::NotFound { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileGateway::open(&path),
            Err(GatewayError::Serialization(_))
        ));
    }

    #[test]
    fn record_breaking_field_rules_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        fs::write(
            &path,
            r#"[{"_id":"65f0c0ffee0000000000beef","Nombre":"R2-D2","Telefono":123456789012,"Edad":0}]"#,
        )
        .unwrap();

        match JsonFileGateway::open(&path) {
            Err(GatewayError::InvalidDocument { id, reason }) => {
                assert_eq!(id, "65f0c0ffee0000000000beef");
                assert_eq!(reason, ValidationFailure::InvalidName);
            }
            other => panic!("expected InvalidDocument, got {:?}", other),
        }
    }

    #[test]
    fn zero_age_in_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        fs::write(
            &path,
            r#"[{"_id":"65f0c0ffee0000000000beef","Nombre":"Ana","Telefono":5551234567,"Edad":0}]"#,
        )
        .unwrap();

        assert!(matches!(
            JsonFileGateway::open(&path),
            Err(GatewayError::InvalidDocument {
                reason: ValidationFailure::NonPositiveAge,
                ..
            })
        ));
    }

    #[test]
    fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("students.json");
        let mut store = JsonFileGateway::open(&path).unwrap();

        let err = store.create(maria()).unwrap_err();
        assert!(err.is_connectivity());
        assert!(store.list_all().unwrap().is_empty());
    }
}
