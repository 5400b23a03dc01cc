use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use himaya_domain::WilayaRecord;

use crate::error::StoreError;
use crate::store::RecordStore;

/// Primary table: `"{wilaya_id}/{date}"` → JSON record bytes.
///
/// Keys sort lexicographically, so all records for one wilaya are
/// contiguous and reachable with a prefix range scan. This relies on dates
/// being zero-padded `YYYY-MM-DD` text.
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("wilaya_records");

/// History table: `"{wilaya_id}"` → JSON `Vec<WilayaRecord>` blob.
const HISTORY: TableDefinition<&str, &[u8]> = TableDefinition::new("wilaya_history");

/// Key-value replica backed by redb.
pub struct RedbRecordStore {
    db: Database,
}

fn record_key(wilaya_id: &str, date: &str) -> String {
    format!("{wilaya_id}/{date}")
}

impl RedbRecordStore {
    /// Open (or create) a database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)
            .map_err(|e| StoreError::Initialization(format!("open: {e}")))?;
        Self::with_database(db)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StoreError::Initialization(format!("in_memory: {e}")))?;
        Self::with_database(db)
    }

    /// Create both tables up front so reads never race table creation.
    /// Idempotent: reopening an existing database reuses its tables.
    fn with_database(db: Database) -> Result<Self, StoreError> {
        let txn = db
            .begin_write()
            .map_err(|e| StoreError::Initialization(format!("begin init: {e}")))?;
        txn.open_table(RECORDS)
            .map_err(|e| StoreError::Initialization(format!("create records table: {e}")))?;
        txn.open_table(HISTORY)
            .map_err(|e| StoreError::Initialization(format!("create history table: {e}")))?;
        txn.commit()
            .map_err(|e| StoreError::Initialization(format!("commit init: {e}")))?;
        Ok(Self { db })
    }

    fn put_bytes(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(format!("begin write: {e}")))?;
        {
            let mut t = txn
                .open_table(table)
                .map_err(|e| StoreError::Storage(format!("open table: {e}")))?;
            t.insert(key, bytes)
                .map_err(|e| StoreError::Storage(format!("insert: {e}")))?;
        }
        txn.commit()
            .map_err(|e| StoreError::Storage(format!("commit: {e}")))?;
        Ok(())
    }

    fn get_bytes(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Storage(format!("begin read: {e}")))?;
        let t = txn
            .open_table(table)
            .map_err(|e| StoreError::Storage(format!("open table: {e}")))?;
        let value = t
            .get(key)
            .map_err(|e| StoreError::Storage(format!("get: {e}")))?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }
}

impl RecordStore for RedbRecordStore {
    fn put_record(&self, record: &WilayaRecord) -> Result<(), StoreError> {
        let key = record_key(&record.id, &record.date);
        let bytes = serde_json::to_vec(record)?;
        self.put_bytes(RECORDS, &key, &bytes)
    }

    fn record(&self, wilaya_id: &str, date: &str) -> Result<Option<WilayaRecord>, StoreError> {
        let key = record_key(wilaya_id, date);
        match self.get_bytes(RECORDS, &key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn records_for_wilaya(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError> {
        let prefix = format!("{wilaya_id}/");
        let txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Storage(format!("begin read: {e}")))?;
        let table = txn
            .open_table(RECORDS)
            .map_err(|e| StoreError::Storage(format!("open table: {e}")))?;

        let mut records = Vec::new();
        // Keys for one wilaya are contiguous; stop at the first key past
        // the prefix instead of scanning the whole table.
        for entry in table
            .range::<&str>(prefix.as_str()..)
            .map_err(|e| StoreError::Storage(format!("range: {e}")))?
        {
            let (key, value) = entry.map_err(|e| StoreError::Storage(format!("scan: {e}")))?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    fn put_history(&self, wilaya_id: &str, history: &[WilayaRecord]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(history)?;
        self.put_bytes(HISTORY, wilaya_id, &bytes)
    }

    fn history(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError> {
        match self.get_bytes(HISTORY, wilaya_id)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }
}
