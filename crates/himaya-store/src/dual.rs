//! The dual-store facade.
//!
//! Writes fan out to both replicas; reads query both and reconcile.
//! There is no cross-store transaction: on partial failure the healthy
//! replica's write stands, the error names the replica that failed, and
//! retries are left to the caller.

use std::path::Path;

use tracing::warn;

use himaya_domain::WilayaRecord;

use crate::error::{DualStoreError, Replica, StoreError};
use crate::merge::merge_by_key;
use crate::redb_store::RedbRecordStore;
use crate::sqlite_store::SqliteRecordStore;
use crate::store::RecordStore;

/// Facade over the key-value and relational replicas.
pub struct DualStore {
    kv: Box<dyn RecordStore>,
    sql: Box<dyn RecordStore>,
}

impl DualStore {
    /// Build a facade over arbitrary replicas. The second replica is
    /// treated as the relational one and wins point-get precedence.
    pub fn new(kv: Box<dyn RecordStore>, sql: Box<dyn RecordStore>) -> Self {
        Self { kv, sql }
    }

    /// Open both replicas on disk.
    pub fn open(
        kv_path: impl AsRef<Path>,
        sql_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(
            Box::new(RedbRecordStore::open(kv_path)?),
            Box::new(SqliteRecordStore::open(sql_path)?),
        ))
    }

    /// Both replicas in memory (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(
            Box::new(RedbRecordStore::in_memory()?),
            Box::new(SqliteRecordStore::in_memory()?),
        ))
    }

    /// Direct access to one replica, for explicitly targeted writes
    /// (e.g. database-image import).
    pub fn replica(&self, replica: Replica) -> &dyn RecordStore {
        match replica {
            Replica::KeyValue => self.kv.as_ref(),
            Replica::Relational => self.sql.as_ref(),
        }
    }

    /// Combine the two replicas' results, logging and naming any failed
    /// side. On partial failure the successful side's effect stands.
    fn join<T>(
        kv: Result<T, StoreError>,
        sql: Result<T, StoreError>,
    ) -> Result<(T, T), DualStoreError> {
        match (kv, sql) {
            (Ok(kv), Ok(sql)) => Ok((kv, sql)),
            (Err(kv), Err(sql)) => {
                warn!(kv = %kv, sql = %sql, "both replicas failed");
                Err(DualStoreError::Both { kv, sql })
            }
            (Err(source), Ok(_)) => {
                warn!(error = %source, replica = %Replica::KeyValue, "replica failed");
                Err(DualStoreError::Replica {
                    replica: Replica::KeyValue,
                    source,
                })
            }
            (Ok(_), Err(source)) => {
                warn!(error = %source, replica = %Replica::Relational, "replica failed");
                Err(DualStoreError::Replica {
                    replica: Replica::Relational,
                    source,
                })
            }
        }
    }

    /// Write the record to both replicas, then recompute and persist the
    /// wilaya's history series.
    ///
    /// Both writes are attempted even if the first fails, so the error can
    /// report exactly which side needs a retry. No rollback: a partial
    /// write stays applied.
    pub fn save(&self, record: &WilayaRecord) -> Result<(), DualStoreError> {
        Self::join(self.kv.put_record(record), self.sql.put_record(record))?;

        // The merged list already contains the record just written.
        let history = self.list_all(&record.id)?;
        Self::join(
            self.kv.put_history(&record.id, &history),
            self.sql.put_history(&record.id, &history),
        )?;
        Ok(())
    }

    /// Point lookup. The relational replica is the import target and wins
    /// when both sides hold the key.
    pub fn get(
        &self,
        wilaya_id: &str,
        date: &str,
    ) -> Result<Option<WilayaRecord>, DualStoreError> {
        let (kv, sql) = Self::join(
            self.kv.record(wilaya_id, date),
            self.sql.record(wilaya_id, date),
        )?;
        Ok(sql.or(kv))
    }

    /// All records for a wilaya, merged across replicas and deduplicated
    /// by the composite `(id, date)` key. Concatenation order (key-value
    /// replica first) is preserved; callers needing chronological order
    /// sort explicitly.
    pub fn list_all(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, DualStoreError> {
        let (kv, sql) = Self::join(
            self.kv.records_for_wilaya(wilaya_id),
            self.sql.records_for_wilaya(wilaya_id),
        )?;
        Ok(merge_by_key(vec![kv, sql], |r| {
            (r.id.clone(), r.date.clone())
        }))
    }

    /// The wilaya's history series, merged across replicas.
    ///
    /// Deduplicates by the composite `(id, date)` key, the same policy as
    /// [`list_all`](Self::list_all). (An earlier incarnation deduplicated
    /// by date alone, which silently dropped same-date records from other
    /// wilayas if a series blob was ever cross-contaminated.)
    pub fn history(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, DualStoreError> {
        let (kv, sql) = Self::join(self.kv.history(wilaya_id), self.sql.history(wilaya_id))?;
        Ok(merge_by_key(vec![kv, sql], |r| {
            (r.id.clone(), r.date.clone())
        }))
    }
}
