use himaya_domain::WilayaRecord;

use crate::error::StoreError;

/// The trait both storage backends implement.
///
/// The primary table is keyed by the composite `(wilaya_id, date)` pair
/// with last-write-wins upsert semantics; the history table holds one
/// denormalized series blob per wilaya. Absence is `Ok(None)` or an empty
/// `Vec`, never an error.
pub trait RecordStore: Send + Sync {
    /// Upsert one daily record under its `(id, date)` key.
    fn put_record(&self, record: &WilayaRecord) -> Result<(), StoreError>;

    /// Point lookup by exact `(id, date)` key.
    fn record(&self, wilaya_id: &str, date: &str) -> Result<Option<WilayaRecord>, StoreError>;

    /// All records stored for one wilaya.
    ///
    /// Ordering is backend-specific; callers needing chronological order
    /// must sort explicitly.
    fn records_for_wilaya(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError>;

    /// Overwrite the wilaya's denormalized history series.
    fn put_history(&self, wilaya_id: &str, history: &[WilayaRecord]) -> Result<(), StoreError>;

    /// The wilaya's history series, empty if none was ever written.
    fn history(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError>;
}
