//! Dual-backend record store for wilaya intervention statistics
//!
//! Records are replicated across two embedded stores with different
//! characteristics:
//!
//! - **key-value replica** (redb): composite `"{wilaya_id}/{date}"` keys,
//!   prefix range scans, plus a per-wilaya history blob table
//! - **relational replica** (SQLite): the same logical schema as explicit
//!   tables, and the target format for database-image import/export
//!
//! The [`DualStore`] facade fans writes out to both replicas and merges
//! reads back together, deduplicating by the composite `(id, date)` key
//! with first-occurrence-wins semantics. There is no cross-store
//! transaction: a partial write stands, and the error reports which
//! replica failed so a retry can target just that side.

pub mod dual;
pub mod error;
pub mod merge;
pub mod redb_store;
pub mod sqlite_store;
pub mod store;

pub use dual::DualStore;
pub use error::{DualStoreError, Replica, StoreError};
pub use merge::merge_by_key;
pub use redb_store::RedbRecordStore;
pub use sqlite_store::SqliteRecordStore;
pub use store::RecordStore;
