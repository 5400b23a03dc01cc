use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use himaya_domain::WilayaRecord;

use crate::error::StoreError;
use crate::store::RecordStore;

/// Relational replica backed by SQLite.
///
/// Same logical schema as the key-value replica, as two explicit tables.
/// The `data` columns hold the JSON-serialized record / history series;
/// id, name, and date are duplicated as scalar columns so the tables stay
/// queryable from outside (and importable as a database image).
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Initialization(format!("open: {e}")))?;
        Self::with_connection(conn)
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Initialization(format!("open_in_memory: {e}")))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS wilaya_data (
                id TEXT,
                name TEXT,
                data TEXT,
                date TEXT,
                PRIMARY KEY (id, date)
            );

            CREATE TABLE IF NOT EXISTS historical_data (
                id TEXT PRIMARY KEY,
                data TEXT
            );
            ",
        )
        .map_err(|e| StoreError::Initialization(format!("init_schema: {e}")))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

impl RecordStore for SqliteRecordStore {
    fn put_record(&self, record: &WilayaRecord) -> Result<(), StoreError> {
        let data = serde_json::to_string(record)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO wilaya_data (id, name, data, date) VALUES (?1, ?2, ?3, ?4)",
            params![record.id, record.name, data, record.date],
        )
        .map_err(|e| StoreError::Storage(format!("put record: {e}")))?;
        Ok(())
    }

    fn record(&self, wilaya_id: &str, date: &str) -> Result<Option<WilayaRecord>, StoreError> {
        let conn = self.lock()?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM wilaya_data WHERE id = ?1 AND date = ?2",
                params![wilaya_id, date],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("get record: {e}")))?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn records_for_wilaya(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT data, date FROM wilaya_data WHERE id = ?1 ORDER BY date DESC")
            .map_err(|e| StoreError::Storage(format!("prepare list: {e}")))?;

        let rows = stmt
            .query_map(params![wilaya_id], |row| {
                let data: String = row.get(0)?;
                let date: String = row.get(1)?;
                Ok((data, date))
            })
            .map_err(|e| StoreError::Storage(format!("query list: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Storage(format!("collect list: {e}")))?;

        let mut records = Vec::with_capacity(rows.len());
        for (data, date) in rows {
            let mut record: WilayaRecord = serde_json::from_str(&data)?;
            // The scalar column is authoritative for the key.
            record.date = date;
            records.push(record);
        }
        Ok(records)
    }

    fn put_history(&self, wilaya_id: &str, history: &[WilayaRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_string(history)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO historical_data (id, data) VALUES (?1, ?2)",
            params![wilaya_id, data],
        )
        .map_err(|e| StoreError::Storage(format!("put history: {e}")))?;
        Ok(())
    }

    fn history(&self, wilaya_id: &str) -> Result<Vec<WilayaRecord>, StoreError> {
        let conn = self.lock()?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM historical_data WHERE id = ?1",
                params![wilaya_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("get history: {e}")))?;

        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }
}
