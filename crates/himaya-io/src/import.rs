use std::io::Write;

use rusqlite::{Connection, OpenFlags};
use tempfile::NamedTempFile;
use thiserror::Error;

use himaya_domain::WilayaRecord;
use himaya_store::{RecordStore, StoreError};

/// Errors while importing a database image.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Supplied file is not a SQLite database image: {0}")]
    InvalidImage(String),

    #[error("Database image has no readable wilaya_data table: {0}")]
    MissingTable(String),

    #[error("Row for ({id}, {date}) holds invalid record JSON: {message}")]
    InvalidRecord {
        id: String,
        date: String,
        message: String,
    },

    #[error("I/O error while reading the image: {0}")]
    Io(String),

    #[error("Failed to persist imported record: {0}")]
    Store(#[from] StoreError),
}

/// Parse all records out of a SQLite database image.
///
/// The image must hold a `wilaya_data(id, name, data, date)` table where
/// `data` is a JSON-serialized record; id, name, and date are overridden
/// from the scalar columns. An image with zero rows is a successful,
/// empty import. The whole image is parsed before anything is returned,
/// so a single bad row fails the import without a partial result.
pub fn read_database_image(bytes: &[u8]) -> Result<Vec<WilayaRecord>, ImportError> {
    // rusqlite opens paths, not buffers; spool the image to a temp file.
    let mut file = NamedTempFile::new().map_err(|e| ImportError::Io(e.to_string()))?;
    file.write_all(bytes)
        .map_err(|e| ImportError::Io(e.to_string()))?;
    file.flush().map_err(|e| ImportError::Io(e.to_string()))?;

    let conn = Connection::open_with_flags(file.path(), OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| ImportError::InvalidImage(e.to_string()))?;

    let mut stmt = conn
        .prepare("SELECT id, name, data, date FROM wilaya_data")
        .map_err(|e| match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::NotADatabase =>
            {
                ImportError::InvalidImage(e.to_string())
            }
            _ => ImportError::MissingTable(e.to_string()),
        })?;

    let rows = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let name: String = row.get(1)?;
            let data: String = row.get(2)?;
            let date: String = row.get(3)?;
            Ok((id, name, data, date))
        })
        .map_err(|e| ImportError::MissingTable(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ImportError::InvalidImage(e.to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (id, name, data, date) in rows {
        let mut record: WilayaRecord =
            serde_json::from_str(&data).map_err(|e| ImportError::InvalidRecord {
                id: id.clone(),
                date: date.clone(),
                message: e.to_string(),
            })?;
        // Scalar columns are authoritative for the key and display name.
        record.id = id;
        record.name = name;
        record.date = date;
        records.push(record);
    }
    Ok(records)
}

/// Import a database image into an explicitly chosen store.
///
/// Returns the number of records persisted. The target is the caller's
/// decision; nothing is hard-coded to one replica.
pub fn import_into(store: &dyn RecordStore, bytes: &[u8]) -> Result<usize, ImportError> {
    let records = read_database_image(bytes)?;
    for record in &records {
        store.put_record(record)?;
    }
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use himaya_domain::InterventionCounts;
    use himaya_store::SqliteRecordStore;

    fn record(id: &str, name: &str, date: &str, interventions: u32) -> WilayaRecord {
        let mut r = WilayaRecord::empty(id, name, date);
        r.traffic_accidents = InterventionCounts {
            interventions,
            injured: 0,
            deaths: 0,
        };
        r
    }

    /// Build a database image on disk and return its bytes.
    fn image_with_rows(rows: &[(&str, &str, String, &str)]) -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.sqlite");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE wilaya_data (
                    id TEXT, name TEXT, data TEXT, date TEXT,
                    PRIMARY KEY (id, date)
                );",
            )
            .unwrap();
            for (id, name, data, date) in rows {
                conn.execute(
                    "INSERT INTO wilaya_data (id, name, data, date) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![id, name, data, date],
                )
                .unwrap();
            }
        }
        std::fs::read(&path).unwrap()
    }

    #[test]
    fn empty_table_imports_zero_records_without_error() {
        let bytes = image_with_rows(&[]);
        assert!(read_database_image(&bytes).unwrap().is_empty());
    }

    #[test]
    fn rows_are_reconstructed_with_scalar_columns_authoritative() {
        // The JSON blob disagrees with the scalar columns on purpose.
        let blob = serde_json::to_string(&record("99", "Stale", "1999-01-01", 7)).unwrap();
        let bytes = image_with_rows(&[("01", "Adrar", blob, "2024-01-15")]);

        let records = read_database_image(&bytes).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "01");
        assert_eq!(records[0].name, "Adrar");
        assert_eq!(records[0].date, "2024-01-15");
        assert_eq!(records[0].traffic_accidents.interventions, 7);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = read_database_image(b"definitely not a sqlite file, not even close")
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidImage(_)));
    }

    #[test]
    fn image_without_the_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x TEXT);")
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();

        let err = read_database_image(&bytes).unwrap_err();
        assert!(matches!(err, ImportError::MissingTable(_)));
    }

    #[test]
    fn invalid_json_row_fails_and_leaves_unrelated_keys_untouched() {
        let store = SqliteRecordStore::in_memory().unwrap();
        let existing = record("02", "Chlef", "2024-01-10", 5);
        store.put_record(&existing).unwrap();

        let bytes = image_with_rows(&[("01", "Adrar", "{not json".to_string(), "2024-01-15")]);
        let err = import_into(&store, &bytes).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord { .. }));

        // Nothing was persisted, and the pre-existing record is intact.
        assert!(store.record("01", "2024-01-15").unwrap().is_none());
        assert_eq!(store.record("02", "2024-01-10").unwrap().unwrap(), existing);
    }

    #[test]
    fn import_into_persists_every_row() {
        let store = SqliteRecordStore::in_memory().unwrap();
        let blob_a = serde_json::to_string(&record("01", "Adrar", "2024-01-15", 3)).unwrap();
        let blob_b = serde_json::to_string(&record("02", "Chlef", "2024-01-16", 4)).unwrap();
        let bytes = image_with_rows(&[
            ("01", "Adrar", blob_a, "2024-01-15"),
            ("02", "Chlef", blob_b, "2024-01-16"),
        ]);

        let count = import_into(&store, &bytes).unwrap();
        assert_eq!(count, 2);
        assert!(store.record("01", "2024-01-15").unwrap().is_some());
        assert!(store.record("02", "2024-01-16").unwrap().is_some());
    }
}
