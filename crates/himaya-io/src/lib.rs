//! File adapters for wilaya statistics
//!
//! - **Export**: flattens one daily record (plus its derived total) into a
//!   single-row xlsx workbook, rendered in memory.
//! - **Import**: reads an externally supplied SQLite database image and
//!   reconstructs records from its `wilaya_data` table, persisting them
//!   through an explicitly chosen store.

pub mod export;
pub mod import;

pub use export::{export_file_name, statistics_row, write_workbook, CellValue, ExportError};
pub use import::{import_into, read_database_image, ImportError};
