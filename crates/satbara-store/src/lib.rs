//! Sat Bara Storage Layer
//!
//! Implements the `RecordStore` trait on SQLite.
//!
//! # Architecture
//!
//! - One append-only `records` table; insertion order is the `seq` column
//! - The record itself is kept as its canonical JSON in `payload`
//! - Identity and timestamp are assigned here, never by the caller
//!
//! # Examples
//!
//! ```no_run
//! use satbara_domain::{RecordStore, SatBaraData};
//! use satbara_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let stored = store.append(SatBaraData::default(), Some("712.jpg".into())).unwrap();
//! assert_eq!(store.list().unwrap(), vec![stored]);
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, Row};
use satbara_domain::{RecordId, RecordStore, SatBaraData, StoredRecord};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A row holds data this store never writes
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(include_str!("schema.sql"))?;
        debug!("Opened record store at {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.as_bytes().to_vec()
    }

    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            ))
        })?;
        Ok(RecordId::from_bytes(arr))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Raw column values of one `records` row
struct RecordRow {
    id: Vec<u8>,
    file_name: Option<String>,
    extracted_at: i64,
    payload: String,
}

impl RecordRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            file_name: row.get(1)?,
            extracted_at: row.get(2)?,
            payload: row.get(3)?,
        })
    }

    fn into_record(self) -> Result<StoredRecord, StoreError> {
        Ok(StoredRecord {
            id: SqliteStore::bytes_to_record_id(&self.id)?,
            file_name: self.file_name,
            extraction_timestamp: self.extracted_at as u64,
            data: serde_json::from_str(&self.payload)?,
        })
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn append(
        &mut self,
        data: SatBaraData,
        file_name: Option<String>,
    ) -> Result<StoredRecord, Self::Error> {
        let record = StoredRecord {
            id: RecordId::generate(),
            file_name,
            extraction_timestamp: Self::now_secs(),
            data,
        };
        let payload = serde_json::to_string(&record.data)?;

        self.conn.execute(
            "INSERT INTO records (id, file_name, extracted_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![
                Self::record_id_to_bytes(record.id),
                &record.file_name,
                record.extraction_timestamp as i64,
                &payload,
            ],
        )?;

        info!("Stored record {}", record.id);
        Ok(record)
    }

    fn list(&self) -> Result<Vec<StoredRecord>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, file_name, extracted_at, payload FROM records ORDER BY seq")?;

        let rows = stmt
            .query_map([], RecordRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RecordRow::into_record).collect()
    }

    fn clear(&mut self) -> Result<usize, Self::Error> {
        let removed = self.conn.execute("DELETE FROM records", [])?;
        info!("Cleared {} stored record(s)", removed);
        Ok(removed)
    }
}
