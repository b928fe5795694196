#![forbid(unsafe_code)]

mod cascade;
mod clone_tree;
mod compact;
mod error;
mod insert;
mod reads;
mod requests;
mod support;
mod templates;

pub use error::StoreError;
pub use requests::*;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::*;

const DB_FILE: &str = "treeline.db";
const MAX_WRITE_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_busy_timeout(storage_dir, Duration::from_secs(5))
    }

    /// Opens the store with a caller-chosen busy timeout. A writer that
    /// cannot take the database lock within the timeout fails transiently
    /// and enters the bounded write retry.
    pub fn open_with_busy_timeout(
        storage_dir: impl AsRef<Path>,
        busy_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Runs `op` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The write lock is taken up front, so a read-modify-write sequence
    /// (max-ordinal probe, shift, insert) never interleaves with another
    /// writer. Transient busy/locked failures are retried from scratch, at
    /// most `MAX_WRITE_ATTEMPTS` attempts in total; each retry re-reads and
    /// recomputes inside the fresh transaction. An error rolls the
    /// transaction back on drop, leaving pre-call state intact.
    fn with_immediate_tx<T>(
        &mut self,
        mut op: impl FnMut(&Transaction<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let outcome = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(StoreError::from)
                .and_then(|tx| {
                    let value = op(&tx)?;
                    tx.commit()?;
                    Ok(value)
                });
            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    if attempt >= MAX_WRITE_ATTEMPTS {
                        return Err(StoreError::TransactionFailure { attempts: attempt });
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}
