//! SQLite-backed slot store.
//!
//! # Invariants
//! - The connection must be opened through `db::open_db*` so the `slots`
//!   table exists.
//! - Writes upsert one row per key and refresh `updated_at`.

use super::{SlotStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Persistent slots in the `slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a migrated connection, rejecting one without the `slots` table.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_slots_table(conn)?;
        Ok(Self { conn })
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_slots_table(conn: &Connection) -> StorageResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(StorageError::Unavailable(
            "slot store requires table `slots`; open the database with open_db".to_string(),
        ))
    }
}
