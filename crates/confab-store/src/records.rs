//! SQLite-backed meeting record storage.
//!
//! One row per meeting, keyed by the provider's meeting id. The full
//! analytics record is stored as JSON alongside a few queryable columns.
//! Row presence is the sync skip-state: a meeting id with a row counts as
//! processed.

use std::path::Path;

use confab_core::AnalyticsRecord;
use rusqlite::{params, Connection, OptionalExtension};

use crate::StoreError;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS meetings (
    meeting_id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    date TEXT NOT NULL,
    meeting_type TEXT NOT NULL,
    record TEXT NOT NULL,
    report_path TEXT,
    synced_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_meetings_date ON meetings(date);
";

pub(crate) struct MeetingDb {
    conn: Connection,
}

impl MeetingDb {
    pub(crate) fn open_or_create(db_path: &Path) -> Result<MeetingDb, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(MeetingDb { conn })
    }

    pub(crate) fn upsert(
        &self,
        record: &AnalyticsRecord,
        report_path: Option<&Path>,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO meetings (meeting_id, title, date, meeting_type, record, report_path, synced_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(meeting_id) DO UPDATE SET
                 title = excluded.title,
                 date = excluded.date,
                 meeting_type = excluded.meeting_type,
                 record = excluded.record,
                 report_path = excluded.report_path,
                 synced_at = excluded.synced_at",
            params![
                record.meeting_id,
                record.title,
                record.date,
                record.meeting_type.as_str(),
                json,
                report_path.map(|p| p.to_string_lossy().to_string()),
                record.synced_at,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn load(&self, meeting_id: &str) -> Result<Option<AnalyticsRecord>, StoreError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT record FROM meetings WHERE meeting_id = ?1",
                params![meeting_id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn contains(&self, meeting_id: &str) -> Result<bool, StoreError> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM meetings WHERE meeting_id = ?1",
                params![meeting_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub(crate) fn ids(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT meeting_id FROM meetings ORDER BY meeting_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}
