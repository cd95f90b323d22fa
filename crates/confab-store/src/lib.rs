//! Local persistence for Confab.
//!
//! One directory holds everything: a SQLite database with the per-meeting
//! analytics records (upserts keyed by meeting id — this doubles as the
//! sync skip-state) and a `reports/` directory with the rendered markdown
//! documents. Report writes are atomic (temp file + rename), and a sync
//! run holds an exclusive file lock so skip-check-then-write is a critical
//! section.

mod records;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use confab_core::AnalyticsRecord;
use fs2::FileExt;
use thiserror::Error;

use records::MeetingDb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("another sync run holds the store lock")]
    Locked,
}

/// Default data directory: platform data dir, falling back to `~/.confab`.
pub fn default_root() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("confab")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".confab")
    } else {
        PathBuf::from(".confab")
    }
}

/// Atomic write: write to a temp file in the same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let parent = path.parent().ok_or_else(|| {
        StoreError::Io(std::io::Error::other(format!(
            "no parent dir for {}",
            path.display()
        )))
    })?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Exclusive lock held for the duration of a batch sync run.
pub struct SyncLock {
    _file: fs::File,
}

impl SyncLock {
    /// Non-blocking acquire; a second concurrent run fails fast with
    /// [`StoreError::Locked`].
    pub fn acquire(root: &Path) -> Result<SyncLock, StoreError> {
        fs::create_dir_all(root)?;
        let path = root.join("sync.lock");
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.try_lock_exclusive().map_err(|_| StoreError::Locked)?;
        Ok(SyncLock { _file: file })
    }
}

/// The record store plus the report directory under one root.
pub struct Store {
    root: PathBuf,
    db: MeetingDb,
}

impl Store {
    /// Open (creating directories and schema as needed) a store rooted at
    /// `root`.
    pub fn open(root: &Path) -> Result<Store, StoreError> {
        fs::create_dir_all(root.join("reports"))?;
        fs::create_dir_all(root.join("state"))?;
        let db = MeetingDb::open_or_create(&root.join("state").join("meetings.db"))?;
        Ok(Store {
            root: root.to_path_buf(),
            db,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Acquire the run lock for this store.
    pub fn lock(&self) -> Result<SyncLock, StoreError> {
        SyncLock::acquire(&self.root)
    }

    /// Path a meeting's rendered report lives at (whether or not it exists
    /// yet).
    pub fn report_path(&self, meeting_id: &str) -> PathBuf {
        self.root.join("reports").join(format!("{meeting_id}_v2.md"))
    }

    /// Atomically write the rendered report and return its path.
    pub fn write_report(&self, meeting_id: &str, markdown: &str) -> Result<PathBuf, StoreError> {
        let path = self.report_path(meeting_id);
        write_atomic(&path, markdown.as_bytes())?;
        Ok(path)
    }

    /// Upsert the analytics record, keyed by meeting id. Idempotent: a
    /// forced reprocess replaces the row in place.
    pub fn upsert_record(
        &self,
        record: &AnalyticsRecord,
        report_path: Option<&Path>,
    ) -> Result<(), StoreError> {
        self.db.upsert(record, report_path)
    }

    pub fn load_record(&self, meeting_id: &str) -> Result<Option<AnalyticsRecord>, StoreError> {
        self.db.load(meeting_id)
    }

    /// Meeting ids already recorded, for skip logic. Sorted for
    /// deterministic iteration.
    pub fn processed_ids(&self) -> Result<Vec<String>, StoreError> {
        self.db.ids()
    }

    pub fn is_processed(&self, meeting_id: &str) -> Result<bool, StoreError> {
        self.db.contains(meeting_id)
    }
}
