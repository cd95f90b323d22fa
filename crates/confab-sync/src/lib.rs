//! Batch sync orchestration.
//!
//! Drives the pipeline across a batch of meetings: list, skip already
//! recorded ids, fetch, analyze, render, persist. Every per-meeting error
//! is recorded against that meeting and the loop continues — only a failed
//! listing or a broken local store aborts the run. The summary is produced
//! as a fold over the meeting list, not via shared mutable counters.

pub mod pipeline;

use std::time::Duration;

use confab_provider::{MeetingHead, TranscriptSource};
use confab_report::ReportOptions;
use confab_store::Store;
use serde::Serialize;

/// Default meeting list size.
pub const DEFAULT_LIMIT: usize = 50;

/// Courtesy pause between meetings, to stay friendly with provider rate
/// limits. Not a correctness requirement.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum number of meetings to list.
    pub limit: usize,
    /// Reprocess meetings that already have a record.
    pub force: bool,
    /// Skip all writes; log intended actions instead.
    pub dry_run: bool,
    /// Include the full transcript in rendered reports.
    pub include_transcript: bool,
    /// Pause between meetings.
    pub delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            limit: DEFAULT_LIMIT,
            force: false,
            dry_run: false,
            include_transcript: false,
            delay: DEFAULT_DELAY,
        }
    }
}

/// One failed meeting: id, title, and the error that stopped it.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingFailure {
    pub meeting_id: String,
    pub title: String,
    pub error: String,
}

/// Immutable result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<MeetingFailure>,
}

impl RunSummary {
    /// True when no meeting failed; drives the process exit status.
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

enum Outcome {
    Processed,
    Skipped,
    Failed(String),
}

/// Run one batch sync. Holds the store lock for the whole run so the
/// skip-check-then-write sequence cannot race a concurrent run.
pub async fn run_sync(
    source: &dyn TranscriptSource,
    store: &Store,
    options: &SyncOptions,
) -> anyhow::Result<RunSummary> {
    let _lock = store.lock()?;
    let run_id = format!("run_{}", ulid::Ulid::new().to_string().to_lowercase());

    let meetings = source.list_meetings(options.limit).await?;
    tracing::info!(run = %run_id, count = meetings.len(), "listed meetings");

    let mut outcomes: Vec<(Outcome, &MeetingHead)> = Vec::with_capacity(meetings.len());
    let total = meetings.len();
    for (i, head) in meetings.iter().enumerate() {
        let outcome = sync_one(source, store, options, head).await?;
        let pause = matches!(outcome, Outcome::Processed | Outcome::Failed(_));
        outcomes.push((outcome, head));
        if pause && i + 1 < total && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    let summary = outcomes.into_iter().fold(
        RunSummary {
            run_id,
            processed: 0,
            skipped: 0,
            failed: 0,
            failures: Vec::new(),
        },
        |mut summary, (outcome, head)| {
            match outcome {
                Outcome::Processed => summary.processed += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed(error) => {
                    summary.failed += 1;
                    summary.failures.push(MeetingFailure {
                        meeting_id: head.id.clone(),
                        title: head.title.clone(),
                        error,
                    });
                }
            }
            summary
        },
    );

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "sync finished"
    );
    Ok(summary)
}

/// Process a single meeting; per-meeting errors become an `Outcome`, store
/// errors on the skip check abort the run (the local database is broken).
async fn sync_one(
    source: &dyn TranscriptSource,
    store: &Store,
    options: &SyncOptions,
    head: &MeetingHead,
) -> anyhow::Result<Outcome> {
    if !options.force && store.is_processed(&head.id)? {
        tracing::debug!(meeting = %head.id, "already recorded, skipping");
        return Ok(Outcome::Skipped);
    }

    match process_meeting(source, store, options, head).await {
        Ok(()) => {
            tracing::info!(meeting = %head.id, title = %head.title, "processed");
            Ok(Outcome::Processed)
        }
        Err(err) => {
            tracing::warn!(meeting = %head.id, error = %err, "meeting failed");
            Ok(Outcome::Failed(err.to_string()))
        }
    }
}

async fn process_meeting(
    source: &dyn TranscriptSource,
    store: &Store,
    options: &SyncOptions,
    head: &MeetingHead,
) -> anyhow::Result<()> {
    let transcript = source.fetch_transcript(&head.id).await?;

    let synced_at = now_rfc3339();
    let report_options = ReportOptions {
        include_transcript: options.include_transcript,
    };
    let (record, markdown) = pipeline::analyze_and_render(&transcript, &synced_at, &report_options);

    if options.dry_run {
        tracing::info!(
            meeting = %head.id,
            report = %store.report_path(&head.id).display(),
            "dry run: would write report and upsert record"
        );
        return Ok(());
    }

    // Report first, then the record: a row in the store implies its report
    // exists. Nothing is written if analysis or rendering failed.
    let report_path = store.write_report(&head.id, &markdown)?;
    store.upsert_record(&record, Some(&report_path))?;
    Ok(())
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
