use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use confab_provider::ProviderClient;
use confab_store::Store;
use confab_sync::{RunSummary, SyncOptions};

use crate::config;

pub struct SyncArgs {
    pub limit: usize,
    pub dry_run: bool,
    pub force: bool,
    pub verbose: bool,
    pub delay_ms: u64,
}

pub fn run(api_key: Option<String>, data_dir: Option<PathBuf>, args: SyncArgs) -> Result<i32> {
    let api_key = config::require_api_key(api_key)?;
    let data_dir = config::data_dir(data_dir);

    println!("confab sync");
    println!("  provider key: {}", config::masked(&api_key));
    println!("  data dir:     {}", data_dir.display());
    println!("  limit:        {}", args.limit);
    if args.dry_run {
        println!("  mode:         dry run (no writes)");
    }
    if args.force {
        println!("  force:        reprocessing recorded meetings");
    }
    println!();

    let store = Store::open(&data_dir)?;
    let client = ProviderClient::new(api_key)?;
    let options = SyncOptions {
        limit: args.limit,
        force: args.force,
        dry_run: args.dry_run,
        include_transcript: args.verbose,
        delay: Duration::from_millis(args.delay_ms),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(confab_sync::run_sync(&client, &store, &options))?;

    print_summary(&summary);
    Ok(if summary.ok() { 0 } else { 1 })
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("Sync summary ({})", summary.run_id);
    println!("  ✓ processed: {}", summary.processed);
    println!("  ⊘ skipped:   {}", summary.skipped);
    println!("  ✗ failed:    {}", summary.failed);
    for failure in &summary.failures {
        println!(
            "    - {} ({}): {}",
            failure.title, failure.meeting_id, failure.error
        );
    }
}
