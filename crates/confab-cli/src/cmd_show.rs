use std::path::PathBuf;

use anyhow::{bail, Result};
use confab_store::Store;

use crate::config;

pub fn run(data_dir: Option<PathBuf>, id: &str, json: bool) -> Result<i32> {
    let store = Store::open(&config::data_dir(data_dir))?;
    let Some(record) = store.load_record(id)? else {
        bail!("no record for meeting {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(0);
    }

    println!("{} ({})", record.title, record.meeting_id);
    println!("  date:          {}", record.date);
    println!("  type:          {}", record.meeting_type);
    println!("  duration:      {} min", record.duration_minutes);
    println!("  speakers:      {}", record.speaker_count);
    println!("  action items:  {}", record.action_items.len());
    println!("  decisions:     {}", record.decisions.len());
    println!("  commitments:   {}", record.commitments.len());
    println!(
        "  questions:     {} ({} unanswered)",
        record.questions.total, record.questions.unanswered
    );
    println!(
        "  effectiveness: {}/100",
        record.effectiveness.overall_score
    );
    println!(
        "  efficiency:    {}% ({} engagement)",
        record.quality.efficiency_score, record.quality.engagement_level
    );
    println!("  sentiment:     {}", record.sentiment.dominant);
    println!("  synced at:     {}", record.synced_at);
    Ok(0)
}
