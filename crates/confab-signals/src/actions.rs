use std::ops::Range;
use std::sync::LazyLock;

use confab_core::{ActionCategory, ActionItem, Priority, Sentence, Transcript};
use regex::Regex;

/// Sentences searched on each side of a task sentence for assignee and
/// due-date hints.
pub const CONTEXT_WINDOW: usize = 3;

/// Fixed confidence attached to every extracted action item.
pub const TASK_CONFIDENCE: f64 = 0.85;

/// "`<Name>, will ...`" / "`<Name> can you ...`" — the name capture keeps
/// the sentence's original casing.
static ASSIGNEE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+),?\s+(will|can|should|could|would|please)\s").unwrap());

const URGENT_KEYWORDS: &[&str] = &["urgent", "asap", "immediately"];
const HIGH_KEYWORDS: &[&str] = &["important", "priority", "critical"];
const LOW_KEYWORDS: &[&str] = &["when you can", "nice to have"];

/// Build structured action items from every task-tagged sentence.
pub fn extract_action_items(transcript: &Transcript) -> Vec<ActionItem> {
    let sentences = &transcript.sentences;
    sentences
        .iter()
        .filter_map(|sentence| {
            let task = sentence.tags.as_ref()?.task.as_ref()?;
            Some(ActionItem {
                source_index: sentence.index,
                text: task.clone(),
                assignee: find_assignee(sentences, sentence.index),
                due_date: find_due_date(sentences, sentence.index),
                priority: priority_of(&sentence.text),
                category: category_of(task),
                timestamp_seconds: sentence.start_time,
                speaker: sentence.speaker_label().to_string(),
                context: sentence.text.clone(),
                confidence: TASK_CONFIDENCE,
            })
        })
        .collect()
}

fn context_window(len: usize, index: usize) -> Range<usize> {
    index.saturating_sub(CONTEXT_WINDOW)..(index + CONTEXT_WINDOW).min(len)
}

/// Scan the context window for a "`<Name>, will/can/...`" pattern.
/// First hit wins; the captured name keeps its casing.
pub(crate) fn find_assignee(sentences: &[Sentence], index: usize) -> Option<String> {
    for sentence in &sentences[context_window(sentences.len(), index)] {
        if let Some(caps) = ASSIGNEE_RE.captures(&sentence.text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// First date/time tag found in the context window.
pub(crate) fn find_due_date(sentences: &[Sentence], index: usize) -> Option<String> {
    sentences[context_window(sentences.len(), index)]
        .iter()
        .find_map(|s| s.tags.as_ref()?.date_and_time.clone())
}

/// Priority by keyword match against the full sentence text.
pub fn priority_of(sentence_text: &str) -> Priority {
    let text = sentence_text.to_lowercase();
    if URGENT_KEYWORDS.iter().any(|k| text.contains(k)) {
        Priority::Urgent
    } else if HIGH_KEYWORDS.iter().any(|k| text.contains(k)) {
        Priority::High
    } else if LOW_KEYWORDS.iter().any(|k| text.contains(k)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Category by verb keyword against the extracted task text.
pub fn category_of(task: &str) -> ActionCategory {
    let task = task.to_lowercase();
    let has = |needle: &str| task.contains(needle);
    if has("review") || has("check") {
        ActionCategory::Review
    } else if has("create") || has("build") {
        ActionCategory::Creation
    } else if has("update") || has("modify") {
        ActionCategory::Update
    } else if has("send") || has("email") {
        ActionCategory::Communication
    } else if has("meet") || has("schedule") {
        ActionCategory::Meeting
    } else if has("research") || has("investigate") {
        ActionCategory::Research
    } else {
        ActionCategory::General
    }
}
