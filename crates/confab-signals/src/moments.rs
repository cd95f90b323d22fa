use confab_core::{ActionItem, Decision, KeyMoment, MomentKind, Transcript};

/// Maximum characters of decision text carried into a key-moment
/// description.
const DECISION_SNIPPET_CHARS: usize = 100;

/// Merge soundbites, decisions, and elevated-priority action items into a
/// single timeline, stably sorted by start timestamp.
pub fn extract_key_moments(
    transcript: &Transcript,
    decisions: &[Decision],
    action_items: &[ActionItem],
) -> Vec<KeyMoment> {
    let mut moments = Vec::new();

    for soundbite in &transcript.soundbites {
        moments.push(KeyMoment {
            kind: MomentKind::Highlight,
            title: soundbite.title.clone(),
            description: None,
            timestamp_seconds: soundbite.start_time,
            end_seconds: Some(soundbite.end_time),
            speaker: None,
            assignee: None,
            video_url: soundbite.video_url.clone(),
        });
    }

    for decision in decisions {
        moments.push(KeyMoment {
            kind: MomentKind::Decision,
            title: "Decision Made".into(),
            description: Some(snippet(&decision.text)),
            timestamp_seconds: decision.timestamp_seconds,
            end_seconds: None,
            speaker: Some(decision.speaker.clone()),
            assignee: None,
            video_url: None,
        });
    }

    for item in action_items.iter().filter(|i| i.priority.is_elevated()) {
        moments.push(KeyMoment {
            kind: MomentKind::ActionItem,
            title: "High Priority Action".into(),
            description: Some(item.text.clone()),
            timestamp_seconds: item.timestamp_seconds,
            end_seconds: None,
            speaker: None,
            assignee: item.assignee.clone(),
            video_url: None,
        });
    }

    moments.sort_by(|a, b| a.timestamp_seconds.total_cmp(&b.timestamp_seconds));
    moments
}

fn snippet(text: &str) -> String {
    text.chars().take(DECISION_SNIPPET_CHARS).collect()
}
