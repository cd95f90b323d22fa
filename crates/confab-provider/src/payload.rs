//! Loose-to-typed payload parsing.
//!
//! The provider's GraphQL responses are duck-typed: numbers arrive as
//! floats or ints, dates as epoch milliseconds or strings, list-ish summary
//! fields as arrays or newline-joined strings. Everything is normalized
//! here, once, so the rest of the pipeline only ever sees the typed model.

use confab_core::{
    AnalyticsSummary, Attendee, ProviderSummary, Sentence, SentenceTags, Sentiment,
    SentimentShares, Soundbite, SpeakerStats, TopicSpan, Transcript, ValidationError,
};
use serde::Deserialize;

use crate::MeetingHead;

/// Accepts either a JSON array of strings or one newline-joined string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<String>),
    One(String),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::Many(items) => items,
            StringList::One(joined) => joined
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn string_list(value: Option<StringList>) -> Vec<String> {
    value.map(StringList::into_vec).unwrap_or_default()
}

/// Epoch milliseconds (integer or float) or a preformatted string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(f64),
    Text(String),
}

impl RawDate {
    fn into_rfc3339(self) -> String {
        match self {
            RawDate::Text(s) => s,
            RawDate::Millis(ms) => {
                let nanos = (ms as i128) * 1_000_000;
                let ts = time::OffsetDateTime::from_unix_timestamp_nanos(nanos)
                    .unwrap_or(time::OffsetDateTime::UNIX_EPOCH);
                ts.format(&time::format_description::well_known::Rfc3339)
                    .unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAttendee {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSentiments {
    #[serde(default)]
    positive_pct: f64,
    #[serde(default)]
    neutral_pct: f64,
    #[serde(default)]
    negative_pct: f64,
}

#[derive(Debug, Deserialize)]
struct RawSpeaker {
    speaker_id: Option<serde_json::Value>,
    name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    duration_pct: f64,
    #[serde(default)]
    word_count: u64,
    #[serde(default)]
    words_per_minute: f64,
    #[serde(default)]
    longest_monologue: f64,
    #[serde(default)]
    monologues_count: u32,
    #[serde(default)]
    filler_words: u32,
    #[serde(default)]
    questions: u32,
    #[serde(default)]
    interruptions: u32,
    #[serde(default)]
    talk_listen_ratio: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawCount {
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct RawAnalytics {
    #[serde(default)]
    sentiments: Option<RawSentiments>,
    #[serde(default)]
    speakers: Option<Vec<RawSpeaker>>,
    #[serde(default)]
    silence_duration: Option<f64>,
    #[serde(default)]
    questions: Option<RawCount>,
    #[serde(default)]
    tasks: Option<RawCount>,
}

#[derive(Debug, Deserialize)]
struct RawAiFilters {
    sentiment: Option<String>,
    task: Option<String>,
    question: Option<String>,
    pricing: Option<String>,
    metric: Option<String>,
    date_and_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    index: Option<usize>,
    text: Option<String>,
    speaker_id: Option<serde_json::Value>,
    speaker_name: Option<String>,
    #[serde(default)]
    start_time: f64,
    #[serde(default)]
    end_time: f64,
    ai_filters: Option<RawAiFilters>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    overview: Option<String>,
    action_items: Option<StringList>,
    keywords: Option<StringList>,
    outline: Option<String>,
    notes: Option<String>,
    shorthand_bullet: Option<StringList>,
}

#[derive(Debug, Deserialize)]
struct RawTopic {
    text: Option<String>,
    #[serde(default)]
    start_time: f64,
    #[serde(default)]
    end_time: f64,
}

#[derive(Debug, Deserialize)]
struct RawSoundbite {
    id: Option<serde_json::Value>,
    title: Option<String>,
    #[serde(default)]
    start_time: f64,
    #[serde(default)]
    end_time: f64,
    video_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    id: Option<serde_json::Value>,
    title: Option<String>,
    date: Option<RawDate>,
    duration: Option<f64>,
    participants: Option<Vec<String>>,
    host_email: Option<String>,
    organizer_email: Option<String>,
    transcript_url: Option<String>,
    audio_url: Option<String>,
    video_url: Option<String>,
    meeting_attendees: Option<Vec<RawAttendee>>,
    analytics: Option<RawAnalytics>,
    sentences: Option<Vec<RawSentence>>,
    summary: Option<RawSummary>,
    topics: Option<Vec<RawTopic>>,
    soundbites: Option<Vec<RawSoundbite>>,
}

/// Id fields sometimes arrive as numbers; normalize to a string.
fn id_string(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_sentiment(raw: Option<String>) -> Option<Sentiment> {
    match raw?.to_lowercase().as_str() {
        "positive" => Some(Sentiment::Positive),
        "neutral" => Some(Sentiment::Neutral),
        "negative" => Some(Sentiment::Negative),
        _ => None,
    }
}

fn parse_tags(raw: Option<RawAiFilters>) -> Option<SentenceTags> {
    let raw = raw?;
    let tags = SentenceTags {
        sentiment: parse_sentiment(raw.sentiment),
        task: raw.task.filter(|s| !s.is_empty()),
        question: raw.question,
        pricing: raw.pricing.filter(|s| !s.is_empty()),
        metric: raw.metric.filter(|s| !s.is_empty()),
        date_and_time: raw.date_and_time.filter(|s| !s.is_empty()),
    };
    Some(tags)
}

/// Parse the `transcript` payload object into the typed model.
///
/// Serde-level mismatches and a missing id are `ValidationError`s; the
/// structural invariants (`Transcript::validate`) are the caller's next
/// step.
pub fn parse_transcript(value: serde_json::Value) -> Result<Transcript, ValidationError> {
    let raw: RawTranscript =
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let id = id_string(raw.id).ok_or(ValidationError::MissingField("id"))?;

    let analytics = raw.analytics.unwrap_or_default();
    let sentiments = analytics.sentiments.unwrap_or_default();
    let speakers = analytics
        .speakers
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| {
            let speaker_id = id_string(s.speaker_id)?;
            Some(SpeakerStats {
                speaker_id,
                name: s.name.filter(|n| !n.is_empty()),
                email: s.email.filter(|e| !e.is_empty()),
                duration: s.duration,
                duration_pct: s.duration_pct,
                word_count: s.word_count,
                words_per_minute: s.words_per_minute,
                longest_monologue: s.longest_monologue,
                monologues_count: s.monologues_count,
                filler_words: s.filler_words,
                questions: s.questions,
                interruptions: s.interruptions,
                talk_listen_ratio: s.talk_listen_ratio,
            })
        })
        .collect();

    let sentences = raw
        .sentences
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, s)| Sentence {
            index: s.index.unwrap_or(position),
            text: s.text.unwrap_or_default(),
            speaker_id: id_string(s.speaker_id).unwrap_or_else(|| "unknown".to_string()),
            speaker_name: s.speaker_name.filter(|n| !n.is_empty()),
            start_time: s.start_time,
            end_time: s.end_time,
            tags: parse_tags(s.ai_filters),
        })
        .collect();

    let summary = raw.summary.unwrap_or_default();

    Ok(Transcript {
        id,
        title: raw
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled Meeting".to_string()),
        date: raw
            .date
            .map(RawDate::into_rfc3339)
            .unwrap_or_default(),
        duration_seconds: raw.duration.unwrap_or(0.0),
        participants: raw.participants.unwrap_or_default(),
        attendees: raw
            .meeting_attendees
            .unwrap_or_default()
            .into_iter()
            .map(|a| Attendee {
                display_name: a.display_name.filter(|s| !s.is_empty()),
                name: a.name.filter(|s| !s.is_empty()),
                email: a.email.filter(|s| !s.is_empty()),
            })
            .collect(),
        organizer_email: raw.organizer_email.filter(|s| !s.is_empty()),
        host_email: raw.host_email.filter(|s| !s.is_empty()),
        transcript_url: raw.transcript_url,
        audio_url: raw.audio_url,
        video_url: raw.video_url,
        analytics: AnalyticsSummary {
            sentiments: SentimentShares {
                positive_pct: sentiments.positive_pct,
                neutral_pct: sentiments.neutral_pct,
                negative_pct: sentiments.negative_pct,
            },
            speakers,
            silence_duration: analytics.silence_duration.unwrap_or(0.0),
            question_count: analytics.questions.unwrap_or_default().count,
            task_count: analytics.tasks.unwrap_or_default().count,
        },
        sentences,
        topics: raw
            .topics
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                Some(TopicSpan {
                    text: t.text.filter(|s| !s.is_empty())?,
                    start_time: t.start_time,
                    end_time: t.end_time,
                })
            })
            .collect(),
        soundbites: raw
            .soundbites
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| {
                Some(Soundbite {
                    id: id_string(s.id)?,
                    title: s.title.unwrap_or_default(),
                    start_time: s.start_time,
                    end_time: s.end_time,
                    video_url: s.video_url,
                })
            })
            .collect(),
        summary: ProviderSummary {
            overview: summary.overview.filter(|s| !s.is_empty()),
            action_items: string_list(summary.action_items),
            keywords: string_list(summary.keywords),
            outline: summary.outline.filter(|s| !s.is_empty()),
            notes: summary.notes.filter(|s| !s.is_empty()),
            bullet_points: string_list(summary.shorthand_bullet),
        },
    })
}

/// Parse the `transcripts` list payload into meeting heads.
pub(crate) fn parse_meeting_list(
    data: serde_json::Value,
) -> Result<Vec<MeetingHead>, ValidationError> {
    #[derive(Debug, Deserialize)]
    struct RawHead {
        id: Option<serde_json::Value>,
        title: Option<String>,
        date: Option<RawDate>,
    }

    let raw = data
        .get("transcripts")
        .cloned()
        .ok_or(ValidationError::MissingField("transcripts"))?;
    let heads: Vec<RawHead> =
        serde_json::from_value(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    Ok(heads
        .into_iter()
        .filter_map(|h| {
            Some(MeetingHead {
                id: id_string(h.id)?,
                title: h
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled Meeting".to_string()),
                date: h.date.map(RawDate::into_rfc3339),
            })
        })
        .collect())
}
