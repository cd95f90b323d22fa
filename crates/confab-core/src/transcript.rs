use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-sentence sentiment classification from the provider.
///
/// The declaration order is significant: plurality ties in the sentiment
/// timeline are broken by the first variant in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All variants in tie-break order.
    pub const ORDERED: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider AI classifier outputs attached to a single sentence.
///
/// Every field is optional; a missing block or missing field means the
/// classifier fired nothing for that sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Extracted task text when the sentence was classified as a task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Extracted question text when the sentence was classified as a question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_and_time: Option<String>,
}

/// One transcript sentence. `index` is the stable ordering key and equals
/// the sentence's position in `Transcript::sentences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub speaker_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_name: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<SentenceTags>,
}

impl Sentence {
    /// Display name for the speaker: name if known, raw speaker id otherwise.
    pub fn speaker_label(&self) -> &str {
        self.speaker_name.as_deref().unwrap_or(&self.speaker_id)
    }
}

/// Meeting attendee as reported by the calendar integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Attendee {
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

/// A labeled, time-bounded topic span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSpan {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// A provider-curated highlight clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soundbite {
    pub id: String,
    pub title: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Meeting-level sentiment percentages computed by the provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SentimentShares {
    #[serde(default)]
    pub positive_pct: f64,
    #[serde(default)]
    pub neutral_pct: f64,
    #[serde(default)]
    pub negative_pct: f64,
}

impl SentimentShares {
    /// Dominant overall sentiment. Neutral wins all ties.
    pub fn dominant(&self) -> Sentiment {
        if self.positive_pct > self.negative_pct && self.positive_pct > self.neutral_pct {
            Sentiment::Positive
        } else if self.negative_pct > self.positive_pct && self.negative_pct > self.neutral_pct {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Per-speaker talk statistics computed by the provider. Treated as ground
/// truth: nothing in the pipeline recomputes these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerStats {
    pub speaker_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Talk time in seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub duration_pct: f64,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub words_per_minute: f64,
    #[serde(default)]
    pub longest_monologue: f64,
    #[serde(default)]
    pub monologues_count: u32,
    #[serde(default)]
    pub filler_words: u32,
    #[serde(default)]
    pub questions: u32,
    #[serde(default)]
    pub interruptions: u32,
    #[serde(default)]
    pub talk_listen_ratio: f64,
}

/// Provider-computed meeting aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub sentiments: SentimentShares,
    #[serde(default)]
    pub speakers: Vec<SpeakerStats>,
    /// Total silence in seconds.
    #[serde(default)]
    pub silence_duration: f64,
    #[serde(default)]
    pub question_count: u64,
    #[serde(default)]
    pub task_count: u64,
}

/// Provider-generated narrative summary, passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullet_points: Vec<String>,
}

/// A fully-populated meeting transcript. Immutable once fetched; every
/// downstream stage reads it, nothing writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub title: String,
    /// Meeting date as an RFC3339 string.
    pub date: String,
    pub duration_seconds: f64,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub analytics: AnalyticsSummary,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub topics: Vec<TopicSpan>,
    #[serde(default)]
    pub soundbites: Vec<Soundbite>,
    #[serde(default)]
    pub summary: ProviderSummary,
}

impl Transcript {
    /// Meeting duration rounded to whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_seconds / 60.0).round() as i64
    }

    pub fn has_video(&self) -> bool {
        self.video_url.is_some()
    }

    /// Whitespace word count over all sentences.
    pub fn total_words(&self) -> u64 {
        self.sentences
            .iter()
            .map(|s| s.text.split_whitespace().count() as u64)
            .sum()
    }

    /// Silence as a rounded percentage of total duration.
    pub fn silence_percentage(&self) -> u32 {
        if self.duration_seconds <= 0.0 || self.analytics.silence_duration <= 0.0 {
            return 0;
        }
        ((self.analytics.silence_duration / self.duration_seconds) * 100.0).round() as u32
    }

    /// Structural invariant check, run once at the fetcher boundary.
    ///
    /// Extractors assume these hold and never re-check them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_seconds < 0.0 {
            return Err(ValidationError::NegativeDuration {
                id: self.id.clone(),
                duration: self.duration_seconds,
            });
        }
        let mut prev_start = f64::NEG_INFINITY;
        for (position, sentence) in self.sentences.iter().enumerate() {
            if sentence.index != position {
                return Err(ValidationError::IndexMismatch {
                    id: self.id.clone(),
                    position,
                    index: sentence.index,
                });
            }
            if sentence.start_time > sentence.end_time {
                return Err(ValidationError::InvertedSpan {
                    id: self.id.clone(),
                    index: sentence.index,
                    start: sentence.start_time,
                    end: sentence.end_time,
                });
            }
            if sentence.start_time < prev_start {
                return Err(ValidationError::NonMonotonic {
                    id: self.id.clone(),
                    index: sentence.index,
                    start: sentence.start_time,
                    prev: prev_start,
                });
            }
            prev_start = sentence.start_time;
        }
        Ok(())
    }
}

/// Malformed or inconsistent provider payload, rejected before any
/// extractor sees the transcript.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("transcript {id}: negative duration {duration}")]
    NegativeDuration { id: String, duration: f64 },
    #[error("transcript {id}: sentence {index} ends at {end} before it starts at {start}")]
    InvertedSpan {
        id: String,
        index: usize,
        start: f64,
        end: f64,
    },
    #[error("transcript {id}: sentence at position {position} carries index {index}")]
    IndexMismatch {
        id: String,
        position: usize,
        index: usize,
    },
    #[error("transcript {id}: sentence {index} starts at {start}, before previous start {prev}")]
    NonMonotonic {
        id: String,
        index: usize,
        start: f64,
        prev: f64,
    },
    #[error("transcript payload missing required field `{0}`")]
    MissingField(&'static str),
    #[error("transcript payload malformed: {0}")]
    Malformed(String),
}
