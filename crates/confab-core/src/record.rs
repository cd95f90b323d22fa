use serde::{Deserialize, Serialize};

use crate::meeting_type::MeetingType;
use crate::transcript::{Sentiment, SentimentShares};

/// One segment of the sentiment timeline. Segments tile a fixed grid;
/// `[start_time, end_time)` never overlaps a neighbour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub sentiment: Sentiment,
    /// Share of tagged sentences in the segment agreeing with the dominant
    /// sentiment, in (0, 1].
    pub confidence: f64,
}

/// Meeting-level sentiment view: provider percentages plus the derived
/// timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub overall: SentimentShares,
    pub dominant: Sentiment,
    #[serde(default)]
    pub timeline: Vec<SentimentSegment>,
    /// Fraction of adjacent segment pairs whose dominant sentiment differs.
    #[serde(default)]
    pub emotional_volatility: f64,
}

/// Speaking-pattern flags derived from provider speaker stats.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpeakingPatterns {
    pub dominant_speaker: bool,
    pub active_questioner: bool,
    pub frequent_interrupter: bool,
    pub many_filler_words: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Dominant,
    Inquisitive,
    Listener,
    Presenter,
    Balanced,
}

impl std::fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CommunicationStyle::Dominant => "dominant",
            CommunicationStyle::Inquisitive => "inquisitive",
            CommunicationStyle::Listener => "listener",
            CommunicationStyle::Presenter => "presenter",
            CommunicationStyle::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

/// Derived per-speaker metrics: provider stats carried through plus the
/// engagement score and style label. Computed once per run, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerMetric {
    pub speaker_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub duration_seconds: f64,
    pub duration_percentage: f64,
    pub word_count: u64,
    pub words_per_minute: f64,
    pub longest_monologue_seconds: f64,
    pub monologues_count: u32,
    pub filler_words_count: u32,
    pub questions_asked: u32,
    pub interruptions_made: u32,
    pub talk_listen_ratio: f64,
    /// In [0, 1].
    pub engagement_score: f64,
    pub communication_style: CommunicationStyle,
    pub patterns: SpeakingPatterns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn is_elevated(&self) -> bool {
        matches!(self, Priority::Urgent | Priority::High)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Review,
    Creation,
    Update,
    Communication,
    Meeting,
    Research,
    General,
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionCategory::Review => "review",
            ActionCategory::Creation => "creation",
            ActionCategory::Update => "update",
            ActionCategory::Communication => "communication",
            ActionCategory::Meeting => "meeting",
            ActionCategory::Research => "research",
            ActionCategory::General => "general",
        };
        f.write_str(s)
    }
}

/// A task surfaced from a tagged sentence, enriched with assignee and
/// due-date hints from the surrounding window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub source_index: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: Priority,
    pub category: ActionCategory,
    pub timestamp_seconds: f64,
    pub speaker: String,
    /// Full text of the sentence the task came from.
    pub context: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub source_index: usize,
    pub text: String,
    pub speaker: String,
    pub timestamp_seconds: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub source_index: usize,
    pub text: String,
    pub speaker: String,
    pub timestamp_seconds: f64,
    pub reliability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Why,
    How,
    What,
    When,
    Who,
    Where,
    YesNo,
    General,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub source_index: usize,
    pub text: String,
    pub speaker: String,
    pub timestamp_seconds: f64,
    pub kind: QuestionKind,
    /// Heuristic: a different speaker spoke within the look-ahead window.
    pub answered: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsAnalysis {
    pub total: usize,
    #[serde(default)]
    pub records: Vec<QuestionRecord>,
    pub unanswered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    Highlight,
    Decision,
    ActionItem,
}

/// A timeline entry merged from soundbites, decisions, and elevated-priority
/// action items, sorted by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMoment {
    pub kind: MomentKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub timestamp_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorMention {
    pub competitor: String,
    pub context: String,
    pub timestamp_seconds: f64,
    pub speaker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingMention {
    pub amount: String,
    pub context: String,
    pub timestamp_seconds: f64,
    pub speaker: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitiveInsights {
    #[serde(default)]
    pub mentions: Vec<CompetitorMention>,
    #[serde(default)]
    pub pricing: Vec<PricingMention>,
    pub advantage_mentioned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngagementLevel::High => "high",
            EngagementLevel::Medium => "medium",
            EngagementLevel::Low => "low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct QualityIndicators {
    pub balanced_participation: bool,
    pub minimal_interruptions: bool,
    pub productive_silence: bool,
    pub clear_outcomes: bool,
}

/// Conversation-quality aggregate derived from speaker stats and the
/// extractor outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationQuality {
    /// In [0, 1]; 1 means perfectly even talk-time shares.
    pub participation_balance: f64,
    /// Interruptions per minute of meeting time.
    pub interruption_rate: f64,
    pub total_interruptions: u64,
    pub silence_percentage: f64,
    pub silence_duration_seconds: f64,
    /// 0-100.
    pub efficiency_score: u32,
    pub engagement_level: EngagementLevel,
    pub indicators: QualityIndicators,
}

/// The six boolean effectiveness factors, in scoring and recommendation
/// order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EffectivenessFactors {
    pub has_clear_agenda: bool,
    pub has_action_items: bool,
    pub has_decisions: bool,
    pub balanced_participation: bool,
    pub appropriate_duration: bool,
    pub positive_sentiment: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingEffectiveness {
    /// 0-100, round(100 x fraction of factors true).
    pub overall_score: u32,
    pub factors: EffectivenessFactors,
    /// One fixed recommendation per failing factor, in factor order.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The complete analytics output for one meeting. Built once per pipeline
/// run by the orchestrator; recomputing over the same transcript reproduces
/// every field except `synced_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub meeting_id: String,
    pub title: String,
    pub date: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub participants: Vec<String>,
    pub meeting_type: MeetingType,

    pub sentiment: SentimentAnalysis,
    #[serde(default)]
    pub speakers: Vec<SpeakerMetric>,
    pub quality: ConversationQuality,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    pub questions: QuestionsAnalysis,
    #[serde(default)]
    pub key_moments: Vec<KeyMoment>,
    pub competitive: CompetitiveInsights,
    pub effectiveness: MeetingEffectiveness,

    pub total_words: u64,
    pub speaker_count: usize,
    pub question_count: u64,
    pub task_count: u64,
    pub silence_percentage: u32,
    pub has_action_items: bool,
    pub has_video: bool,

    /// Run timestamp, RFC3339. The only non-deterministic field; kept out
    /// of every derived value.
    pub synced_at: String,
}
