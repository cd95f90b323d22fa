//! Conversation-quality and meeting-effectiveness scoring.
//!
//! Stage 3 of the pipeline: pure derivations over the transcript's provider
//! stats and the extractor outputs. Every function is total — degenerate
//! input (no speakers, zero duration) produces zeros, never NaN.

use confab_core::{
    ConversationQuality, EffectivenessFactors, EngagementLevel, MeetingEffectiveness,
    QualityIndicators, SpeakerStats, Transcript,
};

// Efficiency score weights.
const ACTION_ITEMS_WEIGHT: f64 = 0.4;
const DECISIONS_WEIGHT: f64 = 0.3;
const BALANCE_WEIGHT: f64 = 0.3;

// Engagement level thresholds (averages across speakers).
const HIGH_ENGAGEMENT_QUESTIONS: f64 = 3.0;
const HIGH_ENGAGEMENT_WPM: f64 = 120.0;
const MEDIUM_ENGAGEMENT_QUESTIONS: f64 = 1.0;
const MEDIUM_ENGAGEMENT_WPM: f64 = 100.0;

// Quality indicator thresholds.
const BALANCED_INDICATOR: f64 = 0.7;
const MINIMAL_INTERRUPTION_RATE: f64 = 2.0;
const PRODUCTIVE_SILENCE_LOW_PCT: f64 = 2.0;
const PRODUCTIVE_SILENCE_HIGH_PCT: f64 = 10.0;

// Effectiveness factor thresholds.
const EFFECTIVENESS_BALANCE: f64 = 0.6;
const MIN_DURATION_SECONDS: f64 = 600.0;
const MAX_DURATION_SECONDS: f64 = 3600.0;
const POSITIVE_SENTIMENT_PCT: f64 = 30.0;

/// One recommendation per effectiveness factor, in factor order. The n-th
/// entry is emitted when the n-th factor is false.
const RECOMMENDATIONS: [&str; 6] = [
    "Consider creating a clear agenda with topics before the meeting",
    "Ensure action items are clearly defined and assigned",
    "Document decisions made during the meeting",
    "Encourage more balanced participation from all attendees",
    "Consider adjusting meeting duration for optimal productivity",
    "Work on keeping the discussion constructive and positive",
];

/// Participation balance in [0, 1].
///
/// `1 − mean(|share − 1/n|) × n`, clamped at 0. Equals 1 exactly when every
/// speaker's talk-time share is `1/n`; no speakers or zero total talk time
/// scores 0.
pub fn participation_balance(speakers: &[SpeakerStats]) -> f64 {
    if speakers.is_empty() {
        return 0.0;
    }
    let total: f64 = speakers.iter().map(|s| s.duration).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let n = speakers.len() as f64;
    let ideal_share = 1.0 / n;
    let mean_deviation = speakers
        .iter()
        .map(|s| (s.duration / total - ideal_share).abs())
        .sum::<f64>()
        / n;
    (1.0 - mean_deviation * n).max(0.0)
}

/// Interruptions per minute of meeting time. 0 for zero-length meetings.
pub fn interruption_rate(speakers: &[SpeakerStats], duration_seconds: f64) -> f64 {
    if duration_seconds <= 0.0 {
        return 0.0;
    }
    total_interruptions(speakers) as f64 / (duration_seconds / 60.0)
}

pub fn total_interruptions(speakers: &[SpeakerStats]) -> u64 {
    speakers.iter().map(|s| s.interruptions as u64).sum()
}

/// Weighted efficiency score, reported 0-100.
pub fn efficiency_score(has_action_items: bool, has_decisions: bool, balance: f64) -> u32 {
    let mut score = 0.0;
    if has_action_items {
        score += ACTION_ITEMS_WEIGHT;
    }
    if has_decisions {
        score += DECISIONS_WEIGHT;
    }
    score += balance * BALANCE_WEIGHT;
    (score * 100.0).round() as u32
}

/// Overall engagement from mean question count and speaking pace.
pub fn engagement_level(speakers: &[SpeakerStats]) -> EngagementLevel {
    if speakers.is_empty() {
        return EngagementLevel::Low;
    }
    let n = speakers.len() as f64;
    let avg_questions = speakers.iter().map(|s| s.questions as f64).sum::<f64>() / n;
    let avg_wpm = speakers.iter().map(|s| s.words_per_minute).sum::<f64>() / n;

    if avg_questions > HIGH_ENGAGEMENT_QUESTIONS && avg_wpm > HIGH_ENGAGEMENT_WPM {
        EngagementLevel::High
    } else if avg_questions > MEDIUM_ENGAGEMENT_QUESTIONS || avg_wpm > MEDIUM_ENGAGEMENT_WPM {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}

/// Assemble the conversation-quality aggregate.
///
/// `has_action_items` follows the provider summary, `has_decisions` the
/// decision extractor — the caller supplies both.
pub fn conversation_quality(
    transcript: &Transcript,
    has_action_items: bool,
    has_decisions: bool,
) -> ConversationQuality {
    let speakers = &transcript.analytics.speakers;
    let balance = participation_balance(speakers);
    let rate = interruption_rate(speakers, transcript.duration_seconds);
    let silence_pct = if transcript.duration_seconds > 0.0 {
        (transcript.analytics.silence_duration / transcript.duration_seconds) * 100.0
    } else {
        0.0
    };

    ConversationQuality {
        participation_balance: balance,
        interruption_rate: rate,
        total_interruptions: total_interruptions(speakers),
        silence_percentage: silence_pct,
        silence_duration_seconds: transcript.analytics.silence_duration,
        efficiency_score: efficiency_score(has_action_items, has_decisions, balance),
        engagement_level: engagement_level(speakers),
        indicators: QualityIndicators {
            balanced_participation: balance > BALANCED_INDICATOR,
            minimal_interruptions: rate < MINIMAL_INTERRUPTION_RATE,
            productive_silence: silence_pct > PRODUCTIVE_SILENCE_LOW_PCT
                && silence_pct < PRODUCTIVE_SILENCE_HIGH_PCT,
            clear_outcomes: has_action_items || has_decisions,
        },
    }
}

/// Six-factor effectiveness score with one recommendation per failing
/// factor, in declared factor order.
pub fn meeting_effectiveness(
    transcript: &Transcript,
    balance: f64,
    has_action_items: bool,
    has_decisions: bool,
) -> MeetingEffectiveness {
    let factors = EffectivenessFactors {
        has_clear_agenda: !transcript.topics.is_empty(),
        has_action_items,
        has_decisions,
        balanced_participation: balance > EFFECTIVENESS_BALANCE,
        appropriate_duration: transcript.duration_seconds > MIN_DURATION_SECONDS
            && transcript.duration_seconds < MAX_DURATION_SECONDS,
        positive_sentiment: transcript.analytics.sentiments.positive_pct > POSITIVE_SENTIMENT_PCT,
    };

    let flags = [
        factors.has_clear_agenda,
        factors.has_action_items,
        factors.has_decisions,
        factors.balanced_participation,
        factors.appropriate_duration,
        factors.positive_sentiment,
    ];
    let passing = flags.iter().filter(|f| **f).count();
    let overall_score = ((passing as f64 / flags.len() as f64) * 100.0).round() as u32;

    let recommendations = flags
        .iter()
        .zip(RECOMMENDATIONS)
        .filter(|(ok, _)| !**ok)
        .map(|(_, rec)| rec.to_string())
        .collect();

    MeetingEffectiveness {
        overall_score,
        factors,
        recommendations,
    }
}
