use confab_core::{
    CommunicationStyle, SpeakerMetric, SpeakerStats, SpeakingPatterns, Transcript,
};

// Engagement factor thresholds (exclusive ranges).
const WPM_COMFORT_LOW: f64 = 100.0;
const WPM_COMFORT_HIGH: f64 = 180.0;
const FILLER_WORD_CEILING: u32 = 10;
const RATIO_COMFORT_LOW: f64 = 0.5;
const RATIO_COMFORT_HIGH: f64 = 2.0;

// Communication style thresholds, checked in priority order.
const DOMINANT_RATIO: f64 = 2.0;
const INQUISITIVE_QUESTIONS: u32 = 5;
const LISTENER_RATIO: f64 = 0.5;
const PRESENTER_MONOLOGUES: u32 = 3;

// Speaking-pattern flags.
const DOMINANT_TALK_SHARE_PCT: f64 = 40.0;
const FREQUENT_INTERRUPTIONS: u32 = 3;

/// Map provider speaker stats 1:1 into derived speaker metrics.
/// Empty provider stats yield an empty vec.
pub fn extract_speaker_metrics(transcript: &Transcript) -> Vec<SpeakerMetric> {
    transcript
        .analytics
        .speakers
        .iter()
        .map(speaker_metric)
        .collect()
}

fn speaker_metric(stats: &SpeakerStats) -> SpeakerMetric {
    SpeakerMetric {
        speaker_id: stats.speaker_id.clone(),
        name: stats
            .name
            .clone()
            .unwrap_or_else(|| stats.speaker_id.clone()),
        email: stats.email.clone(),
        duration_seconds: stats.duration,
        duration_percentage: stats.duration_pct,
        word_count: stats.word_count,
        words_per_minute: stats.words_per_minute,
        longest_monologue_seconds: stats.longest_monologue,
        monologues_count: stats.monologues_count,
        filler_words_count: stats.filler_words,
        questions_asked: stats.questions,
        interruptions_made: stats.interruptions,
        talk_listen_ratio: stats.talk_listen_ratio,
        engagement_score: engagement_score(stats),
        communication_style: communication_style(stats),
        patterns: SpeakingPatterns {
            dominant_speaker: stats.duration_pct > DOMINANT_TALK_SHARE_PCT,
            active_questioner: stats.questions > INQUISITIVE_QUESTIONS,
            frequent_interrupter: stats.interruptions > FREQUENT_INTERRUPTIONS,
            many_filler_words: stats.filler_words > FILLER_WORD_CEILING,
        },
    }
}

/// Mean of four graded factors: comfortable pace, asks questions, few
/// filler words, balanced talk/listen ratio.
pub fn engagement_score(stats: &SpeakerStats) -> f64 {
    let factors = [
        if stats.words_per_minute > WPM_COMFORT_LOW && stats.words_per_minute < WPM_COMFORT_HIGH {
            1.0
        } else {
            0.5
        },
        if stats.questions > 0 { 1.0 } else { 0.3 },
        if stats.filler_words < FILLER_WORD_CEILING {
            1.0
        } else {
            0.5
        },
        if stats.talk_listen_ratio > RATIO_COMFORT_LOW && stats.talk_listen_ratio < RATIO_COMFORT_HIGH
        {
            1.0
        } else {
            0.5
        },
    ];
    factors.iter().sum::<f64>() / factors.len() as f64
}

/// Priority-ordered style rules; the first matching rule labels the speaker.
pub fn communication_style(stats: &SpeakerStats) -> CommunicationStyle {
    if stats.talk_listen_ratio > DOMINANT_RATIO {
        CommunicationStyle::Dominant
    } else if stats.questions > INQUISITIVE_QUESTIONS {
        CommunicationStyle::Inquisitive
    } else if stats.talk_listen_ratio < LISTENER_RATIO {
        CommunicationStyle::Listener
    } else if stats.monologues_count > PRESENTER_MONOLOGUES {
        CommunicationStyle::Presenter
    } else {
        CommunicationStyle::Balanced
    }
}
