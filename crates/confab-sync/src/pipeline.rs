//! Single-meeting analytics assembly.
//!
//! Pure composition of the extractors and the scorer: no I/O, no clock.
//! The caller supplies `synced_at`, which is the only field of the result
//! that can differ between runs over the same transcript.

use confab_core::{AnalyticsRecord, MeetingType, Transcript};
use confab_report::ReportOptions;
use confab_signals::{actions, competitive, decisions, moments, questions, speakers, timeline};

/// Run every extractor and the scorer over one transcript.
pub fn analyze(transcript: &Transcript, synced_at: &str) -> AnalyticsRecord {
    let sentiment = timeline::extract_sentiment(transcript);
    let speaker_metrics = speakers::extract_speaker_metrics(transcript);
    let action_items = actions::extract_action_items(transcript);
    let decision_list = decisions::extract_decisions(transcript);
    let commitments = decisions::extract_commitments(transcript);
    let question_analysis = questions::extract_questions(transcript);
    let key_moments = moments::extract_key_moments(transcript, &decision_list, &action_items);
    let competitive_insights = competitive::extract_competitive(transcript);

    // Action-item presence follows the provider summary; decision presence
    // follows the extractor.
    let has_action_items = !transcript.summary.action_items.is_empty();
    let has_decisions = !decision_list.is_empty();

    let quality = confab_score::conversation_quality(transcript, has_action_items, has_decisions);
    let effectiveness = confab_score::meeting_effectiveness(
        transcript,
        quality.participation_balance,
        has_action_items,
        has_decisions,
    );

    AnalyticsRecord {
        meeting_id: transcript.id.clone(),
        title: transcript.title.clone(),
        date: transcript.date.clone(),
        duration_minutes: transcript.duration_minutes(),
        participants: transcript.participants.clone(),
        meeting_type: MeetingType::detect(&transcript.title),
        sentiment,
        speakers: speaker_metrics,
        quality,
        action_items,
        decisions: decision_list,
        commitments,
        questions: question_analysis,
        key_moments,
        competitive: competitive_insights,
        effectiveness,
        total_words: transcript.total_words(),
        speaker_count: transcript.analytics.speakers.len(),
        question_count: transcript.analytics.question_count,
        task_count: transcript.analytics.task_count,
        silence_percentage: transcript.silence_percentage(),
        has_action_items,
        has_video: transcript.has_video(),
        synced_at: synced_at.to_string(),
    }
}

/// Analyze and render in one step, as the orchestrator persists them
/// together.
pub fn analyze_and_render(
    transcript: &Transcript,
    synced_at: &str,
    report_options: &ReportOptions,
) -> (AnalyticsRecord, String) {
    let record = analyze(transcript, synced_at);
    let markdown = confab_report::render_report(transcript, &record, report_options);
    (record, markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::{
        AnalyticsSummary, ProviderSummary, Sentence, SentenceTags, Sentiment, Transcript,
    };

    fn empty_transcript() -> Transcript {
        Transcript {
            id: "tx_empty".into(),
            title: "Quick chat".into(),
            date: "2026-03-02T10:00:00Z".into(),
            duration_seconds: 0.0,
            participants: vec![],
            attendees: vec![],
            organizer_email: None,
            host_email: None,
            transcript_url: None,
            audio_url: None,
            video_url: None,
            analytics: AnalyticsSummary::default(),
            sentences: vec![],
            topics: vec![],
            soundbites: vec![],
            summary: ProviderSummary::default(),
        }
    }

    #[test]
    fn empty_transcript_yields_empty_collections() {
        let record = analyze(&empty_transcript(), "2026-03-02T12:00:00Z");
        assert!(record.speakers.is_empty());
        assert!(record.action_items.is_empty());
        assert!(record.decisions.is_empty());
        assert!(record.sentiment.timeline.is_empty());
        assert_eq!(record.sentiment.emotional_volatility, 0.0);
        assert_eq!(record.effectiveness.overall_score, 0);
        assert_eq!(record.quality.participation_balance, 0.0);
    }

    #[test]
    fn identical_input_identical_output() {
        let mut transcript = empty_transcript();
        transcript.duration_seconds = 1800.0;
        transcript.sentences = vec![
            Sentence {
                index: 0,
                text: "We decided to ship Friday".into(),
                speaker_id: "s1".into(),
                speaker_name: Some("Alice".into()),
                start_time: 120.0,
                end_time: 124.0,
                tags: Some(SentenceTags {
                    sentiment: Some(Sentiment::Positive),
                    ..Default::default()
                }),
            },
            Sentence {
                index: 1,
                text: "I'll update the docs".into(),
                speaker_id: "s2".into(),
                speaker_name: Some("Bob".into()),
                start_time: 130.0,
                end_time: 133.0,
                tags: Some(SentenceTags {
                    task: Some("update the docs".into()),
                    ..Default::default()
                }),
            },
        ];

        let a = analyze(&transcript, "2026-03-02T12:00:00Z");
        let b = analyze(&transcript, "2026-03-02T12:00:00Z");
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn synced_at_is_the_only_run_dependent_field() {
        let transcript = empty_transcript();
        let a = analyze(&transcript, "2026-03-02T12:00:00Z");
        let b = analyze(&transcript, "2026-03-03T09:00:00Z");

        let mut a_val = serde_json::to_value(&a).unwrap();
        let mut b_val = serde_json::to_value(&b).unwrap();
        assert_ne!(a_val["synced_at"], b_val["synced_at"]);
        a_val["synced_at"] = serde_json::Value::Null;
        b_val["synced_at"] = serde_json::Value::Null;
        assert_eq!(a_val, b_val);
    }

    #[test]
    fn single_decision_scenario() {
        let mut transcript = empty_transcript();
        transcript.sentences = vec![Sentence {
            index: 0,
            text: "We decided to ship Friday".into(),
            speaker_id: "s1".into(),
            speaker_name: Some("Alice".into()),
            start_time: 120.0,
            end_time: 124.0,
            tags: None,
        }];

        let record = analyze(&transcript, "2026-03-02T12:00:00Z");
        assert_eq!(record.decisions.len(), 1);
        let d = &record.decisions[0];
        assert_eq!(d.text, "We decided to ship Friday");
        assert_eq!(d.speaker, "Alice");
        assert_eq!(d.timestamp_seconds, 120.0);
        assert_eq!(d.confidence, 0.7);
        // The decision also lands in key moments and flips the factor.
        assert_eq!(record.key_moments.len(), 1);
        assert!(record.effectiveness.factors.has_decisions);
    }

    #[test]
    fn meeting_type_inferred_from_title() {
        let mut transcript = empty_transcript();
        transcript.title = "Sprint Planning".into();
        let record = analyze(&transcript, "2026-03-02T12:00:00Z");
        assert_eq!(record.meeting_type, confab_core::MeetingType::Planning);
    }
}
