//! Markdown meeting report rendering.
//!
//! `render_report` is a pure function of its inputs: identical transcript
//! and record produce a byte-identical document. The only timestamp in the
//! output is the record's `synced_at` field. Section order is fixed.

use confab_core::{AnalyticsRecord, Sentence, Transcript};

/// Rendering switches. `include_transcript` appends the full transcript
/// grouped by contiguous same-speaker runs (the CLI's verbose flag).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub include_transcript: bool,
}

/// Render the analytics record as a markdown document.
pub fn render_report(
    transcript: &Transcript,
    record: &AnalyticsRecord,
    options: &ReportOptions,
) -> String {
    let mut md = String::new();
    let push = |md: &mut String, line: &str| {
        md.push_str(line);
        md.push('\n');
    };

    push(&mut md, &format!("# {}\n", transcript.title));

    // Meeting info
    push(&mut md, "## Meeting Information\n");
    push(&mut md, &format!("- **Date:** {}", transcript.date));
    push(
        &mut md,
        &format!("- **Duration:** {} minutes", record.duration_minutes),
    );
    let participants = if transcript.participants.is_empty() {
        "N/A".to_string()
    } else {
        transcript.participants.join(", ")
    };
    push(&mut md, &format!("- **Participants:** {participants}"));
    push(
        &mut md,
        &format!("- **Meeting Type:** {}", record.meeting_type),
    );
    push(
        &mut md,
        &format!(
            "- **Has Video:** {}",
            if record.has_video { "Yes" } else { "No" }
        ),
    );

    if !transcript.attendees.is_empty() {
        push(&mut md, "\n### Attendees");
        for attendee in &transcript.attendees {
            push(
                &mut md,
                &format!(
                    "- {} ({})",
                    attendee.label(),
                    attendee.email.as_deref().unwrap_or("No email")
                ),
            );
        }
    }

    // Effectiveness
    push(&mut md, "\n## Meeting Effectiveness\n");
    push(
        &mut md,
        &format!(
            "- **Overall Score:** {}/100",
            record.effectiveness.overall_score
        ),
    );
    if !record.effectiveness.recommendations.is_empty() {
        push(&mut md, "- **Recommendations:**");
        for rec in &record.effectiveness.recommendations {
            push(&mut md, &format!("  - {rec}"));
        }
    }

    // Sentiment
    push(&mut md, "\n## Sentiment Analysis\n");
    push(
        &mut md,
        &format!("- **Overall:** {}", record.sentiment.dominant),
    );
    push(
        &mut md,
        &format!("  - Positive: {:.1}%", record.sentiment.overall.positive_pct),
    );
    push(
        &mut md,
        &format!("  - Neutral: {:.1}%", record.sentiment.overall.neutral_pct),
    );
    push(
        &mut md,
        &format!("  - Negative: {:.1}%", record.sentiment.overall.negative_pct),
    );

    // Speakers
    if !record.speakers.is_empty() {
        push(&mut md, "\n## Speaker Analytics\n");
        for speaker in &record.speakers {
            push(&mut md, &format!("### {}", speaker.name));
            push(
                &mut md,
                &format!("- Talk time: {:.1}%", speaker.duration_percentage),
            );
            push(
                &mut md,
                &format!("- Words per minute: {:.0}", speaker.words_per_minute),
            );
            push(
                &mut md,
                &format!("- Questions asked: {}", speaker.questions_asked),
            );
            push(
                &mut md,
                &format!("- Communication style: {}", speaker.communication_style),
            );
            push(
                &mut md,
                &format!(
                    "- Engagement score: {:.0}%\n",
                    speaker.engagement_score * 100.0
                ),
            );
        }
    }

    // Conversation quality
    push(&mut md, "## Conversation Quality\n");
    push(
        &mut md,
        &format!(
            "- **Participation Balance:** {:.0}%",
            record.quality.participation_balance * 100.0
        ),
    );
    push(
        &mut md,
        &format!(
            "- **Interruption Rate:** {:.1} per minute",
            record.quality.interruption_rate
        ),
    );
    push(
        &mut md,
        &format!("- **Silence:** {:.1}%", record.quality.silence_percentage),
    );
    push(
        &mut md,
        &format!(
            "- **Efficiency Score:** {}%",
            record.quality.efficiency_score
        ),
    );
    push(
        &mut md,
        &format!(
            "- **Engagement Level:** {}",
            record.quality.engagement_level
        ),
    );

    // Action items
    if !record.action_items.is_empty() {
        push(&mut md, "\n## Action Items\n");
        for (i, item) in record.action_items.iter().enumerate() {
            push(&mut md, &format!("{}. **{}**", i + 1, item.text));
            if let Some(assignee) = &item.assignee {
                push(&mut md, &format!("   - Assignee: {assignee}"));
            }
            if let Some(due) = &item.due_date {
                push(&mut md, &format!("   - Due: {due}"));
            }
            push(&mut md, &format!("   - Priority: {}", item.priority));
            push(&mut md, &format!("   - Category: {}\n", item.category));
        }
    }

    // Decisions
    if !record.decisions.is_empty() {
        push(&mut md, "\n## Decisions Made\n");
        for (i, decision) in record.decisions.iter().enumerate() {
            push(&mut md, &format!("{}. {}", i + 1, decision.text));
            push(&mut md, &format!("   - Speaker: {}", decision.speaker));
            push(
                &mut md,
                &format!("   - Confidence: {:.0}%\n", decision.confidence * 100.0),
            );
        }
    }

    // Commitments
    if !record.commitments.is_empty() {
        push(&mut md, "\n## Commitments\n");
        for (i, commitment) in record.commitments.iter().enumerate() {
            push(&mut md, &format!("{}. {}", i + 1, commitment.text));
            push(&mut md, &format!("   - By: {}\n", commitment.speaker));
        }
    }

    // Key moments
    if !record.key_moments.is_empty() {
        push(&mut md, "\n## Key Moments\n");
        for moment in &record.key_moments {
            let minute = (moment.timestamp_seconds / 60.0).floor() as i64;
            let mut line = format!("- **[{minute}:00]** {}", moment.title);
            if let Some(desc) = &moment.description {
                line.push_str(&format!(": {desc}"));
            }
            push(&mut md, &line);
        }
    }

    // Questions summary
    if record.questions.total > 0 {
        push(&mut md, "\n## Questions Analysis\n");
        push(
            &mut md,
            &format!("- **Total Questions:** {}", record.questions.total),
        );
        push(
            &mut md,
            &format!("- **Unanswered:** {}", record.questions.unanswered),
        );
    }

    // Topics
    if !transcript.topics.is_empty() {
        push(&mut md, "\n## Topics Discussed\n");
        for (i, topic) in transcript.topics.iter().enumerate() {
            let start = (topic.start_time / 60.0).floor() as i64;
            let end = (topic.end_time / 60.0).floor() as i64;
            push(
                &mut md,
                &format!("{}. **[{start}:00 - {end}:00]** {}", i + 1, topic.text),
            );
        }
    }

    // Full transcript
    if options.include_transcript && !transcript.sentences.is_empty() {
        push(&mut md, "\n## Full Transcript\n");
        for (label, text) in speaker_runs(&transcript.sentences) {
            push(&mut md, &format!("**{label}:** {text}\n"));
        }
    }

    // Footer
    push(&mut md, "---\n");
    push(&mut md, &format!("*Synced at {}*", record.synced_at));
    push(&mut md, &format!("*Transcript ID: {}*", transcript.id));

    md
}

/// Collapse the sentence list into contiguous same-speaker runs. Runs break
/// on `speaker_id`; the label shown is the run's first display name.
fn speaker_runs(sentences: &[Sentence]) -> Vec<(String, String)> {
    let mut runs: Vec<(String, String)> = Vec::new();
    let mut current_id: Option<&str> = None;
    for sentence in sentences {
        if current_id == Some(sentence.speaker_id.as_str()) {
            if let Some((_, text)) = runs.last_mut() {
                text.push(' ');
                text.push_str(sentence.text.trim());
                continue;
            }
        }
        current_id = Some(sentence.speaker_id.as_str());
        runs.push((
            sentence.speaker_label().to_string(),
            sentence.text.trim().to_string(),
        ));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::*;

    fn base_transcript() -> Transcript {
        Transcript {
            id: "tx_report".into(),
            title: "Design Review".into(),
            date: "2026-03-02T10:00:00Z".into(),
            duration_seconds: 1500.0,
            participants: vec!["alice@x.com".into(), "bob@x.com".into()],
            attendees: vec![Attendee {
                display_name: Some("Alice".into()),
                name: None,
                email: Some("alice@x.com".into()),
            }],
            organizer_email: None,
            host_email: None,
            transcript_url: None,
            audio_url: None,
            video_url: None,
            analytics: AnalyticsSummary::default(),
            sentences: vec![],
            topics: vec![TopicSpan {
                text: "API design".into(),
                start_time: 0.0,
                end_time: 600.0,
            }],
            soundbites: vec![],
            summary: ProviderSummary::default(),
        }
    }

    fn base_record() -> AnalyticsRecord {
        AnalyticsRecord {
            meeting_id: "tx_report".into(),
            title: "Design Review".into(),
            date: "2026-03-02T10:00:00Z".into(),
            duration_minutes: 25,
            participants: vec![],
            meeting_type: MeetingType::Review,
            sentiment: SentimentAnalysis {
                overall: SentimentShares {
                    positive_pct: 42.5,
                    neutral_pct: 40.0,
                    negative_pct: 17.5,
                },
                dominant: Sentiment::Positive,
                timeline: vec![],
                emotional_volatility: 0.0,
            },
            speakers: vec![],
            quality: ConversationQuality {
                participation_balance: 0.85,
                interruption_rate: 0.4,
                total_interruptions: 1,
                silence_percentage: 4.2,
                silence_duration_seconds: 63.0,
                efficiency_score: 70,
                engagement_level: EngagementLevel::Medium,
                indicators: QualityIndicators::default(),
            },
            action_items: vec![],
            decisions: vec![],
            commitments: vec![],
            questions: QuestionsAnalysis::default(),
            key_moments: vec![],
            competitive: CompetitiveInsights::default(),
            effectiveness: MeetingEffectiveness {
                overall_score: 67,
                factors: EffectivenessFactors::default(),
                recommendations: vec!["Document decisions made during the meeting".into()],
            },
            total_words: 0,
            speaker_count: 0,
            question_count: 0,
            task_count: 0,
            silence_percentage: 4,
            has_action_items: false,
            has_video: false,
            synced_at: "2026-03-02T12:00:00Z".into(),
        }
    }

    #[test]
    fn render_is_deterministic() {
        let t = base_transcript();
        let r = base_record();
        let opts = ReportOptions::default();
        assert_eq!(render_report(&t, &r, &opts), render_report(&t, &r, &opts));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let md = render_report(&base_transcript(), &base_record(), &ReportOptions::default());
        let sections = [
            "# Design Review",
            "## Meeting Information",
            "### Attendees",
            "## Meeting Effectiveness",
            "## Sentiment Analysis",
            "## Conversation Quality",
            "## Topics Discussed",
            "*Transcript ID: tx_report*",
        ];
        let mut last = 0;
        for section in sections {
            let pos = md.find(section).unwrap_or_else(|| panic!("missing {section}"));
            assert!(pos >= last, "{section} out of order");
            last = pos;
        }
    }

    #[test]
    fn empty_collections_skip_sections() {
        let md = render_report(&base_transcript(), &base_record(), &ReportOptions::default());
        assert!(!md.contains("## Action Items"));
        assert!(!md.contains("## Decisions Made"));
        assert!(!md.contains("## Commitments"));
        assert!(!md.contains("## Key Moments"));
        assert!(!md.contains("## Questions Analysis"));
        assert!(!md.contains("## Full Transcript"));
    }

    #[test]
    fn action_items_render_details() {
        let mut record = base_record();
        record.action_items = vec![ActionItem {
            source_index: 3,
            text: "update the runbook".into(),
            assignee: Some("John".into()),
            due_date: Some("Friday".into()),
            priority: Priority::High,
            category: ActionCategory::Update,
            timestamp_seconds: 95.0,
            speaker: "Alice".into(),
            context: "John, can you update the runbook".into(),
            confidence: 0.85,
        }];
        let md = render_report(&base_transcript(), &record, &ReportOptions::default());
        assert!(md.contains("1. **update the runbook**"));
        assert!(md.contains("   - Assignee: John"));
        assert!(md.contains("   - Due: Friday"));
        assert!(md.contains("   - Priority: high"));
    }

    #[test]
    fn key_moment_timestamps_render_as_minutes() {
        let mut record = base_record();
        record.key_moments = vec![KeyMoment {
            kind: MomentKind::Decision,
            title: "Decision Made".into(),
            description: Some("ship Friday".into()),
            timestamp_seconds: 125.0,
            end_seconds: None,
            speaker: Some("Alice".into()),
            assignee: None,
            video_url: None,
        }];
        let md = render_report(&base_transcript(), &record, &ReportOptions::default());
        assert!(md.contains("- **[2:00]** Decision Made: ship Friday"));
    }

    #[test]
    fn transcript_grouped_by_speaker_runs() {
        let mut t = base_transcript();
        t.sentences = vec![
            Sentence {
                index: 0,
                text: "Morning all.".into(),
                speaker_id: "s1".into(),
                speaker_name: Some("Alice".into()),
                start_time: 0.0,
                end_time: 2.0,
                tags: None,
            },
            Sentence {
                index: 1,
                text: "Let's start.".into(),
                speaker_id: "s1".into(),
                speaker_name: Some("Alice".into()),
                start_time: 2.0,
                end_time: 4.0,
                tags: None,
            },
            Sentence {
                index: 2,
                text: "Ready.".into(),
                speaker_id: "s2".into(),
                speaker_name: Some("Bob".into()),
                start_time: 4.0,
                end_time: 5.0,
                tags: None,
            },
        ];
        let md = render_report(
            &t,
            &base_record(),
            &ReportOptions {
                include_transcript: true,
            },
        );
        assert!(md.contains("**Alice:** Morning all. Let's start."));
        assert!(md.contains("**Bob:** Ready."));
    }

    #[test]
    fn transcript_omitted_by_default() {
        let mut t = base_transcript();
        t.sentences = vec![Sentence {
            index: 0,
            text: "hello".into(),
            speaker_id: "s1".into(),
            speaker_name: None,
            start_time: 0.0,
            end_time: 1.0,
            tags: None,
        }];
        let md = render_report(&t, &base_record(), &ReportOptions::default());
        assert!(!md.contains("## Full Transcript"));
    }

    #[test]
    fn footer_uses_record_timestamp() {
        let md = render_report(&base_transcript(), &base_record(), &ReportOptions::default());
        assert!(md.contains("*Synced at 2026-03-02T12:00:00Z*"));
    }
}
