use confab_core::{QuestionKind, QuestionRecord, QuestionsAnalysis, Sentence, Transcript};

/// Sentences scanned past a question for a reply from another speaker.
pub const ANSWER_LOOKAHEAD: usize = 5;

/// Collect question-tagged sentences, categorize them, and mark each as
/// answered when a different speaker speaks within the look-ahead window.
pub fn extract_questions(transcript: &Transcript) -> QuestionsAnalysis {
    let sentences = &transcript.sentences;
    let records: Vec<QuestionRecord> = sentences
        .iter()
        .filter_map(|sentence| {
            let question = sentence.tags.as_ref()?.question.as_ref()?;
            let text = if question.is_empty() {
                sentence.text.clone()
            } else {
                question.clone()
            };
            Some(QuestionRecord {
                source_index: sentence.index,
                text,
                speaker: sentence.speaker_label().to_string(),
                timestamp_seconds: sentence.start_time,
                kind: question_kind(&sentence.text),
                answered: is_answered(sentences, sentence.index),
            })
        })
        .collect();

    let provider_count = transcript.analytics.question_count as usize;
    let unanswered = records.iter().filter(|q| !q.answered).count();
    QuestionsAnalysis {
        total: if provider_count > 0 {
            provider_count
        } else {
            records.len()
        },
        unanswered,
        records,
    }
}

/// Categorize by leading wh-word / yes-no pattern. Keyword order matters:
/// "why" is checked before "what", so "why what-if" questions stay "why".
pub fn question_kind(sentence_text: &str) -> QuestionKind {
    let text = sentence_text.to_lowercase();
    let has = |needle: &str| text.contains(needle);
    if has("why") || has("reason") {
        QuestionKind::Why
    } else if has("how") || has("way") {
        QuestionKind::How
    } else if has("what") || has("which") {
        QuestionKind::What
    } else if has("when") || has("time") {
        QuestionKind::When
    } else if has("who") || has("whom") {
        QuestionKind::Who
    } else if has("where") || has("location") {
        QuestionKind::Where
    } else if text.starts_with("is") || text.starts_with("are") || text.starts_with("can") {
        QuestionKind::YesNo
    } else {
        QuestionKind::General
    }
}

/// Heuristic, not semantic: any other speaker within the next
/// `ANSWER_LOOKAHEAD` sentence slots counts as an answer.
pub(crate) fn is_answered(sentences: &[Sentence], index: usize) -> bool {
    let end = (index + ANSWER_LOOKAHEAD).min(sentences.len());
    let asker = &sentences[index].speaker_id;
    sentences[index + 1..end]
        .iter()
        .any(|s| &s.speaker_id != asker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sentence, tagged, transcript};
    use confab_core::SentenceTags;

    fn question_tag(text: &str) -> SentenceTags {
        SentenceTags {
            question: Some(text.into()),
            ..Default::default()
        }
    }

    #[test]
    fn no_question_tags_no_records() {
        let t = transcript(vec![sentence(0, "Alice", 0.0, "statement")]);
        let analysis = extract_questions(&t);
        assert_eq!(analysis.total, 0);
        assert!(analysis.records.is_empty());
    }

    #[test]
    fn kinds_from_sentence_text() {
        assert_eq!(question_kind("Why did the build fail?"), QuestionKind::Why);
        assert_eq!(question_kind("How do we deploy this?"), QuestionKind::How);
        assert_eq!(question_kind("What's the budget?"), QuestionKind::What);
        assert_eq!(question_kind("When does the trial end?"), QuestionKind::When);
        assert_eq!(question_kind("Who owns the migration?"), QuestionKind::Who);
        assert_eq!(question_kind("Where is the runbook?"), QuestionKind::Where);
        assert_eq!(question_kind("can we ship tomorrow?"), QuestionKind::YesNo);
        assert_eq!(question_kind("you're sure about that?"), QuestionKind::General);
    }

    #[test]
    fn answered_when_other_speaker_replies() {
        let t = transcript(vec![
            tagged(0, "Alice", 0.0, "What's the timeline?", question_tag("What's the timeline?")),
            sentence(1, "Bob", 4.0, "End of March."),
        ]);
        let analysis = extract_questions(&t);
        assert!(analysis.records[0].answered);
        assert_eq!(analysis.unanswered, 0);
    }

    #[test]
    fn unanswered_when_same_speaker_keeps_talking() {
        let mut sentences =
            vec![tagged(0, "Alice", 0.0, "Any objections?", question_tag("Any objections?"))];
        for i in 1..6 {
            sentences.push(sentence(i, "Alice", i as f64 * 4.0, "continuing my point"));
        }
        let analysis = extract_questions(&transcript(sentences));
        assert!(!analysis.records[0].answered);
        assert_eq!(analysis.unanswered, 1);
    }

    #[test]
    fn reply_outside_lookahead_does_not_count() {
        let mut sentences =
            vec![tagged(0, "Alice", 0.0, "Thoughts?", question_tag("Thoughts?"))];
        // Slots 1..=4 are Alice; Bob first speaks at slot 5, past the window.
        for i in 1..5 {
            sentences.push(sentence(i, "Alice", i as f64 * 4.0, "more context"));
        }
        sentences.push(sentence(5, "Bob", 20.0, "late reply"));
        let analysis = extract_questions(&transcript(sentences));
        assert!(!analysis.records[0].answered);
    }

    #[test]
    fn question_at_end_of_transcript() {
        let t = transcript(vec![tagged(
            0,
            "Alice",
            0.0,
            "Closing question?",
            question_tag("Closing question?"),
        )]);
        let analysis = extract_questions(&t);
        assert!(!analysis.records[0].answered);
    }

    #[test]
    fn empty_question_tag_falls_back_to_sentence_text() {
        let t = transcript(vec![tagged(
            0,
            "Alice",
            0.0,
            "What about caching?",
            question_tag(""),
        )]);
        let analysis = extract_questions(&t);
        assert_eq!(analysis.records[0].text, "What about caching?");
    }

    #[test]
    fn provider_count_preferred_over_local() {
        let mut t = transcript(vec![tagged(
            0,
            "Alice",
            0.0,
            "What about caching?",
            question_tag("What about caching?"),
        )]);
        t.analytics.question_count = 7;
        assert_eq!(extract_questions(&t).total, 7);
    }
}
