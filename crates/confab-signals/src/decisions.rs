use confab_core::{Commitment, Decision, Transcript};

/// Phrases marking a sentence as recording a group decision.
pub const DECISION_KEYWORDS: &[&str] = &[
    "we decided",
    "we will",
    "we'll",
    "decision is",
    "agreed to",
    "going with",
    "chosen",
    "selected",
    "confirmed",
    "approved",
    "final decision",
    "we are going",
    "plan is to",
];

/// First-person commitment phrases.
pub const COMMITMENT_KEYWORDS: &[&str] = &[
    "i will",
    "i'll",
    "i commit",
    "i promise",
    "i can",
    "i am going to",
    "i will take care",
    "on me",
    "my responsibility",
    "i will handle",
    "i will make sure",
];

const STRONG_WORDS: &[&str] = &["definitely", "absolutely", "confirmed", "final", "agreed"];
const HEDGE_WORDS: &[&str] = &["maybe", "probably", "think", "might", "could"];

pub const STRONG_CONFIDENCE: f64 = 0.9;
pub const HEDGED_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Fixed reliability attached to every commitment.
pub const COMMITMENT_RELIABILITY: f64 = 0.8;

/// Sentences containing any decision keyword, extracted verbatim with a
/// heuristic confidence.
pub fn extract_decisions(transcript: &Transcript) -> Vec<Decision> {
    transcript
        .sentences
        .iter()
        .filter(|s| {
            let text = s.text.to_lowercase();
            DECISION_KEYWORDS.iter().any(|k| text.contains(k))
        })
        .map(|s| Decision {
            source_index: s.index,
            text: s.text.clone(),
            speaker: s.speaker_label().to_string(),
            timestamp_seconds: s.start_time,
            confidence: decision_confidence(&s.text),
        })
        .collect()
}

/// Sentences containing any first-person commitment keyword.
pub fn extract_commitments(transcript: &Transcript) -> Vec<Commitment> {
    transcript
        .sentences
        .iter()
        .filter(|s| {
            let text = s.text.to_lowercase();
            COMMITMENT_KEYWORDS.iter().any(|k| text.contains(k))
        })
        .map(|s| Commitment {
            source_index: s.index,
            text: s.text.clone(),
            speaker: s.speaker_label().to_string(),
            timestamp_seconds: s.start_time,
            reliability: COMMITMENT_RELIABILITY,
        })
        .collect()
}

/// Strong-certainty words raise confidence, hedges lower it. Strong words
/// win when both appear.
pub fn decision_confidence(text: &str) -> f64 {
    let text = text.to_lowercase();
    if STRONG_WORDS.iter().any(|w| text.contains(w)) {
        STRONG_CONFIDENCE
    } else if HEDGE_WORDS.iter().any(|w| text.contains(w)) {
        HEDGED_CONFIDENCE
    } else {
        DEFAULT_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sentence, transcript};

    #[test]
    fn single_decision_sentence() {
        let t = transcript(vec![sentence(0, "Alice", 120.0, "We decided to ship Friday")]);
        let decisions = extract_decisions(&t);
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].text, "We decided to ship Friday");
        assert_eq!(decisions[0].speaker, "Alice");
        assert_eq!(decisions[0].timestamp_seconds, 120.0);
        assert_eq!(decisions[0].confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn strong_words_raise_confidence() {
        assert_eq!(
            decision_confidence("We have definitely agreed to proceed"),
            STRONG_CONFIDENCE
        );
    }

    #[test]
    fn hedges_lower_confidence() {
        assert_eq!(
            decision_confidence("We'll probably go with option two"),
            HEDGED_CONFIDENCE
        );
    }

    #[test]
    fn strong_beats_hedge() {
        assert_eq!(
            decision_confidence("Maybe, but the final call is made"),
            STRONG_CONFIDENCE
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let t = transcript(vec![sentence(0, "Bob", 5.0, "FINAL DECISION: ship it")]);
        assert_eq!(extract_decisions(&t).len(), 1);
    }

    #[test]
    fn non_decision_sentences_ignored() {
        let t = transcript(vec![sentence(0, "Bob", 0.0, "the weather is nice")]);
        assert!(extract_decisions(&t).is_empty());
    }

    #[test]
    fn commitments_tagged_with_speaker() {
        let t = transcript(vec![
            sentence(0, "Alice", 0.0, "I'll take care of the rollout"),
            sentence(1, "Bob", 4.0, "sounds good"),
            sentence(2, "Bob", 8.0, "that one is on me"),
        ]);
        let commitments = extract_commitments(&t);
        assert_eq!(commitments.len(), 2);
        assert_eq!(commitments[0].speaker, "Alice");
        assert_eq!(commitments[1].speaker, "Bob");
        assert!(commitments.iter().all(|c| c.reliability == COMMITMENT_RELIABILITY));
    }

    #[test]
    fn order_follows_sentence_order() {
        let t = transcript(vec![
            sentence(0, "A", 0.0, "we decided on blue"),
            sentence(1, "B", 5.0, "we agreed to revisit pricing"),
        ]);
        let decisions = extract_decisions(&t);
        assert_eq!(decisions[0].source_index, 0);
        assert_eq!(decisions[1].source_index, 1);
    }
}
