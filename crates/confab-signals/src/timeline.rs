use std::collections::BTreeMap;

use confab_core::{SentimentAnalysis, SentimentSegment, Sentiment, Transcript};

/// Width of one sentiment-timeline segment, in seconds.
pub const SEGMENT_SECONDS: f64 = 300.0;

/// Build the full sentiment view: provider percentages plus the derived
/// timeline and volatility.
pub fn extract_sentiment(transcript: &Transcript) -> SentimentAnalysis {
    let timeline = sentiment_timeline(transcript);
    SentimentAnalysis {
        overall: transcript.analytics.sentiments,
        dominant: transcript.analytics.sentiments.dominant(),
        emotional_volatility: emotional_volatility(&timeline),
        timeline,
    }
}

/// Bucket tagged sentences onto a fixed time grid and pick the plurality
/// sentiment per bucket.
///
/// Segment `k` covers `[k*SEGMENT_SECONDS, (k+1)*SEGMENT_SECONDS)` keyed by
/// sentence start time, so every tagged sentence lands in exactly one
/// segment and segments never overlap. Buckets with no tagged sentences are
/// omitted. Plurality ties go to the earlier variant in
/// `Sentiment::ORDERED`.
pub fn sentiment_timeline(transcript: &Transcript) -> Vec<SentimentSegment> {
    let mut buckets: BTreeMap<u64, [usize; 3]> = BTreeMap::new();

    for sentence in &transcript.sentences {
        let Some(sentiment) = sentence.tags.as_ref().and_then(|t| t.sentiment) else {
            continue;
        };
        let bucket = (sentence.start_time.max(0.0) / SEGMENT_SECONDS) as u64;
        buckets.entry(bucket).or_insert([0; 3])[slot(sentiment)] += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket, counts)| {
            let tagged: usize = counts.iter().sum();
            let (sentiment, dominant) = plurality(&counts);
            SentimentSegment {
                start_time: bucket as f64 * SEGMENT_SECONDS,
                end_time: (bucket + 1) as f64 * SEGMENT_SECONDS,
                sentiment,
                confidence: dominant as f64 / tagged as f64,
            }
        })
        .collect()
}

/// Fraction of adjacent segment pairs whose dominant sentiment differs.
/// 0 when there are fewer than two segments.
pub fn emotional_volatility(timeline: &[SentimentSegment]) -> f64 {
    if timeline.len() < 2 {
        return 0.0;
    }
    let changes = timeline
        .windows(2)
        .filter(|pair| pair[0].sentiment != pair[1].sentiment)
        .count();
    changes as f64 / (timeline.len() - 1) as f64
}

fn slot(sentiment: Sentiment) -> usize {
    match sentiment {
        Sentiment::Positive => 0,
        Sentiment::Neutral => 1,
        Sentiment::Negative => 2,
    }
}

fn plurality(counts: &[usize; 3]) -> (Sentiment, usize) {
    let mut best = Sentiment::ORDERED[0];
    let mut best_count = counts[0];
    for (i, sentiment) in Sentiment::ORDERED.iter().enumerate().skip(1) {
        if counts[i] > best_count {
            best = *sentiment;
            best_count = counts[i];
        }
    }
    (best, best_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sentiment_tag, tagged, transcript};
    use confab_core::Sentiment::{Negative, Neutral, Positive};

    #[test]
    fn timeline_empty_without_tags() {
        let t = transcript(vec![crate::fixtures::sentence(0, "Alice", 10.0, "hi")]);
        assert!(sentiment_timeline(&t).is_empty());
        assert_eq!(emotional_volatility(&[]), 0.0);
    }

    #[test]
    fn timeline_buckets_by_start_time() {
        let t = transcript(vec![
            tagged(0, "Alice", 10.0, "great", sentiment_tag(Positive)),
            tagged(1, "Bob", 200.0, "fine", sentiment_tag(Positive)),
            tagged(2, "Alice", 400.0, "bad", sentiment_tag(Negative)),
        ]);
        let timeline = sentiment_timeline(&t);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].start_time, 0.0);
        assert_eq!(timeline[0].end_time, 300.0);
        assert_eq!(timeline[0].sentiment, Positive);
        assert_eq!(timeline[0].confidence, 1.0);
        assert_eq!(timeline[1].start_time, 300.0);
        assert_eq!(timeline[1].sentiment, Negative);
    }

    #[test]
    fn timeline_skips_empty_buckets() {
        // Sentences at 0s and 1000s: the 300-600s bucket has no tags and is
        // omitted rather than emitted as a gap segment.
        let t = transcript(vec![
            tagged(0, "Alice", 0.0, "good", sentiment_tag(Positive)),
            tagged(1, "Bob", 1000.0, "bad", sentiment_tag(Negative)),
        ]);
        let timeline = sentiment_timeline(&t);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[1].start_time, 900.0);
        assert_eq!(timeline[1].end_time, 1200.0);
    }

    #[test]
    fn timeline_covers_each_tagged_sentence_once() {
        let starts = [0.0, 150.0, 299.9, 300.0, 550.0, 899.0];
        let sentences = starts
            .iter()
            .enumerate()
            .map(|(i, &s)| tagged(i, "Alice", s, "x", sentiment_tag(Neutral)))
            .collect();
        let timeline = sentiment_timeline(&transcript(sentences));
        // Confidence is dominant/tagged, so with a single sentiment the
        // tagged counts are recoverable and must sum to the sentence count.
        let covered: f64 = timeline.iter().map(|seg| seg.confidence).sum::<f64>();
        assert_eq!(covered, timeline.len() as f64);
        let total_in_segments = [0.0, 300.0, 600.0]
            .iter()
            .map(|start| {
                starts
                    .iter()
                    .filter(|&&s| s >= *start && s < start + 300.0)
                    .count()
            })
            .sum::<usize>();
        assert_eq!(total_in_segments, starts.len());
    }

    #[test]
    fn plurality_tie_prefers_enumeration_order() {
        // One positive, one negative in the same bucket: positive wins.
        let t = transcript(vec![
            tagged(0, "Alice", 0.0, "bad", sentiment_tag(Negative)),
            tagged(1, "Bob", 10.0, "good", sentiment_tag(Positive)),
        ]);
        let timeline = sentiment_timeline(&t);
        assert_eq!(timeline[0].sentiment, Positive);
        assert_eq!(timeline[0].confidence, 0.5);
    }

    #[test]
    fn confidence_is_dominant_share() {
        let t = transcript(vec![
            tagged(0, "A", 0.0, "x", sentiment_tag(Neutral)),
            tagged(1, "A", 1.0, "x", sentiment_tag(Neutral)),
            tagged(2, "A", 2.0, "x", sentiment_tag(Positive)),
        ]);
        let timeline = sentiment_timeline(&t);
        assert_eq!(timeline[0].sentiment, Neutral);
        assert!((timeline[0].confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_counts_changes() {
        let t = transcript(vec![
            tagged(0, "A", 0.0, "x", sentiment_tag(Positive)),
            tagged(1, "A", 310.0, "x", sentiment_tag(Negative)),
            tagged(2, "A", 620.0, "x", sentiment_tag(Negative)),
            tagged(3, "A", 910.0, "x", sentiment_tag(Positive)),
        ]);
        let analysis = extract_sentiment(&t);
        // positive -> negative -> negative -> positive: 2 changes over 3 pairs
        assert!((analysis.emotional_volatility - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_zero_for_single_segment() {
        let t = transcript(vec![tagged(0, "A", 0.0, "x", sentiment_tag(Positive))]);
        assert_eq!(extract_sentiment(&t).emotional_volatility, 0.0);
    }
}
