use confab_core::{CompetitiveInsights, CompetitorMention, PricingMention, Transcript};

/// Competitor names and competitive-context terms scanned for in sentence
/// text.
pub const COMPETITOR_TERMS: &[&str] = &[
    "salesforce",
    "hubspot",
    "microsoft",
    "google",
    "amazon",
    "aws",
    "competitor",
    "competition",
    "alternative",
    "versus",
    "compared to",
];

const ADVANTAGE_WORDS: &[&str] = &["better", "advantage"];

/// Scan for competitor-term hits and pricing tags. A sentence naming two
/// competitors yields two mentions.
pub fn extract_competitive(transcript: &Transcript) -> CompetitiveInsights {
    let mut mentions = Vec::new();
    let mut pricing = Vec::new();

    for sentence in &transcript.sentences {
        let text = sentence.text.to_lowercase();
        for term in COMPETITOR_TERMS {
            if text.contains(term) {
                mentions.push(CompetitorMention {
                    competitor: (*term).to_string(),
                    context: sentence.text.clone(),
                    timestamp_seconds: sentence.start_time,
                    speaker: sentence.speaker_label().to_string(),
                    sentiment: sentence.tags.as_ref().and_then(|t| t.sentiment),
                });
            }
        }
        if let Some(amount) = sentence.tags.as_ref().and_then(|t| t.pricing.clone()) {
            pricing.push(PricingMention {
                amount,
                context: sentence.text.clone(),
                timestamp_seconds: sentence.start_time,
                speaker: sentence.speaker_label().to_string(),
            });
        }
    }

    let advantage_mentioned = mentions.iter().any(|m| {
        let context = m.context.to_lowercase();
        ADVANTAGE_WORDS.iter().any(|w| context.contains(w))
    });

    CompetitiveInsights {
        mentions,
        pricing,
        advantage_mentioned,
    }
}
