use crate::outcome::{panic_message, FallbackReason, Outcome};
use crate::types::{Polarity, SentimentScore};
use anyhow::anyhow;
use std::panic::{self, AssertUnwindSafe};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Source of raw valence scores for a piece of text.
pub trait ValenceModel: Send + Sync {
    fn polarity(&self, text: &str) -> anyhow::Result<Polarity>;
}

/// VADER lexicon and rule-based valence model.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderModel;

impl ValenceModel for VaderModel {
    fn polarity(&self, text: &str) -> anyhow::Result<Polarity> {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let field = |name: &str, value: Option<f64>| {
            value.ok_or_else(|| anyhow!("VADER output is missing '{name}'"))
        };

        let mut polarity = Polarity {
            compound: field("compound", scores.get("compound").copied())?,
            positive: field("pos", scores.get("pos").copied())?,
            negative: field("neg", scores.get("neg").copied())?,
            neutral: field("neu", scores.get("neu").copied())?,
        };
        // vader_sentiment 0.1 subtracts the `!`/`?` emphasis from a zero
        // total; with no valenced words the compound stays at zero.
        if polarity.positive == 0.0 && polarity.negative == 0.0 {
            polarity.compound = 0.0;
        }
        Ok(polarity)
    }
}

pub struct SentimentScorer {
    model: Box<dyn ValenceModel>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Box::new(VaderModel))
    }
}

impl SentimentScorer {
    pub fn new(model: Box<dyn ValenceModel>) -> Self {
        Self { model }
    }

    pub fn score(&self, text: &str) -> Outcome<SentimentScore> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.model.polarity(text)))
            .unwrap_or_else(|payload| {
                Err(anyhow!("valence model panicked: {}", panic_message(payload.as_ref())))
            });

        match result {
            Ok(polarity) if polarity.is_valid() => {
                Outcome::Success(SentimentScore::from_polarity(polarity))
            }
            Ok(polarity) => {
                log::warn!("Sentiment model returned invalid scores {polarity:?}, using neutral");
                Outcome::fallback(SentimentScore::neutral(), FallbackReason::SentimentOutOfRange)
            }
            Err(e) => {
                log::warn!("Sentiment scoring failed, using neutral: {e}");
                Outcome::fallback(
                    SentimentScore::neutral(),
                    FallbackReason::SentimentModelFailed(e.to_string()),
                )
            }
        }
    }
}
