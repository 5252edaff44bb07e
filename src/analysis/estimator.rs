use crate::outcome::{FallbackReason, Outcome};
use crate::types::{KeywordHit, SentimentScore, SeverityLevel};

pub const BASE_CONFIDENCE: f64 = 0.5;
pub const CRISIS_CONFIDENCE: f64 = 0.95;
const KEYWORD_WEIGHT: f64 = 0.1;
const MAX_KEYWORD_BOOST: f64 = 0.3;
const SENTIMENT_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub confidence: f64,
    pub severity: SeverityLevel,
}

impl Estimate {
    pub fn fallback() -> Self {
        Self {
            confidence: BASE_CONFIDENCE,
            severity: SeverityLevel::Low,
        }
    }
}

pub fn estimate(
    sentiment: &SentimentScore,
    keywords: &[KeywordHit],
    crisis_detected: bool,
) -> Outcome<Estimate> {
    if !crisis_detected && !sentiment.compound.is_finite() {
        log::warn!("Compound sentiment {} is not finite", sentiment.compound);
        return Outcome::fallback(Estimate::fallback(), FallbackReason::NonFiniteSentiment);
    }

    Outcome::Success(Estimate {
        confidence: confidence(sentiment.compound, keywords.len(), crisis_detected),
        severity: severity(sentiment.compound, crisis_detected),
    })
}

pub fn confidence(compound: f64, keyword_count: usize, crisis_detected: bool) -> f64 {
    if crisis_detected {
        return CRISIS_CONFIDENCE;
    }
    let keyword_boost = (keyword_count as f64 * KEYWORD_WEIGHT).min(MAX_KEYWORD_BOOST);
    (BASE_CONFIDENCE + keyword_boost + compound.abs() * SENTIMENT_WEIGHT).clamp(0.0, 1.0)
}

/// Only the crisis flag and compound sentiment drive severity.
pub fn severity(compound: f64, crisis_detected: bool) -> SeverityLevel {
    if crisis_detected || compound <= -0.6 {
        SeverityLevel::High
    } else if compound <= -0.3 {
        SeverityLevel::Medium
    } else {
        SeverityLevel::Low
    }
}
