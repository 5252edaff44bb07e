//! Result type for the engine's total operations.
//!
//! Core operations never return errors to the caller. When something inside
//! goes wrong they still produce a usable value, tagged with the reason the
//! fallback was taken so callers and tests can tell the two cases apart.

use crate::types::Category;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    SentimentModelFailed(String),
    SentimentOutOfRange,
    CrisisMatcherFailed(String),
    NonFiniteSentiment,
    EmptyResponsePool(Category),
    RandomIndexOutOfRange { index: usize, len: usize },
    AnalysisPanicked,
    SelectionPanicked,
}

impl FallbackReason {
    /// Stable key used for statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            FallbackReason::SentimentModelFailed(_) => "sentiment_model_failed",
            FallbackReason::SentimentOutOfRange => "sentiment_out_of_range",
            FallbackReason::CrisisMatcherFailed(_) => "crisis_matcher_failed",
            FallbackReason::NonFiniteSentiment => "non_finite_sentiment",
            FallbackReason::EmptyResponsePool(_) => "empty_response_pool",
            FallbackReason::RandomIndexOutOfRange { .. } => "random_index_out_of_range",
            FallbackReason::AnalysisPanicked => "analysis_panicked",
            FallbackReason::SelectionPanicked => "selection_panicked",
        }
    }

    /// A crisis-detector failure may hide a real crisis and must be alarmed on.
    pub fn is_crisis_failure(&self) -> bool {
        matches!(self, FallbackReason::CrisisMatcherFailed(_))
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::SentimentModelFailed(e) => write!(f, "sentiment model failed: {e}"),
            FallbackReason::SentimentOutOfRange => {
                write!(f, "sentiment model returned out-of-range scores")
            }
            FallbackReason::CrisisMatcherFailed(e) => write!(f, "crisis matcher failed: {e}"),
            FallbackReason::NonFiniteSentiment => write!(f, "compound sentiment is not finite"),
            FallbackReason::EmptyResponsePool(category) => {
                write!(f, "response pool for '{category}' is empty")
            }
            FallbackReason::RandomIndexOutOfRange { index, len } => {
                write!(f, "random source returned index {index} for pool of {len}")
            }
            FallbackReason::AnalysisPanicked => write!(f, "message analysis panicked"),
            FallbackReason::SelectionPanicked => write!(f, "response selection panicked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Outcome::Fallback { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Success(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_crisis_failure(&self) -> bool {
        self.reason().is_some_and(FallbackReason::is_crisis_failure)
    }

    pub fn into_parts(self) -> (T, Option<FallbackReason>) {
        match self {
            Outcome::Success(value) => (value, None),
            Outcome::Fallback { value, reason } => (value, Some(reason)),
        }
    }
}

/// Text carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
