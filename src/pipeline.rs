//! Orchestrates analysis and response selection for one message at a time.
//!
//! The engine holds only read-only catalogs and a statistics collector, so a
//! single instance can serve concurrent callers by shared reference.

use crate::analysis::{
    estimate, CategoryClassifier, CrisisDetector, SentimentScorer, ValenceModel, VaderModel,
};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::outcome::{panic_message, FallbackReason, Outcome};
use crate::response::{resource_query, RandomSource, ResourceQuery, ResponseSelector};
use crate::statistics::{StatEvent, StatisticsCollector};
use crate::types::{ConversationTurn, MessageAnalysis, ResponsePlan};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

pub const HEALTH_CHECK_MESSAGE: &str = "Hello, how are you?";

/// Everything the transport layer needs to answer one user message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub analysis: MessageAnalysis,
    pub response: ResponsePlan,
    pub resources: ResourceQuery,
    /// Fallback reasons taken while producing this turn.
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub detail: String,
}

pub struct Engine {
    scorer: SentimentScorer,
    detector: CrisisDetector,
    classifier: CategoryClassifier,
    selector: ResponseSelector,
    stats: StatisticsCollector,
}

impl Engine {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_model(config, Box::new(VaderModel))
    }

    pub fn with_model(config: &Config, model: Box<dyn ValenceModel>) -> anyhow::Result<Self> {
        let catalog = Catalog::from_config(config)?;
        Ok(Self::from_parts(
            SentimentScorer::new(model),
            CrisisDetector::from_patterns(catalog.crisis_patterns),
            CategoryClassifier::new(catalog.lexicon),
            ResponseSelector::new(catalog.templates),
        ))
    }

    pub fn from_parts(
        scorer: SentimentScorer,
        detector: CrisisDetector,
        classifier: CategoryClassifier,
        selector: ResponseSelector,
    ) -> Self {
        Self {
            scorer,
            detector,
            classifier,
            selector,
            stats: StatisticsCollector::new(),
        }
    }

    pub fn statistics(&self) -> &StatisticsCollector {
        &self.stats
    }

    /// Analyses one message. Never fails: component fallbacks are folded into
    /// the result, with a crisis-detector failure reported ahead of any other.
    pub fn analyze(&self, text: &str) -> Outcome<MessageAnalysis> {
        let (analysis, reasons) = self.analyze_unrecorded(text);
        for reason in &reasons {
            self.stats.record_event(StatEvent::from_fallback(reason));
        }
        self.stats.record_event(StatEvent::MessageAnalyzed {
            category: analysis.category,
            severity: analysis.severity,
            crisis: analysis.crisis_detected,
        });

        match reasons.into_iter().next() {
            Some(reason) => Outcome::fallback(analysis, reason),
            None => Outcome::Success(analysis),
        }
    }

    /// Runs the analysis and returns every fallback taken, most urgent
    /// first, without touching statistics.
    fn analyze_unrecorded(&self, text: &str) -> (MessageAnalysis, Vec<FallbackReason>) {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run_analysis(text))) {
            Ok(result) => result,
            Err(payload) => {
                log::error!(
                    "Message analysis panicked, using fallback analysis: {}",
                    panic_message(payload.as_ref())
                );
                (MessageAnalysis::fallback(), vec![FallbackReason::AnalysisPanicked])
            }
        }
    }

    fn run_analysis(&self, text: &str) -> (MessageAnalysis, Vec<FallbackReason>) {
        let (sentiment, sentiment_fallback) = self.scorer.score(text).into_parts();
        let (crisis_detected, crisis_fallback) = self.detector.detect(text).into_parts();
        let category = self.classifier.classify(text);
        let keywords = self.classifier.extract_keywords(text);
        let (estimate, estimate_fallback) =
            estimate(&sentiment, &keywords, crisis_detected).into_parts();

        let reasons: Vec<FallbackReason> = [crisis_fallback, sentiment_fallback, estimate_fallback]
            .into_iter()
            .flatten()
            .collect();

        let analysis = MessageAnalysis {
            sentiment,
            keywords,
            crisis_detected,
            category,
            confidence: estimate.confidence,
            severity: estimate.severity,
        };
        log::debug!(
            "Analysis: category={} severity={} crisis={} confidence={:.2} keywords={}",
            analysis.category,
            analysis.severity,
            analysis.crisis_detected,
            analysis.confidence,
            analysis.keywords.len()
        );

        (analysis, reasons)
    }

    pub fn select_response(
        &self,
        analysis: &MessageAnalysis,
        rng: &mut dyn RandomSource,
    ) -> Outcome<ResponsePlan> {
        let outcome = self.selector.select(analysis, rng);
        if let Some(reason) = outcome.reason() {
            self.stats.record_event(StatEvent::from_fallback(reason));
        }
        self.stats.record_event(StatEvent::ResponseSelected {
            crisis: outcome.value().is_crisis_response,
        });
        outcome
    }

    /// Produces a full chat turn. Prior turns are accepted for interface
    /// stability and are not consulted.
    pub fn respond(
        &self,
        text: &str,
        context: &[ConversationTurn],
        rng: &mut dyn RandomSource,
    ) -> ChatTurn {
        log::debug!("Responding to message with {} prior turns", context.len());

        let (analysis, analysis_fallback) = self.analyze(text).into_parts();
        let (response, response_fallback) = self.select_response(&analysis, rng).into_parts();
        let resources = resource_query(&analysis);

        let degraded = [analysis_fallback, response_fallback]
            .into_iter()
            .flatten()
            .map(|reason| reason.to_string())
            .collect();

        ChatTurn {
            analysis,
            response,
            resources,
            degraded,
        }
    }

    /// Analyses a fixed greeting. Not counted in the statistics.
    pub fn health_check(&self) -> HealthStatus {
        let (_, reasons) = self.analyze_unrecorded(HEALTH_CHECK_MESSAGE);
        match reasons.first() {
            None => HealthStatus {
                healthy: true,
                detail: "healthy".to_string(),
            },
            Some(reason) => HealthStatus {
                healthy: false,
                detail: format!("error: {reason}"),
            },
        }
    }
}
