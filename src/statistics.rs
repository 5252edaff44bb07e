use crate::outcome::FallbackReason;
use crate::types::{Category, SeverityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub messages_analyzed: u64,
    pub responses_selected: u64,
    pub crisis_detections: u64,
    pub crisis_responses: u64,
    pub by_category: BTreeMap<Category, u64>,
    pub by_severity: BTreeMap<SeverityLevel, u64>,
    pub fallbacks: BTreeMap<String, u64>,
    /// Crisis matching failures; each one may be a missed crisis.
    pub crisis_detector_failures: u64,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GlobalStats {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            messages_analyzed: 0,
            responses_selected: 0,
            crisis_detections: 0,
            crisis_responses: 0,
            by_category: BTreeMap::new(),
            by_severity: BTreeMap::new(),
            fallbacks: BTreeMap::new(),
            crisis_detector_failures: 0,
            start_time: now,
            last_updated: now,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StatEvent {
    MessageAnalyzed {
        category: Category,
        severity: SeverityLevel,
        crisis: bool,
    },
    ResponseSelected {
        crisis: bool,
    },
    Fallback {
        reason: FallbackReason,
    },
    CrisisDetectorFailure {
        reason: FallbackReason,
    },
}

impl StatEvent {
    /// Routes a fallback to the crisis alarm or the ordinary counters.
    pub fn from_fallback(reason: &FallbackReason) -> Self {
        if reason.is_crisis_failure() {
            StatEvent::CrisisDetectorFailure {
                reason: reason.clone(),
            }
        } else {
            StatEvent::Fallback {
                reason: reason.clone(),
            }
        }
    }
}

pub struct StatisticsCollector {
    stats: Mutex<GlobalStats>,
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(GlobalStats::new()),
        }
    }

    pub fn record_event(&self, event: StatEvent) {
        let mut stats = match self.stats.lock() {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("Statistics lock poisoned, recovering: {e}");
                e.into_inner()
            }
        };
        Self::process_event(event, &mut stats);
    }

    fn process_event(event: StatEvent, stats: &mut GlobalStats) {
        stats.last_updated = Utc::now();

        match event {
            StatEvent::MessageAnalyzed {
                category,
                severity,
                crisis,
            } => {
                stats.messages_analyzed += 1;
                *stats.by_category.entry(category).or_insert(0) += 1;
                *stats.by_severity.entry(severity).or_insert(0) += 1;
                if crisis {
                    stats.crisis_detections += 1;
                }
            }
            StatEvent::ResponseSelected { crisis } => {
                stats.responses_selected += 1;
                if crisis {
                    stats.crisis_responses += 1;
                }
            }
            StatEvent::Fallback { reason } => {
                *stats.fallbacks.entry(reason.kind().to_string()).or_insert(0) += 1;
            }
            StatEvent::CrisisDetectorFailure { .. } => {
                stats.crisis_detector_failures += 1;
            }
        }
    }

    pub fn snapshot(&self) -> GlobalStats {
        match self.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(e) => e.into_inner().clone(),
        }
    }

    pub fn crisis_detector_failures(&self) -> u64 {
        self.snapshot().crisis_detector_failures
    }

    pub fn reset(&self) {
        let mut stats = match self.stats.lock() {
            Ok(stats) => stats,
            Err(e) => e.into_inner(),
        };
        *stats = GlobalStats::new();
        log::info!("Statistics reset");
    }
}
