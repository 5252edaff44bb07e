use crate::outcome::{panic_message, FallbackReason, Outcome};
use anyhow::Context;
use regex::{Regex, RegexBuilder};
use std::panic::{self, AssertUnwindSafe};

/// One bucket of crisis phrases.
pub trait PhraseMatcher: Send + Sync {
    fn name(&self) -> &str;
    fn is_match(&self, text: &str) -> bool;
}

pub struct RegexMatcher {
    name: String,
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(name: &str, pattern: &str) -> anyhow::Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid crisis pattern '{name}': {pattern}"))?;
        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }
}

impl PhraseMatcher for RegexMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Tests messages against the crisis buckets in declaration order.
pub struct CrisisDetector {
    matchers: Vec<Box<dyn PhraseMatcher>>,
}

impl CrisisDetector {
    pub fn new(matchers: Vec<Box<dyn PhraseMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn from_patterns(patterns: Vec<RegexMatcher>) -> Self {
        Self::new(
            patterns
                .into_iter()
                .map(|m| Box::new(m) as Box<dyn PhraseMatcher>)
                .collect(),
        )
    }

    /// Name of the first bucket matching `text`. Stops at the first match.
    pub fn matched_bucket(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.matchers
            .iter()
            .find(|matcher| matcher.is_match(&lowered))
            .map(|matcher| matcher.name())
    }

    /// A failed match reports `false` wrapped as a crisis failure, which
    /// callers must surface to operators.
    pub fn detect(&self, text: &str) -> Outcome<bool> {
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| self.matched_bucket(text).map(str::to_string)));
        match result {
            Ok(Some(bucket)) => {
                log::debug!("Crisis pattern bucket '{bucket}' matched");
                Outcome::Success(true)
            }
            Ok(None) => Outcome::Success(false),
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                log::error!("CRISIS DETECTION FAILED, message treated as non-crisis: {reason}");
                Outcome::fallback(false, FallbackReason::CrisisMatcherFailed(reason))
            }
        }
    }
}
