//! Response selection from the template catalog.

pub mod actions;
pub mod random;
pub mod resources;

pub use actions::{recommended_actions, CRISIS_ACTIONS};
pub use random::{FixedSequence, RandomSource, SeededRandom, ThreadRandom};
pub use resources::{resource_query, ResourceFilter, ResourceQuery};

use crate::catalog::TemplateCatalog;
use crate::outcome::{FallbackReason, Outcome};
use crate::types::{Category, MessageAnalysis, ResponsePlan};
use std::panic::{self, AssertUnwindSafe};

/// Sent whenever selection fails. Never configurable.
pub const FALLBACK_RESPONSE: &str =
    "I'm here to listen and support you. Can you tell me more about how you're feeling?";

pub struct ResponseSelector {
    templates: TemplateCatalog,
}

impl ResponseSelector {
    pub fn new(templates: TemplateCatalog) -> Self {
        Self { templates }
    }

    pub fn fallback_plan() -> ResponsePlan {
        ResponsePlan {
            content: FALLBACK_RESPONSE.to_string(),
            is_crisis_response: false,
            recommended_actions: Vec::new(),
        }
    }

    pub fn select(
        &self,
        analysis: &MessageAnalysis,
        rng: &mut dyn RandomSource,
    ) -> Outcome<ResponsePlan> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.try_select(analysis, rng)));
        let reason = match result {
            Ok(Ok(plan)) => return Outcome::Success(plan),
            Ok(Err(reason)) => reason,
            Err(_) => FallbackReason::SelectionPanicked,
        };
        log::warn!("Response selection fell back to generic message: {reason}");
        Outcome::fallback(Self::fallback_plan(), reason)
    }

    fn try_select(
        &self,
        analysis: &MessageAnalysis,
        rng: &mut dyn RandomSource,
    ) -> Result<ResponsePlan, FallbackReason> {
        if analysis.crisis_detected {
            let content = pick(self.templates.crisis(), Category::Crisis, rng)?;
            return Ok(ResponsePlan {
                content: content.clone(),
                is_crisis_response: true,
                recommended_actions: CRISIS_ACTIONS.to_vec(),
            });
        }

        let (pool_category, pool) = self.templates.resolve(analysis.category, analysis.severity);
        log::debug!(
            "Selecting from '{pool_category}' pool for category '{}' at {} severity",
            analysis.category,
            analysis.severity
        );
        let content = pick(pool, pool_category, rng)?;

        Ok(ResponsePlan {
            content: content.clone(),
            is_crisis_response: false,
            recommended_actions: recommended_actions(analysis),
        })
    }
}

fn pick<'a>(
    pool: &'a [String],
    category: Category,
    rng: &mut dyn RandomSource,
) -> Result<&'a String, FallbackReason> {
    if pool.is_empty() {
        return Err(FallbackReason::EmptyResponsePool(category));
    }
    let index = rng.pick(pool.len());
    pool.get(index).ok_or(FallbackReason::RandomIndexOutOfRange {
        index,
        len: pool.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplatePool;
    use crate::config::Config;
    use crate::types::{ActionTag, SeverityLevel};
    use std::collections::HashMap;

    fn selector() -> ResponseSelector {
        ResponseSelector::new(TemplateCatalog::from_config(&Config::default().templates))
    }

    fn analysis(category: Category, severity: SeverityLevel, crisis: bool) -> MessageAnalysis {
        MessageAnalysis {
            category,
            severity,
            crisis_detected: crisis,
            ..MessageAnalysis::fallback()
        }
    }

    struct PanickingRandom;

    impl RandomSource for PanickingRandom {
        fn pick(&mut self, _len: usize) -> usize {
            panic!("entropy source exhausted")
        }
    }

    #[test]
    fn test_crisis_branch_ignores_category_and_severity() {
        let selector = selector();
        let crisis_pool = Config::default().templates.crisis;
        for category in [Category::Positive, Category::Sleep, Category::General] {
            for index in 0..3 {
                let outcome = selector.select(
                    &analysis(category, SeverityLevel::Low, true),
                    &mut FixedSequence::new(vec![index]),
                );
                let plan = outcome.into_value();
                assert!(plan.is_crisis_response);
                assert_eq!(plan.recommended_actions, CRISIS_ACTIONS.to_vec());
                assert_eq!(plan.content, crisis_pool[index]);
            }
        }
    }

    #[test]
    fn test_severity_keyed_pool() {
        let plan = selector()
            .select(
                &analysis(Category::Anxiety, SeverityLevel::High, false),
                &mut FixedSequence::new(vec![1]),
            )
            .into_value();
        assert!(plan.content.starts_with("Anxiety can feel overwhelming"));
        assert!(!plan.is_crisis_response);
        assert_eq!(
            plan.recommended_actions,
            vec![ActionTag::SeekProfessionalHelp, ActionTag::ContactSupport]
        );
    }

    #[test]
    fn test_flat_pool_with_actions() {
        let plan = selector()
            .select(
                &analysis(Category::Sleep, SeverityLevel::Low, false),
                &mut FixedSequence::new(vec![0]),
            )
            .into_value();
        assert!(plan.content.starts_with("Sleep issues"));
        assert_eq!(
            plan.recommended_actions,
            vec![ActionTag::SleepHygiene, ActionTag::Relaxation]
        );
    }

    #[test]
    fn test_category_without_templates_uses_general() {
        let general = match Config::default().templates.categories[&Category::General].clone() {
            crate::config::TemplateEntry::Flat { responses } => responses,
            _ => unreachable!(),
        };
        for category in [Category::Anger, Category::Crisis] {
            let outcome = selector().select(
                &analysis(category, SeverityLevel::Low, false),
                &mut SeededRandom::new(3),
            );
            assert!(!outcome.is_fallback());
            assert!(general.contains(&outcome.value().content));
        }
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let selector = selector();
        let a = analysis(Category::General, SeverityLevel::Low, false);
        let first = selector.select(&a, &mut SeededRandom::new(11));
        let second = selector.select(&a, &mut SeededRandom::new(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pool_returns_fallback_plan() {
        let mut pools = HashMap::new();
        pools.insert(Category::Positive, TemplatePool::Flat(vec![]));
        let selector = ResponseSelector::new(TemplateCatalog::new(vec![], pools));

        let outcome = selector.select(
            &analysis(Category::Positive, SeverityLevel::Low, false),
            &mut ThreadRandom,
        );
        assert_eq!(
            outcome.reason(),
            Some(&FallbackReason::EmptyResponsePool(Category::Positive))
        );
        assert_eq!(*outcome.value(), ResponseSelector::fallback_plan());

        let crisis = selector.select(
            &analysis(Category::Positive, SeverityLevel::Low, true),
            &mut ThreadRandom,
        );
        assert_eq!(
            crisis.reason(),
            Some(&FallbackReason::EmptyResponsePool(Category::Crisis))
        );
        assert!(crisis.value().recommended_actions.is_empty());
    }

    #[test]
    fn test_out_of_range_index_returns_fallback_plan() {
        let outcome = selector().select(
            &analysis(Category::General, SeverityLevel::Low, false),
            &mut FixedSequence::new(vec![99]),
        );
        assert_eq!(
            outcome.reason(),
            Some(&FallbackReason::RandomIndexOutOfRange { index: 99, len: 4 })
        );
        assert_eq!(outcome.value().content, FALLBACK_RESPONSE);
    }

    #[test]
    fn test_panic_during_selection_is_contained() {
        let outcome = selector().select(
            &analysis(Category::General, SeverityLevel::Low, false),
            &mut PanickingRandom,
        );
        assert_eq!(outcome.reason(), Some(&FallbackReason::SelectionPanicked));
        assert!(!outcome.value().is_crisis_response);
    }
}
