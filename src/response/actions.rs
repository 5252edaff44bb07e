use crate::types::{ActionTag, Category, MessageAnalysis, SeverityLevel};

pub const CRISIS_ACTIONS: [ActionTag; 2] =
    [ActionTag::ContactCrisisLine, ActionTag::EmergencyServices];

/// First matching rule wins; rules do not accumulate.
pub fn recommended_actions(analysis: &MessageAnalysis) -> Vec<ActionTag> {
    if analysis.crisis_detected {
        CRISIS_ACTIONS.to_vec()
    } else if analysis.severity == SeverityLevel::High {
        vec![ActionTag::SeekProfessionalHelp, ActionTag::ContactSupport]
    } else if matches!(analysis.category, Category::Anxiety | Category::Depression) {
        vec![
            ActionTag::BreathingExercise,
            ActionTag::Mindfulness,
            ActionTag::SelfCare,
        ]
    } else if analysis.category == Category::Sleep {
        vec![ActionTag::SleepHygiene, ActionTag::Relaxation]
    } else {
        Vec::new()
    }
}
