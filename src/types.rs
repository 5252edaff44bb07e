use serde::{Deserialize, Serialize};
use std::fmt;

/// Message category. Exactly one is assigned per analysed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Anxiety,
    Depression,
    Crisis,
    Sleep,
    Anger,
    Positive,
    Support,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Anxiety => "anxiety",
            Category::Depression => "depression",
            Category::Crisis => "crisis",
            Category::Sleep => "sleep",
            Category::Anger => "anger",
            Category::Positive => "positive",
            Category::Support => "support",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse urgency tier. Declaration order gives low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Raw valence output of a sentiment model, before labelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polarity {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Polarity {
    /// All scalars finite, compound in [-1, 1], the proportions in [0, 1].
    pub fn is_valid(&self) -> bool {
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        self.compound.is_finite()
            && (-1.0..=1.0).contains(&self.compound)
            && unit(self.positive)
            && unit(self.negative)
            && unit(self.neutral)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub label: SentimentLabel,
}

impl SentimentScore {
    pub fn from_polarity(polarity: Polarity) -> Self {
        Self {
            compound: polarity.compound,
            positive: polarity.positive,
            negative: polarity.negative,
            neutral: polarity.neutral,
            label: Self::label_for(polarity.compound),
        }
    }

    /// Fallback used whenever the valence model cannot be trusted.
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            label: SentimentLabel::Neutral,
        }
    }

    pub fn label_for(compound: f64) -> SentimentLabel {
        if compound >= 0.05 {
            SentimentLabel::Positive
        } else if compound <= -0.05 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAnalysis {
    pub sentiment: SentimentScore,
    pub keywords: Vec<KeywordHit>,
    pub crisis_detected: bool,
    pub category: Category,
    pub confidence: f64,
    pub severity: SeverityLevel,
}

impl MessageAnalysis {
    /// Returned when the analysis as a whole could not be completed.
    pub fn fallback() -> Self {
        Self {
            sentiment: SentimentScore::neutral(),
            keywords: Vec::new(),
            crisis_detected: false,
            category: Category::General,
            confidence: 0.3,
            severity: SeverityLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTag {
    ContactCrisisLine,
    EmergencyServices,
    SeekProfessionalHelp,
    ContactSupport,
    BreathingExercise,
    Mindfulness,
    SelfCare,
    SleepHygiene,
    Relaxation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePlan {
    pub content: String,
    pub is_crisis_response: bool,
    pub recommended_actions: Vec<ActionTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One prior turn of a conversation. Accepted by the engine, never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub content: String,
    pub sender: Sender,
}

impl ConversationTurn {
    pub fn user(content: &str) -> Self {
        Self {
            content: content.to_string(),
            sender: Sender::User,
        }
    }

    pub fn bot(content: &str) -> Self {
        Self {
            content: content.to_string(),
            sender: Sender::Bot,
        }
    }
}
