pub mod analysis;
pub mod catalog;
pub mod config;
pub mod config_test;
pub mod outcome;
pub mod pipeline;
pub mod response;
pub mod statistics;
pub mod types;

pub use catalog::Catalog;
pub use config::Config;
pub use outcome::{FallbackReason, Outcome};
pub use pipeline::{ChatTurn, Engine, HealthStatus};
pub use statistics::{StatEvent, StatisticsCollector};
pub use types::{
    ActionTag, Category, ConversationTurn, KeywordHit, MessageAnalysis, ResponsePlan, Sender,
    SentimentLabel, SentimentScore, SeverityLevel,
};
