pub mod classifier;
pub mod crisis;
pub mod estimator;
pub mod sentiment;

pub use classifier::CategoryClassifier;
pub use crisis::{CrisisDetector, PhraseMatcher, RegexMatcher};
pub use estimator::{estimate, Estimate};
pub use sentiment::{SentimentScorer, ValenceModel, VaderModel};
