//! Lookup keys handed to the resource catalog. The catalog itself lives
//! outside this crate.

use crate::types::{Category, MessageAnalysis, SeverityLevel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum ResourceFilter {
    ResourceType(String),
    Keyword(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    pub primary: ResourceFilter,
    pub limit: usize,
    /// Put one `therapy` resource first and keep two primary results.
    pub prepend_professional: bool,
}

pub fn resource_query(analysis: &MessageAnalysis) -> ResourceQuery {
    let (primary, limit) = match analysis.category {
        Category::Crisis => (ResourceFilter::ResourceType("hotline".to_string()), 3),
        Category::Anxiety | Category::Depression => {
            (ResourceFilter::Keyword(analysis.category.to_string()), 3)
        }
        Category::Sleep => (ResourceFilter::Keyword("sleep".to_string()), 2),
        _ => (ResourceFilter::ResourceType("general".to_string()), 2),
    };

    ResourceQuery {
        primary,
        limit,
        prepend_professional: analysis.severity == SeverityLevel::High && !analysis.crisis_detected,
    }
}
