use crate::config::LexiconEntry;
use crate::types::{Category, KeywordHit};

/// Ordered category -> keyword mapping. Declaration order is significant:
/// it orders keyword hits and breaks classification ties.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<(Category, Vec<String>)>,
}

impl Lexicon {
    pub fn new(entries: Vec<(Category, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn from_config(entries: &[LexiconEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|entry| (entry.category, entry.keywords.clone()))
                .collect(),
        )
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(category, _)| *category)
    }

    /// Every (category, keyword) pair whose keyword occurs in `lowered`.
    pub fn hits(&self, lowered: &str) -> Vec<KeywordHit> {
        self.entries
            .iter()
            .flat_map(|(category, keywords)| {
                keywords
                    .iter()
                    .filter(|keyword| lowered.contains(keyword.as_str()))
                    .map(|keyword| KeywordHit {
                        keyword: keyword.clone(),
                        category: *category,
                    })
            })
            .collect()
    }

    /// Distinct keywords of each category found in `lowered`, in declaration order.
    pub fn counts(&self, lowered: &str) -> Vec<(Category, usize)> {
        self.entries
            .iter()
            .map(|(category, keywords)| {
                let count = keywords
                    .iter()
                    .filter(|keyword| lowered.contains(keyword.as_str()))
                    .count();
                (*category, count)
            })
            .collect()
    }
}
