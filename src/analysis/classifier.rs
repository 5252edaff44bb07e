use crate::catalog::Lexicon;
use crate::types::{Category, KeywordHit};

pub struct CategoryClassifier {
    lexicon: Lexicon,
}

impl CategoryClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Category with the most distinct keyword matches. Ties go to the
    /// category declared first; no matches at all gives `general`.
    pub fn classify(&self, text: &str) -> Category {
        let lowered = text.to_lowercase();
        let mut best: Option<(Category, usize)> = None;

        for (category, count) in self.lexicon.counts(&lowered) {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((category, count)),
            }
        }

        best.map(|(category, _)| category).unwrap_or(Category::General)
    }

    /// All lexicon hits in `text`, independent of the chosen category.
    pub fn extract_keywords(&self, text: &str) -> Vec<KeywordHit> {
        self.lexicon.hits(&text.to_lowercase())
    }
}
