use crate::config::{TemplateEntry, TemplatesConfig};
use crate::types::{Category, SeverityLevel};
use std::collections::{BTreeMap, HashMap};

/// A category's responses: one list, or one list per severity.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePool {
    Flat(Vec<String>),
    BySeverity(BTreeMap<SeverityLevel, Vec<String>>),
}

impl From<&TemplateEntry> for TemplatePool {
    fn from(entry: &TemplateEntry) -> Self {
        match entry {
            TemplateEntry::Flat { responses } => TemplatePool::Flat(responses.clone()),
            TemplateEntry::BySeverity { pools } => TemplatePool::BySeverity(pools.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    crisis: Vec<String>,
    pools: HashMap<Category, TemplatePool>,
}

impl TemplateCatalog {
    pub fn new(crisis: Vec<String>, pools: HashMap<Category, TemplatePool>) -> Self {
        Self { crisis, pools }
    }

    pub fn from_config(config: &TemplatesConfig) -> Self {
        let pools = config
            .categories
            .iter()
            .map(|(category, entry)| (*category, TemplatePool::from(entry)))
            .collect();
        Self::new(config.crisis.clone(), pools)
    }

    pub fn crisis(&self) -> &[String] {
        &self.crisis
    }

    pub fn pool(&self, category: Category) -> Option<&TemplatePool> {
        self.pools.get(&category)
    }

    /// Resolves the non-crisis pool for a category and severity.
    ///
    /// Severity-keyed entries without the requested severity use their medium
    /// pool; categories without an entry use the general pool. The returned
    /// category names the pool actually used.
    pub fn resolve(&self, category: Category, severity: SeverityLevel) -> (Category, &[String]) {
        match self.pool(category) {
            Some(TemplatePool::Flat(responses)) => (category, responses.as_slice()),
            Some(TemplatePool::BySeverity(pools)) => {
                let pool = pools
                    .get(&severity)
                    .or_else(|| pools.get(&SeverityLevel::Medium))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                (category, pool)
            }
            None => {
                log::debug!("No templates for category '{category}', using general pool");
                match self.pool(Category::General) {
                    Some(TemplatePool::Flat(responses)) => (Category::General, responses.as_slice()),
                    _ => (Category::General, Default::default()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::from_config(&Config::default().templates)
    }

    #[test]
    fn test_pools_are_resolved_to_variants_at_load() {
        let catalog = catalog();
        assert!(matches!(
            catalog.pool(Category::Depression),
            Some(TemplatePool::BySeverity(_))
        ));
        assert!(matches!(catalog.pool(Category::Sleep), Some(TemplatePool::Flat(_))));
        assert!(catalog.pool(Category::Anger).is_none());
        assert_eq!(catalog.crisis().len(), 3);
    }

    #[test]
    fn test_resolve_by_severity() {
        let catalog = catalog();
        let (used, pool) = catalog.resolve(Category::Anxiety, SeverityLevel::Low);
        assert_eq!(used, Category::Anxiety);
        assert_eq!(pool.len(), 2);
        assert!(pool[0].contains("a bit anxious"));
    }

    #[test]
    fn test_missing_severity_falls_back_to_medium() {
        let mut pools = BTreeMap::new();
        pools.insert(SeverityLevel::Medium, vec!["medium".to_string()]);
        let mut map = HashMap::new();
        map.insert(Category::Anxiety, TemplatePool::BySeverity(pools));
        let catalog = TemplateCatalog::new(vec![], map);

        let (_, pool) = catalog.resolve(Category::Anxiety, SeverityLevel::High);
        assert_eq!(pool, ["medium".to_string()]);
    }

    #[test]
    fn test_unknown_category_uses_general_pool() {
        let catalog = catalog();
        for category in [Category::Anger, Category::Crisis] {
            let (used, pool) = catalog.resolve(category, SeverityLevel::Medium);
            assert_eq!(used, Category::General);
            assert_eq!(pool.len(), 4);
        }
    }

    #[test]
    fn test_missing_general_pool_resolves_empty() {
        let catalog = TemplateCatalog::new(vec![], HashMap::new());
        let (used, pool) = catalog.resolve(Category::Anger, SeverityLevel::Low);
        assert_eq!(used, Category::General);
        assert!(pool.is_empty());
    }
}
