use crate::config::{Config, TemplateEntry};
use crate::types::{Category, SeverityLevel};
use regex::RegexBuilder;

const CRISIS_POOL_SIZE: usize = 3;

/// Outcome of checking a configuration before the engine is built from it.
#[derive(Debug, Default)]
pub struct ConfigTestResults {
    pub valid: bool,
    pub total_keywords: usize,
    pub total_patterns: usize,
    pub total_responses: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigTestResults {
    fn new() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn print_summary(&self) {
        println!("Lexicon keywords: {}", self.total_keywords);
        println!("Crisis patterns: {}", self.total_patterns);
        println!("Response templates: {}", self.total_responses);
        for warning in &self.warnings {
            println!("  warning: {warning}");
        }
        for error in &self.errors {
            println!("  error: {error}");
        }
        if self.valid {
            println!("Configuration is valid.");
        } else {
            println!("Configuration is INVALID ({} errors).", self.errors.len());
        }
    }
}

pub fn validate_config(config: &Config) -> ConfigTestResults {
    let mut results = ConfigTestResults::new();

    check_lexicon(config, &mut results);
    check_crisis_patterns(config, &mut results);
    check_templates(config, &mut results);

    results
}

fn check_lexicon(config: &Config, results: &mut ConfigTestResults) {
    if config.lexicon.is_empty() {
        results.add_warning("Lexicon is empty; every message will be categorised as general".into());
    }

    let mut seen = Vec::new();
    for entry in &config.lexicon {
        if entry.category == Category::General {
            results.add_warning(
                "Lexicon entry for 'general' competes with the other categories on keyword count"
                    .into(),
            );
        }
        if seen.contains(&entry.category) {
            results.add_error(format!("Lexicon category '{}' is declared twice", entry.category));
        }
        seen.push(entry.category);

        for keyword in &entry.keywords {
            results.total_keywords += 1;
            if keyword.trim().is_empty() {
                results.add_error(format!("Empty keyword in lexicon category '{}'", entry.category));
            } else if keyword.to_lowercase() != *keyword {
                results.add_error(format!(
                    "Keyword '{keyword}' in category '{}' must be lowercase",
                    entry.category
                ));
            }
        }
    }
}

fn check_crisis_patterns(config: &Config, results: &mut ConfigTestResults) {
    if config.crisis_patterns.is_empty() {
        results.add_error("No crisis patterns configured; crisis detection would be disabled".into());
    }

    for (idx, pattern) in config.crisis_patterns.iter().enumerate() {
        results.total_patterns += 1;
        if let Err(e) = RegexBuilder::new(&pattern.pattern)
            .case_insensitive(true)
            .build()
        {
            results.add_error(format!(
                "Crisis pattern {} ({}): invalid regex '{}': {}",
                idx + 1,
                pattern.name,
                pattern.pattern,
                e
            ));
        }
    }
}

fn check_templates(config: &Config, results: &mut ConfigTestResults) {
    let templates = &config.templates;

    results.total_responses += templates.crisis.len();
    if templates.crisis.is_empty() {
        results.add_error("Crisis response pool is empty".into());
    } else if templates.crisis.len() != CRISIS_POOL_SIZE {
        results.add_warning(format!(
            "Crisis response pool has {} entries, expected {CRISIS_POOL_SIZE}",
            templates.crisis.len()
        ));
    }

    match templates.categories.get(&Category::General) {
        Some(TemplateEntry::Flat { responses }) if !responses.is_empty() => {}
        Some(TemplateEntry::Flat { .. }) => {
            results.add_error("General response pool is empty".into())
        }
        Some(TemplateEntry::BySeverity { .. }) => {
            results.add_error("General responses must be a flat pool".into())
        }
        None => results.add_error("General response pool is missing".into()),
    }

    if templates.categories.contains_key(&Category::Crisis) {
        results.add_warning(
            "Template entry for 'crisis' is unused; crisis responses come from the crisis pool"
                .into(),
        );
    }

    for (category, entry) in &templates.categories {
        match entry {
            TemplateEntry::Flat { responses } => {
                results.total_responses += responses.len();
                if responses.is_empty() {
                    results.add_error(format!("Response pool for '{category}' is empty"));
                }
            }
            TemplateEntry::BySeverity { pools } => {
                results.total_responses += pools.values().map(Vec::len).sum::<usize>();
                match pools.get(&SeverityLevel::Medium) {
                    Some(medium) if !medium.is_empty() => {}
                    _ => results.add_error(format!(
                        "Severity-keyed pool for '{category}' needs a non-empty medium pool"
                    )),
                }
                for (severity, pool) in pools {
                    if pool.is_empty() {
                        results.add_error(format!(
                            "Response pool for '{category}'/{severity} is empty"
                        ));
                    }
                }
                for severity in [SeverityLevel::Low, SeverityLevel::High] {
                    if !pools.contains_key(&severity) {
                        results.add_warning(format!(
                            "No {severity} pool for '{category}'; medium responses will be used"
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrisisPattern;

    #[test]
    fn test_default_config_is_valid() {
        let results = validate_config(&Config::default());
        assert!(results.valid, "errors: {:?}", results.errors);
        assert!(results.warnings.is_empty(), "warnings: {:?}", results.warnings);
        assert_eq!(results.total_patterns, 3);
        assert_eq!(results.total_keywords, 51);
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let mut config = Config::default();
        config.crisis_patterns.push(CrisisPattern {
            name: "broken".to_string(),
            pattern: r"\b(unclosed".to_string(),
        });
        let results = validate_config(&config);
        assert!(!results.valid);
        assert!(results.errors[0].contains("broken"));
    }

    #[test]
    fn test_missing_medium_pool_is_reported() {
        let mut config = Config::default();
        if let Some(TemplateEntry::BySeverity { pools }) =
            config.templates.categories.get_mut(&Category::Anxiety)
        {
            pools.remove(&SeverityLevel::Medium);
        }
        let results = validate_config(&config);
        assert!(!results.valid);
        assert!(results.errors.iter().any(|e| e.contains("medium")));
    }

    #[test]
    fn test_uppercase_keyword_and_empty_crisis_pool() {
        let mut config = Config::default();
        config.lexicon[0].keywords.push("Panicky".to_string());
        config.templates.crisis.clear();
        let results = validate_config(&config);
        assert!(!results.valid);
        assert_eq!(results.errors.len(), 2);
    }

    #[test]
    fn test_crisis_pool_size_warning() {
        let mut config = Config::default();
        config.templates.crisis.pop();
        let results = validate_config(&config);
        assert!(results.valid);
        assert_eq!(results.warnings.len(), 1);
        assert!(results.warnings[0].contains("2 entries, expected 3"));
    }

    #[test]
    fn test_general_lexicon_entry_warning() {
        let mut config = Config::default();
        config.lexicon.push(crate::config::LexiconEntry {
            category: Category::General,
            keywords: vec!["hello".to_string()],
        });
        let results = validate_config(&config);
        assert!(results.valid);
        assert!(results.warnings[0].contains("competes with the other categories"));
    }

    #[test]
    fn test_missing_general_pool_is_reported() {
        let mut config = Config::default();
        config.templates.categories.remove(&Category::General);
        let results = validate_config(&config);
        assert!(!results.valid);
        assert!(results.errors.iter().any(|e| e.contains("General")));
    }
}
