//! Read-only catalogs built once from a [`Config`].

pub mod lexicon;
pub mod templates;

pub use lexicon::Lexicon;
pub use templates::{TemplateCatalog, TemplatePool};

use crate::analysis::crisis::RegexMatcher;
use crate::config::Config;
use crate::config_test::validate_config;

pub struct Catalog {
    pub lexicon: Lexicon,
    pub crisis_patterns: Vec<RegexMatcher>,
    pub templates: TemplateCatalog,
}

impl Catalog {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let results = validate_config(config);
        for warning in &results.warnings {
            log::warn!("Configuration warning: {warning}");
        }
        if !results.valid {
            anyhow::bail!(
                "Invalid configuration ({} errors): {}",
                results.errors.len(),
                results.errors.join("; ")
            );
        }

        let crisis_patterns = config
            .crisis_patterns
            .iter()
            .map(|p| RegexMatcher::new(&p.name, &p.pattern))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let lexicon = Lexicon::from_config(&config.lexicon);
        let templates = TemplateCatalog::from_config(&config.templates);
        let categories: Vec<&str> = lexicon.categories().map(|c| c.as_str()).collect();
        log::info!(
            "Loaded catalogs: lexicon categories [{}], {} crisis patterns, {} template pools",
            categories.join(", "),
            crisis_patterns.len(),
            config.templates.categories.len()
        );

        Ok(Self {
            lexicon,
            crisis_patterns,
            templates,
        })
    }
}
