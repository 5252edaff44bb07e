use crate::types::{Category, SeverityLevel};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Category keyword sets, in tie-break order.
    pub lexicon: Vec<LexiconEntry>,
    /// Crisis phrase buckets, tested in order.
    pub crisis_patterns: Vec<CrisisPattern>,
    pub templates: TemplatesConfig,
    /// Seeds response selection when set; thread randomness otherwise.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisPattern {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    pub crisis: Vec<String>,
    pub categories: BTreeMap<Category, TemplateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateEntry {
    Flat {
        responses: Vec<String>,
    },
    BySeverity {
        pools: BTreeMap<SeverityLevel, Vec<String>>,
    },
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn keywords(category: Category, items: &[&str]) -> LexiconEntry {
    LexiconEntry {
        category,
        keywords: strings(items),
    }
}

fn flat(items: &[&str]) -> TemplateEntry {
    TemplateEntry::Flat {
        responses: strings(items),
    }
}

fn by_severity(high: &[&str], medium: &[&str], low: &[&str]) -> TemplateEntry {
    let mut pools = BTreeMap::new();
    pools.insert(SeverityLevel::High, strings(high));
    pools.insert(SeverityLevel::Medium, strings(medium));
    pools.insert(SeverityLevel::Low, strings(low));
    TemplateEntry::BySeverity { pools }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lexicon: default_lexicon(),
            crisis_patterns: vec![
                CrisisPattern {
                    name: "direct_intent".to_string(),
                    pattern: r"\b(want to die|want to kill myself|kill myself|end my life|suicide|suicidal)\b"
                        .to_string(),
                },
                CrisisPattern {
                    name: "self_harm".to_string(),
                    pattern: r"\b(hurt myself|harm myself|cut myself|not worth living)\b".to_string(),
                },
                CrisisPattern {
                    name: "hopelessness".to_string(),
                    pattern: r"\b(end it all|give up|can't go on|no point)\b".to_string(),
                },
            ],
            templates: default_templates(),
            random_seed: None,
        }
    }
}

fn default_lexicon() -> Vec<LexiconEntry> {
    vec![
        keywords(
            Category::Anxiety,
            &["anxious", "worried", "nervous", "panic", "stress", "tense", "restless", "overwhelmed"],
        ),
        keywords(
            Category::Depression,
            &["depressed", "sad", "hopeless", "empty", "worthless", "down", "low", "despair"],
        ),
        keywords(
            Category::Crisis,
            &[
                "suicide",
                "kill myself",
                "end it all",
                "not worth living",
                "hurt myself",
                "die",
                "harm myself",
            ],
        ),
        keywords(
            Category::Sleep,
            &["insomnia", "sleep", "tired", "exhausted", "fatigue", "sleeping", "rest"],
        ),
        keywords(
            Category::Anger,
            &["angry", "furious", "rage", "mad", "irritated", "frustrated", "annoyed"],
        ),
        keywords(
            Category::Positive,
            &["happy", "good", "great", "excited", "wonderful", "amazing", "fantastic"],
        ),
        keywords(
            Category::Support,
            &["help", "support", "advice", "guidance", "assistance", "therapy", "counseling"],
        ),
    ]
}

fn default_templates() -> TemplatesConfig {
    let mut categories = BTreeMap::new();

    categories.insert(
        Category::Anxiety,
        by_severity(
            &[
                "I understand you're feeling very anxious right now. Let's try some breathing exercises together. Take a deep breath in for 4 counts, hold for 4, and exhale for 6. Remember, this feeling will pass.",
                "Anxiety can feel overwhelming, but you're not alone. Try grounding yourself by naming 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
                "I hear that you're struggling with intense anxiety. It takes courage to reach out. Consider speaking with a mental health professional who can provide personalized coping strategies.",
            ],
            &[
                "It sounds like you're experiencing some anxiety. That's completely normal, and there are ways to manage these feelings. Have you tried any relaxation techniques?",
                "Anxiety is something many people face. Some helpful strategies include deep breathing, mindfulness, and regular exercise. What situations tend to trigger your anxiety?",
                "I understand you're feeling anxious. Sometimes talking through what's bothering you can help. Would you like to share what's on your mind?",
            ],
            &[
                "I notice you mentioned feeling a bit anxious. It's good that you're aware of your feelings. Sometimes just acknowledging anxiety can be the first step in managing it.",
                "A little anxiety is normal, especially during stressful times. What helps you feel more calm and centered?",
            ],
        ),
    );

    categories.insert(
        Category::Depression,
        by_severity(
            &[
                "I'm really sorry you're going through such a difficult time. Depression can make everything feel hopeless, but there is help available. Please consider reaching out to a mental health professional.",
                "What you're feeling sounds incredibly painful. Depression is a real illness, not a weakness. You deserve support and care. Have you been able to talk to anyone about how you're feeling?",
                "I hear how much you're struggling. These feelings are valid, and you don't have to face them alone. Professional support can make a real difference in how you're feeling.",
            ],
            &[
                "It sounds like you're going through a tough time. Depression affects many people, and it's important to know that it's treatable. Small steps, like maintaining a routine, can help.",
                "I'm sorry you're feeling this way. Sometimes when we're depressed, everything feels harder. Have you been able to do any activities that usually bring you joy?",
                "Depression can make even simple tasks feel overwhelming. Be gentle with yourself and consider seeking support from friends, family, or professionals.",
            ],
            &[
                "I notice you're feeling down. It's okay to have difficult days. Sometimes talking about what's bothering you can help lighten the load.",
                "Everyone feels sad sometimes. If these feelings persist, it might help to talk to someone you trust or consider professional support.",
            ],
        ),
    );

    categories.insert(
        Category::Positive,
        flat(&[
            "I'm so glad to hear you're feeling good! It's wonderful when we can appreciate positive moments. What's been going well for you?",
            "That's fantastic! It's great that you're in a positive space. How are you taking care of your mental health during good times?",
            "I love hearing positive energy! Remember to savor these good feelings and maybe think about what's contributing to this positive mood.",
        ]),
    );

    categories.insert(
        Category::General,
        flat(&[
            "Thank you for sharing that with me. How are you feeling right now?",
            "I'm here to listen and support you. Can you tell me more about what's on your mind?",
            "It takes courage to reach out and talk about difficult feelings. What would be most helpful for you right now?",
            "I appreciate you opening up. Mental health is just as important as physical health. How can I support you today?",
        ]),
    );

    categories.insert(
        Category::Sleep,
        flat(&[
            "Sleep issues can really affect our mental health. Good sleep hygiene includes going to bed at the same time, avoiding screens before bed, and creating a relaxing bedtime routine.",
            "Trouble sleeping can be both a cause and symptom of stress or depression. Have you noticed any patterns in when you have difficulty sleeping?",
            "Rest is so important for mental health. Some people find that meditation, reading, or gentle stretching before bed can help improve sleep quality.",
        ]),
    );

    categories.insert(
        Category::Support,
        flat(&[
            "I'm glad you're looking for support - that's a positive step! While I can provide some guidance, speaking with a mental health professional can offer personalized help.",
            "Seeking support shows strength, not weakness. There are many resources available including therapy, support groups, and crisis hotlines.",
            "It's wonderful that you're reaching out. In addition to professional help, friends, family, and peer support groups can be valuable resources.",
        ]),
    );

    TemplatesConfig {
        crisis: strings(&[
            "I'm very concerned about what you've shared. Your life has value, and there are people who want to help. Please reach out to a crisis helpline immediately: National Suicide Prevention Lifeline: 988.",
            "What you're going through sounds incredibly painful, but please know that suicide is not the answer. There are people trained to help you through this. Please call 988 or go to your nearest emergency room.",
            "I'm worried about your safety. These thoughts can feel overwhelming, but there is help available. Please contact the National Suicide Prevention Lifeline at 988 right now. You don't have to go through this alone.",
        ]),
        categories,
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {path}"))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {path}"))?;
        Ok(())
    }

    /// Loads `path` when given, the built-in catalogs otherwise.
    pub fn load_or_default(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {path}");
                Self::from_file(path)
            }
            None => {
                log::info!("No configuration file given, using built-in catalogs");
                Ok(Self::default())
            }
        }
    }
}
