#[cfg(test)]
mod tests;

mod entries;

use fancy_regex::Regex;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use crate::config::ConfigError;
use crate::query::{FuzzyMatcher, Intent, QueryAnalysis, QueryEngine, Topic};
use entries::{
    BASIC_PATTERNS, CONSIDERATIONS, DEFAULT_BENEFITS, DEFAULT_DEFINITION, DEFAULT_STEPS, ENTRIES,
    KEY_POINTS, quick_actions_for, tips_for,
};

pub use entries::KnowledgeEntry;

static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*?\*?\s*\d+\.|\*?\*?\s*Step\s*\d+|\*?\*?\s*Phase\s*\d+)")
        .expect("valid regex")
});

static BASIC_REGEXES: LazyLock<Vec<(&'static str, Vec<Regex>)>> = LazyLock::new(|| {
    BASIC_PATTERNS
        .iter()
        .map(|(key, patterns)| {
            (
                *key,
                patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("valid regex"))
                    .collect(),
            )
        })
        .collect()
});

/// Confidence thresholds for the knowledge-base matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Above this, answer straight from the matching entry
    pub high_confidence: f32,
    /// Above this (and up to `high_confidence`), try fuzzy title and keyword matching
    pub medium_confidence: f32,
    pub fuzzy_threshold: f32,
    pub tentative_floor: f32,
}

impl Default for MatchingConfig {
    #[inline]
    fn default() -> Self {
        Self {
            high_confidence: 0.7,
            medium_confidence: 0.4,
            fuzzy_threshold: 0.6,
            tentative_floor: 0.3,
        }
    }
}

impl MatchingConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("high_confidence", self.high_confidence),
            ("medium_confidence", self.medium_confidence),
            ("fuzzy_threshold", self.fuzzy_threshold),
            ("tentative_floor", self.tentative_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold(name, value));
            }
        }

        if self.medium_confidence >= self.high_confidence {
            return Err(ConfigError::ThresholdOrder(
                self.medium_confidence,
                self.high_confidence,
            ));
        }

        Ok(())
    }
}

/// Which matching pipeline answers queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatcherMode {
    /// Query analysis, intent-shaped answers, fuzzy matching and a smart fallback
    #[default]
    Smart,
    /// First loose regex hit returns the whole entry
    Basic,
}

type Strategy = fn(&KnowledgeBaseMatcher, &str, &QueryAnalysis) -> Option<String>;

/// Answers quality questions from the curated entries without any model
#[derive(Debug, Clone)]
pub struct KnowledgeBaseMatcher {
    config: MatchingConfig,
    mode: MatcherMode,
    engine: QueryEngine,
    fuzzy: FuzzyMatcher,
}

impl Default for KnowledgeBaseMatcher {
    #[inline]
    fn default() -> Self {
        Self::new(MatchingConfig::default(), MatcherMode::Smart)
    }
}

impl KnowledgeBaseMatcher {
    #[inline]
    pub fn new(config: MatchingConfig, mode: MatcherMode) -> Self {
        Self {
            config,
            mode,
            engine: QueryEngine::new().with_tentative_floor(config.tentative_floor),
            fuzzy: FuzzyMatcher::new().with_threshold(config.fuzzy_threshold),
        }
    }

    #[inline]
    pub fn mode(&self) -> MatcherMode {
        self.mode
    }

    #[inline]
    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    #[inline]
    pub fn entries(&self) -> &'static [KnowledgeEntry] {
        &ENTRIES
    }

    #[inline]
    pub fn entry(&self, key: &str) -> Option<&'static KnowledgeEntry> {
        ENTRIES.iter().find(|entry| entry.key == key)
    }

    /// The entry answering questions about `topic`, if there is one
    #[inline]
    pub fn entry_for_topic(&self, topic: Topic) -> Option<&'static KnowledgeEntry> {
        let key = match topic {
            Topic::PdcaCycle | Topic::LeanManufacturing => "process_improvement",
            Topic::RootCause => "root_cause_analysis",
            other => other.key(),
        };
        self.entry(key)
    }

    /// Always produces an answer
    #[inline]
    pub fn respond(&self, query: &str) -> String {
        match self.mode {
            MatcherMode::Smart => self.smart_response(query),
            MatcherMode::Basic => self.basic_response(query),
        }
    }

    /// Knowledge keywords that occur in `query`, in entry order
    #[inline]
    pub fn search_keywords(&self, query: &str) -> Vec<&'static str> {
        let query_lower = query.to_lowercase();
        ENTRIES
            .iter()
            .flat_map(|entry| entry.keywords.iter().copied())
            .filter(|keyword| query_lower.contains(keyword))
            .collect()
    }

    fn smart_response(&self, query: &str) -> String {
        const STRATEGIES: [(&str, Strategy); 3] = [
            ("specific", KnowledgeBaseMatcher::specific_answer),
            ("fuzzy", KnowledgeBaseMatcher::fuzzy_answer),
            ("fallback", KnowledgeBaseMatcher::fallback_answer),
        ];

        let analysis = self.engine.analyze(query);

        STRATEGIES
            .iter()
            .find_map(|(name, strategy)| {
                let answer = strategy(self, query, &analysis)?;
                debug!("Answered with {} strategy", name);
                Some(answer)
            })
            .unwrap_or_else(|| self.engine.smart_fallback(query))
    }

    fn specific_answer(&self, _query: &str, analysis: &QueryAnalysis) -> Option<String> {
        if analysis.confidence <= self.config.high_confidence {
            return None;
        }
        let topic = analysis.best_topic?;
        let entry = self.entry_for_topic(topic)?;
        Some(self.format_for_intent(entry, topic, analysis.intent))
    }

    fn fuzzy_answer(&self, query: &str, analysis: &QueryAnalysis) -> Option<String> {
        if analysis.confidence <= self.config.medium_confidence
            || analysis.confidence > self.config.high_confidence
        {
            return None;
        }

        let candidates: Vec<&str> = ENTRIES
            .iter()
            .flat_map(|entry| std::iter::once(entry.title).chain(entry.keywords.iter().copied()))
            .collect();

        let (best, score) = self.fuzzy.fuzzy_match(query, &candidates).into_iter().next()?;
        if score <= self.config.fuzzy_threshold {
            return None;
        }

        let entry = ENTRIES
            .iter()
            .find(|entry| entry.title == best || entry.keywords.iter().any(|k| *k == best))?;

        debug!("Fuzzy matched {:?} to {} ({:.2})", best, entry.key, score);
        Some(format!(
            "## {} (Matched: \"{}\")\n\n{}\n\n💡 **Note:** I found this based on similarity to your query. \
             If this isn't what you were looking for, try asking:\n{}",
            entry.title,
            best,
            entry.content,
            self.related_suggestions(Topic::from_key(entry.key))
        ))
    }

    fn fallback_answer(&self, query: &str, _analysis: &QueryAnalysis) -> Option<String> {
        Some(self.engine.smart_fallback(query))
    }

    fn format_for_intent(&self, entry: &KnowledgeEntry, topic: Topic, intent: Intent) -> String {
        let related = self.related_suggestions(Some(topic));

        match intent {
            Intent::Definition => format!(
                "## {}\n\n**Definition & Overview:**\n{}\n\n**Detailed Information:**\n{}\n\n\
                 💡 **Quick Tips:**\n{}\n\n🔗 **Related Topics:**\n{}",
                entry.title,
                extract_definition(entry.content),
                entry.content,
                bullet_list(tips_for(entry.key)),
                related
            ),
            Intent::HowTo => format!(
                "## How to Implement {}\n\n**Step-by-Step Guide:**\n{}\n\n**Implementation Details:**\n{}\n\n\
                 ⚠️ **Key Considerations:**\n{}\n\n📚 **Next Steps:**\n{}",
                entry.title,
                extract_steps(entry.content),
                entry.content,
                CONSIDERATIONS,
                related
            ),
            Intent::Benefits => format!(
                "## Benefits of {}\n\n**Key Advantages:**\n{}\n\n**Complete Information:**\n{}\n\n\
                 💡 **Implementation Tips:**\n{}",
                entry.title,
                extract_benefits(entry.content),
                entry.content,
                bullet_list(tips_for(entry.key))
            ),
            Intent::Examples | Intent::Comparison | Intent::General => format!(
                "## {}\n\n{}\n\n**🎯 Key Takeaways:**\n{}\n\n**🚀 Quick Actions:**\n{}\n\n\
                 **🔗 Related Questions:**\n{}",
                entry.title,
                entry.content,
                KEY_POINTS,
                bullet_list(quick_actions_for(topic.key())),
                related
            ),
        }
    }

    fn related_suggestions(&self, topic: Option<Topic>) -> String {
        self.engine
            .suggest_related_queries(topic)
            .iter()
            .take(3)
            .map(|s| format!("- \"{s}\""))
            .join("\n")
    }

    fn basic_response(&self, query: &str) -> String {
        let query_lower = query.to_lowercase();

        let hit = BASIC_REGEXES.iter().find_map(|(key, patterns)| {
            patterns
                .iter()
                .any(|p| p.is_match(&query_lower).unwrap_or(false))
                .then(|| self.entry(key))
                .flatten()
        });

        match hit {
            Some(entry) => format!("## {}\n\n{}", entry.title, entry.content),
            None => default_response(query),
        }
    }
}

fn bullet_list(items: &[&str]) -> String {
    items.iter().map(|item| format!("- {item}")).join("\n")
}

/// Opening prose of an entry: non-heading lines among its first five
fn extract_definition(content: &str) -> String {
    let lines: Vec<&str> = content
        .trim()
        .lines()
        .take(5)
        .filter(|line| !line.trim().is_empty() && !line.starts_with("**") && !line.starts_with('#'))
        .map(str::trim)
        .collect();

    if lines.is_empty() {
        DEFAULT_DEFINITION.to_string()
    } else {
        lines.join("\n")
    }
}

fn extract_steps(content: &str) -> String {
    let steps: Vec<&str> = content
        .lines()
        .filter(|line| STEP_LINE.is_match(line).unwrap_or(false))
        .map(str::trim)
        .collect();

    if steps.is_empty() {
        DEFAULT_STEPS.to_string()
    } else {
        steps.join("\n")
    }
}

fn extract_benefits(content: &str) -> String {
    let benefits: Vec<&str> = content
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("benefit") || lower.contains("advantage") || line.trim().starts_with("- ")
        })
        .map(str::trim)
        .take(5)
        .collect();

    if benefits.is_empty() {
        DEFAULT_BENEFITS.to_string()
    } else {
        benefits.join("\n")
    }
}

fn default_response(query: &str) -> String {
    format!(
        "## Quality Management Guidance

Based on your query: \"{query}\"

**I can help you with:**

🔧 **Quality Tools & Techniques:**
- 7QC Tools (Check Sheet, Pareto Chart, Control Chart, etc.)
- Six Sigma DMAIC methodology
- Root cause analysis techniques
- Process improvement methods

📊 **Specific Applications:**
- Defect reduction strategies
- Customer satisfaction improvement
- Process optimization
- Data analysis and monitoring

📋 **Compliance & Standards:**
- DPDP data protection compliance
- Quality management systems
- Best practices implementation

**Popular Topics:**
- \"What are the 7QC tools?\" - Learn about fundamental quality tools
- \"How to reduce defects?\" - Get systematic defect reduction strategy
- \"Improve customer satisfaction\" - Customer-focused improvement approach
- \"DPDP compliance guide\" - Data protection implementation

**Try asking more specific questions like:**
- \"What tools help with root cause analysis?\"
- \"How to implement process improvement?\"
- \"Steps for DPDP compliance?\"

Would you like me to explain any of these topics in detail?"
    )
}
