
pub mod fuzzy;
mod patterns;

use itertools::Itertools;
use std::fmt;
use tracing::debug;

use patterns::{INTENT_PATTERNS, STOP_WORDS, SYNONYMS, TOPIC_PATTERNS, WORD_PATTERN};

pub use fuzzy::FuzzyMatcher;

const SPECIFIC_SCORE: f32 = 0.7;
const GUIDED_SCORE: f32 = 0.4;
const NO_TOPIC_CONFIDENCE: f32 = 0.1;
const DEFAULT_TENTATIVE_FLOOR: f32 = 0.3;

/// Quality-management topics the engine recognises, in scoring order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    QcTools,
    DefectReduction,
    ProcessImprovement,
    PdcaCycle,
    SixSigma,
    RootCause,
    LeanManufacturing,
    CustomerSatisfaction,
    DpdpCompliance,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::QcTools,
        Topic::DefectReduction,
        Topic::ProcessImprovement,
        Topic::PdcaCycle,
        Topic::SixSigma,
        Topic::RootCause,
        Topic::LeanManufacturing,
        Topic::CustomerSatisfaction,
        Topic::DpdpCompliance,
    ];

    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            Self::QcTools => "7qc_tools",
            Self::DefectReduction => "defect_reduction",
            Self::ProcessImprovement => "process_improvement",
            Self::PdcaCycle => "pdca_cycle",
            Self::SixSigma => "six_sigma",
            Self::RootCause => "root_cause",
            Self::LeanManufacturing => "lean_manufacturing",
            Self::CustomerSatisfaction => "customer_satisfaction",
            Self::DpdpCompliance => "dpdp_compliance",
        }
    }

    /// Human-readable name
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::QcTools => "7QC Tools",
            Self::DefectReduction => "Defect Reduction",
            Self::ProcessImprovement => "Process Improvement",
            Self::PdcaCycle => "PDCA Cycle",
            Self::SixSigma => "Six Sigma",
            Self::RootCause => "Root Cause",
            Self::LeanManufacturing => "Lean Manufacturing",
            Self::CustomerSatisfaction => "Customer Satisfaction",
            Self::DpdpCompliance => "DPDP Compliance",
        }
    }

    #[inline]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.key() == key)
    }
}

impl fmt::Display for Topic {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Definition,
    HowTo,
    Benefits,
    Examples,
    Comparison,
    General,
}

impl Intent {
    /// Confidence added when this intent is detected
    #[inline]
    pub fn boost(self) -> f32 {
        match self {
            Self::Definition => 0.2,
            Self::HowTo => 0.3,
            Self::Benefits => 0.15,
            Self::Examples | Self::Comparison => 0.1,
            Self::General => 0.0,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::HowTo => "how_to",
            Self::Benefits => "benefits",
            Self::Examples => "examples",
            Self::Comparison => "comparison",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    SpecificAnswer,
    GuidedAnswer,
    Exploratory,
    GeneralHelp,
}

impl ResponseType {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SpecificAnswer => "specific_answer",
            Self::GuidedAnswer => "guided_answer",
            Self::Exploratory => "exploratory",
            Self::GeneralHelp => "general_help",
        }
    }
}

impl fmt::Display for ResponseType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine worked out about one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub intent: Intent,
    /// Scores of the topics that matched at all, in table order
    pub topic_scores: Vec<(Topic, f32)>,
    pub best_topic: Option<Topic>,
    pub best_score: f32,
    pub enhanced_query: String,
    pub keywords: Vec<String>,
    pub response_type: ResponseType,
    pub confidence: f32,
}

/// Rule-based query understanding over fixed pattern tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryEngine {
    tentative_floor: f32,
}

impl Default for QueryEngine {
    #[inline]
    fn default() -> Self {
        Self {
            tentative_floor: DEFAULT_TENTATIVE_FLOOR,
        }
    }
}

impl QueryEngine {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Confidence above which the fallback guesses a topic instead of listing capabilities
    #[inline]
    pub fn with_tentative_floor(mut self, floor: f32) -> Self {
        self.tentative_floor = floor;
        self
    }

    #[inline]
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let query_lower = query.trim().to_lowercase();

        let intent = detect_intent(&query_lower);
        let topic_scores = topic_scores(&query_lower);

        // First topic wins ties, so fold rather than max_by
        let best = topic_scores
            .iter()
            .fold(None::<(Topic, f32)>, |best, &(topic, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((topic, score)),
            });

        let (best_topic, best_score) = best.map_or((None, 0.0), |(t, s)| (Some(t), s));

        let response_type = match best {
            None => ResponseType::GeneralHelp,
            Some((_, score)) if score > SPECIFIC_SCORE => ResponseType::SpecificAnswer,
            Some((_, score)) if score > GUIDED_SCORE => ResponseType::GuidedAnswer,
            Some(_) => ResponseType::Exploratory,
        };

        let confidence = if best.is_some() {
            (best_score + intent.boost()).min(1.0)
        } else {
            NO_TOPIC_CONFIDENCE
        };

        let analysis = QueryAnalysis {
            original_query: query.to_string(),
            intent,
            topic_scores,
            best_topic,
            best_score,
            enhanced_query: enhance_semantically(&query_lower),
            keywords: extract_keywords(&query_lower),
            response_type,
            confidence,
        };

        debug!(
            "Analyzed query: intent={}, best_topic={:?}, confidence={:.2}",
            analysis.intent, analysis.best_topic, analysis.confidence
        );
        analysis
    }

    /// Follow-up questions worth suggesting for a topic
    #[inline]
    pub fn suggest_related_queries(&self, topic: Option<Topic>) -> &'static [&'static str] {
        match topic {
            Some(Topic::QcTools) => &[
                "What is a Pareto chart and how to use it?",
                "How to create a control chart?",
                "When to use cause and effect diagram?",
                "Steps to implement check sheet method",
            ],
            Some(Topic::DefectReduction) => &[
                "Root cause analysis for defects",
                "How to implement poka-yoke?",
                "Statistical process control for quality",
                "Cost of quality calculation",
            ],
            Some(Topic::ProcessImprovement) => &[
                "How to map value stream?",
                "What is kaizen methodology?",
                "Lean manufacturing principles",
                "How to measure process efficiency?",
            ],
            Some(Topic::PdcaCycle) => &[
                "PDCA implementation examples",
                "How to plan improvement projects?",
                "Continuous improvement best practices",
                "PDCA vs DMAIC comparison",
            ],
            _ => &[
                "What are the 7QC tools?",
                "How to reduce manufacturing defects?",
                "Process improvement methodologies",
                "Customer satisfaction improvement",
            ],
        }
    }

    /// Topics adjacent to `topic`, as a single bullet line
    #[inline]
    pub fn related_topics(&self, topic: Option<Topic>) -> String {
        let related = match topic {
            Some(Topic::QcTools) => {
                "Check sheets, Pareto charts, Control charts, Fishbone diagrams"
            }
            Some(Topic::DefectReduction) => {
                "Root cause analysis, Statistical process control, Poka-yoke"
            }
            Some(Topic::ProcessImprovement) => "Lean manufacturing, Kaizen, Value stream mapping",
            Some(Topic::PdcaCycle) => "Continuous improvement, Project planning, Quality cycles",
            _ => "Quality management fundamentals",
        };
        format!("- {related}")
    }

    /// Best-effort answer when nothing specific matched: a tentative topic guess when the
    /// engine understood enough of the query, the capability overview otherwise
    #[inline]
    pub fn smart_fallback(&self, query: &str) -> String {
        let analysis = self.analyze(query);

        match analysis.best_topic {
            Some(topic) if analysis.confidence > self.tentative_floor => {
                let suggestions = self
                    .suggest_related_queries(Some(topic))
                    .iter()
                    .take(4)
                    .map(|s| format!("- \"{s}\""))
                    .join("\n");

                format!(
                    "## I understand you're asking about: {}\n\n\
                     While I don't have a complete answer for your specific question, here's what I can help with:\n\n\
                     **Related Topics I Know About:**\n{}\n\n\
                     **Try asking:**\n{}\n\n\
                     **Keywords I detected:** {}\n\n\
                     Would you like me to explain any of these related topics in detail?",
                    topic.label(),
                    self.related_topics(Some(topic)),
                    suggestions,
                    analysis.keywords.iter().take(5).join(", ")
                )
            }
            _ => GENERAL_HELP.to_string(),
        }
    }
}

/// Capability overview shown when a query could not be understood
pub const GENERAL_HELP: &str = "## I'm here to help with Quality Management! 🔧

I specialize in:

**🎯 Core Topics:**
- **7QC Tools** - Fundamental quality control techniques
- **Process Improvement** - Systematic enhancement methods
- **Defect Reduction** - Strategies to minimize quality issues
- **Six Sigma & Lean** - Advanced methodologies
- **Root Cause Analysis** - Problem-solving techniques

**💡 Try asking:**
- \"What are the 7QC tools and how to use them?\"
- \"How can I reduce defects in my process?\"
- \"Explain the PDCA cycle step by step\"
- \"What is Six Sigma methodology?\"

**🚀 I can provide:**
- Step-by-step implementation guides
- Real-world examples and case studies
- Tool recommendations for specific problems
- Best practices and tips

What specific quality topic would you like to explore?";

fn detect_intent(query: &str) -> Intent {
    INTENT_PATTERNS
        .iter()
        .find(|(_, patterns)| {
            patterns
                .iter()
                .any(|pattern| pattern.is_match(query).unwrap_or(false))
        })
        .map_or(Intent::General, |(intent, _)| *intent)
}

/// Per topic, the best pattern score: `min(0.3 * matches, 1.0)` plus 0.2 for a word-bounded hit
fn topic_scores(query: &str) -> Vec<(Topic, f32)> {
    TOPIC_PATTERNS
        .iter()
        .filter_map(|entry| {
            let score = entry
                .patterns
                .iter()
                .filter_map(|(pattern, bounded)| {
                    let matches = pattern.find_iter(query).filter_map(Result::ok).count();
                    if matches == 0 {
                        return None;
                    }
                    let mut score = (matches as f32 * 0.3).min(1.0);
                    if bounded.is_match(query).unwrap_or(false) {
                        score += 0.2;
                    }
                    Some(score)
                })
                .reduce(f32::max)?;
            Some((entry.topic, score))
        })
        .collect()
}

fn enhance_semantically(query: &str) -> String {
    let mut enhanced = query.to_string();

    for (base_word, synonyms) in SYNONYMS {
        if query.contains(base_word) {
            for synonym in synonyms {
                if !enhanced.contains(synonym) {
                    enhanced.push(' ');
                    enhanced.push_str(synonym);
                }
            }
        }
    }

    enhanced
}

/// Lower-cased word tokens longer than two characters, minus stop words
#[inline]
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .filter_map(Result::ok)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word) && word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
