use fancy_regex::Regex;
use std::sync::LazyLock;

use super::{Intent, Topic};

/// A topic with the patterns that signal it, in both plain and word-bounded form
pub(crate) struct TopicPatterns {
    pub topic: Topic,
    /// `(pattern, \bpattern\b)` pairs
    pub patterns: Vec<(Regex, Regex)>,
}

const TOPIC_SOURCES: [(Topic, &[&str]); 9] = [
    (
        Topic::QcTools,
        &[
            r"7\s*qc?\s*tools?",
            r"seven\s*quality\s*control\s*tools?",
            r"basic\s*quality\s*tools?",
            r"fundamental\s*quality\s*tools?",
            r"statistical\s*quality\s*tools?",
            r"quality\s*control\s*techniques",
            r"7\s*basic\s*tools",
            r"check\s*sheet|histogram|pareto|fishbone|scatter|control\s*chart|stratification",
        ],
    ),
    (
        Topic::DefectReduction,
        &[
            r"reduce\s*defects?",
            r"defect\s*reduction",
            r"minimize\s*defects?",
            r"eliminate\s*defects?",
            r"quality\s*issues?",
            r"manufacturing\s*problems?",
            r"product\s*defects?",
            r"process\s*problems?",
            r"improve\s*quality",
        ],
    ),
    (
        Topic::ProcessImprovement,
        &[
            r"process\s*improvement",
            r"improve\s*process",
            r"optimize\s*process",
            r"enhance\s*process",
            r"process\s*optimization",
            r"business\s*process",
            r"workflow\s*improvement",
            r"operational\s*excellence",
        ],
    ),
    (
        Topic::PdcaCycle,
        &[
            r"pdca\s*cycle",
            r"plan\s*do\s*check\s*act",
            r"deming\s*cycle",
            r"continuous\s*improvement\s*cycle",
            r"improvement\s*methodology",
        ],
    ),
    (
        Topic::SixSigma,
        &[
            r"six\s*sigma",
            r"6\s*sigma",
            r"dmaic",
            r"define\s*measure\s*analyze",
            r"statistical\s*quality\s*control",
            r"process\s*capability",
        ],
    ),
    (
        Topic::RootCause,
        &[
            r"root\s*cause\s*analysis",
            r"5\s*whys?",
            r"fishbone\s*diagram",
            r"cause\s*and\s*effect",
            r"ishikawa\s*diagram",
            r"problem\s*solving",
            r"investigation",
        ],
    ),
    (
        Topic::LeanManufacturing,
        &[
            r"lean\s*manufacturing",
            r"lean\s*principles",
            r"waste\s*reduction",
            r"5s\s*methodology",
            r"kaizen",
            r"continuous\s*improvement",
            r"value\s*stream\s*mapping",
        ],
    ),
    (
        Topic::CustomerSatisfaction,
        &[
            r"customer\s*satisfaction",
            r"customer\s*complaints?",
            r"customer\s*feedback",
            r"customer\s*experience",
            r"service\s*quality",
            r"customer\s*retention",
        ],
    ),
    (
        Topic::DpdpCompliance,
        &[
            r"dpdp",
            r"data\s*protection",
            r"personal\s*data",
            r"data\s*privacy",
            r"gdpr",
            r"privacy\s*compliance",
        ],
    ),
];

pub(crate) static TOPIC_PATTERNS: LazyLock<Vec<TopicPatterns>> = LazyLock::new(|| {
    TOPIC_SOURCES
        .iter()
        .map(|(topic, sources)| TopicPatterns {
            topic: *topic,
            patterns: sources
                .iter()
                .map(|source| {
                    (
                        Regex::new(source).expect("valid regex"),
                        Regex::new(&format!(r"\b{source}\b")).expect("valid regex"),
                    )
                })
                .collect(),
        })
        .collect()
});

const INTENT_SOURCES: [(Intent, &[&str]); 5] = [
    (
        Intent::Definition,
        &[r"what\s*is", r"define", r"explain", r"meaning", r"definition"],
    ),
    (
        Intent::HowTo,
        &[
            r"how\s*to",
            r"how\s*can",
            r"how\s*do",
            r"steps",
            r"process",
            r"implement",
        ],
    ),
    (
        Intent::Benefits,
        &[r"benefits", r"advantages", r"why\s*use", r"help", r"useful"],
    ),
    (
        Intent::Examples,
        &[r"examples?", r"sample", r"instance", r"case\s*study"],
    ),
    (
        Intent::Comparison,
        &[r"difference", r"compare", r"vs", r"versus", r"better"],
    ),
];

pub(crate) static INTENT_PATTERNS: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    INTENT_SOURCES
        .iter()
        .map(|(intent, sources)| {
            (
                *intent,
                sources
                    .iter()
                    .map(|source| Regex::new(source).expect("valid regex"))
                    .collect(),
            )
        })
        .collect()
});

pub(crate) static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// Base words and the synonyms appended to a query that mentions them
pub(crate) const SYNONYMS: [(&str, &[&str]); 8] = [
    (
        "quality",
        &["excellence", "standard", "grade", "caliber", "superiority"],
    ),
    (
        "defect",
        &["flaw", "error", "mistake", "fault", "problem", "issue"],
    ),
    (
        "improve",
        &["enhance", "better", "upgrade", "optimize", "refine"],
    ),
    (
        "process",
        &["procedure", "method", "workflow", "operation", "system"],
    ),
    (
        "control",
        &["manage", "monitor", "supervise", "regulate", "govern"],
    ),
    (
        "analysis",
        &["examination", "study", "review", "assessment", "evaluation"],
    ),
    (
        "customer",
        &["client", "consumer", "buyer", "user", "patron"],
    ),
    (
        "manufacturing",
        &["production", "fabrication", "assembly", "making"],
    ),
];

pub(crate) const STOP_WORDS: [&str; 24] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "how",
    "what", "when", "where", "why", "is", "are", "can", "do", "does",
];
