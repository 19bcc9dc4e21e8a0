use serde::Serialize;
use std::fmt;

/// Effort needed to roll a tool out; plans start with the cheapest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityTool {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub use_cases: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub complexity: Complexity,
    pub implementation_time: &'static str,
    pub benefits: &'static [&'static str],
}

pub(crate) const TOOLS: [QualityTool; 11] = [
    QualityTool {
        id: "check_sheet",
        name: "Check Sheet (Data Collection Sheet)",
        category: "7QC",
        description: "Systematic data collection tool for tracking defects, frequencies, or observations",
        use_cases: &[
            "Defect tracking",
            "Data collection",
            "Frequency analysis",
            "Process monitoring",
            "Compliance checking",
        ],
        keywords: &[
            "data collection",
            "tracking",
            "defects",
            "frequency",
            "monitoring",
            "checklist",
        ],
        complexity: Complexity::Low,
        implementation_time: "1-2 days",
        benefits: &[
            "Standardized data collection",
            "Error reduction",
            "Trend identification",
        ],
    },
    QualityTool {
        id: "histogram",
        name: "Histogram",
        category: "7QC",
        description: "Bar chart showing frequency distribution of data to understand process variation",
        use_cases: &[
            "Distribution analysis",
            "Process capability assessment",
            "Variation patterns",
            "Quality characteristics analysis",
        ],
        keywords: &[
            "distribution",
            "variation",
            "frequency",
            "process capability",
            "patterns",
        ],
        complexity: Complexity::Low,
        implementation_time: "1 day",
        benefits: &[
            "Visual data representation",
            "Pattern recognition",
            "Process understanding",
        ],
    },
    QualityTool {
        id: "pareto_chart",
        name: "Pareto Chart",
        category: "7QC",
        description: "Bar chart identifying the most significant factors (80/20 rule application)",
        use_cases: &[
            "Problem prioritization",
            "Root cause analysis",
            "Resource allocation",
            "Defect analysis",
            "Cost reduction focus",
        ],
        keywords: &[
            "prioritization",
            "80/20",
            "significant factors",
            "root cause",
            "cost reduction",
        ],
        complexity: Complexity::Low,
        implementation_time: "1-2 days",
        benefits: &[
            "Priority identification",
            "Resource optimization",
            "Focus on vital few",
        ],
    },
    QualityTool {
        id: "cause_effect_diagram",
        name: "Cause & Effect Diagram (Fishbone/Ishikawa)",
        category: "7QC",
        description: "Visual tool for identifying potential root causes of problems",
        use_cases: &[
            "Root cause analysis",
            "Brainstorming sessions",
            "Problem solving",
            "Process improvement",
            "Team collaboration",
        ],
        keywords: &[
            "root cause",
            "fishbone",
            "ishikawa",
            "brainstorming",
            "problem solving",
        ],
        complexity: Complexity::Medium,
        implementation_time: "2-3 days",
        benefits: &[
            "Systematic problem analysis",
            "Team engagement",
            "Comprehensive cause identification",
        ],
    },
    QualityTool {
        id: "scatter_diagram",
        name: "Scatter Diagram",
        category: "7QC",
        description: "Plot showing relationship between two variables to identify correlations",
        use_cases: &[
            "Correlation analysis",
            "Variable relationships",
            "Process parameter optimization",
            "Predictive analysis",
        ],
        keywords: &[
            "correlation",
            "relationship",
            "variables",
            "optimization",
            "prediction",
        ],
        complexity: Complexity::Medium,
        implementation_time: "1-2 days",
        benefits: &[
            "Relationship identification",
            "Data-driven decisions",
            "Process optimization",
        ],
    },
    QualityTool {
        id: "control_chart",
        name: "Control Chart",
        category: "7QC",
        description: "Time-series chart for monitoring process stability and detecting variations",
        use_cases: &[
            "Process control",
            "Stability monitoring",
            "Variation detection",
            "Quality assurance",
            "Continuous improvement",
        ],
        keywords: &[
            "process control",
            "stability",
            "monitoring",
            "spc",
            "variation",
            "limits",
        ],
        complexity: Complexity::High,
        implementation_time: "1-2 weeks",
        benefits: &[
            "Process stability",
            "Early warning system",
            "Continuous monitoring",
        ],
    },
    QualityTool {
        id: "stratification",
        name: "Stratification",
        category: "7QC",
        description: "Data segmentation technique to identify patterns in different groups",
        use_cases: &[
            "Data segmentation",
            "Pattern identification",
            "Group comparisons",
            "Targeted improvements",
        ],
        keywords: &["segmentation", "groups", "patterns", "comparison", "targeted"],
        complexity: Complexity::Medium,
        implementation_time: "2-3 days",
        benefits: &["Detailed insights", "Targeted actions", "Pattern recognition"],
    },
    QualityTool {
        id: "5_whys",
        name: "5 Whys Analysis",
        category: "Problem Solving",
        description: "Iterative questioning technique to explore cause-and-effect relationships",
        use_cases: &[
            "Root cause analysis",
            "Simple problem solving",
            "Quick investigation",
            "Process improvement",
        ],
        keywords: &["why", "root cause", "investigation", "simple", "quick"],
        complexity: Complexity::Low,
        implementation_time: "1 day",
        benefits: &["Simple methodology", "Quick results", "Team engagement"],
    },
    QualityTool {
        id: "pdca_cycle",
        name: "PDCA Cycle (Plan-Do-Check-Act)",
        category: "Process Improvement",
        description: "Continuous improvement methodology for systematic problem solving",
        use_cases: &[
            "Continuous improvement",
            "Process optimization",
            "Change management",
            "Quality improvement",
        ],
        keywords: &[
            "pdca",
            "continuous improvement",
            "plan",
            "do",
            "check",
            "act",
            "cycle",
        ],
        complexity: Complexity::Medium,
        implementation_time: "Ongoing",
        benefits: &[
            "Systematic approach",
            "Continuous learning",
            "Sustainable improvement",
        ],
    },
    QualityTool {
        id: "poka_yoke",
        name: "Poka-Yoke (Error Proofing)",
        category: "Error Prevention",
        description: "Techniques to prevent or detect errors before they cause defects",
        use_cases: &[
            "Error prevention",
            "Process design",
            "Quality assurance",
            "Mistake proofing",
        ],
        keywords: &[
            "error proofing",
            "mistake",
            "prevention",
            "design",
            "fool proof",
        ],
        complexity: Complexity::Medium,
        implementation_time: "1-2 weeks",
        benefits: &["Error reduction", "Quality improvement", "Cost savings"],
    },
    QualityTool {
        id: "6_sigma",
        name: "Six Sigma DMAIC",
        category: "Process Improvement",
        description: "Data-driven methodology for eliminating defects (Define-Measure-Analyze-Improve-Control)",
        use_cases: &[
            "Major process improvement",
            "Defect reduction",
            "Data-driven decisions",
            "Large-scale projects",
        ],
        keywords: &[
            "six sigma",
            "dmaic",
            "defect reduction",
            "data driven",
            "statistical",
        ],
        complexity: Complexity::High,
        implementation_time: "3-6 months",
        benefits: &[
            "Significant improvements",
            "Data-driven approach",
            "Standardized methodology",
        ],
    },
];

/// Trigger words per quality scenario
pub(crate) const SCENARIOS: [(&str, &[&str]); 8] = [
    (
        "data_collection",
        &["collect", "gather", "track", "record", "monitor", "measure"],
    ),
    (
        "problem_solving",
        &["problem", "issue", "defect", "error", "failure", "nonconformance"],
    ),
    (
        "process_improvement",
        &["improve", "optimize", "enhance", "efficiency", "performance"],
    ),
    (
        "root_cause",
        &["root cause", "why", "reason", "source", "origin", "cause"],
    ),
    (
        "prevention",
        &["prevent", "avoid", "proofing", "mistake", "error prevention"],
    ),
    (
        "analysis",
        &["analyze", "examine", "investigate", "study", "evaluate"],
    ),
    (
        "control",
        &["control", "monitor", "stability", "consistency", "regulation"],
    ),
    (
        "correlation",
        &["relationship", "correlation", "connection", "association", "link"],
    ),
];

/// Tools that earn a bonus when a scenario's trigger words appear
pub(crate) fn scenario_bonus_applies(scenario: &str, tool_id: &str) -> bool {
    match scenario {
        "data_collection" => matches!(tool_id, "check_sheet" | "histogram"),
        "problem_solving" => matches!(tool_id, "cause_effect_diagram" | "5_whys" | "pareto_chart"),
        "process_improvement" => matches!(tool_id, "pdca_cycle" | "6_sigma" | "control_chart"),
        "prevention" => tool_id == "poka_yoke",
        "control" => tool_id == "control_chart",
        "correlation" => tool_id == "scatter_diagram",
        _ => false,
    }
}

pub(crate) const PLAN_CONSIDERATIONS: [&str; 5] = [
    "Start with low-complexity tools to build momentum",
    "Ensure proper training for team members",
    "Collect baseline data before implementation",
    "Plan for change management and communication",
    "Set up measurement systems to track progress",
];
