use super::*;

fn smart() -> KnowledgeBaseMatcher {
    KnowledgeBaseMatcher::default()
}

#[test]
fn default_thresholds_validate() {
    let config = MatchingConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.medium_confidence - 0.4).abs() < f32::EPSILON);
}

#[test]
fn thresholds_must_be_ordered_and_in_range() {
    let inverted = MatchingConfig {
        medium_confidence: 0.8,
        ..MatchingConfig::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::ThresholdOrder(_, _))
    ));

    let negative = MatchingConfig {
        tentative_floor: -0.1,
        ..MatchingConfig::default()
    };
    assert!(matches!(
        negative.validate(),
        Err(ConfigError::InvalidThreshold("tentative_floor", _))
    ));
}

#[test]
fn medium_confidence_query_uses_fuzzy_match() {
    let response = smart().respond("What is Six Sigma?");
    assert!(response.starts_with("## Six Sigma Methodology (Matched: \"six sigma\")"));
    assert!(response.contains("**Six Sigma DMAIC Process:**"));
    assert!(response.contains("💡 **Note:**"));
}

#[test]
fn definition_answer_pulls_opening_prose() {
    let response = smart().respond("define pareto pareto");

    assert!(response.starts_with(
        "## 7 Quality Control (7QC) Tools\n\n**Definition & Overview:**\n\
         The 7QC tools are fundamental statistical tools for quality improvement:\n\
         - Purpose: Systematic data collection and defect tracking\n"
    ));
    assert!(response.contains("💡 **Quick Tips:**\n- Start with check sheets for data collection"));
    assert!(response.contains("- \"What is a Pareto chart and how to use it?\""));
    assert!(!response.contains("Steps to implement check sheet method"));
}

#[test]
fn how_to_answer_lists_numbered_sections() {
    let response = smart().respond("how to do root cause analysis");

    assert!(response.starts_with("## How to Implement Root Cause Analysis Techniques"));
    assert!(response.contains("**Step-by-Step Guide:**\n**1. 5 Whys Technique**\n**2. Cause & Effect Diagram (Fishbone)**"));
    assert!(response.contains("⚠️ **Key Considerations:**"));
}

#[test]
fn how_to_without_numbered_lines_uses_generic_steps() {
    let response = smart().respond("How to implement six sigma?");

    assert!(response.starts_with("## How to Implement Six Sigma Methodology"));
    assert!(response.contains(DEFAULT_STEPS));
}

#[test]
fn benefits_answer_collects_bullets() {
    let response = smart().respond("benefits of pareto pareto");

    assert!(response.starts_with("## Benefits of 7 Quality Control (7QC) Tools"));
    assert!(response.contains(
        "**Key Advantages:**\n- Purpose: Systematic data collection and defect tracking\n"
    ));
}

#[test]
fn lean_topics_answer_from_process_improvement() {
    let response = smart().respond("kaizen kaizen");

    assert!(response.starts_with("## Process Improvement Methodology\n\n**PDCA Cycle"));
    assert!(response.contains("**🚀 Quick Actions:**\n- Assess current situation"));
}

#[test]
fn vague_topic_gets_tentative_fallback() {
    let response = smart().respond("tell me about pareto");
    assert!(response.starts_with("## I understand you're asking about: 7QC Tools"));
}

#[test]
fn unknown_query_gets_capability_overview() {
    assert_eq!(smart().respond("hello"), crate::query::GENERAL_HELP);
    assert_eq!(smart().respond(""), crate::query::GENERAL_HELP);
}

#[test]
fn basic_mode_returns_first_pattern_hit() {
    let matcher = KnowledgeBaseMatcher::new(MatchingConfig::default(), MatcherMode::Basic);

    assert!(matcher
        .respond("We have many defects on line 3")
        .starts_with("## Defect Reduction Strategy\n\n**Systematic Approach"));
    assert!(matcher
        .respond("process capability study")
        .starts_with("## Six Sigma Methodology"));
    assert!(matcher
        .respond("our NPS dropped")
        .starts_with("## Customer Satisfaction Improvement"));
}

#[test]
fn basic_mode_default_echoes_query() {
    let matcher = KnowledgeBaseMatcher::new(MatchingConfig::default(), MatcherMode::Basic);
    let response = matcher.respond("hello");

    assert!(response.starts_with("## Quality Management Guidance"));
    assert!(response.contains("Based on your query: \"hello\""));
}

#[test]
fn keyword_search_follows_entry_order() {
    assert_eq!(
        smart().search_keywords("How to Reduce defects in manufacturing"),
        ["defect", "defects", "manufacturing", "reduce"]
    );
    assert!(smart().search_keywords("hello").is_empty());
}

#[test]
fn every_topic_resolves_to_an_entry() {
    let matcher = smart();
    for topic in Topic::ALL {
        assert!(matcher.entry_for_topic(topic).is_some(), "{topic}");
    }
    assert_eq!(
        matcher.entry_for_topic(Topic::RootCause).map(|e| e.key),
        Some("root_cause_analysis")
    );
}

#[test]
fn extractors_fall_back_to_defaults() {
    assert_eq!(extract_definition("**Heading**\n# Title\n"), DEFAULT_DEFINITION);
    assert_eq!(extract_steps("no numbered lines"), DEFAULT_STEPS);
    assert_eq!(extract_benefits("nothing useful"), DEFAULT_BENEFITS);
    assert_eq!(
        extract_benefits("- a\n- b\n- c\n- d\n- e\n- f"),
        "- a\n- b\n- c\n- d\n- e"
    );
}
