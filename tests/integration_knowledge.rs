#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

use quality_rag::knowledge::{KnowledgeBaseMatcher, MatcherMode, MatchingConfig};
use quality_rag::query::{GENERAL_HELP, Intent, QueryEngine, ResponseType, Topic};
use quality_rag::tools::ToolRecommender;

#[test]
fn six_sigma_definition_query() {
    let analysis = QueryEngine::new().analyze("What is Six Sigma?");

    assert_eq!(analysis.intent, Intent::Definition);
    assert_eq!(analysis.best_topic, Some(Topic::SixSigma));
    assert!((analysis.best_score - 0.5).abs() < 1e-6);
    assert_eq!(analysis.response_type, ResponseType::GuidedAnswer);

    let matcher = KnowledgeBaseMatcher::new(MatchingConfig::default(), MatcherMode::Smart);
    let response = matcher.respond("What is Six Sigma?");
    assert!(response.starts_with("## Six Sigma Methodology"));
}

#[test]
fn mistake_proofing_recommends_poka_yoke() {
    let result = ToolRecommender::new().recommend("I need to prevent mistakes in assembly", None, 3);

    assert!(!result.recommendations.is_empty());
    assert_eq!(result.recommendations[0].tool.id, "poka_yoke");
    assert!(!result.rag_enhanced);
}

#[test]
fn empty_query_gets_general_help() {
    let matcher = KnowledgeBaseMatcher::default();
    let analysis = matcher.engine().analyze("");

    assert_eq!(analysis.best_topic, None);
    assert_eq!(analysis.response_type, ResponseType::GeneralHelp);
    assert_eq!(matcher.respond(""), GENERAL_HELP);
}

#[test]
fn plan_orders_tools_by_complexity() {
    let plan = ToolRecommender::new()
        .generate_implementation_plan(&["6_sigma", "pareto_chart", "poka_yoke", "nonsense"])
        .expect("at least one tool given");

    let ids: Vec<&str> = plan.recommended_sequence.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["pareto_chart", "poka_yoke", "6_sigma"]);
    assert_eq!(plan.unknown_tools, vec!["nonsense".to_string()]);
}
