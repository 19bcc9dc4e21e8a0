use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn ratio_of_identical_and_disjoint_strings() {
    assert!(close(ratio("pareto", "pareto"), 1.0));
    assert!(close(ratio("Pareto", "PARETO"), 1.0));
    assert!(close(ratio("abc", "xyz"), 0.0));
    assert!(close(ratio("", ""), 1.0));
    assert!(close(ratio("abc", ""), 0.0));
}

#[test]
fn ratio_counts_matching_blocks() {
    // "abcd" vs "bcde": one block "bcd" of 3 → 6 / 8
    assert!(close(ratio("abcd", "bcde"), 0.75));
    // "kaizen" vs "kaizan": blocks "kaiz" and "n" → 10 / 12
    assert!(close(ratio("kaizen", "kaizan"), 10.0 / 12.0));
}

#[test]
fn ratio_prefers_earliest_longest_block() {
    // Only one of the two "ab" runs in b can pair with a's single "ab"
    assert!(close(ratio("ab", "abab"), 4.0 / 6.0));
}

#[test]
fn fuzzy_match_filters_and_sorts() {
    let matcher = FuzzyMatcher::new();
    let candidates = ["six sigma", "lean", "six sigmas", "kaizen"];

    let matches = matcher.fuzzy_match("six sigma", &candidates);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].0, "six sigma");
    assert!(close(matches[0].1, 1.0));
    assert_eq!(matches[1].0, "six sigmas");
}

#[test]
fn fuzzy_match_keeps_input_order_on_ties() {
    let matcher = FuzzyMatcher::new().with_threshold(0.0);
    let matches = matcher.fuzzy_match("ab", &["ax", "xb", "ab"]);

    let names: Vec<&str> = matches.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["ab", "ax", "xb"]);
}

#[test]
fn threshold_is_inclusive() {
    let matcher = FuzzyMatcher::new().with_threshold(0.75);
    assert_eq!(matcher.fuzzy_match("abcd", &["bcde"]).len(), 1);
    assert!(matcher.with_threshold(0.76).fuzzy_match("abcd", &["bcde"]).is_empty());
}

#[test]
fn partial_match_uses_distinct_query_words() {
    let matcher = FuzzyMatcher::default();

    assert!(close(
        matcher.partial_match("control chart basics", "How to read a Control Chart"),
        2.0 / 3.0
    ));
    assert!(close(matcher.partial_match("pareto pareto", "pareto chart"), 1.0));
    assert!(close(matcher.partial_match("   ", "anything"), 0.0));
}
