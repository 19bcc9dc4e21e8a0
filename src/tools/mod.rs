
mod catalog;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use catalog::{PLAN_CONSIDERATIONS, SCENARIOS, TOOLS, scenario_bonus_applies};

pub use catalog::{Complexity, QualityTool};

/// Retrieved context shorter than this is not credited in the reasoning
const KNOWLEDGE_NOTE_MIN_CHARS: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("No tools specified")]
    NoToolsSpecified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub tool: &'static QualityTool,
    /// Rounded to two decimals
    pub relevance_score: f32,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub query: String,
    pub recommendations: Vec<Recommendation>,
    pub total_tools_evaluated: usize,
    pub rag_enhanced: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPhase {
    pub complexity: Complexity,
    pub tools: Vec<&'static QualityTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationPlan {
    /// Known tools in request order
    pub tools: Vec<&'static QualityTool>,
    /// Known tools ordered from least to most complex
    pub recommended_sequence: Vec<&'static QualityTool>,
    pub phases: Vec<PlanPhase>,
    pub complexity_levels: BTreeMap<Complexity, usize>,
    pub unknown_tools: Vec<String>,
    pub considerations: Vec<&'static str>,
}

/// Suggests quality tools for a problem description by weighted term overlap
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRecommender;

impl ToolRecommender {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    #[inline]
    pub fn recommend(&self, query: &str, context: Option<&str>, top_k: usize) -> Recommendations {
        self.recommend_with_knowledge(query, context, "", top_k)
    }

    /// Like [`Self::recommend`], also scoring against text retrieved from the document index
    #[inline]
    pub fn recommend_with_knowledge(
        &self,
        query: &str,
        context: Option<&str>,
        retrieved: &str,
        top_k: usize,
    ) -> Recommendations {
        let combined =
            format!("{}\n{}\n{}", query, context.unwrap_or_default(), retrieved).to_lowercase();

        let mut scored: Vec<(&'static QualityTool, f32)> = TOOLS
            .iter()
            .map(|tool| (tool, score_tool(tool, &combined)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .take(top_k)
            .map(|(tool, score)| Recommendation {
                tool,
                relevance_score: (score * 100.0).round() / 100.0,
                reasoning: reasoning(tool, &combined, retrieved),
            })
            .collect();

        debug!(
            "Recommended {:?} for query",
            recommendations.iter().map(|r| r.tool.id).collect::<Vec<_>>()
        );

        Recommendations {
            query: query.to_string(),
            recommendations,
            total_tools_evaluated: TOOLS.len(),
            rag_enhanced: !retrieved.is_empty(),
            timestamp: Utc::now(),
        }
    }

    /// Order the requested tools into an adoption plan, cheapest first
    #[inline]
    pub fn generate_implementation_plan<S: AsRef<str>>(
        &self,
        tool_ids: &[S],
    ) -> Result<ImplementationPlan, PlanError> {
        if tool_ids.is_empty() {
            return Err(PlanError::NoToolsSpecified);
        }

        let (tools, unknown_tools): (Vec<&'static QualityTool>, Vec<String>) = tool_ids
            .iter()
            .map(AsRef::<str>::as_ref)
            .partition_map(|id| match self.tool(id) {
                Some(tool) => itertools::Either::Left(tool),
                None => itertools::Either::Right(id.to_string()),
            });

        let mut recommended_sequence = tools.clone();
        recommended_sequence.sort_by_key(|tool| tool.complexity);

        let phases = recommended_sequence
            .iter()
            .chunk_by(|tool| tool.complexity)
            .into_iter()
            .map(|(complexity, group)| PlanPhase {
                complexity,
                tools: group.copied().collect(),
            })
            .collect();

        let complexity_levels = tools.iter().map(|tool| tool.complexity).counts().into_iter().collect();

        Ok(ImplementationPlan {
            tools,
            recommended_sequence,
            phases,
            complexity_levels,
            unknown_tools,
            considerations: PLAN_CONSIDERATIONS.to_vec(),
        })
    }

    #[inline]
    pub fn tool(&self, id: &str) -> Option<&'static QualityTool> {
        TOOLS.iter().find(|tool| tool.id == id)
    }

    /// Catalog entries sorted by name, optionally limited to one category
    #[inline]
    pub fn list_tools(&self, category: Option<&str>) -> Vec<&'static QualityTool> {
        TOOLS
            .iter()
            .filter(|tool| category.is_none_or(|c| tool.category.eq_ignore_ascii_case(c)))
            .sorted_by_key(|tool| tool.name)
            .collect()
    }

    #[inline]
    pub fn categories(&self) -> Vec<&'static str> {
        TOOLS.iter().map(|tool| tool.category).unique().sorted().collect()
    }

    /// Tools whose name, description, keywords or use cases contain `term`
    #[inline]
    pub fn search_tools(&self, term: &str) -> Vec<&'static QualityTool> {
        let term = term.to_lowercase();
        TOOLS
            .iter()
            .filter(|tool| {
                let searchable = format!(
                    "{} {} {} {}",
                    tool.name,
                    tool.description,
                    tool.keywords.join(" "),
                    tool.use_cases.join(" ")
                )
                .to_lowercase();
                searchable.contains(&term)
            })
            .collect()
    }
}

/// Weighted overlap between a tool and the lower-cased `text`
fn score_tool(tool: &QualityTool, text: &str) -> f32 {
    let keywords = tool.keywords.iter().filter(|k| text.contains(*k)).count() as f32 * 2.0;

    let use_cases = tool
        .use_cases
        .iter()
        .filter(|u| text.contains(&u.to_lowercase()))
        .count() as f32
        * 1.5;

    let description = tool
        .description
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 3 && text.contains(word))
        .count() as f32
        * 0.5;

    let scenarios = SCENARIOS
        .iter()
        .filter(|(scenario, _)| scenario_bonus_applies(scenario, tool.id))
        .flat_map(|(_, triggers)| triggers.iter())
        .filter(|trigger| text.contains(*trigger))
        .count() as f32;

    keywords + use_cases + description + scenarios
}

fn reasoning(tool: &QualityTool, text: &str, retrieved: &str) -> String {
    let mut lines = vec!["This tool is recommended because:".to_string()];

    let keywords: Vec<&str> = tool
        .keywords
        .iter()
        .copied()
        .filter(|k| text.contains(k))
        .take(3)
        .collect();
    if !keywords.is_empty() {
        lines.push(format!("- Keywords match: {}", keywords.join(", ")));
    }

    let use_cases: Vec<&str> = tool
        .use_cases
        .iter()
        .copied()
        .filter(|u| text.contains(&u.to_lowercase()))
        .take(2)
        .collect();
    if !use_cases.is_empty() {
        lines.push(format!("- Applicable use cases: {}", use_cases.join(", ")));
    }

    lines.push(format!("- Complexity: {}", tool.complexity));
    lines.push(format!("- Implementation time: {}", tool.implementation_time));

    if !tool.benefits.is_empty() {
        lines.push(format!(
            "- Key benefits: {}",
            tool.benefits.iter().take(2).join(", ")
        ));
    }

    if retrieved.chars().count() > KNOWLEDGE_NOTE_MIN_CHARS {
        lines.push("- Enhanced by knowledge base analysis".to_string());
    }

    lines.join("\n")
}
