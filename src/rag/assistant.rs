use std::fmt::Write as _;
use tracing::debug;

use super::{AnswerComposer, AnswerStatus, SourceInfo};
use crate::Result;
use crate::config::Config;
use crate::conversation::Conversation;
use crate::knowledge::{KnowledgeBaseMatcher, MatcherMode};
use crate::query::QueryAnalysis;
use crate::tools::{Recommendations, ToolRecommender};

const TOOL_PANEL_SIZE: usize = 3;
const REASONING_PREVIEW_CHARS: usize = 200;

/// One titled section of a reply
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub content: String,
    pub sources: Vec<SourceInfo>,
}

impl Panel {
    fn new(title: &'static str, content: String) -> Self {
        Self {
            title,
            content,
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Absent for small talk
    pub analysis: Option<QueryAnalysis>,
    pub panels: Vec<Panel>,
}

impl AssistantReply {
    #[inline]
    pub fn is_conversational(&self) -> bool {
        self.analysis.is_none()
    }

    /// Markdown rendering of every panel in order
    #[inline]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for panel in &self.panels {
            let _ = write!(out, "### {}\n\n{}\n", panel.title, panel.content);
            if !panel.sources.is_empty() {
                let _ = writeln!(out, "\n**Sources:**");
                for (i, source) in panel.sources.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "{}. {} (Score: {:.3})",
                        i + 1,
                        source.source_file,
                        source.score
                    );
                }
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}

/// Combines small talk, document retrieval, the knowledge base and tool suggestions
/// into one layered reply
#[derive(Debug)]
pub struct Assistant {
    composer: AnswerComposer,
    matcher: KnowledgeBaseMatcher,
    recommender: ToolRecommender,
    conversation: Conversation,
}

impl Assistant {
    #[inline]
    pub fn new(composer: AnswerComposer, matcher: KnowledgeBaseMatcher) -> Self {
        Self {
            composer,
            matcher,
            recommender: ToolRecommender::new(),
            conversation: Conversation::new(),
        }
    }

    #[inline]
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            AnswerComposer::from_config(config)?,
            KnowledgeBaseMatcher::new(config.matching, MatcherMode::Smart),
        ))
    }

    #[inline]
    pub fn composer(&self) -> &AnswerComposer {
        &self.composer
    }

    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[inline]
    pub fn reply(&mut self, query: &str) -> AssistantReply {
        if self.conversation.is_conversational(query) {
            debug!("Handling input as small talk");
            return AssistantReply {
                analysis: None,
                panels: vec![Panel::new(
                    "💬 Conversation",
                    self.conversation.respond(query),
                )],
            };
        }

        let analysis = self.matcher.engine().analyze(query);
        let mut panels = Vec::new();

        let rag = self.composer.query(query);
        let retrieved = match rag.status {
            AnswerStatus::Generated | AnswerStatus::FreeMode | AnswerStatus::GenerationFailed => {
                panels.push(Panel {
                    title: "📚 Knowledge Base Response",
                    content: self.conversation.enhance_response(&rag.response, query),
                    sources: rag.sources,
                });
                rag.response
            }
            AnswerStatus::NoResults | AnswerStatus::Failed => String::new(),
        };

        let insights = self.matcher.respond(query);
        panels.push(Panel::new(
            "🧠 Quality Management Insights",
            format!(
                "{insights}\n\n💡 *This response is from our built-in quality management knowledge base.*"
            ),
        ));

        let tools =
            self.recommender
                .recommend_with_knowledge(query, None, &retrieved, TOOL_PANEL_SIZE);
        if !tools.recommendations.is_empty() {
            panels.push(Panel::new("🔧 Tool Recommendations", tool_panel(&tools)));
        }

        AssistantReply {
            analysis: Some(analysis),
            panels,
        }
    }
}

fn tool_panel(tools: &Recommendations) -> String {
    let mut content = "Based on your query, I recommend these quality tools:\n\n".to_string();

    for (i, rec) in tools.recommendations.iter().enumerate() {
        let reasoning: String = rec.reasoning.chars().take(REASONING_PREVIEW_CHARS).collect();
        let _ = write!(
            content,
            "**{}. {}** (Score: {}/10)\n\
             - *Category*: {}\n\
             - *Complexity*: {}\n\
             - *Implementation Time*: {}\n\
             - *Description*: {}\n\
             - *Why recommended*: {}...\n\n",
            i + 1,
            rec.tool.name,
            rec.relevance_score,
            rec.tool.category,
            rec.tool.complexity,
            rec.tool.implementation_time,
            rec.tool.description,
            reasoning
        );
    }

    content.trim_end().to_string()
}
