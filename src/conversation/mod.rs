#[cfg(test)]
mod tests;

use fancy_regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;
use tracing::debug;

const HISTORY_LIMIT: usize = 10;
const CONTEXT_WINDOW: usize = 5;
const MAX_SOCIAL_WORDS: usize = 3;
const FOLLOW_UP_MIN_CHARS: usize = 100;

const SOCIAL_WORDS: [&str; 5] = ["hi", "hello", "hey", "thanks", "bye"];

const CAPABILITIES: &str = "🚀 **I'm your Quality Management assistant!** Here's what I can do:

🔧 **Quality Management Expertise:**
• 7QC Tools (Pareto, Fishbone, Control Charts, etc.)
• Six Sigma methodologies (DMAIC, DMADV)
• Lean Manufacturing principles
• PDCA cycle implementation
• Statistical Process Control (SPC)
• Quality auditing and compliance

📊 **Process Improvement:**
• Root cause analysis techniques
• Process mapping and optimization
• Performance measurement systems
• Waste reduction strategies
• Continuous improvement frameworks

📚 **Document Intelligence:**
• Search through your documents
• Extract key quality insights
• Summarize complex procedures
• Cross-reference standards

🛠️ **Tool Recommendations:**
• Suggest appropriate quality tools
• Guide implementation strategies
• Provide templates and examples

Ask me anything about quality, processes, or just chat! 😊";

const INTRODUCTION: &str = "🤖 **I'm Quality RAG!**

I'm an assistant specialized in quality management and process improvement. Think of me as a quality consultant who:

• Is available whenever you are ⏰
• Knows the common quality methodologies 📚
• Enjoys untangling process problems 🧩
• Speaks in plain English 💬
• Gets excited about continuous improvement 🚀

Whether you're a seasoned quality professional or just starting your improvement journey, I'm here to guide you.

What would you like to achieve together? 🎯";

const REPLY_SOURCES: [(&str, &[&str]); 7] = [
    (
        r"\b(hi|hello|hey|good morning|good afternoon|good evening|greetings|howdy)\b",
        &[
            "👋 Hello! I'm your Quality Management assistant. Ready to help you achieve excellence!",
            "🌟 Hi there! I'm here to help with quality management, process improvement, and much more!",
            "💫 Hello! What quality challenge can we tackle together today?",
            "🚀 Hey! Great to see you! How can I help you improve your processes today?",
            "✨ Hello and welcome! Ask me anything about quality and process improvement!",
        ],
    ),
    (
        r"\b(how are you|how's it going|what's up|how do you feel)\b",
        &[
            "🤖 I'm running at peak performance! Excited to help you with quality management challenges!",
            "⚡ All systems are go! Ready to tackle any quality questions you have!",
            "🎯 I'm doing fantastic! My knowledge base is loaded and I'm ready to help optimize your processes!",
            "🔥 I'm in excellent condition! Ready to dive into some quality improvement discussions!",
            "💪 Operating at 100% efficiency! What quality challenges shall we solve together?",
        ],
    ),
    (
        r"\b(what can you do|what are your capabilities|help me|what do you know|features)\b",
        &[CAPABILITIES],
    ),
    (
        r"\b(thank you|thanks|thx|appreciate|grateful)\b",
        &[
            "🙏 You're very welcome! I'm always happy to help with quality improvement!",
            "😊 My pleasure! Feel free to ask if you need anything else!",
            "✨ Glad I could help! Quality improvement is what I live for!",
            "🎉 You're welcome! Together we can achieve amazing quality results!",
            "💫 Anytime! I'm here whenever you need quality guidance!",
        ],
    ),
    (
        r"\b(bye|goodbye|see you|farewell|talk later|gotta go)\b",
        &[
            "👋 Goodbye! Keep striving for quality excellence!",
            "🌟 See you later! Remember: quality is a journey, not a destination!",
            "✨ Farewell! Come back anytime for quality insights!",
            "🚀 Take care! May your processes be ever-improving!",
            "💫 Bye for now! Keep pushing those quality boundaries!",
        ],
    ),
    (
        r"\b(quality|improvement|process|six sigma|lean)\b.*\b(help|need|want|looking)\b",
        &[
            "🎯 Excellent! Quality improvement is my specialty! What specific area would you like to focus on?",
            "🔧 Perfect! I love discussing quality topics. What's your current challenge?",
            "📊 Great question! Let's dive into some quality excellence together. What's on your mind?",
            "⚡ Quality improvement is my favorite topic! How can I help optimize your processes?",
        ],
    ),
    (
        r"\b(who are you|what are you|tell me about yourself)\b",
        &[INTRODUCTION],
    ),
];

const DEFAULT_REPLIES: &[&str] = &[
    "That's an interesting question! While I specialize in quality management, I'll do my best to help. Can you provide more context?",
    "I'd love to help you with that! Could you tell me more about what you're looking for?",
    "Great question! I'm here to assist. What specific aspect would you like to explore?",
];

const FOLLOW_UPS: [&str; 4] = [
    "What else would you like to explore?",
    "How can we dive deeper into this?",
    "What's your next quality challenge?",
    "Would you like to explore related topics?",
];

static REPLY_PATTERNS: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    REPLY_SOURCES
        .iter()
        .map(|(pattern, replies)| (Regex::new(pattern).expect("valid regex"), *replies))
        .collect()
});

static SOCIAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(hi|hello|hey|how are you|what's up|thanks|bye)\b",
        r"\b(who are you|what are you|tell me about)\b",
        r"\b(good|great|excellent|amazing|awesome)\b.*\b(job|work|answer)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Pick one of `options` from the content of `input`, so a given input always gets the same reply
fn pick<'a>(options: &[&'a str], input: &str) -> &'a str {
    let digest = md5::compute(input.as_bytes());
    let index = usize::from(digest.0[0]) % options.len().max(1);
    options.get(index).copied().unwrap_or_default()
}

/// Small talk handling with a short memory of recent inputs
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    history: VecDeque<String>,
}

impl Conversation {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `input` is social chatter rather than a quality question
    #[inline]
    pub fn is_conversational(&self, input: &str) -> bool {
        let lowered = input.to_lowercase();

        if SOCIAL_PATTERNS
            .iter()
            .any(|pattern| pattern.is_match(&lowered).unwrap_or(false))
        {
            return true;
        }

        let words: Vec<&str> = lowered
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .collect();
        words.len() <= MAX_SOCIAL_WORDS && words.iter().any(|word| SOCIAL_WORDS.contains(word))
    }

    /// Reply to `input` and remember it
    #[inline]
    pub fn respond(&mut self, input: &str) -> String {
        let lowered = input.to_lowercase();

        self.history.push_back(lowered.clone());
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }

        let replies = REPLY_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.is_match(&lowered).unwrap_or(false))
            .map_or(DEFAULT_REPLIES, |(_, replies)| *replies);

        debug!("Conversational reply chosen from {} options", replies.len());
        pick(replies, &lowered).to_string()
    }

    /// Append a follow-up question to long answers that don't already end in one
    #[inline]
    pub fn enhance_response(&self, response: &str, input: &str) -> String {
        if response.chars().count() > FOLLOW_UP_MIN_CHARS && !response.ends_with('?') {
            format!("{response}\n\n{}", pick(&FOLLOW_UPS, input))
        } else {
            response.to_string()
        }
    }

    /// The most recent inputs, oldest first
    #[inline]
    pub fn recent_context(&self) -> Vec<&str> {
        let skip = self.history.len().saturating_sub(CONTEXT_WINDOW);
        self.history.iter().skip(skip).map(String::as_str).collect()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
