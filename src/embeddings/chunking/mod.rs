
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::ChunkMetadata;
use crate::ingest::Document;

/// A bounded piece of a document, ready for embedding
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The chunk text, trimmed
    pub text: String,
    /// Document metadata plus the chunk's position within it
    pub metadata: ChunkMetadata,
}

/// Configuration for document chunking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    #[inline]
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 120,
        }
    }
}

/// Split `text` into trimmed, overlapping chunks of at most `max_size` characters.
///
/// Cuts prefer a sentence terminator in the second half of the window, then whitespace,
/// and only then a hard cut at `max_size`. The window start always moves forward, so the
/// walk terminates for any `overlap`.
#[inline]
pub fn chunk_text(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();

    if max_size == 0 || chars.len() <= max_size {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let window_end = (start + max_size).min(len);
        let end = if window_end < len {
            let midpoint = start + max_size / 2;
            rfind_after(&chars, midpoint, window_end, is_sentence_end)
                .map(|i| i + 1)
                .or_else(|| rfind_after(&chars, midpoint, window_end, |c| c.is_whitespace()))
                .unwrap_or(window_end)
        } else {
            window_end
        };

        let piece: String = chars[start..end].iter().collect();
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        if end >= len {
            break;
        }

        let next = end.saturating_sub(overlap);
        start = if next <= start || next >= end { end } else { next };
    }

    chunks
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Last index in `(floor, end)` whose char satisfies `pred`
fn rfind_after(
    chars: &[char],
    floor: usize,
    end: usize,
    pred: impl Fn(char) -> bool,
) -> Option<usize> {
    (floor + 1..end).rev().find(|&i| pred(chars[i]))
}

/// Chunk every document, numbering chunks within their source document
#[inline]
pub fn chunk_documents(documents: &[Document], config: &ChunkingConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for document in documents {
        let pieces = chunk_text(&document.text, config.chunk_size, config.chunk_overlap);
        let total_chunks = pieces.len();

        chunks.extend(pieces.into_iter().enumerate().map(|(chunk_index, text)| Chunk {
            text,
            metadata: ChunkMetadata {
                document: document.metadata.clone(),
                chunk_index,
                total_chunks,
            },
        }));
    }

    debug!(
        "Chunked {} documents into {} chunks (avg {} tokens)",
        documents.len(),
        chunks.len(),
        chunks
            .iter()
            .map(|c| estimate_token_count(&c.text))
            .sum::<usize>()
            / chunks.len().max(1)
    );

    chunks
}

/// Estimate token count using a simple heuristic
/// This is a rough approximation - actual tokenization would be more accurate
#[inline]
pub fn estimate_token_count(text: &str) -> usize {
    // 1 token ≈ 0.75 words for English text, plus a little for punctuation
    let word_count = text.split_whitespace().count();
    let punct_count = text.chars().filter(|c| c.is_ascii_punctuation()).count();

    (punct_count as f64).mul_add(0.1, word_count as f64 / 0.75) as usize
}
