
use std::collections::HashMap;

use super::EmbeddingProvider;
use crate::Result;

/// In-process embedding model based on signed feature hashing.
///
/// Lower-cased word unigrams and adjacent-word bigrams are hashed with MD5 into `dimension`
/// buckets. The first eight digest bytes pick the bucket and the ninth byte picks the sign,
/// which keeps collisions from only ever adding up. Term frequency is damped as `1 + ln(tf)`.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    model_name: String,
}

impl HashingEmbedder {
    #[inline]
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model_name: format!("hashing-bow-{dimension}"),
        }
    }

    /// Embed a single text without going through the trait's batch interface
    #[inline]
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];

        for (feature, count) in features(text) {
            let digest = md5::compute(feature.as_bytes());
            let mut bucket_bytes = [0_u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

            vector[bucket] += sign * (1.0 + (count as f32).ln());
        }

        vector
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn features(text: &str) -> HashMap<String, u32> {
    let tokens = tokenize(text);
    let mut counts = HashMap::new();

    for token in &tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }

    counts
}

impl EmbeddingProvider for HashingEmbedder {
    #[inline]
    fn model_name(&self) -> &str {
        &self.model_name
    }

    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed(text)).collect())
    }
}
