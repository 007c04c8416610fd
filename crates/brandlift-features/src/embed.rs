//! Caption embedding backends.
//!
//! The embedding must be a pure, order-preserving function of the caption
//! text: same input, same vector, every run. The trait seam keeps richer
//! model-backed encoders pluggable without the core depending on one.

use serde::{Deserialize, Serialize};

/// Produces one fixed-dimension dense vector per caption, in input order.
pub trait CaptionEmbedder: Send + Sync {
    fn embed(&self, captions: &[String]) -> Vec<Vec<f64>>;

    /// Fixed output dimension.
    fn dim(&self) -> usize;
}

// ── Hashed n-gram backend ────────────────────────────────────────────────────

/// Default embedder: signed feature hashing of word unigrams and bigrams.
///
/// Tokens are lowercased and stripped of surrounding punctuation (a leading
/// `#` survives so hashtag tokens keep their own identity). Each n-gram is
/// FNV-1a hashed; the hash picks a slot and a sign, and the final vector is
/// L2-normalised. Deterministic with no external model state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashedNgramEmbedder {
    dim: usize,
}

impl HashedNgramEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_one(&self, caption: &str) -> Vec<f64> {
        let tokens = tokenize(caption);
        let mut vector = vec![0.0; self.dim];

        for token in &tokens {
            self.accumulate(&mut vector, token);
        }
        for pair in tokens.windows(2) {
            self.accumulate(&mut vector, &format!("{} {}", pair[0], pair[1]));
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    fn accumulate(&self, vector: &mut [f64], ngram: &str) {
        let h = fnv1a(ngram.as_bytes());
        let slot = (h % self.dim as u64) as usize;
        let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
        vector[slot] += sign;
    }
}

impl Default for HashedNgramEmbedder {
    fn default() -> Self {
        Self::new(32)
    }
}

impl CaptionEmbedder for HashedNgramEmbedder {
    fn embed(&self, captions: &[String]) -> Vec<Vec<f64>> {
        captions.iter().map(|c| self.embed_one(c)).collect()
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.to_lowercase()
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '#')
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// ── Mock backend for tests ───────────────────────────────────────────────────

/// Test embedder returning a constant vector per caption length parity —
/// enough structure to be learnable, trivially predictable.
pub struct MockEmbedder {
    dim: usize,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl CaptionEmbedder for MockEmbedder {
    fn embed(&self, captions: &[String]) -> Vec<Vec<f64>> {
        captions
            .iter()
            .map(|c| {
                let mut v = vec![0.0; self.dim];
                v[0] = if c.chars().count() % 2 == 0 { 1.0 } else { -1.0 };
                v
            })
            .collect()
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
