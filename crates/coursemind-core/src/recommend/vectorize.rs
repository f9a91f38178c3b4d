//! TF-IDF vectorization of course texts.
//!
//! # Algorithm
//!
//! - **Tokens**: lowercase runs of two or more alphanumeric/underscore characters
//! - **Stop words**: English stop words are discarded
//! - **Weight**: raw term count × smoothed IDF, `ln((1 + n) / (1 + df)) + 1`
//! - **Normalization**: each document vector is scaled to unit L2 norm
//!
//! The vocabulary is sorted alphabetically, so fitting the same corpus twice
//! yields identical term indices and weights.

use super::stopwords::is_stop_word;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Sparse vector of `(term index, weight)` pairs, sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Builds a vector from entries; they are sorted by index and zero
    /// weights are kept as given.
    pub fn from_entries(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|(idx, _)| *idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product via a merge over the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity, defined as 0 when either vector has zero norm.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

/// Splits text into lowercase tokens of at least two word characters,
/// dropping stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Fitted TF-IDF model.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    /// Term → column index, alphabetical
    vocabulary: BTreeMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and IDF weights from `documents`.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                if let Some(&idx) = vocabulary.get(term) {
                    df[idx] += 1;
                }
            }
        }

        let n = documents.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        debug!(vocabulary = vocabulary.len(), "Fitted TF-IDF vocabulary");
        Self { vocabulary, idf }
    }

    /// Fits on `documents` and returns their vectors in input order.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let vectorizer = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    /// Projects `text` into the fitted space. Unknown terms are ignored; a
    /// text with no known terms yields an empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weighted: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }

        SparseVector::from_entries(weighted.into_iter().map(|(i, w)| (i, w / norm)).collect())
    }

    /// Number of distinct terms.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of `term`, if present.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of `term`, if present.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|idx| self.idf[idx])
    }
}
