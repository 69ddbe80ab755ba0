use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type TermId = u32;
pub type DocId = u32;

/// Non-zero weights keyed by term id, sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    pub entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Builds an L2-normalized vector. A zero vector stays zero.
    fn normalized(weights: HashMap<TermId, f32>) -> Self {
        let mut entries: Vec<(TermId, f32)> = weights.into_iter().filter(|(_, w)| *w != 0.0).collect();
        entries.sort_by_key(|(tid, _)| *tid);
        let mut v = Self { entries };
        let norm = v.norm();
        if norm > 0.0 {
            for (_, w) in v.entries.iter_mut() {
                *w /= norm;
            }
        }
        v
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, term: TermId) -> f32 {
        self.entries
            .binary_search_by_key(&term, |(tid, _)| *tid)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Merge-join dot product over the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// One normalized TF-IDF row per document, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct DocumentTermMatrix {
    rows: Vec<SparseVector>,
}

impl DocumentTermMatrix {
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, doc: DocId) -> Option<&SparseVector> {
        self.rows.get(doc as usize)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Vocabulary and smoothed IDF weights fitted over one corpus.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    pub vocabulary: HashMap<String, TermId>,
    /// Term text by term id.
    pub terms: Vec<String>,
    pub df: Vec<u32>,
    pub idf: Vec<f32>,
    pub num_docs: u32,
}

impl TfIdfIndex {
    /// Fits the vocabulary over whitespace-separated corpus entries.
    /// Term ids follow first occurrence.
    pub fn fit<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut index = TfIdfIndex { num_docs: entries.len() as u32, ..Default::default() };
        for entry in entries {
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in entry.as_ref().split_whitespace() {
                let tid = match index.vocabulary.get(term) {
                    Some(&tid) => tid,
                    None => {
                        let tid = index.terms.len() as TermId;
                        index.vocabulary.insert(term.to_string(), tid);
                        index.terms.push(term.to_string());
                        index.df.push(0);
                        tid
                    }
                };
                if seen_in_doc.insert(tid) {
                    index.df[tid as usize] += 1;
                }
            }
        }
        if index.vocabulary.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        // smooth idf: ln((1 + n) / (1 + df)) + 1
        let n = index.num_docs as f32;
        index.idf = index.df.iter().map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0).collect();
        tracing::info!(num_docs = index.num_docs, num_terms = index.terms.len(), "tf-idf index fitted");
        Ok(index)
    }

    pub fn fit_transform<S: AsRef<str>>(entries: &[S]) -> Result<(Self, DocumentTermMatrix)> {
        let index = Self::fit(entries)?;
        let matrix = index.transform(entries);
        Ok((index, matrix))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|tid| self.idf[tid as usize])
    }

    /// Raw term frequency times IDF, L2-normalized. Terms outside the
    /// vocabulary contribute nothing.
    pub fn transform_tokens<'t, I>(&self, tokens: I) -> SparseVector
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut tf: HashMap<TermId, u32> = HashMap::new();
        for token in tokens {
            if let Some(tid) = self.term_id(token) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        let weights = tf
            .into_iter()
            .map(|(tid, count)| (tid, count as f32 * self.idf[tid as usize]))
            .collect();
        SparseVector::normalized(weights)
    }

    pub fn transform<S: AsRef<str>>(&self, entries: &[S]) -> DocumentTermMatrix {
        let rows = entries
            .iter()
            .map(|entry| self.transform_tokens(entry.as_ref().split_whitespace()))
            .collect();
        DocumentTermMatrix { rows }
    }
}
