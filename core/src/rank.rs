use crate::corpus::CorpusBuilder;
use crate::index::{DocumentTermMatrix, SparseVector, TfIdfIndex};
use crate::stemmer::Stem;
use crate::stopwords::StopwordSet;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub filename: String,
    pub score: f32,
}

/// Scores documents of a fitted index against free-text queries.
pub struct Ranker<'a> {
    index: &'a TfIdfIndex,
    matrix: &'a DocumentTermMatrix,
    analyzer: CorpusBuilder<'a>,
}

impl<'a> Ranker<'a> {
    /// `stopwords` and `stemmer` must be the ones the corpus was built with.
    pub fn new(index: &'a TfIdfIndex, matrix: &'a DocumentTermMatrix, stopwords: &'a StopwordSet, stemmer: &'a dyn Stem) -> Self {
        Self { index, matrix, analyzer: CorpusBuilder::new(stopwords, stemmer) }
    }

    pub fn query_vector(&self, query: &str) -> SparseVector {
        let tokens = self.analyzer.analyze(query);
        self.index.transform_tokens(tokens.iter().map(String::as_str))
    }

    /// Cosine similarity of the query with every document row, in row order.
    pub fn similarities(&self, query: &str) -> Vec<f32> {
        let q = self.query_vector(query);
        self.matrix.rows().iter().map(|row| q.dot(row).clamp(0.0, 1.0)).collect()
    }

    /// All documents sorted by descending similarity. Equal scores keep
    /// their corpus order.
    pub fn rank<S: AsRef<str>>(&self, query: &str, filenames: &[S]) -> Vec<RankedDocument> {
        let mut ranked: Vec<RankedDocument> = filenames
            .iter()
            .zip(self.similarities(query))
            .map(|(name, score)| RankedDocument { filename: name.as_ref().to_string(), score })
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        tracing::debug!(query, hits = ranked.iter().filter(|r| r.score > 0.0).count(), "ranked documents");
        ranked
    }
}
