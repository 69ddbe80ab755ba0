use crate::corpus::{CorpusBuilder, DocumentSummary, SkippedDocument};
use crate::error::{Error, Result};
use crate::extract::SourceFile;
use crate::index::TfIdfIndex;
use crate::rank::{RankedDocument, Ranker};
use crate::stemmer::{IndonesianStemmer, Stem};
use crate::stopwords::StopwordSet;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub documents: Vec<DocumentSummary>,
    /// Space-joined stemmed tokens, one entry per document.
    pub corpus: Vec<String>,
    pub vocabulary_size: usize,
    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<RankedDocument>,
    pub documents: Vec<DocumentSummary>,
    pub skipped: Vec<SkippedDocument>,
}

/// Stopwords and stemmer shared by corpus building and query analysis.
/// Every call fits a fresh index; nothing is cached between calls.
pub struct Pipeline {
    stopwords: StopwordSet,
    stemmer: Box<dyn Stem>,
}

impl Pipeline {
    pub fn new(stopwords: StopwordSet, stemmer: Box<dyn Stem>) -> Self {
        Self { stopwords, stemmer }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn stemmer(&self) -> &dyn Stem {
        self.stemmer.as_ref()
    }

    fn builder(&self) -> CorpusBuilder<'_> {
        CorpusBuilder::new(&self.stopwords, self.stemmer.as_ref())
    }

    pub fn process(&self, batch: &[SourceFile]) -> Result<ProcessOutput> {
        let corpus = self.builder().build(batch);
        let entries = corpus.entries();
        let index = TfIdfIndex::fit(&entries)?;
        Ok(ProcessOutput {
            documents: corpus.summaries(),
            corpus: entries,
            vocabulary_size: index.len(),
            skipped: corpus.skipped,
        })
    }

    /// Fails with `MissingQuery` before touching the batch when `query` is None.
    /// An empty query is valid and scores every document 0.
    pub fn search(&self, batch: &[SourceFile], query: Option<&str>) -> Result<SearchOutput> {
        let query = query.ok_or(Error::MissingQuery)?;
        let corpus = self.builder().build(batch);
        let entries = corpus.entries();
        let (index, matrix) = TfIdfIndex::fit_transform(&entries)?;
        let ranker = Ranker::new(&index, &matrix, &self.stopwords, self.stemmer.as_ref());
        let results = ranker.rank(query, &corpus.filenames());
        tracing::info!(query, documents = results.len(), "search complete");
        Ok(SearchOutput {
            query: query.to_string(),
            results,
            documents: corpus.summaries(),
            skipped: corpus.skipped,
        })
    }
}

impl Default for Pipeline {
    /// Built-in Indonesian stopwords and stemmer.
    fn default() -> Self {
        Self::new(StopwordSet::indonesian(), Box::new(IndonesianStemmer::with_builtin_dictionary()))
    }
}
