use crate::extract::{extract_source, FileKind, SourceFile};
use crate::stemmer::Stem;
use crate::stopwords::StopwordSet;
use crate::tokenizer::normalize;
use serde::Serialize;
use std::collections::HashMap;

/// An extracted, normalized and stemmed document. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub kind: FileKind,
    pub text: String,
    pub tokens: Vec<String>,
}

impl Document {
    /// Corpus entry: stemmed tokens joined by a single space.
    pub fn entry(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            filename: self.filename.clone(),
            stemmed_word_count: self.tokens.len(),
            stemmed_content: format_stemmed_content(&self.tokens),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub stemmed_word_count: usize,
    pub stemmed_content: String,
}

/// A document left out of the corpus, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedDocument>,
}

impl Corpus {
    pub fn entries(&self) -> Vec<String> {
        self.documents.iter().map(Document::entry).collect()
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.filename.as_str()).collect()
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.documents.iter().map(Document::summary).collect()
    }
}

pub struct CorpusBuilder<'a> {
    stopwords: &'a StopwordSet,
    stemmer: &'a dyn Stem,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(stopwords: &'a StopwordSet, stemmer: &'a dyn Stem) -> Self {
        Self { stopwords, stemmer }
    }

    /// Normalize and stem arbitrary text with this builder's stopwords and stemmer.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.stemmer.stem_all(&normalize(text, self.stopwords))
    }

    /// Runs every file through extraction, normalization and stemming, in
    /// batch order. Files that cannot be extracted are skipped, not fatal.
    pub fn build(&self, batch: &[SourceFile]) -> Corpus {
        let mut corpus = Corpus::default();
        for file in batch {
            let (kind, text) = match extract_source(file) {
                Ok(extracted) => extracted,
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "skipping document");
                    corpus.skipped.push(SkippedDocument { filename: file.filename.clone(), reason: e.to_string() });
                    continue;
                }
            };
            let tokens = self.analyze(&text);
            tracing::debug!(filename = %file.filename, tokens = tokens.len(), "document analyzed");
            corpus.documents.push(Document { filename: file.filename.clone(), kind, text, tokens });
        }
        tracing::info!(documents = corpus.documents.len(), skipped = corpus.skipped.len(), "corpus built");
        corpus
    }
}

/// Comma-joined distinct tokens in first-occurrence order; repeated tokens
/// carry their count, e.g. `makan (3x), ikan`.
pub fn format_stemmed_content(tokens: &[String]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in tokens {
        let count = counts.entry(t.as_str()).or_insert(0);
        if *count == 0 {
            order.push(t.as_str());
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|t| match counts[t] {
            1 => t.to_string(),
            n => format!("{t} ({n}x)"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
