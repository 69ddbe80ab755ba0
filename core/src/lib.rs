pub mod batch;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;
pub mod pipeline;
pub mod rank;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use corpus::{Corpus, CorpusBuilder, Document, DocumentSummary, SkippedDocument};
pub use error::{Error, Result};
pub use extract::{FileKind, SourceFile};
pub use index::{DocId, DocumentTermMatrix, SparseVector, TermId, TfIdfIndex};
pub use pipeline::{Pipeline, ProcessOutput, SearchOutput};
pub use rank::{RankedDocument, Ranker};
pub use stemmer::Stem;
pub use stopwords::StopwordSet;
