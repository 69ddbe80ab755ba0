use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("document is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("failed to extract text: {0}")]
    Extraction(String),

    /// Every document in the batch produced zero stemmed tokens.
    #[error("corpus has an empty vocabulary; no document contains indexable terms")]
    EmptyVocabulary,

    #[error("search requires a query")]
    MissingQuery,

    /// Unknown stemmer name or unreadable engine data file.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
