mod dictionary;
mod indonesian;

pub use dictionary::RootDictionary;
pub use indonesian::IndonesianStemmer;

use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;
use std::str::FromStr;

/// Reduces a single token to its root form. Implementations must be pure:
/// no state is shared between calls.
pub trait Stem: Send + Sync {
    fn stem(&self, token: &str) -> String;

    fn stem_all(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|t| self.stem(t)).collect()
    }
}

/// Leaves every token unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stem for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Snowball stemmers for the languages `rust-stemmers` ships.
pub struct SnowballStemmer {
    stemmer: Stemmer,
}

impl SnowballStemmer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { stemmer: Stemmer::create(algorithm) }
    }
}

impl Stem for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StemmerKind {
    #[default]
    Indonesian,
    Snowball(Algorithm),
    Identity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStemmer(pub String);

impl fmt::Display for UnknownStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown stemmer: {}", self.0)
    }
}

impl std::error::Error for UnknownStemmer {}

impl FromStr for StemmerKind {
    type Err = UnknownStemmer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "indonesian" | "id" => StemmerKind::Indonesian,
            "identity" | "none" => StemmerKind::Identity,
            "arabic" => StemmerKind::Snowball(Algorithm::Arabic),
            "danish" => StemmerKind::Snowball(Algorithm::Danish),
            "dutch" => StemmerKind::Snowball(Algorithm::Dutch),
            "english" | "en" => StemmerKind::Snowball(Algorithm::English),
            "finnish" => StemmerKind::Snowball(Algorithm::Finnish),
            "french" => StemmerKind::Snowball(Algorithm::French),
            "german" => StemmerKind::Snowball(Algorithm::German),
            "greek" => StemmerKind::Snowball(Algorithm::Greek),
            "hungarian" => StemmerKind::Snowball(Algorithm::Hungarian),
            "italian" => StemmerKind::Snowball(Algorithm::Italian),
            "norwegian" => StemmerKind::Snowball(Algorithm::Norwegian),
            "portuguese" => StemmerKind::Snowball(Algorithm::Portuguese),
            "romanian" => StemmerKind::Snowball(Algorithm::Romanian),
            "russian" => StemmerKind::Snowball(Algorithm::Russian),
            "spanish" => StemmerKind::Snowball(Algorithm::Spanish),
            "swedish" => StemmerKind::Snowball(Algorithm::Swedish),
            "tamil" => StemmerKind::Snowball(Algorithm::Tamil),
            "turkish" => StemmerKind::Snowball(Algorithm::Turkish),
            other => return Err(UnknownStemmer(other.to_string())),
        };
        Ok(kind)
    }
}

/// Builds the stemmer for `kind`. The dictionary is only consulted by the
/// Indonesian stemmer.
pub fn build_stemmer(kind: StemmerKind, dictionary: RootDictionary) -> Box<dyn Stem> {
    match kind {
        StemmerKind::Indonesian => Box::new(IndonesianStemmer::new(dictionary)),
        StemmerKind::Snowball(algorithm) => Box::new(SnowballStemmer::new(algorithm)),
        StemmerKind::Identity => Box::new(IdentityStemmer),
    }
}
