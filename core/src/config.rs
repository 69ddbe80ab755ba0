use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::stemmer::{build_stemmer, RootDictionary, StemmerKind};
use crate::stopwords::StopwordSet;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where stopwords and stemming data come from. Loaded fresh for every
/// request so edits to the files apply without a restart.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Header-less CSV of stopwords; the built-in Indonesian list when unset
    /// or when the file does not exist.
    pub stopwords_path: Option<PathBuf>,
    /// `indonesian`, `identity`, or a Snowball language name.
    pub stemmer: String,
    /// Extra root words (one per line) for the Indonesian stemmer.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { stopwords_path: None, stemmer: "indonesian".into(), dictionary_path: None }
    }
}

impl EngineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading config {}: {e}", path.display())))?;
        serde_json::from_str(&text).map_err(|e| Error::Config(format!("parsing config {}: {e}", path.display())))
    }

    pub fn stemmer_kind(&self) -> Result<StemmerKind> {
        self.stemmer.parse::<StemmerKind>().map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load_stopwords(&self) -> Result<StopwordSet> {
        let Some(path) = &self.stopwords_path else {
            return Ok(StopwordSet::indonesian());
        };
        match StopwordSet::from_path(path) {
            Ok(set) => Ok(set),
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "stopword file not found; using built-in list");
                Ok(StopwordSet::indonesian())
            }
            Err(e) => Err(Error::Config(format!("loading stopwords from {}: {e}", path.display()))),
        }
    }

    pub fn load_dictionary(&self) -> Result<RootDictionary> {
        let mut dictionary = RootDictionary::builtin();
        if let Some(path) = &self.dictionary_path {
            let added = dictionary
                .extend_from_path(path)
                .map_err(|e| Error::Config(format!("loading root dictionary from {}: {e}", path.display())))?;
            tracing::debug!(added, total = dictionary.len(), "root dictionary extended");
        }
        Ok(dictionary)
    }

    pub fn pipeline(&self) -> Result<Pipeline> {
        let kind = self.stemmer_kind()?;
        let stopwords = self.load_stopwords()?;
        let stemmer = match kind {
            StemmerKind::Indonesian => build_stemmer(kind, self.load_dictionary()?),
            _ => build_stemmer(kind, RootDictionary::empty()),
        };
        Ok(Pipeline::new(stopwords, stemmer))
    }
}
