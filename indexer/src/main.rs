use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use telusur_core::batch::read_batch;
use telusur_core::config::EngineConfig;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "telusur-indexer")]
#[command(about = "Build a TF-IDF index over a directory of documents and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Directory of .txt, .docx and .pdf documents
    #[arg(long)]
    input: PathBuf,
    /// JSON engine config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Header-less stopword CSV (built-in Indonesian list if omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Stemmer: indonesian, identity, or a Snowball language name
    #[arg(long)]
    stemmer: Option<String>,
    /// Extra root words for the Indonesian stemmer, one per line
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

impl EngineArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(p) = &self.stopwords {
            config.stopwords_path = Some(p.clone());
        }
        if let Some(s) = &self.stemmer {
            config.stemmer = s.clone();
        }
        if let Some(p) = &self.dictionary {
            config.dictionary_path = Some(p.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, normalize and stem every document and print the per-document summaries
    Process {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Rank the documents against a query by TF-IDF cosine similarity
    Search {
        #[command(flatten)]
        engine: EngineArgs,
        /// Free-text query
        #[arg(long)]
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process { engine } => {
            let pipeline = engine.engine_config()?.pipeline()?;
            let batch = read_batch(&engine.input)?;
            tracing::info!(input = %engine.input.display(), files = batch.len(), "processing batch");
            let out = pipeline.process(&batch)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Search { engine, query } => {
            let pipeline = engine.engine_config()?.pipeline()?;
            let batch = read_batch(&engine.input)?;
            tracing::info!(input = %engine.input.display(), files = batch.len(), "searching batch");
            let out = pipeline.search(&batch, Some(&query))?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
