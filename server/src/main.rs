use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use telusur_core::config::EngineConfig;
use tracing_subscriber::{fmt, EnvFilter};
use telusur_server::{build_app, ServerConfig};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Directory where the uploaded batch is stored
    #[arg(long, default_value = "./uploads")]
    upload_dir: PathBuf,
    /// Header-less stopword CSV (built-in Indonesian list if omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Stemmer: indonesian, identity, or a Snowball language name
    #[arg(long, default_value = "indonesian")]
    stemmer: String,
    /// Extra root words for the Indonesian stemmer, one per line
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        upload_dir: args.upload_dir,
        engine: EngineConfig { stopwords_path: args.stopwords, stemmer: args.stemmer, dictionary_path: args.dictionary },
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
