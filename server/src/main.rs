use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve answers over HTTP from a corpus loaded at startup
#[derive(Parser)]
#[command(name = "questions-server")]
struct Args {
    /// Corpus directory path
    #[arg(long, default_value = "./corpus")]
    corpus: String,
    /// Only load files with this extension
    #[arg(long)]
    ext: Option<String>,
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app = server::build_app(&args.corpus, args.ext.as_deref())
        .with_context(|| format!("loading corpus from {}", args.corpus))?;

    let addr = SocketAddr::new(args.host, args.port);
    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, corpus = %args.corpus, "answering questions");
    axum::serve(listener, app).await?;
    Ok(())
}
