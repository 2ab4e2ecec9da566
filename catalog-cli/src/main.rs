//! catalog: run the product/category catalog service

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_server::db;
use catalog_server::{run_server, ServerConfig};

/// Fallback when neither --database-url nor DATABASE_URL is set.
const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db";

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Product/category catalog HTTP service")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// SQLite database URL (falls back to DATABASE_URL, then sqlite://catalog.db)
    #[arg(long)]
    database_url: Option<String>,

    /// Allow any CORS origin instead of localhost only
    #[arg(long)]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    tracing::info!(%database_url, "Opening database");
    let pool = db::create_pool(&database_url)
        .await
        .with_context(|| format!("failed to open database at {database_url}"))?;

    db::schema::ensure(&pool)
        .await
        .context("failed to bootstrap schema")?;

    let config = ServerConfig {
        bind_addr: cli.bind,
        cors_permissive: cli.cors_permissive,
    };

    run_server(pool, config).await.context("server error")?;
    Ok(())
}
