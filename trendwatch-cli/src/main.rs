//! trendwatch CLI - serve the trends API and manage its store
//!
//! Subcommands:
//! - `serve`: run migrations, then serve HTTP until shutdown
//! - `migrate`: create the trends table and indexes, then exit
//! - `mock`: insert synthetic trend rows from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use trendwatch_server::db::repos::MAX_MOCK_COUNT;
use trendwatch_server::db::{self, TrendRepo};
use trendwatch_server::{run_server, Config, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "trendwatch",
    version,
    about = "REST API over the trends table",
    long_about = "Serve CRUD, search, filter, and statistics endpoints for trend \
                  records backed by PostgreSQL. Store credentials come from the \
                  PG_* environment variables or DATABASE_URL."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run migrations and serve the HTTP API
    Serve(ServeArgs),
    /// Create the trends table and indexes, then exit
    Migrate,
    /// Insert synthetic trend rows
    Mock(MockArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to bind the HTTP server to (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Bind address (overrides HOST)
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args, Debug)]
struct MockArgs {
    /// Number of rows to insert
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=MAX_MOCK_COUNT as i64))]
    count: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    let config = Config::from_env();

    match cli.command {
        Commands::Serve(args) => serve(config, args).await,
        Commands::Migrate => migrate(config).await,
        Commands::Mock(args) => mock(config, args).await,
    }
}

async fn serve(mut config: Config, args: ServeArgs) -> Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.host = bind;
    }

    let pool = db::create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("could not connect to the database")?;
    db::migrations::run(&pool).await.context("migrations failed")?;

    let server_config = ServerConfig {
        bind_addr: config.bind_addr().context("invalid bind address")?,
    };
    run_server(pool, server_config).await?;

    Ok(())
}

async fn migrate(config: Config) -> Result<()> {
    let pool = db::create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("could not connect to the database")?;
    db::migrations::run(&pool).await.context("migrations failed")?;
    pool.close().await;

    info!("Migrations applied");
    Ok(())
}

async fn mock(config: Config, args: MockArgs) -> Result<()> {
    let pool = db::create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("could not connect to the database")?;
    db::migrations::run(&pool).await.context("migrations failed")?;

    let inserted = TrendRepo::new(&pool)
        .insert_mocks(args.count)
        .await
        .context("mock insert failed")?;
    pool.close().await;

    info!("Inserted {} mock trends", inserted);
    Ok(())
}
