//! soundvault - music catalog REST service
//!
//! `soundvault serve` (default) runs the HTTP API, `soundvault migrate`
//! prepares the database and exits, `soundvault seed` loads the demo catalog.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soundvault_api::{build_router, cors_layer, AppState};
use soundvault_common::config::ConfigOverrides;
use soundvault_common::db::{init_database, seed_demo_catalog, PoolSettings};
use soundvault_common::ServerConfig;
use sqlx::SqlitePool;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "soundvault", version, about = "Music catalog REST service")]
struct Cli {
    /// TOML config file (default: <config dir>/soundvault/config.toml)
    #[arg(long, global = true, env = "SOUNDVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Bind port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Connection pool size
    #[arg(long, global = true)]
    max_connections: Option<u32>,

    /// Answer failed listings with an empty page
    #[arg(long, global = true)]
    degraded_reads: bool,

    /// Allowed CORS origin
    #[arg(long, global = true)]
    cors_origin: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Create or migrate the database schema, then exit
    Migrate,
    /// Replace the catalog with the demo data set, then exit
    Seed,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_path: self.db_path.clone(),
            max_connections: self.max_connections,
            acquire_timeout_secs: None,
            degraded_reads: self.degraded_reads.then_some(true),
            cors_origin: self.cors_origin.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::resolve(cli.overrides(), cli.config.as_deref())
        .context("Failed to resolve configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting SoundVault (soundvault-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database path: {}", config.database_path.display());

    let settings = PoolSettings {
        max_connections: config.max_connections,
        acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
    };
    let pool = match init_database(&config.database_path, settings).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool).await,
        Command::Migrate => {
            info!("Migrations complete");
            pool.close().await;
            Ok(())
        }
        Command::Seed => {
            let summary = seed_demo_catalog(&pool).await?;
            info!(
                "Seeded {} users, {} publishers, {} labels, {} artists, {} recordings, {} releases",
                summary.users,
                summary.publishers,
                summary.labels,
                summary.artists,
                summary.recordings,
                summary.releases
            );
            pool.close().await;
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig, pool: SqlitePool) -> Result<()> {
    if config.degraded_reads {
        info!("Degraded reads enabled: failed listings answer with an empty page");
    }

    let state = AppState::new(pool.clone(), config.degraded_reads);
    let app = build_router(state).layer(cors_layer(&config.cors_origin)?);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("soundvault listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
