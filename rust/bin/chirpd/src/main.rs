//! `chirpd` — the Chirp server binary.
//!
//! Usage:
//!   chirpd -c <config-name-or-path> [--listen <addr>]
//!
//! The config name resolves to `/etc/chirp/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod flash;
mod login;
mod pages;
mod routes;
mod session;
mod timeline_pages;


use std::sync::Arc;

use clap::Parser;
use tracing::info;

use chirp_auth::{AuthConfig, AuthService};
use chirp_timeline::TweetStore;

use config::ServerConfig;
use routes::AppState;

/// Chirp server.
#[derive(Parser, Debug)]
#[command(name = "chirpd", about = "Chirp server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Verify configuration is valid.
    bootstrap::verify_config(&server_config)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let sql: Arc<dyn chirp_sql::SQLStore> = Arc::new(
        chirp_sql::SqliteStore::open(&data_dir.join("chirp.db"))
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let auth_config = AuthConfig {
        jwt_secret: server_config.jwt.secret.clone(),
        session_ttl: server_config.jwt.expire_secs as i64,
    };
    let auth = AuthService::new(Arc::clone(&sql), auth_config)
        .map_err(|e| anyhow::anyhow!("failed to init auth service: {}", e))?;
    info!("Auth service initialized");

    let tweets = Arc::new(
        TweetStore::new(Arc::clone(&sql))
            .map_err(|e| anyhow::anyhow!("failed to init tweet store: {}", e))?,
    );
    info!("Tweet store initialized");

    let templates = Arc::new(
        pages::build_env().map_err(|e| anyhow::anyhow!("failed to load templates: {}", e))?,
    );

    // Build application state.
    let app_state = AppState {
        config: Arc::new(server_config),
        auth,
        tweets,
        templates,
    };

    // Build router.
    let app = routes::build_router(app_state);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("Chirp server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
