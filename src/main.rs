// src/main.rs

use career_api::ai::GeminiClient;
use career_api::config::Config;
use career_api::routes;
use career_api::state::AppState;
use career_api::store::{Datastore, MemoryStore, PgStore};
use dotenvy::dotenv;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set: exams will use the fallback question bank");
    }

    let fallback = match &config.snapshot_path {
        Some(path) => match MemoryStore::load(path).await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Failed to load fallback snapshot {}: {}", path.display(), e);
                MemoryStore::new()
            }
        },
        None => MemoryStore::new(),
    };

    let primary = match &config.database_url {
        Some(url) => connect_database(url).await.map(PgStore::new),
        None => {
            tracing::warn!("DATABASE_URL not set: running on the in-memory store");
            None
        }
    };

    let store = Arc::new(Datastore::new(primary, fallback));
    let generator = Arc::new(GeminiClient::from_config(&config));

    // Create AppState
    let state = AppState::new(config.clone(), generator, store);

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

/// Connects with retry and applies migrations. Returns `None` when the database stays
/// unreachable, leaving the service on its fallback store.
async fn connect_database(url: &str) -> Option<PgPool> {
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!(
                        "Database unreachable after 5 retries, continuing on fallback store: {}",
                        e
                    );
                    return None;
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        return None;
    }
    tracing::info!("Migrations applied successfully.");

    Some(pool)
}
