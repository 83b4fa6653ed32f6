// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use url::Url;

/// Minimum percentage required to pass an exam.
pub const PASSING_SCORE_PERCENTAGE: u32 = 60;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    /// Primary datastore. When unset the service runs on the in-memory store only.
    pub database_url: Option<String>,
    /// Gemini API key. Provider calls fail fast without it.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// JSON snapshot file backing the fallback store.
    pub snapshot_path: Option<PathBuf>,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = non_empty_var("DATABASE_URL");
        let gemini_api_key = non_empty_var("GEMINI_API_KEY");

        let gemini_model =
            non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_base_url = non_empty_var("GEMINI_BASE_URL")
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Ignoring invalid GEMINI_BASE_URL '{}': {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(default_gemini_base_url);

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let allowed_origins = non_empty_var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:5173".to_string(),
                ]
            });

        let snapshot_path = non_empty_var("STORE_SNAPSHOT_PATH").map(PathBuf::from);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            port,
            allowed_origins,
            snapshot_path,
            rust_log,
            log_dir,
        }
    }

    /// Configuration for tests and local tooling: no datastore, no provider key.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: default_gemini_base_url(),
            port: 0,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            snapshot_path: None,
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_gemini_base_url() -> Url {
    // Constant literal, always parses.
    Url::parse(DEFAULT_GEMINI_BASE_URL).expect("default Gemini base URL is valid")
}
