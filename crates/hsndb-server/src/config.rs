//! Configuration management

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/hsndb";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// ============================================================================
// Search Configuration Constants
// ============================================================================

/// Queries shorter than this (after trimming) never reach the store.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Maximum number of proteins returned by one search.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

/// Maximum number of category rows considered by a category search.
pub const DEFAULT_CATEGORY_MATCH_LIMIT: i64 = 30;

/// Quiet period before a live search is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

// ============================================================================
// Site Configuration Constants
// ============================================================================

pub const DEFAULT_SITE_TITLE: &str = "HSNDB";
pub const DEFAULT_SITE_SUBTITLE: &str = "Human S-Nitrosylation Database";
pub const DEFAULT_ACCENT_COLOR: &str = "#097C7C";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#BE123C";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#F9F9ED";
pub const DEFAULT_RELEASE_NOTE: &str = "HSNDB version 2.0 - 06/25/2019";
pub const DEFAULT_LAST_UPDATE: &str = "Jun 1, 2019";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub search: SearchConfig,
    pub site: SiteConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Apply the bundled schema on startup. The store is normally managed elsewhere.
    pub run_migrations: bool,
    /// Serve an in-memory JSON dataset instead of connecting to PostgreSQL.
    pub fixture_path: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Keyword search limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    pub min_query_len: usize,
    pub result_limit: i64,
    pub category_match_limit: i64,
    pub debounce_ms: u64,
}

/// Branding shared by every page shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub subtitle: String,
    pub accent_color: String,
    pub highlight_color: String,
    pub background_color: String,
    pub release_note: String,
    pub last_update: String,
}

/// Read `key` from the environment, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Load configuration from the process environment and defaults.
    ///
    /// `.env` is not read here; the binary loads it once at startup so the
    /// logging setup sees the same variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: env_string("HSNDB_HOST", DEFAULT_SERVER_HOST),
                port: env_or("HSNDB_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "HSNDB_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            database: DatabaseConfig {
                url: env_string("DATABASE_URL", DEFAULT_DATABASE_URL),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_or(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
                run_migrations: env_or("DATABASE_RUN_MIGRATIONS", false),
                fixture_path: std::env::var("HSNDB_FIXTURE_PATH")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            },
            cors: CorsConfig {
                allowed_origins: env_string("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGIN)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
            },
            search: SearchConfig {
                min_query_len: env_or("HSNDB_SEARCH_MIN_QUERY_LEN", DEFAULT_MIN_QUERY_LEN),
                result_limit: env_or("HSNDB_SEARCH_RESULT_LIMIT", DEFAULT_RESULT_LIMIT),
                category_match_limit: env_or(
                    "HSNDB_SEARCH_CATEGORY_LIMIT",
                    DEFAULT_CATEGORY_MATCH_LIMIT,
                ),
                debounce_ms: env_or("HSNDB_SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            },
            site: SiteConfig {
                title: env_string("HSNDB_SITE_TITLE", DEFAULT_SITE_TITLE),
                subtitle: env_string("HSNDB_SITE_SUBTITLE", DEFAULT_SITE_SUBTITLE),
                accent_color: env_string("HSNDB_SITE_ACCENT_COLOR", DEFAULT_ACCENT_COLOR),
                highlight_color: env_string("HSNDB_SITE_HIGHLIGHT_COLOR", DEFAULT_HIGHLIGHT_COLOR),
                background_color: env_string(
                    "HSNDB_SITE_BACKGROUND_COLOR",
                    DEFAULT_BACKGROUND_COLOR,
                ),
                release_note: env_string("HSNDB_SITE_RELEASE_NOTE", DEFAULT_RELEASE_NOTE),
                last_update: env_string("HSNDB_SITE_LAST_UPDATE", DEFAULT_LAST_UPDATE),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.fixture_path.is_none() && self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        self.search.validate()?;

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl SearchConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_query_len == 0 {
            anyhow::bail!("Search min_query_len must be at least 1");
        }

        if self.result_limit < 1 {
            anyhow::bail!("Search result_limit must be greater than 0");
        }

        if self.category_match_limit < 1 {
            anyhow::bail!("Search category_match_limit must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                run_migrations: false,
                fixture_path: None,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            search: SearchConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            result_limit: DEFAULT_RESULT_LIMIT,
            category_match_limit: DEFAULT_CATEGORY_MATCH_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_SITE_TITLE.to_string(),
            subtitle: DEFAULT_SITE_SUBTITLE.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            release_note: DEFAULT_RELEASE_NOTE.to_string(),
            last_update: DEFAULT_LAST_UPDATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_search_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.min_query_len, 2);
        assert_eq!(search.result_limit, 10);
        assert_eq!(search.category_match_limit, 30);
    }

    #[test]
    fn test_rejects_zero_result_limit() {
        let mut config = Config::default();
        config.search.result_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_min_query_len() {
        let mut config = Config::default();
        config.search.min_query_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_pool_bounds() {
        let mut config = Config::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_connections"));
    }

    #[test]
    fn test_env_or_reads_process_environment() {
        let key = "HSNDB_CONFIG_TEST_RESULT_LIMIT";
        assert_eq!(env_or(key, 10_i64), 10);

        std::env::set_var(key, "25");
        assert_eq!(env_or(key, 10_i64), 25);

        std::env::set_var(key, "many");
        assert_eq!(env_or(key, 10_i64), 10);
        std::env::remove_var(key);
    }

    #[test]
    fn test_fixture_path_allows_empty_database_url() {
        let mut config = Config::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());

        config.database.fixture_path = Some("fixtures/sample.json".to_string());
        assert!(config.validate().is_ok());
    }
}
