/**
 * Server Configuration
 *
 * Loads server settings and the optional PostgreSQL connection from
 * environment variables, with sensible defaults for local development.
 *
 * # Configuration Sources
 *
 * - `SERVER_PORT` - listen port (default 3001)
 * - `DATABASE_URL` - PostgreSQL connection string (optional)
 * - `STORE_TIMEOUT_MS` - per-operation store timeout in milliseconds
 * - `RELAY_CHANNEL_CAPACITY` - per-room broadcast buffer size
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. If the
 * database is unreachable the server falls back to an in-memory store and
 * continues.
 */

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use super::super::relay::DEFAULT_ROOM_CAPACITY;
use super::super::store::{DocumentStore, MemoryStore, PgStore};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings resolved from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the HTTP server binds to
    pub port: u16,
    /// Timeout applied to each store operation
    pub store_timeout: Duration,
    /// Broadcast buffer size for each relay room
    pub relay_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults; nothing here can
    /// fail startup.
    pub fn from_env() -> Self {
        let port = env_parse("SERVER_PORT", DEFAULT_PORT);
        let timeout_ms: u64 = env_parse("STORE_TIMEOUT_MS", 5_000);
        let relay_capacity = env_parse("RELAY_CHANNEL_CAPACITY", DEFAULT_ROOM_CAPACITY);

        Self {
            port,
            store_timeout: Duration::from_millis(timeout_ms),
            relay_capacity,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("[Config] {} is not a valid value, using default", name);
            default
        }),
        Err(_) => default,
    }
}

/// Load the document store
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// A [`PgStore`] when the database is successfully configured, otherwise an
/// in-memory store. Errors are logged but never abort startup; without a
/// database, share links simply do not survive a restart.
pub async fn load_store(config: &ServerConfig) -> Arc<dyn DocumentStore> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("[Config] DATABASE_URL not set, using in-memory store");
            return Arc::new(MemoryStore::new());
        }
    };

    tracing::info!("[Config] Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Config] Failed to create database connection pool: {:?}", e);
            tracing::warn!("[Config] Falling back to in-memory store");
            return Arc::new(MemoryStore::new());
        }
    };

    tracing::info!("[Config] Database connection pool created successfully");

    // Run migrations
    tracing::info!("[Config] Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("[Config] Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("[Config] Failed to run database migrations: {}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("[Config] Continuing without migrations - schema might not be up to date");
        }
    }

    Arc::new(PgStore::with_timeout(pool, config.store_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Avoid polluting other tests: only read, never set, env here.
        let config = ServerConfig::from_env();
        assert!(config.port > 0);
        assert!(config.relay_capacity > 0);
        assert!(config.store_timeout >= Duration::from_millis(1));
    }
}
