use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// Contains parameters for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The interface to bind to (e.g., "0.0.0.0").
    pub host: String,
    /// The TCP port the web server listens on.
    pub port: u16,
}

/// Contains parameters for the PostgreSQL connection pool.
/// The connection string itself comes from the `DATABASE_URL` environment
/// variable, not from this file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// The maximum number of pooled connections.
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up, in seconds.
    pub acquire_timeout_secs: u64,
}
