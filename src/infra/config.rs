//! Centralized configuration (environment variables + defaults).
//!
//! Values may come from the process environment or a `.env` file loaded by [`Settings::from_env`].

use anyhow::{anyhow, Context};
use std::net::SocketAddr;

pub const DEFAULT_APP_NAME: &str = "Person REST API";
pub const DEFAULT_DESCRIPTION: &str =
    "A RESTful API for managing Person objects with full CRUD operations";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which storage backend the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Postgres,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Memory => "memory",
            StorageKind::Postgres => "postgres",
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageKind::Memory),
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            other => Err(anyhow!(
                "STORAGE_BACKEND must be 'memory' or 'postgres' (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Fully resolved settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub description: String,
    pub debug: bool,
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub database_echo: bool,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Settings {
    /// Loads `.env` (if present) and reads every variable.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_url = database_url();
        let storage = match var("STORAGE_BACKEND") {
            Some(v) => v.parse()?,
            None if database_url.is_some() => StorageKind::Postgres,
            None => StorageKind::Memory,
        };
        if storage == StorageKind::Postgres && database_url.is_none() {
            return Err(anyhow!(
                "DATABASE_URL must be set when STORAGE_BACKEND=postgres"
            ));
        }

        Ok(Self {
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: var("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            description: var("APP_DESCRIPTION").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            debug: flag("DEBUG")?,
            storage,
            database_url,
            database_max_connections: database_max_connections()?,
            database_echo: flag("DATABASE_ECHO")?,
            bind_addr: bind_addr()?,
            log_format: log_format()?,
        })
    }

    /// Default `tracing` filter directive when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        let level = if self.debug { "debug" } else { "info" };
        let sqlx = if self.database_echo { "info" } else { "warn" };
        format!("{level},sqlx={sqlx},tower_http={level}")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            debug: false,
            storage: StorageKind::Memory,
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            database_echo: false,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Database URL (optional; required only by the postgres backend).
pub fn database_url() -> Option<String> {
    var("DATABASE_URL")
}

pub fn database_max_connections() -> anyhow::Result<u32> {
    match var("DATABASE_MAX_CONNECTIONS") {
        Some(v) => Ok(v
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?
            .max(1)),
        None => Ok(DEFAULT_MAX_CONNECTIONS),
    }
}

pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    raw.parse()
        .with_context(|| format!("BIND_ADDR must be a socket address (got '{}')", raw))
}

pub fn log_format() -> anyhow::Result<LogFormat> {
    match var("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
        None | Some("pretty") | Some("text") => Ok(LogFormat::Pretty),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(anyhow!("LOG_FORMAT must be 'pretty' or 'json' (got '{}')", other)),
    }
}

fn flag(name: &str) -> anyhow::Result<bool> {
    match var(name).map(|v| v.to_lowercase()).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => Err(anyhow!("{} must be a boolean (got '{}')", name, other)),
    }
}

/// Reads a variable, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
