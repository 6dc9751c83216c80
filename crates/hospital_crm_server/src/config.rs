//! Process configuration from command line flags and environment.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "hospital_crm.sqlite3";

/// Hospital CRM HTTP service.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hospital_crm_server")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file backing the record store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Label reported by the connectivity check
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_path(&self) -> PathBuf {
        let raw = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DATABASE_PATH);
        PathBuf::from(raw.strip_prefix("sqlite://").unwrap_or(raw))
    }
}
