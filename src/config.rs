use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

/// Which backend the auth middleware resolves identities with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    Session,
    Basic,
}

impl AuthKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthKind::Session => "session",
            AuthKind::Basic => "basic",
        }
    }
}

/// Where session records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStoreKind {
    Memory,
    Database,
}

impl SessionStoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStoreKind::Memory => "memory",
            SessionStoreKind::Database => "database",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Name of the session cookie. `None` disables cookie lookup entirely.
    pub session_name: Option<String>,
    /// Session lifetime in seconds. Zero or negative disables expiry.
    pub session_duration_secs: i64,
    pub session_store: SessionStoreKind,
    pub auth_kind: AuthKind,
    /// Paths exempt from authentication, consulted by the path guard.
    pub exempt_paths: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/authgate".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| anyhow!("Invalid BIND_ADDR value"))?;

        // An explicitly empty SESSION_NAME disables cookie-based lookup.
        let session_name = match env::var("SESSION_NAME") {
            Ok(name) if name.trim().is_empty() => None,
            Ok(name) => Some(name),
            Err(_) => Some("session_id".to_string()),
        };

        // Non-numeric or absent values fall back to "never expires".
        let session_duration_secs = env::var("SESSION_DURATION")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0);

        let session_store = match env::var("SESSION_STORE")
            .unwrap_or_else(|_| "memory".to_string())
            .as_str()
        {
            "memory" => SessionStoreKind::Memory,
            "database" | "db" => SessionStoreKind::Database,
            other => return Err(anyhow!("Invalid SESSION_STORE value: {}", other)),
        };

        let auth_kind = match env::var("AUTH_TYPE")
            .unwrap_or_else(|_| "session".to_string())
            .as_str()
        {
            "session" => AuthKind::Session,
            "basic" => AuthKind::Basic,
            other => return Err(anyhow!("Invalid AUTH_TYPE value: {}", other)),
        };

        // Empty by default: the guard fails closed and every guarded route
        // requires authentication unless operators opt paths out.
        let exempt_paths = env::var("AUTH_EXEMPT_PATHS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Config {
            database_url,
            bind_addr,
            session_name,
            session_duration_secs,
            session_store,
            auth_kind,
            exempt_paths,
        })
    }
}
