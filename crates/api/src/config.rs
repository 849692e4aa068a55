use crate::auth::jwt::JwtConfig;

/// Which repository backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local tables, lost on restart.
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Self::Memory,
            "postgres" | "" => Self::Postgres,
            other => panic!("STORAGE must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front-end origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `STORAGE`              | `postgres`              |
    ///
    /// plus the `JWT_*` variables read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// On any value that does not parse.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "3000")
                .parse()
                .expect("PORT must be a port number"),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a whole number of seconds"),
            storage: StorageBackend::parse(&env_or("STORAGE", "postgres")),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Comma-separated list; blank entries are dropped.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_defaults_to_postgres() {
        assert_eq!(StorageBackend::parse(""), StorageBackend::Postgres);
        assert_eq!(StorageBackend::parse("Postgres"), StorageBackend::Postgres);
    }

    #[test]
    fn storage_accepts_memory() {
        assert_eq!(StorageBackend::parse(" memory "), StorageBackend::Memory);
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    #[should_panic(expected = "STORAGE must be")]
    fn storage_rejects_unknown_backend() {
        StorageBackend::parse("sqlite");
    }
}
