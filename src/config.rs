use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the environment (a `.env` file is honoured).
///
/// | Env Var            | Default                 |
/// |--------------------|-------------------------|
/// | `HOST`             | `0.0.0.0`               |
/// | `PORT`             | `3000`                  |
/// | `CORS_ORIGINS`     | `http://localhost:5173` |
/// | `INITIAL_TEAMS`    | `2`                     |
/// | `INITIAL_IN_TIMES` | `2`                     |
/// | `SESSION_IDLE_SECS`| `3600`                  |
///
/// `CORS_ORIGINS=*` allows any origin.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Teams a new session starts with.
    pub initial_teams: usize,
    /// In-times a new session starts with.
    pub initial_in_times: usize,
    /// Seconds a session may sit untouched before it is discarded.
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            initial_teams: 2,
            initial_in_times: 2,
            session_idle_secs: 3600,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        Ok(Self {
            host: parse_var("HOST", defaults.host)?,
            port: parse_var("PORT", defaults.port)?,
            cors_origins,
            initial_teams: parse_var("INITIAL_TEAMS", defaults.initial_teams)?.max(1),
            initial_in_times: parse_var("INITIAL_IN_TIMES", defaults.initial_in_times)?.max(1),
            session_idle_secs: parse_var("SESSION_IDLE_SECS", defaults.session_idle_secs)?.max(1),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}
