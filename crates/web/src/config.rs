use anyhow::{Context, Result};
use storage::seed::SeedMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub events_database_url: String,
    pub registrations_database_url: String,
    pub seed_mode: SeedMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed_mode = match lookup("SEED_MODE") {
            Some(value) => value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid SEED_MODE env variable")?,
            None => SeedMode::default(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: match lookup("PORT") {
                Some(port) => port.parse().context("PORT must be a number")?,
                None => 5000,
            },
            events_database_url: lookup("EVENTS_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://events.db".to_string()),
            registrations_database_url: lookup("REGISTRATIONS_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://registrations.db".to_string()),
            seed_mode,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
