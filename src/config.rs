use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const PRODUCTION_DOMAIN: &str = "https://boycott.api.yaqiin.org";

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    PRODUCTION_DOMAIN,
    "http://localhost:3000",
    "http://localhost:3001",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    /// Neither flag set: strict CORS, local base URL.
    Default,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub environment: Environment,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => 3000,
        };

        let environment = if lookup("VERCEL").is_some() {
            Environment::Production
        } else {
            match lookup("APP_ENV").as_deref().map(str::trim) {
                Some("production") => Environment::Production,
                Some("development") => Environment::Development,
                _ => Environment::Default,
            }
        };

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))),
            environment,
            allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Public base URL advertised in the API docs.
    pub fn base_url(&self) -> String {
        match self.environment {
            Environment::Production => PRODUCTION_DOMAIN.to_string(),
            _ => format!("http://localhost:{}", self.port),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.environment, Environment::Default);
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.allowed_origins, DEFAULT_ALLOWED_ORIGINS);
        assert!(config.data_dir.ends_with("data"));
        assert!(!config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATA_DIR", "/srv/catalog"),
            ("APP_ENV", "development"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("/srv/catalog"));
        assert!(config.is_development());
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.allowed_origins, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_production_base_url() {
        let config = config_from(&[("APP_ENV", "production")]).unwrap();
        assert_eq!(config.base_url(), PRODUCTION_DOMAIN);

        let vercel = config_from(&[("VERCEL", "1"), ("APP_ENV", "development")]).unwrap();
        assert_eq!(vercel.environment, Environment::Production);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
