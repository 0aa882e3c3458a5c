//! Server settings, read once from the environment at startup.
//!
//! | Variable                | Default                      |
//! |-------------------------|------------------------------|
//! | `EXPLORER_HOST`         | `127.0.0.1`                  |
//! | `EXPLORER_PORT`         | `8080`                       |
//! | `DATABASE_URL_RO`       | `explorer.sqlite`            |
//! | `EXPLORER_QUERY_FILE`   | `queries/default-query.sql`  |
//! | `EXPLORER_DATA_DIR`     | `data`                       |
//! | `EXPLORER_OPEN_BROWSER` | `true`                       |
//!
//! `DATABASE_URL_RO` is a path to a SQLite file, which is always opened
//! read-only. A `sqlite://` prefix is accepted and stripped.

use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub query_file: PathBuf,
    pub data_dir: PathBuf,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("explorer.sqlite"),
            query_file: PathBuf::from("queries/default-query.sql"),
            data_dir: PathBuf::from("data"),
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from `lookup`, falling back to the default for
    /// every variable that is unset or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = match lookup("EXPLORER_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("EXPLORER_PORT={} is not a port number, using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };
        let open_browser = match lookup("EXPLORER_OPEN_BROWSER") {
            Some(raw) => !matches!(raw.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"),
            None => defaults.open_browser,
        };

        Self {
            host: lookup("EXPLORER_HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_URL_RO")
                .map(|url| PathBuf::from(url.trim_start_matches("sqlite://")))
                .unwrap_or(defaults.database_path),
            query_file: lookup("EXPLORER_QUERY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.query_file),
            data_dir: lookup("EXPLORER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            open_browser,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]), ServerConfig::default());
        assert_eq!(ServerConfig::default().url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn variables_override_defaults() {
        let config = from_pairs(&[
            ("EXPLORER_HOST", "0.0.0.0"),
            ("EXPLORER_PORT", "9000"),
            ("DATABASE_URL_RO", "sqlite:///srv/f1.sqlite"),
            ("EXPLORER_OPEN_BROWSER", "false"),
        ]);
        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.database_path, PathBuf::from("/srv/f1.sqlite"));
        assert!(!config.open_browser);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(from_pairs(&[("EXPLORER_PORT", "http")]).port, 8080);
    }
}
