use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend, served for unknown routes
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_log_filter() -> String {
    "info,sqlx=warn,sea_orm=warn".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "db/reports.db"

[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[logging]
filter = "info,sqlx=warn,sea_orm=warn"
"#;

/// Look for config.toml next to the executable
pub fn find_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    config_path.exists().then_some(config_path)
}

/// Load configuration from the given file, or the embedded default when `None`
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CONFIG.to_string(),
    };
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) => exe_dir.join(db_path),
            None => db_path.to_path_buf(),
        },
        Err(_) => db_path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.database.path, "db/reports.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.filter, "info,sqlx=warn,sea_orm=warn");
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/x.db"));
    }
}
